mod api_types;
mod config;
mod error;
mod fetch;
mod hotel;
mod meta_review;
mod models;
mod orchestrator;
mod out_models;
mod render;
mod social;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use config::{resolve_config, WidgetContext};
use orchestrator::run_widget;

/// Hotel Review Widget - renders TrustYou review summaries and social posts
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for index.html and view_models.json (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Path to widget config file (overrides HOTEL_WIDGET_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of .hbs files replacing the built-in templates by name
    #[arg(short, long)]
    template_dir: Option<PathBuf>,

    /// TrustYou API key (overrides config file and HOTEL_WIDGET_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting hotel_review_widget");

    let args = Args::parse();

    let cfg = resolve_config(args.config.as_deref(), args.api_key.as_deref())?;
    debug!(
        "Config resolved - api_base={}, version={}, review_lang={}",
        cfg.api.base_url, cfg.api.version, cfg.api.review_lang
    );

    let ctx = WidgetContext::from_config(cfg);
    run_widget(ctx, args.template_dir.as_deref(), &args.output_dir).await
}
