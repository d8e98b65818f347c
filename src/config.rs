use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::models::{HotelData, LanguageNames};

/// Contents of `widget.yaml`. Every field has a default so a partial file works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub hotel: HotelData,
    pub api: ApiSettings,
    pub language_names: LanguageNames,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            hotel: HotelData::default(),
            api: ApiSettings::default(),
            language_names: LanguageNames::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub key: String,
    /// Always pin the JSON widget version developed against.
    pub version: String,
    pub review_lang: String,
    pub social_page_size: u32,
    pub social_languages: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: "http://api.trustyou.com".to_string(),
            // TrustYou demo key; request a real one for production use
            key: "a06294d3-4d58-45c8-97a1-5c905922e03a".to_string(),
            version: "5.25".to_string(),
            review_lang: "en".to_string(),
            social_page_size: 2,
            social_languages: vec!["en".to_string()],
        }
    }
}

impl WidgetConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("parsing widget config YAML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading widget config {}", path.display()))?;
        Self::from_yaml_str(&raw).with_context(|| format!("in {}", path.display()))
    }
}

/// Resolve the config file: CLI arg > HOTEL_WIDGET_CONFIG > ./widget.yaml.
/// Falls back to the built-in demo hotel when no file is present.
pub fn resolve_config(cli_path: Option<&Path>, api_key: Option<&str>) -> Result<WidgetConfig> {
    let path = match cli_path {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var("HOTEL_WIDGET_CONFIG").ok().map(PathBuf::from),
    };

    let mut cfg = match path {
        Some(p) => {
            debug!("Using config file: {}", p.display());
            WidgetConfig::load(&p)?
        }
        None if Path::new("widget.yaml").exists() => {
            debug!("Using config file from working directory: widget.yaml");
            WidgetConfig::load(Path::new("widget.yaml"))?
        }
        None => {
            info!("No config file found, using built-in defaults");
            WidgetConfig::default()
        }
    };

    let env_key = std::env::var("HOTEL_WIDGET_API_KEY").ok();
    if let Some(key) = api_key.map(str::to_string).or(env_key) {
        debug!("API key overridden from CLI/environment");
        cfg.api.key = key;
    }

    Ok(cfg)
}

/// Everything a pipeline run needs, built once at startup and passed explicitly.
#[derive(Debug, Clone)]
pub struct WidgetContext {
    pub hotel: HotelData,
    pub api: ApiSettings,
    pub language_names: LanguageNames,
}

impl WidgetContext {
    pub fn from_config(cfg: WidgetConfig) -> Self {
        WidgetContext {
            hotel: cfg.hotel,
            api: cfg.api,
            language_names: cfg.language_names,
        }
    }
}
