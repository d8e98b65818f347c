use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::api_types::{ApiMetaReview, ApiSocial};
use crate::config::WidgetContext;
use crate::error::WidgetError;
use crate::fetch::{fetch_review_summary, fetch_social, Fetcher, HttpFetcher, REVIEW_SUMMARY, SOCIAL};
use crate::hotel::{hotel_info, hotel_title, location_frame_url};
use crate::meta_review::reviews_tab;
use crate::render::{MountPoint, Page, Renderer, TemplateId};
use crate::social::social_tab;

/// What one response chain contributes to the page.
#[derive(Debug, Clone, Default)]
pub struct ChainOutput {
    pub fragments: Vec<(MountPoint, String)>,
    pub location_src: Option<String>,
    pub view_models: Map<String, Value>,
}

impl ChainOutput {
    fn push<T: serde::Serialize>(
        &mut self,
        renderer: &Renderer,
        mount: MountPoint,
        template: TemplateId,
        key: &str,
        view: &T,
    ) -> Result<(), WidgetError> {
        self.fragments.push((mount, renderer.render(template, view)?));
        // non-finite floats come out as null here, same as in the template
        let value = serde_json::to_value(view)
            .map_err(|e| WidgetError::boundary(format!("serializing {key}: {e}")))?;
        self.view_models.insert(key.to_string(), value);
        Ok(())
    }
}

/// Hotel title, hotel info, reviews tab and location frame from one review summary.
pub fn review_summary_views(
    ctx: &WidgetContext,
    renderer: &Renderer,
    summary: &ApiMetaReview,
) -> Result<ChainOutput, WidgetError> {
    let mut out = ChainOutput::default();
    out.push(
        renderer,
        MountPoint::HotelTitle,
        TemplateId::HotelTitle,
        "hotelTitle",
        &hotel_title(&ctx.hotel, summary),
    )?;
    out.push(
        renderer,
        MountPoint::HotelInfo,
        TemplateId::HotelInfo,
        "hotelInfo",
        &hotel_info(&ctx.hotel, summary),
    )?;
    out.push(
        renderer,
        MountPoint::ReviewSummary,
        TemplateId::ReviewsTab,
        "reviewsTab",
        &reviews_tab(summary, &ctx.language_names),
    )?;
    out.location_src = Some(location_frame_url(&ctx.api.base_url, &ctx.hotel.ty_id));
    Ok(out)
}

pub fn social_views(renderer: &Renderer, social: &ApiSocial) -> Result<ChainOutput, WidgetError> {
    let mut out = ChainOutput::default();
    out.push(renderer, MountPoint::Social, TemplateId::SocialTab, "socialTab", &social_tab(social)?)?;
    Ok(out)
}

async fn review_summary_chain(
    fetcher: Arc<dyn Fetcher>,
    ctx: Arc<WidgetContext>,
    renderer: Arc<Renderer>,
) -> Result<ChainOutput, WidgetError> {
    let start = std::time::Instant::now();
    let summary = fetch_review_summary(fetcher.as_ref(), &ctx).await?;
    debug!(
        "Review summary decoded - reviews={}, categories={}, languages={}",
        summary.reviews_count,
        summary.category_list.len(),
        summary.language_meta_review_list.len()
    );
    let out = review_summary_views(&ctx, &renderer, &summary)?;
    info!("Review summary chain completed - duration={:.2}s", start.elapsed().as_secs_f32());
    Ok(out)
}

async fn social_chain(
    fetcher: Arc<dyn Fetcher>,
    ctx: Arc<WidgetContext>,
    renderer: Arc<Renderer>,
) -> Result<ChainOutput, WidgetError> {
    let start = std::time::Instant::now();
    let social = fetch_social(fetcher.as_ref(), &ctx).await?;
    debug!("Social feed decoded - sources={}", social.source_list.len());
    let out = social_views(&renderer, &social)?;
    info!("Social chain completed - duration={:.2}s", start.elapsed().as_secs_f32());
    Ok(out)
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub page: Page,
    pub view_models: Map<String, Value>,
    pub failures: Vec<String>,
}

/// Runs both chains as independent tasks. There is no ordering
/// between them: each result is applied to the page as soon as it arrives,
/// and a failed chain only leaves its own mount points empty.
pub async fn run_chains(
    fetcher: Arc<dyn Fetcher>,
    ctx: Arc<WidgetContext>,
    renderer: Arc<Renderer>,
) -> RunReport {
    let mut tasks = JoinSet::new();
    {
        let (f, c, r) = (fetcher.clone(), ctx.clone(), renderer.clone());
        tasks.spawn(async move { (REVIEW_SUMMARY, review_summary_chain(f, c, r).await) });
    }
    tasks.spawn(async move { (SOCIAL, social_chain(fetcher, ctx, renderer).await) });

    let mut report = RunReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((chain, Ok(out))) => {
                debug!("Applying {} chain - fragments={}", chain, out.fragments.len());
                for (mount, markup) in &out.fragments {
                    debug!("Appending to #{} - bytes={}", mount.id(), markup.len());
                    report.page.append(*mount, markup);
                }
                if let Some(src) = out.location_src {
                    report.page.set_location_src(src);
                }
                report.view_models.extend(out.view_models);
            }
            Ok((chain, Err(e))) => {
                error!("{} chain failed - {}", chain, e);
                report.failures.push(format!("{chain}: {e}"));
            }
            Err(e) => {
                error!("Chain task aborted - {}", e);
                report.failures.push(format!("task aborted: {e}"));
            }
        }
    }
    report
}

pub async fn run_widget(ctx: WidgetContext, template_dir: Option<&Path>, output_dir: &str) -> Result<()> {
    let pipeline_start = std::time::Instant::now();
    info!("Pipeline started - hotel={}, ty_id={}", ctx.hotel.name, ctx.hotel.ty_id);

    let client = Client::builder().build()?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(client));
    let renderer = Arc::new(Renderer::new(template_dir)?);
    let ctx = Arc::new(ctx);

    let report = run_chains(fetcher, ctx.clone(), renderer.clone()).await;

    // Whatever rendered is written, even if one chain failed
    let out_dir = Path::new(output_dir);
    std::fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    debug!("Location frame - src={:?}", report.page.location_src());
    let document = report.page.render_document(&renderer, &ctx.hotel)?;
    std::fs::write(out_dir.join("index.html"), document.as_bytes())?;
    debug!("Wrote index.html");

    std::fs::write(
        out_dir.join("view_models.json"),
        serde_json::to_vec_pretty(&report.view_models)?,
    )?;
    debug!("Wrote view_models.json");

    info!(
        "Pipeline finished - duration={:.2}s, directory={}, failed_chains={}",
        pipeline_start.elapsed().as_secs_f32(),
        out_dir.display(),
        report.failures.len()
    );

    if !report.failures.is_empty() {
        bail!("{} of 2 chains failed: {}", report.failures.len(), report.failures.join("; "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_types::ApiEnvelope;
    use crate::config::WidgetConfig;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::time::Duration;
    use url::Url;

    struct StubFetcher {
        review: Value,
        social: Value,
        review_delay: Duration,
        social_delay: Duration,
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn get_envelope(&self, endpoint: &'static str, _: &Url) -> Result<ApiEnvelope, WidgetError> {
            let (delay, body) = if endpoint == REVIEW_SUMMARY {
                (self.review_delay, &self.review)
            } else {
                (self.social_delay, &self.social)
            };
            tokio::time::sleep(delay).await;
            Ok(serde_json::from_value(body.clone()).unwrap())
        }
    }

    fn review_envelope(code: i64) -> Value {
        json!({
            "meta": {"code": code},
            "response": {
                "reviews_count": 10,
                "summary": {
                    "score": 80,
                    "popularity": 90,
                    "text": "Nice.",
                    "reviews_distribution": [
                        {"stars": 1, "reviews_count": 1},
                        {"stars": 5, "reviews_count": 9}
                    ]
                },
                "hotel_type_list": [{"category_id": "city", "text": "<pos>Central</pos>"}],
                "category_list": [{
                    "category_id": "14",
                    "category_name": "Room",
                    "sentiment": "pos",
                    "count": 5,
                    "short_text": "Good rooms",
                    "summary_sentence_list": []
                }],
                "good_to_know_list": [],
                "language_meta_review_list": [
                    {"filter": {"language": "de"}, "reviews_percent": 40.0}
                ]
            }
        })
    }

    fn social_envelope() -> Value {
        json!({
            "meta": {"code": 200},
            "response": {"source_list": [{
                "source_id": "google.com",
                "post_list": [{
                    "source_id": "google.com",
                    "source_name": "Google",
                    "author": null,
                    "created": "2023-03-05",
                    "text": "Great"
                }]
            }]}
        })
    }

    #[fixture]
    fn ctx() -> Arc<WidgetContext> {
        Arc::new(WidgetContext::from_config(WidgetConfig::default()))
    }

    #[fixture]
    fn renderer() -> Arc<Renderer> {
        Arc::new(Renderer::new(None).unwrap())
    }

    fn stub(review: Value, review_ms: u64, social_ms: u64) -> Arc<dyn Fetcher> {
        Arc::new(StubFetcher {
            review,
            social: social_envelope(),
            review_delay: Duration::from_millis(review_ms),
            social_delay: Duration::from_millis(social_ms),
        })
    }

    #[rstest]
    #[tokio::test]
    async fn page_is_independent_of_arrival_order(ctx: Arc<WidgetContext>, renderer: Arc<Renderer>) {
        let review_first =
            run_chains(stub(review_envelope(200), 0, 30), ctx.clone(), renderer.clone()).await;
        let social_first = run_chains(stub(review_envelope(200), 30, 0), ctx, renderer).await;

        assert!(review_first.failures.is_empty());
        assert!(social_first.failures.is_empty());
        assert_eq!(review_first.page, social_first.page);
        assert_eq!(review_first.view_models, social_first.view_models);
        assert!(review_first.page.content(MountPoint::Social).contains("A Google user"));
        assert!(review_first.page.content(MountPoint::ReviewSummary).contains("German"));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_chain_leaves_other_chain_rendered(ctx: Arc<WidgetContext>, renderer: Arc<Renderer>) {
        let report = run_chains(stub(review_envelope(500), 0, 10), ctx, renderer).await;

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].starts_with(REVIEW_SUMMARY));
        assert_eq!(report.page.content(MountPoint::HotelTitle), "");
        assert_eq!(report.page.location_src(), None);
        assert!(report.page.content(MountPoint::Social).contains("3/5/2023"));
        assert!(report.view_models.contains_key("socialTab"));
        assert!(!report.view_models.contains_key("reviewsTab"));
    }

    #[rstest]
    fn review_views_fill_all_review_mounts(ctx: Arc<WidgetContext>, renderer: Arc<Renderer>) {
        let summary: ApiMetaReview =
            serde_json::from_value(review_envelope(200)["response"].clone()).unwrap();
        let out = review_summary_views(&ctx, &renderer, &summary).unwrap();

        let mounts: Vec<MountPoint> = out.fragments.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            mounts,
            vec![MountPoint::HotelTitle, MountPoint::HotelInfo, MountPoint::ReviewSummary]
        );
        assert!(out.fragments[1].1.contains("<strong>Central</strong>"));
        assert_eq!(
            out.location_src.as_deref(),
            Some("http://api.trustyou.com/hotels/674fa44c-1fbd-4275-aa72-a20f262372cd/location.html")
        );
        assert_eq!(out.view_models["reviewsTab"]["languageMetaReviews"][0]["language"], "all");
    }

    #[rstest]
    fn zero_review_percentages_serialize_as_null(ctx: Arc<WidgetContext>, renderer: Arc<Renderer>) {
        let mut summary: ApiMetaReview =
            serde_json::from_value(review_envelope(200)["response"].clone()).unwrap();
        summary.reviews_count = 0;
        let out = review_summary_views(&ctx, &renderer, &summary).unwrap();
        assert_eq!(out.view_models["hotelInfo"]["reviewsDistribution"][0]["percent"], Value::Null);
    }
}
