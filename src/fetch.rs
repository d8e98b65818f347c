use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::api_types::{ApiEnvelope, ApiMetaReview, ApiSocial};
use crate::config::WidgetContext;
use crate::error::WidgetError;

pub const REVIEW_SUMMARY: &str = "review summary";
pub const SOCIAL: &str = "social";

const STATUS_OK: i64 = 200;

/// Source of API envelopes. The HTTP implementation is the only one in
/// production; tests plug in canned responses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get_envelope(&self, endpoint: &'static str, url: &Url) -> Result<ApiEnvelope, WidgetError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        HttpFetcher { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_envelope(&self, endpoint: &'static str, url: &Url) -> Result<ApiEnvelope, WidgetError> {
        let start = std::time::Instant::now();
        debug!("Fetching {} - url={}", endpoint, url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| WidgetError::Transport { endpoint, source })?;
        let status = resp.status();

        // The status that matters is the one inside the envelope
        let envelope: ApiEnvelope = resp
            .json()
            .await
            .map_err(|source| WidgetError::Transport { endpoint, source })?;

        info!(
            "{} fetch completed - duration={:.2}s, http_status={}, api_code={}",
            endpoint,
            start.elapsed().as_secs_f32(),
            status.as_u16(),
            envelope.meta.code
        );
        Ok(envelope)
    }
}

pub fn review_summary_url(ctx: &WidgetContext) -> Result<Url, WidgetError> {
    let mut url = hotel_endpoint(ctx, "meta_review.json")?;
    url.query_pairs_mut()
        .append_pair("lang", &ctx.api.review_lang)
        .append_pair("key", &ctx.api.key)
        .append_pair("v", &ctx.api.version);
    Ok(url)
}

pub fn social_url(ctx: &WidgetContext) -> Result<Url, WidgetError> {
    let mut url = hotel_endpoint(ctx, "social.json")?;
    {
        let mut q = url.query_pairs_mut();
        q.append_pair("page_size", &ctx.api.social_page_size.to_string());
        for lang in &ctx.api.social_languages {
            q.append_pair("lang_list[]", lang);
        }
        q.append_pair("key", &ctx.api.key);
        q.append_pair("v", &ctx.api.version);
    }
    Ok(url)
}

fn hotel_endpoint(ctx: &WidgetContext, file: &str) -> Result<Url, WidgetError> {
    let raw = format!(
        "{}/hotels/{}/{}",
        ctx.api.base_url.trim_end_matches('/'),
        ctx.hotel.ty_id,
        file
    );
    Url::parse(&raw).map_err(|e| WidgetError::boundary(format!("invalid API url '{raw}': {e}")))
}

/// Fails on any status code but 200; otherwise hands back the payload untouched.
pub fn validate_envelope(endpoint: &'static str, envelope: ApiEnvelope) -> Result<Value, WidgetError> {
    if envelope.meta.code != STATUS_OK {
        return Err(WidgetError::ApiStatus {
            endpoint,
            code: envelope.meta.code,
        });
    }
    Ok(envelope.response)
}

fn decode_payload<T: DeserializeOwned>(endpoint: &'static str, payload: Value) -> Result<T, WidgetError> {
    serde_json::from_value(payload)
        .map_err(|e| WidgetError::boundary(format!("{endpoint} response has unexpected shape: {e}")))
}

pub async fn fetch_review_summary(
    fetcher: &dyn Fetcher,
    ctx: &WidgetContext,
) -> Result<ApiMetaReview, WidgetError> {
    let url = review_summary_url(ctx)?;
    let envelope = fetcher.get_envelope(REVIEW_SUMMARY, &url).await?;
    let payload = validate_envelope(REVIEW_SUMMARY, envelope)?;
    decode_payload(REVIEW_SUMMARY, payload)
}

pub async fn fetch_social(fetcher: &dyn Fetcher, ctx: &WidgetContext) -> Result<ApiSocial, WidgetError> {
    let url = social_url(ctx)?;
    let envelope = fetcher.get_envelope(SOCIAL, &url).await?;
    let payload = validate_envelope(SOCIAL, envelope)?;
    decode_payload(SOCIAL, payload)
}
