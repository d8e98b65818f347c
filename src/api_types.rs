use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every TrustYou JSON endpoint wraps its payload the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub meta: ApiMeta,
    #[serde(default)]
    pub response: Value,           // decoded only after the status check
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMeta {
    pub code: i64,
}

/* Review summary (meta_review.json) */

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMetaReview {
    #[serde(default)]
    pub reviews_count: u64,
    #[serde(default)]
    pub summary: ApiSummary,
    /// Present only on language-specific meta reviews.
    #[serde(default)]
    pub filter: Option<ApiFilter>,
    #[serde(default)]
    pub reviews_percent: f64,
    #[serde(default)]
    pub hotel_type_list: Vec<ApiHotelType>,
    #[serde(default)]
    pub category_list: Vec<ApiCategory>,
    #[serde(default)]
    pub good_to_know_list: Vec<ApiGoodToKnow>,
    #[serde(default)]
    pub language_meta_review_list: Vec<ApiMetaReview>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSummary {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reviews_distribution: Vec<ApiStarBin>, // ascending: 1 star first
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStarBin {
    pub stars: u8,
    pub reviews_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFilter {
    pub language: String,          // "en", "de", ...
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHotelType {
    pub category_id: String,
    pub text: String,              // contains <pos>..</pos> style markers
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCategory {
    pub category_id: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub sentiment: String,         // "pos" | "neg" | "neu"
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub short_text: String,
    #[serde(default)]
    pub highlight_list: Vec<ApiHighlight>,
    #[serde(default)]
    pub summary_sentence_list: Vec<ApiSummarySentence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHighlight {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSummarySentence {
    #[serde(default)]
    pub sentiment: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiGoodToKnow {
    #[serde(default)]
    pub sentiment: String,
    pub short_text: String,
}

/* Social (social.json) */

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSocial {
    #[serde(default)]
    pub source_list: Vec<ApiSocialSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSocialSource {
    pub source_id: String,         // "google.com", "foursquare.com", ...
    #[serde(default)]
    pub post_list: Vec<ApiPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPost {
    pub source_id: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub created: String,           // "YYYY-MM-DD"
    #[serde(default)]
    pub text: String,
}
