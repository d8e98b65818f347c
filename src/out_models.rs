use serde::{Deserialize, Serialize};

/* Template-ready view models. Field names follow the templates (camelCase). */

/// Binary icon marker used for summary sentences and "good to know" items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Ok,
    Remove,
}

/// Three-valued styling tag for star bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Pos,
    Neg,
    Neu,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelTitleView {
    pub name: String,
    pub address: String,
    pub reviews_count: u64,
    pub trust_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfoView {
    pub name: String,
    pub address: String,
    pub img_url: String,
    pub reviews_count: u64,
    pub trust_score: f64,
    pub popularity: f64,
    pub summary: String,
    pub hotel_types: Vec<HotelTypeView>,
    pub reviews_distribution: Vec<StarBinView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelTypeView {
    pub category_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarBinView {
    pub reviews_count: u64,
    pub stars: u8,
    pub sentiment: Sentiment,
    pub percent: f64,         // non-finite when the hotel has no reviews
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsTabView {
    pub language_meta_reviews: Vec<MetaReviewView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaReviewView {
    pub language: String,     // "all" for the overall meta review
    pub label: Option<String>,
    pub reviews_percent: f64,
    pub traveler_types: bool,
    pub visibility: String,   // "in active" | ""
    pub categories: Vec<CategoryView>,
    pub good_to_know: Vec<GoodToKnowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub class: String,        // "in active" for the first tab, "" otherwise
    pub category_id: String,
    pub category_name: String,
    pub sentiment: String,
    pub highlights: Vec<HighlightView>,
    pub summary_sentences: Vec<SummarySentenceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightView {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySentenceView {
    pub sentiment: Mark,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodToKnowView {
    pub sentiment: Mark,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialTabView {
    pub sources: Vec<SocialSourceView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSourceView {
    pub social_source: String,  // icon class, e.g. "google-plus"
    pub posts: Vec<SocialPostView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostView {
    pub social_source_class: String,
    pub social_source: String,
    pub publish_date: String,   // "M/D/YYYY"
    pub text: String,
    pub user_name: String,
}
