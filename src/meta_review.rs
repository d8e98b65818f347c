//! Reviews tab: overall and per-language meta reviews into template data.

use crate::api_types::{ApiCategory, ApiGoodToKnow, ApiMetaReview};
use crate::models::LanguageNames;
use crate::out_models::{
    CategoryView, GoodToKnowView, HighlightView, Mark, MetaReviewView, ReviewsTabView,
    SummarySentenceView,
};

/// Overall sentiment category; too generic to show as a tab.
pub const OVERALL_CATEGORY_ID: &str = "16";
pub const MAX_CATEGORIES: usize = 5;
pub const MAX_HIGHLIGHTS: usize = 3;

/// Overall meta review followed by every language meta review, sorted by
/// descending share of reviews. Equal shares keep their input order.
pub fn reviews_tab(summary: &ApiMetaReview, names: &LanguageNames) -> ReviewsTabView {
    let mut meta_reviews: Vec<MetaReviewView> = std::iter::once(meta_review(summary, names))
        .chain(
            summary
                .language_meta_review_list
                .iter()
                .map(|lang| meta_review(lang, names)),
        )
        .collect();

    meta_reviews.sort_by(|a, b| b.reviews_percent.total_cmp(&a.reviews_percent));

    ReviewsTabView {
        language_meta_reviews: meta_reviews,
    }
}

/// Same derivation for the overall review and for a language-filtered one;
/// only the header fields differ.
pub fn meta_review(review: &ApiMetaReview, names: &LanguageNames) -> MetaReviewView {
    let (language, label, reviews_percent, traveler_types, visibility) = match &review.filter {
        Some(filter) => (
            filter.language.clone(),
            names.label(&filter.language),
            review.reviews_percent,
            false,
            String::new(),
        ),
        None => (
            "all".to_string(),
            Some("All languages".to_string()),
            100.0,
            true,
            "in active".to_string(),
        ),
    };

    MetaReviewView {
        language,
        label,
        reviews_percent,
        traveler_types,
        visibility,
        categories: top_categories(&review.category_list),
        good_to_know: review.good_to_know_list.iter().map(good_to_know).collect(),
    }
}

/// The five most frequent categories, overall sentiment excluded.
pub fn top_categories(categories: &[ApiCategory]) -> Vec<CategoryView> {
    let mut ranked: Vec<&ApiCategory> = categories.iter().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    ranked
        .into_iter()
        .filter(|c| c.category_id != OVERALL_CATEGORY_ID)
        .take(MAX_CATEGORIES)
        .enumerate()
        .map(|(index, category)| CategoryView {
            class: if index == 0 { "in active".to_string() } else { String::new() },
            category_id: category.category_id.clone(),
            category_name: category.category_name.clone(),
            sentiment: category.sentiment.clone(),
            highlights: highlights(category),
            summary_sentences: category
                .summary_sentence_list
                .iter()
                .map(|s| SummarySentenceView {
                    sentiment: if s.sentiment == "neg" { Mark::Remove } else { Mark::Ok },
                    text: s.text.clone(),
                })
                .collect(),
        })
        .collect()
}

/// Up to three highlights; `short_text` always exists, so it backs them up.
pub fn highlights(category: &ApiCategory) -> Vec<HighlightView> {
    category
        .highlight_list
        .iter()
        .map(|h| h.text.as_str())
        .chain(std::iter::once(category.short_text.as_str()))
        .take(MAX_HIGHLIGHTS)
        .map(|text| HighlightView { text: text.to_string() })
        .collect()
}

fn good_to_know(item: &ApiGoodToKnow) -> GoodToKnowView {
    GoodToKnowView {
        sentiment: if item.sentiment == "pos" { Mark::Ok } else { Mark::Remove },
        text: item.short_text.clone(),
    }
}
