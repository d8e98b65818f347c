use crate::api_types::{ApiHotelType, ApiMetaReview, ApiStarBin};
use crate::models::HotelData;
use crate::out_models::{HotelInfoView, HotelTitleView, HotelTypeView, Sentiment, StarBinView};

pub fn hotel_title(hotel: &HotelData, summary: &ApiMetaReview) -> HotelTitleView {
    HotelTitleView {
        name: hotel.name.clone(),
        address: hotel.address.clone(),
        reviews_count: summary.reviews_count,
        trust_score: summary.summary.score,
    }
}

pub fn hotel_info(hotel: &HotelData, summary: &ApiMetaReview) -> HotelInfoView {
    HotelInfoView {
        name: hotel.name.clone(),
        address: hotel.address.clone(),
        img_url: hotel.img_url.clone(),
        reviews_count: summary.reviews_count,
        trust_score: summary.summary.score,
        popularity: summary.summary.popularity,
        summary: summary.summary.text.clone(),
        hotel_types: summary.hotel_type_list.iter().map(hotel_type).collect(),
        reviews_distribution: star_distribution(
            &summary.summary.reviews_distribution,
            summary.reviews_count,
        ),
    }
}

/// Texts carry <pos>/<neg>/<neu> markers around sentiment passages.
/// Only the first positive pair is turned into emphasis.
pub fn hotel_type(ht: &ApiHotelType) -> HotelTypeView {
    HotelTypeView {
        category_id: ht.category_id.clone(),
        text: ht
            .text
            .replacen("<pos>", "<strong>", 1)
            .replacen("</pos>", "</strong>", 1),
    }
}

/// API bins come 1 star first; the widget lists 5 stars first.
/// A zero total gives NaN/inf percentages, which are passed through.
pub fn star_distribution(bins: &[ApiStarBin], total_reviews: u64) -> Vec<StarBinView> {
    bins.iter()
        .rev()
        .map(|bin| StarBinView {
            reviews_count: bin.reviews_count,
            stars: bin.stars,
            sentiment: star_sentiment(bin.stars),
            percent: 100.0 * bin.reviews_count as f64 / total_reviews as f64,
        })
        .collect()
}

// 4 & 5 green, 3 yellow, 1 & 2 red
pub fn star_sentiment(stars: u8) -> Sentiment {
    if stars >= 4 {
        Sentiment::Pos
    } else if stars <= 2 {
        Sentiment::Neg
    } else {
        Sentiment::Neu
    }
}

pub fn location_frame_url(api_base: &str, ty_id: &str) -> String {
    format!("{}/hotels/{}/location.html", api_base.trim_end_matches('/'), ty_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn summary() -> ApiMetaReview {
        serde_json::from_value(json!({
            "reviews_count": 200,
            "summary": {
                "score": 86,
                "popularity": 97.5,
                "text": "Excellent hotel.",
                "reviews_distribution": [
                    {"stars": 1, "reviews_count": 10},
                    {"stars": 2, "reviews_count": 10},
                    {"stars": 3, "reviews_count": 30},
                    {"stars": 4, "reviews_count": 50},
                    {"stars": 5, "reviews_count": 100}
                ]
            },
            "hotel_type_list": [
                {"category_id": "city", "text": "<pos>Great</pos> city hotel, <pos>fun</pos>"},
                {"category_id": "casino", "text": "No markers"}
            ]
        }))
        .unwrap()
    }

    #[rstest]
    fn title_uses_hotel_data_and_score(summary: ApiMetaReview) {
        let title = hotel_title(&HotelData::default(), &summary);
        assert_eq!(title.name, "Bellagio Las Vegas");
        assert_eq!(title.reviews_count, 200);
        assert_eq!(title.trust_score, 86.0);
    }

    #[rstest]
    fn distribution_is_descending_with_percentages(summary: ApiMetaReview) {
        let info = hotel_info(&HotelData::default(), &summary);
        let rows: Vec<(u8, Sentiment)> = info
            .reviews_distribution
            .iter()
            .map(|b| (b.stars, b.sentiment))
            .collect();
        assert_eq!(
            rows,
            vec![
                (5, Sentiment::Pos),
                (4, Sentiment::Pos),
                (3, Sentiment::Neu),
                (2, Sentiment::Neg),
                (1, Sentiment::Neg),
            ]
        );
        for bin in &info.reviews_distribution {
            let expected = 100.0 * bin.reviews_count as f64 / 200.0;
            assert!((bin.percent - expected).abs() < 1e-9);
        }
        assert_eq!(info.reviews_distribution[0].percent, 50.0);
    }

    #[rstest]
    fn replaces_only_first_positive_marker(summary: ApiMetaReview) {
        let info = hotel_info(&HotelData::default(), &summary);
        assert_eq!(
            info.hotel_types[0].text,
            "<strong>Great</strong> city hotel, <pos>fun</pos>"
        );
        assert_eq!(info.hotel_types[1].text, "No markers");
    }

    #[rstest]
    fn zero_reviews_yield_non_finite_percent() {
        let bins = vec![
            ApiStarBin { stars: 1, reviews_count: 0 },
            ApiStarBin { stars: 2, reviews_count: 3 },
        ];
        let out = star_distribution(&bins, 0);
        assert!(out[0].percent.is_infinite());
        assert!(out[1].percent.is_nan());
    }

    #[rstest]
    fn info_is_idempotent(summary: ApiMetaReview) {
        let hotel = HotelData::default();
        assert_eq!(hotel_info(&hotel, &summary), hotel_info(&hotel, &summary));
    }

    #[rstest]
    #[case("http://api.trustyou.com")]
    #[case("http://api.trustyou.com/")]
    fn builds_location_frame_url(#[case] base: &str) {
        assert_eq!(
            location_frame_url(base, "abc"),
            "http://api.trustyou.com/hotels/abc/location.html"
        );
    }
}
