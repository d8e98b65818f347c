use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static metadata for the hotel the widget is built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelData {
    pub name: String,
    pub address: String,
    pub ty_id: String,        // TrustYou hotel id
    pub img_url: String,
}

impl Default for HotelData {
    fn default() -> Self {
        HotelData {
            name: "Bellagio Las Vegas".to_string(),
            address: "South Las Vegas Boulevard 3600, NV 89109, Las Vegas, USA".to_string(),
            ty_id: "674fa44c-1fbd-4275-aa72-a20f262372cd".to_string(),
            img_url: "img/674fa44c-1fbd-4275-aa72-a20f262372cd.jpg".to_string(),
        }
    }
}

/// Display names for the review languages TrustYou reports.
pub static LANGUAGE_NAMES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("en", "English"),
        ("de", "German"),
        ("fr", "French"),
        ("es", "Spanish"),
        ("it", "Italian"),
        ("pt", "Portuguese"),
        ("nl", "Dutch"),
        ("ru", "Russian"),
        ("pl", "Polish"),
        ("zh", "Chinese"),
        ("ja", "Japanese"),
        ("th", "Thai"),
        ("id", "Indonesian"),
        ("ko", "Korean"),
        ("ar", "Arabic"),
        ("sv", "Swedish"),
        ("no", "Norwegian"),
        ("fi", "Finnish"),
        ("he", "Hebrew"),
    ])
});

/// Language code -> display name lookup used by the reviews tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageNames(pub BTreeMap<String, String>);

impl LanguageNames {
    pub fn label(&self, code: &str) -> Option<String> {
        self.0.get(code).cloned()
    }
}

impl Default for LanguageNames {
    fn default() -> Self {
        LanguageNames(
            LANGUAGE_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        )
    }
}
