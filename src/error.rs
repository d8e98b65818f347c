use thiserror::Error;

/// Failure of one response chain (review summary or social feed).
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} request failed: API returned status code {code}")]
    ApiStatus { endpoint: &'static str, code: i64 },
    #[error("unexpected data: {0}")]
    BoundaryData(String),
    #[error("template '{name}' failed to render: {reason}")]
    Template { name: &'static str, reason: String },
}

impl WidgetError {
    pub fn boundary(details: impl Into<String>) -> Self {
        WidgetError::BoundaryData(details.into())
    }
}
