use serde::{Deserialize, Serialize};

use crate::{CategoryId, PricingTier};

/// Tag attached to each issued search; only the latest one may change state.
pub type Generation = u64;

/// Display record for one tool in a result list. The controller never
/// interprets these fields, it only passes them through to rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Raw backend value, kept even when it is not a known tier.
    #[serde(default)]
    pub pricing_model: String,
    #[serde(default)]
    pub starting_price: Option<f64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_sponsored: bool,
    #[serde(default)]
    pub is_trending: bool,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub rank_score: f64,
}

impl ToolSummary {
    /// The pricing model as a known tier, if it is one.
    pub fn pricing_tier(&self) -> Option<PricingTier> {
        self.pricing_model.parse().ok()
    }
}

/// Entry of the category filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tool_count: u32,
    #[serde(default)]
    pub is_featured: bool,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultPage {
    pub items: Vec<ToolSummary>,
    pub total: u64,
    pub pages: u32,
    pub has_next: bool,
}

/// Any failure talking to the catalog backend. Every variant takes the same
/// recovery path; the distinction only matters for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteFetchError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl RemoteFetchError {
    /// Short classification used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteFetchError::InvalidUrl(_) => "invalid_url",
            RemoteFetchError::Transport(_) => "transport",
            RemoteFetchError::Timeout => "timeout",
            RemoteFetchError::HttpStatus(code) if *code >= 500 => "server_error",
            RemoteFetchError::HttpStatus(_) => "client_error",
            RemoteFetchError::Decode(_) => "decode",
        }
    }
}
