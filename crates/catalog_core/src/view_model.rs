use crate::{CategoryId, PricingTier, RatingThreshold, SearchMode, ToolSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub tool_count: u32,
    pub is_featured: bool,
    pub selected: bool,
}

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchViewModel {
    pub query: String,
    pub page: u32,
    pub category: Option<CategoryId>,
    pub pricing: Vec<PricingTier>,
    pub min_rating: Option<RatingThreshold>,
    pub search_mode: Option<SearchMode>,
    pub items: Vec<ToolSummary>,
    pub total: u64,
    pub pages: u32,
    pub has_more: bool,
    pub is_loading: bool,
    pub has_active_search: bool,
    pub active_filter_count: usize,
    pub categories: Vec<CategoryOption>,
    /// Search term last written to the shareable address.
    pub address_query: Option<String>,
    pub dirty: bool,
}
