use crate::{Generation, SearchRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a search; its completion must come back tagged with `generation`.
    FetchPage {
        generation: Generation,
        request: SearchRequest,
    },
    /// Abort whatever search is still running.
    CancelSearch,
    FetchCategories,
    /// Rewrite the shareable page address with this search term.
    UpdateAddress { query: String },
}
