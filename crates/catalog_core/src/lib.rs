//! Catalog core: pure search controller state machine and view-model helpers.
mod address;
mod effect;
mod filters;
mod msg;
mod request;
mod state;
mod types;
mod update;
mod view_model;

pub use address::{initial_query_from_url, shareable_url, QUERY_PARAM};
pub use effect::Effect;
pub use filters::{
    CategoryId, Facets, FilterParseError, PricingTier, RatingThreshold, SearchMode,
};
pub use msg::Msg;
pub use request::{normalize_query, SearchRequest, MAX_QUERY_CHARS, PAGE_SIZE};
pub use state::AppState;
pub use types::{CategorySummary, Generation, RemoteFetchError, ResultPage, ToolSummary};
pub use update::update;
pub use view_model::{CategoryOption, SearchViewModel};
