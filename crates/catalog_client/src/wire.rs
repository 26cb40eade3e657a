use catalog_core::{ResultPage, ToolSummary};
use catalog_logging::catalog_debug;
use serde::Deserialize;

/// Paginated body returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponseBody {
    items: Vec<ToolSummary>,
    total: u64,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    pages: u32,
    has_next: bool,
    #[serde(default)]
    has_prev: bool,
}

impl From<SearchResponseBody> for ResultPage {
    fn from(body: SearchResponseBody) -> Self {
        catalog_debug!(
            "Search page {}/{} items={} total={} has_prev={} has_next={}",
            body.page,
            body.pages,
            body.items.len(),
            body.total,
            body.has_prev,
            body.has_next
        );
        ResultPage {
            items: body.items,
            total: body.total,
            pages: body.pages,
            has_next: body.has_next,
        }
    }
}
