use crate::{
    CategoryId, CategorySummary, Generation, PricingTier, RatingThreshold, RemoteFetchError,
    ResultPage, SearchMode,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Search surface became visible, optionally seeded from the page address.
    Mounted { initial_query: Option<String> },
    /// User edited the search box.
    QueryChanged(String),
    /// User explicitly submitted the search box; also updates the shareable address.
    QuerySubmitted(String),
    /// User clicked a category; clicking the active one clears it.
    CategorySelected(CategoryId),
    /// User toggled a pricing checkbox.
    PricingTierToggled(PricingTier),
    /// User clicked a rating threshold; clicking the active one clears it.
    MinRatingSelected(RatingThreshold),
    /// User picked a ranking strategy; picking the active one clears it.
    SearchModeSelected(SearchMode),
    /// User clicked "Clear all" in the filter panel.
    FiltersCleared,
    /// User clicked "Load more".
    LoadMoreClicked,
    /// Search service answered the request tagged with `generation`.
    PageLoaded {
        generation: Generation,
        result: Result<ResultPage, RemoteFetchError>,
    },
    /// Category list arrived.
    CategoriesLoaded(Result<Vec<CategorySummary>, RemoteFetchError>),
    /// Input that maps to nothing, such as a blank line.
    NoOp,
}
