use catalog_logging::{catalog_debug, catalog_warn};

use crate::request::{normalize_query, PAGE_SIZE};
use crate::view_model::{CategoryOption, SearchViewModel};
use crate::{
    CategoryId, CategorySummary, Effect, Facets, Generation, PricingTier, RatingThreshold,
    RemoteFetchError, ResultPage, SearchMode, SearchRequest, ToolSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    generation: Generation,
    page: u32,
}

/// Search surface state: the filter state plus the accumulated results.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    query: String,
    page: u32,
    facets: Facets,
    search_mode: Option<SearchMode>,
    items: Vec<ToolSummary>,
    total: u64,
    pages: u32,
    has_next: bool,
    in_flight: Option<InFlight>,
    last_generation: Generation,
    categories: Vec<CategorySummary>,
    address_query: Option<String>,
    mounted: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            facets: Facets::default(),
            search_mode: None,
            items: Vec::new(),
            total: 0,
            pages: 0,
            has_next: false,
            in_flight: None,
            last_generation: 0,
            categories: Vec::new(),
            address_query: None,
            mounted: false,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SearchViewModel {
        let selected = self.facets.category();
        SearchViewModel {
            query: self.query.clone(),
            page: self.page,
            category: selected.cloned(),
            pricing: self.facets.pricing().collect(),
            min_rating: self.facets.min_rating(),
            search_mode: self.search_mode,
            items: self.items.clone(),
            total: self.total,
            pages: self.pages,
            has_more: self.has_next,
            is_loading: self.in_flight.is_some(),
            has_active_search: self.has_active_search(),
            active_filter_count: self.facets.active_count(),
            categories: self
                .categories
                .iter()
                .map(|category| CategoryOption {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    slug: category.slug.clone(),
                    tool_count: category.tool_count,
                    is_featured: category.is_featured,
                    selected: selected == Some(&category.id),
                })
                .collect(),
            address_query: self.address_query.clone(),
            dirty: self.dirty,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn items(&self) -> &[ToolSummary] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation of the most recently issued search, 0 before the first one.
    pub fn last_generation(&self) -> Generation {
        self.last_generation
    }

    pub fn categories(&self) -> &[CategorySummary] {
        &self.categories
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn has_active_search(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Request descriptor for the current filter state, `None` without an active search.
    pub fn current_request(&self) -> Option<SearchRequest> {
        if !self.has_active_search() {
            return None;
        }
        Some(SearchRequest {
            q: normalize_query(&self.query),
            page: self.page,
            limit: PAGE_SIZE,
            category_id: self.facets.category().cloned(),
            pricing: self.facets.pricing().collect(),
            min_rating: self.facets.min_rating(),
            search_type: self.search_mode,
        })
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(crate) fn mount(&mut self, initial_query: Option<String>) {
        self.mounted = true;
        if let Some(query) = initial_query {
            self.address_query = Some(query.trim().to_string());
            self.query = query;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_query(&mut self, text: String) {
        self.query = text;
        self.reset_pagination();
    }

    pub(crate) fn set_address_query(&mut self) {
        self.address_query = Some(self.query.trim().to_string());
        self.mark_dirty();
    }

    pub(crate) fn toggle_category(&mut self, id: CategoryId) {
        self.facets.toggle_category(id);
        self.reset_pagination();
    }

    pub(crate) fn toggle_pricing(&mut self, tier: PricingTier) {
        self.facets.toggle_pricing(tier);
        self.reset_pagination();
    }

    pub(crate) fn toggle_min_rating(&mut self, threshold: RatingThreshold) {
        self.facets.toggle_min_rating(threshold);
        self.reset_pagination();
    }

    pub(crate) fn toggle_search_mode(&mut self, mode: SearchMode) {
        crate::filters::toggle_single(&mut self.search_mode, mode);
        self.reset_pagination();
    }

    pub(crate) fn clear_facets(&mut self) {
        self.facets.clear();
        self.reset_pagination();
    }

    pub(crate) fn can_load_more(&self) -> bool {
        self.has_next && self.in_flight.is_none() && self.has_active_search()
    }

    pub(crate) fn advance_page(&mut self) {
        self.page += 1;
    }

    pub(crate) fn set_categories(&mut self, categories: Vec<CategorySummary>) {
        self.categories = categories;
        self.mark_dirty();
    }

    /// Issues a search for the current filter state. Without an active query the
    /// results are emptied and nothing is fetched. A search still in flight is
    /// superseded: its generation no longer matches and a cancel is requested.
    pub(crate) fn issue_search(&mut self) -> Vec<Effect> {
        let superseded = self.in_flight.take();
        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = superseded {
            catalog_debug!(
                "Superseding in-flight search generation={} page={}",
                previous.generation,
                previous.page
            );
            effects.push(Effect::CancelSearch);
        }
        self.mark_dirty();

        let Some(request) = self.current_request() else {
            self.items.clear();
            self.total = 0;
            self.pages = 0;
            self.has_next = false;
            return effects;
        };

        self.last_generation += 1;
        let generation = self.last_generation;
        self.in_flight = Some(InFlight {
            generation,
            page: request.page,
        });
        effects.push(Effect::FetchPage {
            generation,
            request,
        });
        effects
    }

    /// Applies a search completion. Returns `false` when the response is stale.
    pub(crate) fn apply_page(
        &mut self,
        generation: Generation,
        result: Result<ResultPage, RemoteFetchError>,
    ) -> bool {
        let current = self.in_flight.filter(|pending| pending.generation == generation);
        let Some(pending) = current else {
            catalog_debug!(
                "Dropping stale search response generation={} latest={}",
                generation,
                self.last_generation
            );
            return false;
        };
        self.in_flight = None;
        self.mark_dirty();

        match result {
            Ok(result_page) => {
                if pending.page == 1 {
                    self.items = result_page.items;
                } else {
                    self.items.extend(result_page.items);
                }
                self.total = result_page.total;
                self.pages = result_page.pages;
                self.has_next = result_page.has_next;
            }
            Err(err) => {
                catalog_warn!(
                    "Search failed generation={} page={} kind={}: {}",
                    generation,
                    pending.page,
                    err.kind(),
                    err
                );
                if pending.page > 1 {
                    // Step back so the next "load more" asks for the same page again.
                    self.page = pending.page - 1;
                } else {
                    // Items still belong to the previous query or filters; later
                    // pages of the new one must not be appended to them.
                    self.has_next = false;
                }
            }
        }
        true
    }

    fn reset_pagination(&mut self) {
        self.page = 1;
        self.mark_dirty();
    }
}
