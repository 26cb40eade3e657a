use catalog_logging::{catalog_debug, catalog_info, catalog_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { initial_query } => {
            if state.is_mounted() {
                return (state, Vec::new());
            }
            state.mount(initial_query);
            let mut effects = vec![Effect::FetchCategories];
            effects.extend(state.issue_search());
            effects
        }
        Msg::QueryChanged(text) => {
            state.set_query(text);
            refetch(&mut state)
        }
        Msg::QuerySubmitted(text) => {
            state.set_query(text);
            state.set_address_query();
            let mut effects = refetch(&mut state);
            effects.push(Effect::UpdateAddress {
                query: state.query().trim().to_string(),
            });
            effects
        }
        Msg::CategorySelected(id) => {
            state.toggle_category(id);
            refetch(&mut state)
        }
        Msg::PricingTierToggled(tier) => {
            state.toggle_pricing(tier);
            refetch(&mut state)
        }
        Msg::MinRatingSelected(threshold) => {
            state.toggle_min_rating(threshold);
            refetch(&mut state)
        }
        Msg::SearchModeSelected(mode) => {
            state.toggle_search_mode(mode);
            refetch(&mut state)
        }
        Msg::FiltersCleared => {
            state.clear_facets();
            refetch(&mut state)
        }
        Msg::LoadMoreClicked => {
            if !state.can_load_more() {
                return (state, Vec::new());
            }
            state.advance_page();
            refetch(&mut state)
        }
        Msg::PageLoaded { generation, result } => {
            state.apply_page(generation, result);
            Vec::new()
        }
        Msg::CategoriesLoaded(result) => {
            match result {
                Ok(categories) => {
                    catalog_info!("Loaded {} categories", categories.len());
                    state.set_categories(categories);
                }
                Err(err) => {
                    catalog_warn!("Category list failed kind={}: {}", err.kind(), err);
                }
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Searches are only issued once the surface is mounted; mounting runs the first one.
fn refetch(state: &mut AppState) -> Vec<Effect> {
    if !state.is_mounted() {
        catalog_debug!("Search deferred until mount");
        return Vec::new();
    }
    state.issue_search()
}
