use std::sync::Once;

use catalog_core::{
    update, AppState, CategoryId, Effect, Msg, PricingTier, ResultPage, ToolSummary,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn tool(id: &str) -> ToolSummary {
    ToolSummary {
        id: id.to_string(),
        name: id.to_string(),
        slug: String::new(),
        short_description: String::new(),
        logo_url: None,
        category_id: None,
        pricing_model: PricingTier::Paid.as_str().to_string(),
        starting_price: Some(9.0),
        tags: Vec::new(),
        is_featured: false,
        is_sponsored: true,
        is_trending: false,
        average_rating: 3.0,
        review_count: 1,
        rank_score: 0.5,
    }
}

fn generation_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("fetch effect")
}

#[test]
fn late_response_for_superseded_filters_is_dropped() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Mounted { initial_query: None });
    let (state, effects) = update(state, Msg::QueryChanged("ai".to_string()));
    let r1 = generation_of(&effects);

    let (state, effects) = update(
        state,
        Msg::CategorySelected(CategoryId::new("video").unwrap()),
    );
    assert_eq!(effects.first(), Some(&Effect::CancelSearch));
    let r2 = generation_of(&effects);
    assert!(r2 > r1);

    // R2 answers first.
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: r2,
            result: Ok(ResultPage {
                items: vec![tool("video-1")],
                total: 1,
                pages: 1,
                has_next: false,
            }),
        },
    );
    let after_r2 = state.view();

    // R1 arrives late and must not change anything.
    let (mut state, effects) = update(
        state,
        Msg::PageLoaded {
            generation: r1,
            result: Ok(ResultPage {
                items: vec![tool("any-1"), tool("any-2")],
                total: 57,
                pages: 3,
                has_next: true,
            }),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view(), after_r2);
    assert_eq!(state.view().total, 1);
    assert!(!state.view().has_more);

    // Nothing changed, so nothing to render beyond what R2 already triggered.
    assert!(state.consume_dirty());
    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            generation: r1,
            result: Ok(ResultPage::default()),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn stale_response_does_not_clear_loading_of_newer_request() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::Mounted {
            initial_query: Some("ai".to_string()),
        },
    );
    let (state, effects) = update(state, Msg::PricingTierToggled(PricingTier::Free));
    let latest = generation_of(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: latest - 1,
            result: Ok(ResultPage::default()),
        },
    );
    assert!(state.is_loading());
    assert_eq!(state.last_generation(), latest);
}

#[test]
fn stale_failure_is_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Mounted { initial_query: None });
    let (state, _) = update(state, Msg::QueryChanged("a".to_string()));
    let (state, effects) = update(state, Msg::QueryChanged("ab".to_string()));
    let latest = generation_of(&effects);

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: latest,
            result: Ok(ResultPage {
                items: vec![tool("ab-1")],
                total: 1,
                pages: 1,
                has_next: false,
            }),
        },
    );
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: latest - 1,
            result: Err(catalog_core::RemoteFetchError::Transport("reset".to_string())),
        },
    );
    assert_eq!(state.items().len(), 1);
    assert!(!state.is_loading());
}
