use std::sync::{mpsc, Arc};
use std::time::Duration;

use catalog_client::{CatalogService, ChannelEventSink, ServiceEvent, ServiceHandle};
use catalog_core::{CategorySummary, RemoteFetchError, ResultPage, SearchRequest};

/// Answers after a delay encoded in the query, e.g. "slow" waits longer than "fast".
struct ScriptedService;

#[async_trait::async_trait]
impl CatalogService for ScriptedService {
    async fn search(&self, request: &SearchRequest) -> Result<ResultPage, RemoteFetchError> {
        let delay = if request.q == "slow" { 400 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        if request.q == "broken" {
            return Err(RemoteFetchError::HttpStatus(500));
        }
        Ok(ResultPage {
            items: Vec::new(),
            total: u64::from(request.page),
            pages: 1,
            has_next: false,
        })
    }

    async fn categories(&self) -> Result<Vec<CategorySummary>, RemoteFetchError> {
        Ok(Vec::new())
    }
}

fn handle() -> (ServiceHandle, mpsc::Receiver<ServiceEvent>) {
    let (tx, rx) = mpsc::channel();
    let handle = ServiceHandle::with_service(
        Arc::new(ScriptedService),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .expect("runtime");
    (handle, rx)
}

#[test]
fn completed_search_reports_its_generation() {
    let (handle, rx) = handle();
    handle.search(7, SearchRequest::first_page("fast"));

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    match event {
        ServiceEvent::SearchCompleted { generation, result } => {
            assert_eq!(generation, 7);
            assert_eq!(result.map(|page| page.total), Ok(1));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn newer_search_cancels_older_one() {
    let (handle, rx) = handle();
    handle.search(1, SearchRequest::first_page("slow"));
    handle.search(2, SearchRequest::first_page("fast"));

    let first = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert!(matches!(
        first,
        ServiceEvent::SearchCompleted { generation: 2, .. }
    ));
    // The slow search never reports back.
    assert!(rx.recv_timeout(Duration::from_millis(700)).is_err());
}

#[test]
fn cancel_search_drops_pending_result() {
    let (handle, rx) = handle();
    handle.search(1, SearchRequest::first_page("slow"));
    handle.cancel_search();

    assert!(rx.recv_timeout(Duration::from_millis(700)).is_err());
}

#[test]
fn failures_are_reported_not_swallowed() {
    let (handle, rx) = handle();
    handle.search(3, SearchRequest::first_page("broken"));
    handle.load_categories();

    let mut saw_failure = false;
    let mut saw_categories = false;
    for _ in 0..2 {
        match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
            ServiceEvent::SearchCompleted { generation, result } => {
                assert_eq!(generation, 3);
                assert_eq!(result, Err(RemoteFetchError::HttpStatus(500)));
                saw_failure = true;
            }
            ServiceEvent::CategoriesLoaded(result) => {
                assert_eq!(result, Ok(Vec::new()));
                saw_categories = true;
            }
        }
    }
    assert!(saw_failure && saw_categories);
}
