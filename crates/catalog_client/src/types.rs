use std::sync::mpsc;

use catalog_core::{CategorySummary, Generation, RemoteFetchError, ResultPage};

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    SearchCompleted {
        generation: Generation,
        result: Result<ResultPage, RemoteFetchError>,
    },
    CategoriesLoaded(Result<Vec<CategorySummary>, RemoteFetchError>),
}

/// Receives completions from the service runtime.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ServiceEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ServiceEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ServiceEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ServiceEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build catalog client: {0}")]
    Client(#[from] RemoteFetchError),
}
