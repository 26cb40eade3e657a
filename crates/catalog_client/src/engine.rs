use std::sync::{mpsc, Arc};
use std::thread;

use catalog_core::{Generation, SearchRequest};
use catalog_logging::{catalog_debug, catalog_info};
use tokio_util::sync::CancellationToken;

use crate::service::{CatalogService, ReqwestCatalogService};
use crate::settings::ClientSettings;
use crate::{EventSink, ServiceError, ServiceEvent};

enum ServiceCommand {
    Search {
        generation: Generation,
        request: SearchRequest,
    },
    CancelSearch,
    LoadCategories,
}

/// Runs catalog requests on a background tokio runtime and reports completions
/// to an [`EventSink`]. At most one search runs at a time: starting a new one
/// cancels the previous one, and cancelled searches report nothing.
pub struct ServiceHandle {
    cmd_tx: mpsc::Sender<ServiceCommand>,
}

impl ServiceHandle {
    pub fn new(settings: &ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ServiceError> {
        let service = ReqwestCatalogService::new(settings)?;
        Self::with_service(Arc::new(service), sink)
    }

    pub fn with_service(
        service: Arc<dyn CatalogService>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ServiceError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut current_search: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ServiceCommand::Search {
                        generation,
                        request,
                    } => {
                        if let Some(previous) = current_search.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        current_search = Some(token.clone());
                        let service = service.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            run_search(service.as_ref(), sink.as_ref(), token, generation, request)
                                .await;
                        });
                    }
                    ServiceCommand::CancelSearch => {
                        if let Some(previous) = current_search.take() {
                            previous.cancel();
                        }
                    }
                    ServiceCommand::LoadCategories => {
                        let service = service.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = service.categories().await;
                            sink.emit(ServiceEvent::CategoriesLoaded(result));
                        });
                    }
                }
            }
            catalog_info!("Service handle dropped; stopping runtime");
        });

        Ok(Self { cmd_tx })
    }

    pub fn search(&self, generation: Generation, request: SearchRequest) {
        let _ = self.cmd_tx.send(ServiceCommand::Search {
            generation,
            request,
        });
    }

    pub fn cancel_search(&self) {
        let _ = self.cmd_tx.send(ServiceCommand::CancelSearch);
    }

    pub fn load_categories(&self) {
        let _ = self.cmd_tx.send(ServiceCommand::LoadCategories);
    }
}

async fn run_search(
    service: &dyn CatalogService,
    sink: &dyn EventSink,
    token: CancellationToken,
    generation: Generation,
    request: SearchRequest,
) {
    tokio::select! {
        _ = token.cancelled() => {
            catalog_debug!("Search generation={} cancelled", generation);
        }
        result = service.search(&request) => {
            sink.emit(ServiceEvent::SearchCompleted { generation, result });
        }
    }
}
