use std::sync::{mpsc, Arc};

use catalog_client::{EventSink, ServiceError, ServiceEvent, ServiceHandle};
use catalog_core::{shareable_url, Effect, Msg};
use catalog_logging::{catalog_debug, catalog_info};
use url::Url;

use super::app::AppEvent;
use super::config::AppConfig;

/// Feeds service completions back into the app loop as messages.
pub struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: ServiceEvent) {
        let _ = self.tx.send(AppEvent::Msg(map_event(event)));
    }
}

fn map_event(event: ServiceEvent) -> Msg {
    match event {
        ServiceEvent::SearchCompleted { generation, result } => {
            Msg::PageLoaded { generation, result }
        }
        ServiceEvent::CategoriesLoaded(result) => Msg::CategoriesLoaded(result),
    }
}

pub struct EffectRunner {
    service: ServiceHandle,
    page_url: Url,
    address: Url,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, sink: Arc<dyn EventSink>) -> Result<Self, ServiceError> {
        let service = ServiceHandle::new(&config.client, sink)?;
        Ok(Self {
            service,
            page_url: config.page_url.clone(),
            address: config.page_url.clone(),
        })
    }

    /// Current shareable address of the search page.
    pub fn address(&self) -> &Url {
        &self.address
    }

    /// Starts the address from a seed such as the one the app was opened with.
    pub fn set_initial_address(&mut self, query: &str) {
        self.address = shareable_url(&self.page_url, query);
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    generation,
                    request,
                } => {
                    catalog_info!(
                        "FetchPage generation={} page={} q_len={} pricing={} category={:?} min_rating={:?}",
                        generation,
                        request.page,
                        request.q.len(),
                        request.pricing.len(),
                        request.category_id,
                        request.min_rating
                    );
                    self.service.search(generation, request);
                }
                Effect::CancelSearch => {
                    catalog_debug!("CancelSearch");
                    self.service.cancel_search();
                }
                Effect::FetchCategories => {
                    self.service.load_categories();
                }
                Effect::UpdateAddress { query } => {
                    self.address = shareable_url(&self.page_url, &query);
                    catalog_info!("Address updated to {}", self.address);
                }
            }
        }
    }
}
