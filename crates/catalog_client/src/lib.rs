//! Catalog client: HTTP access to the catalog backend and effect execution.
mod engine;
mod service;
mod settings;
mod types;
mod wire;

pub use engine::ServiceHandle;
pub use service::{CatalogService, ReqwestCatalogService};
pub use settings::ClientSettings;
pub use types::{ChannelEventSink, EventSink, ServiceError, ServiceEvent};
