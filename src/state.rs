use std::sync::Arc;

use crate::application::services::ShortenService;
use crate::domain::repositories::MappingStore;
use crate::infrastructure::cache::CacheService;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ShortenService>,
    pub store: Arc<dyn MappingStore>,
    pub cache: Arc<dyn CacheService>,
}
