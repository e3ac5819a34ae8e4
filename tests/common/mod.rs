#![allow(dead_code)]

use std::sync::Arc;

use linkcut::application::services::ShortenService;
use linkcut::domain::codegen::RandomCodeGenerator;
use linkcut::domain::repositories::MappingStore;
use linkcut::infrastructure::cache::NullCache;
use linkcut::infrastructure::persistence::MemoryStore;
use linkcut::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

/// Builds an application state backed by an in-memory store.
pub fn create_test_state() -> AppState {
    let store: Arc<dyn MappingStore> = Arc::new(MemoryStore::new());
    let generator = Arc::new(RandomCodeGenerator::default());
    let service = Arc::new(ShortenService::new(store.clone(), generator, BASE_URL));

    AppState {
        service,
        store,
        cache: Arc::new(NullCache),
    }
}

/// Seeds a mapping directly into the state's store.
pub async fn create_test_mapping(state: &AppState, code: &str, url: &str) {
    assert!(state.store.try_insert(code, url).await.unwrap());
}
