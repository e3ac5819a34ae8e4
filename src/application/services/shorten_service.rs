//! Short link creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error};

use crate::domain::codegen::CodeGenerator;
use crate::domain::entities::Mapping;
use crate::domain::repositories::MappingStore;
use crate::error::AppError;
use crate::utils::url_normalizer::normalize_url;

/// Attempts to reserve a free code before giving up.
const MAX_ATTEMPTS: usize = 5;

/// Service orchestrating URL normalization, code generation and storage.
///
/// Shortening is idempotent per normalized URL: re-submitting an
/// already-mapped URL returns the existing mapping instead of minting a new
/// code.
pub struct ShortenService {
    store: Arc<dyn MappingStore>,
    generator: Arc<dyn CodeGenerator>,
    base_url: String,
}

impl ShortenService {
    pub fn new(
        store: Arc<dyn MappingStore>,
        generator: Arc<dyn CodeGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.into(),
        }
    }

    /// Creates (or returns the existing) mapping for `long_url`.
    ///
    /// Per-call state machine: Generating → Inserting → {Success | Retry |
    /// Exhausted}. A collision is a silently retried internal event, not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] when `long_url` is not an absolute http(s) URL
    /// - [`AppError::CodeSpaceExhausted`] after `MAX_ATTEMPTS` collisions
    /// - [`AppError::StorageUnavailable`] on backend faults
    pub async fn shorten(&self, long_url: &str) -> Result<Mapping, AppError> {
        let normalized = normalize_url(long_url).map_err(|e| {
            AppError::invalid_url("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self.store.find_by_long_url(&normalized).await? {
            debug!(code = %existing.code, "existing mapping reused");
            return Ok(existing);
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = self.generator.generate();

            if self.store.try_insert(&code, &normalized).await? {
                let mapping = self.store.lookup(&code).await?.ok_or_else(|| {
                    AppError::storage_unavailable(
                        "Inserted mapping could not be read back",
                        json!({ "code": code }),
                    )
                })?;
                debug!(code = %mapping.code, attempt, "mapping created");
                return Ok(mapping);
            }

            debug!(%code, attempt, "code collision, retrying");
            metrics::counter!("shorten_collisions_total").increment(1);
        }

        error!(max_attempts = MAX_ATTEMPTS, "code space exhausted");
        metrics::counter!("shorten_exhausted_total").increment(1);
        Err(AppError::code_space_exhausted(
            "Failed to reserve a unique code",
            json!({ "max_attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Shortens each URL in order, reusing existing mappings.
    ///
    /// Any invalid URL fails the whole batch.
    pub async fn shorten_batch(&self, long_urls: &[String]) -> Result<Vec<Mapping>, AppError> {
        let mut mappings = Vec::with_capacity(long_urls.len());
        for long_url in long_urls {
            mappings.push(self.shorten(long_url).await?);
        }
        Ok(mappings)
    }

    /// Resolves a short code to its target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no mapping exists for `code`.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.store
            .lookup(code)
            .await?
            .map(|mapping| mapping.long_url)
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": code }))
            })
    }

    /// Number of live mappings.
    pub async fn stats(&self) -> Result<u64, AppError> {
        Ok(self.store.count().await?)
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codegen::MockCodeGenerator;
    use crate::domain::repositories::{MockMappingStore, StoreError};

    const BASE_URL: &str = "http://localhost:8080";

    fn fixed_generator(code: &'static str) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().returning(move || code.into());
        generator
    }

    #[tokio::test]
    async fn test_shorten_inserts_new_mapping() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_try_insert()
            .withf(|code, url| code == "abc123xy" && url == "https://example.com/page")
            .times(1)
            .returning(|_, _| Ok(true));
        store
            .expect_lookup()
            .times(1)
            .returning(|code| Ok(Some(Mapping::new(code, "https://example.com/page"))));

        let service = ShortenService::new(
            Arc::new(store),
            Arc::new(fixed_generator("abc123xy")),
            BASE_URL,
        );

        let mapping = service.shorten("https://example.com/page").await.unwrap();
        assert_eq!(mapping.code, "abc123xy");
        assert_eq!(mapping.long_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_shorten_is_idempotent_per_url() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_long_url()
            .times(1)
            .returning(|url| Ok(Some(Mapping::new("existing1", url))));
        store.expect_try_insert().times(0);

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let mapping = service.shorten("https://example.com/page").await.unwrap();
        assert_eq!(mapping.code, "existing1");
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_url() {
        let store = MockMappingStore::new();
        let generator = MockCodeGenerator::new();
        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let err = service.shorten("not-a-url").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_shorten_retries_on_collision() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        // First candidate collides, second lands.
        store
            .expect_try_insert()
            .withf(|code, _| code == "taken000")
            .times(1)
            .returning(|_, _| Ok(false));
        store
            .expect_try_insert()
            .withf(|code, _| code == "free0000")
            .times(1)
            .returning(|_, _| Ok(true));
        store
            .expect_lookup()
            .times(1)
            .returning(|code| Ok(Some(Mapping::new(code, "https://example.com/page"))));

        let mut generator = MockCodeGenerator::new();
        let mut candidates = vec!["free0000", "taken000"];
        generator
            .expect_generate()
            .times(2)
            .returning(move || candidates.pop().unwrap().into());

        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let mapping = service.shorten("https://example.com/page").await.unwrap();
        assert_eq!(mapping.code, "free0000");
    }

    #[tokio::test]
    async fn test_shorten_exhausts_after_bounded_retries() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_try_insert()
            .times(MAX_ATTEMPTS)
            .returning(|_, _| Ok(false));

        let service = ShortenService::new(
            Arc::new(store),
            Arc::new(fixed_generator("occupied")),
            BASE_URL,
        );

        let err = service.shorten("https://example.com/page").await.unwrap_err();
        assert!(matches!(err, AppError::CodeSpaceExhausted { .. }));
    }

    #[tokio::test]
    async fn test_shorten_surfaces_store_fault() {
        let mut store = MockMappingStore::new();
        store
            .expect_find_by_long_url()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("disk on fire".into())));

        let generator = MockCodeGenerator::new();
        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let err = service.shorten("https://example.com/page").await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut store = MockMappingStore::new();
        store
            .expect_lookup()
            .withf(|code| code == "abc123xy")
            .times(1)
            .returning(|code| Ok(Some(Mapping::new(code, "https://example.com/page"))));

        let generator = MockCodeGenerator::new();
        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let long_url = service.resolve("abc123xy").await.unwrap();
        assert_eq!(long_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let mut store = MockMappingStore::new();
        store.expect_lookup().times(1).returning(|_| Ok(None));

        let generator = MockCodeGenerator::new();
        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let err = service.resolve("doesnotexist").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_shorten_batch_preserves_order() {
        let mut store = MockMappingStore::new();
        store.expect_find_by_long_url().returning(|_| Ok(None));
        store.expect_try_insert().returning(|_, _| Ok(true));
        store
            .expect_lookup()
            .returning(|code| Ok(Some(Mapping::new(code, "https://example.com/x"))));

        let mut generator = MockCodeGenerator::new();
        let mut candidates = vec!["code0002", "code0001"];
        generator
            .expect_generate()
            .times(2)
            .returning(move || candidates.pop().unwrap().into());

        let service = ShortenService::new(Arc::new(store), Arc::new(generator), BASE_URL);

        let mappings = service
            .shorten_batch(&[
                "https://example.com/1".to_string(),
                "https://example.com/2".to_string(),
            ])
            .await
            .unwrap();

        assert_eq!(mappings.len(), 2);
        assert_eq!(mappings[0].code, "code0001");
        assert_eq!(mappings[1].code, "code0002");
    }

    #[test]
    fn test_short_url_joins_base_and_code() {
        let service = ShortenService::new(
            Arc::new(MockMappingStore::new()),
            Arc::new(MockCodeGenerator::new()),
            "http://localhost:8080/",
        );

        assert_eq!(service.short_url("abc123xy"), "http://localhost:8080/abc123xy");
    }
}
