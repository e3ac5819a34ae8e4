//! In-process mapping store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingStore, StoreError};

#[derive(Default)]
struct Table {
    by_code: HashMap<String, Mapping>,
    // normalized long URL -> code, for deduplication
    by_url: HashMap<String, String>,
}

/// Mapping store backed by a guarded in-process table.
///
/// A single `RwLock` covers both indexes, which makes `try_insert` an atomic
/// check-and-set. Guards are held only for the table operation and never
/// across an await point.
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Table>, StoreError> {
        self.table
            .read()
            .map_err(|_| StoreError::Unavailable("mapping table lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Table>, StoreError> {
        self.table
            .write()
            .map_err(|_| StoreError::Unavailable("mapping table lock poisoned".into()))
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn try_insert(&self, code: &str, long_url: &str) -> Result<bool, StoreError> {
        let mut table = self.write()?;

        if table.by_code.contains_key(code) {
            return Ok(false);
        }

        table
            .by_code
            .insert(code.to_owned(), Mapping::new(code, long_url));
        // First writer wins; a racing duplicate URL keeps its own code but the
        // index stays consistent.
        table
            .by_url
            .entry(long_url.to_owned())
            .or_insert_with(|| code.to_owned());

        Ok(true)
    }

    async fn lookup(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        Ok(self.read()?.by_code.get(code).cloned())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Mapping>, StoreError> {
        let table = self.read()?;
        Ok(table
            .by_url
            .get(long_url)
            .and_then(|code| table.by_code.get(code))
            .cloned())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.by_code.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_try_insert_then_lookup() {
        let store = MemoryStore::new();

        assert!(
            store
                .try_insert("abc123xy", "https://example.com/a")
                .await
                .unwrap()
        );

        let mapping = store.lookup("abc123xy").await.unwrap().unwrap();
        assert_eq!(mapping.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_try_insert_signals_collision() {
        let store = MemoryStore::new();

        assert!(
            store
                .try_insert("abc123xy", "https://example.com/a")
                .await
                .unwrap()
        );
        assert!(
            !store
                .try_insert("abc123xy", "https://example.com/b")
                .await
                .unwrap()
        );

        // The original mapping is untouched.
        let mapping = store.lookup("abc123xy").await.unwrap().unwrap();
        assert_eq!(mapping.long_url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_lookup_unknown_code_is_none() {
        let store = MemoryStore::new();
        assert!(store.lookup("doesnotexist").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_long_url() {
        let store = MemoryStore::new();
        store
            .try_insert("abc123xy", "https://example.com/a")
            .await
            .unwrap();

        let mapping = store
            .find_by_long_url("https://example.com/a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(mapping.code, "abc123xy");

        assert!(
            store
                .find_by_long_url("https://example.com/other")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_count_tracks_inserts() {
        let store = MemoryStore::new();
        assert_eq!(store.count().await.unwrap(), 0);

        store
            .try_insert("code0001", "https://example.com/1")
            .await
            .unwrap();
        store
            .try_insert("code0002", "https://example.com/2")
            .await
            .unwrap();
        // Collision does not bump the count.
        store
            .try_insert("code0001", "https://example.com/3")
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_try_insert_same_code_single_winner() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();

        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .try_insert("contested", &format!("https://example.com/{i}"))
                    .await
                    .unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
