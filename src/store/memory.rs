//! In-memory secret store
//!
//! Mirrors the OS store contract (including `NotFound` on reads and deletes
//! of missing records) so protocol tests can observe exactly which store
//! operations the gated layer performs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::{SecretStore, StoreError};

/// In-process [`SecretStore`] with call counters and failure injection.
#[derive(Default)]
pub struct MemorySecretStore {
    records: RwLock<HashMap<(String, String), String>>,
    next_get_error: Mutex<Option<StoreError>>,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record without counting as a `set` call.
    pub fn seed(&self, service: &str, key: &str, value: &str) {
        self.records
            .write()
            .insert((service.to_string(), key.to_string()), value.to_string());
    }

    /// Makes the next `get` fail with the given error.
    pub fn fail_next_get(&self, error: StoreError) {
        *self.next_get_error.lock() = Some(error);
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get(&self, service: &str, key: &str) -> Result<String, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.next_get_error.lock().take() {
            return Err(error);
        }
        self.records
            .read()
            .get(&(service.to_string(), key.to_string()))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .write()
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn delete(&self, service: &str, key: &str) -> Result<(), StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .write()
            .remove(&(service.to_string(), key.to_string()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let store = MemorySecretStore::new();
        assert_eq!(store.get("svc", "key").await, Err(StoreError::NotFound));
        assert_eq!(store.delete("svc", "key").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = MemorySecretStore::new();
        store.set("svc", "key", "v1").await.unwrap();
        store.set("svc", "key", "v2").await.unwrap();
        assert_eq!(store.get("svc", "key").await.unwrap(), "v2");
        store.delete("svc", "key").await.unwrap();
        assert_eq!(store.get("svc", "key").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn injected_error_fires_once() {
        let store = MemorySecretStore::new();
        store.seed("svc", "key", "v1");
        store.fail_next_get(StoreError::Locked);
        assert_eq!(store.get("svc", "key").await, Err(StoreError::Locked));
        assert_eq!(store.get("svc", "key").await.unwrap(), "v1");
    }
}
