//! OS keystore secret store
//!
//! Backs [`SecretStore`] with the platform credential store through the
//! `keyring` crate (macOS Keychain, Windows Credential Manager, Linux
//! keyutils/Secret Service). Keystore calls are blocking, so each operation
//! runs on the blocking thread pool.

use async_trait::async_trait;
use keyring::Entry;

use super::{SecretStore, StoreError};

/// [`SecretStore`] over the OS credential store.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSecretStore;

impl OsSecretStore {
    pub fn new() -> Self {
        Self
    }

    /// Map keyring errors to the store error taxonomy.
    fn map_error(error: keyring::Error) -> StoreError {
        match error {
            keyring::Error::NoEntry => StoreError::NotFound,
            keyring::Error::Ambiguous(_) => {
                StoreError::Internal("ambiguous keystore entry".to_string())
            }
            keyring::Error::TooLong(field, _) => {
                StoreError::Internal(format!("field too long: {field}"))
            }
            keyring::Error::Invalid(field, _) => {
                StoreError::Internal(format!("invalid field: {field}"))
            }
            keyring::Error::NoStorageAccess(platform_err) => {
                let err_str = platform_err.to_string().to_lowercase();
                if err_str.contains("interaction not allowed") {
                    // Keychain is locked and requires unlock
                    StoreError::Locked
                } else if err_str.contains("denied") || err_str.contains("permission") {
                    StoreError::AccessDenied
                } else {
                    StoreError::Unavailable(platform_err.to_string())
                }
            }
            keyring::Error::PlatformFailure(platform_err) => {
                let err_str = platform_err.to_string().to_lowercase();
                if err_str.contains("interaction not allowed") || err_str.contains("-25308")
                // errSecInteractionNotAllowed
                {
                    StoreError::Locked
                } else if err_str.contains("-25293") || err_str.contains("authorization") {
                    // errSecAuthFailed
                    StoreError::AccessDenied
                } else {
                    StoreError::Internal(platform_err.to_string())
                }
            }
            _ => StoreError::Internal(error.to_string()),
        }
    }

    async fn run_blocking<T, F>(op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    {
        match tokio::task::spawn_blocking(op).await {
            Ok(result) => result,
            Err(e) => Err(StoreError::Internal(format!("keystore task failed: {e}"))),
        }
    }
}

#[async_trait]
impl SecretStore for OsSecretStore {
    async fn get(&self, service: &str, key: &str) -> Result<String, StoreError> {
        let service = service.to_string();
        let key = key.to_string();
        Self::run_blocking(move || {
            let entry = Entry::new(&service, &key).map_err(Self::map_error)?;
            entry.get_password().map_err(Self::map_error)
        })
        .await
    }

    async fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let service = service.to_string();
        let key = key.to_string();
        let value = value.to_string();
        Self::run_blocking(move || {
            let entry = Entry::new(&service, &key).map_err(Self::map_error)?;
            entry.set_password(&value).map_err(Self::map_error)
        })
        .await
    }

    async fn delete(&self, service: &str, key: &str) -> Result<(), StoreError> {
        let service = service.to_string();
        let key = key.to_string();
        Self::run_blocking(move || {
            let entry = Entry::new(&service, &key).map_err(Self::map_error)?;
            // NoEntry surfaces as NotFound: deletes of missing records are
            // reported to the caller, not absorbed here.
            entry.delete_password().map_err(Self::map_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_entry_maps_to_not_found() {
        let err = OsSecretStore::map_error(keyring::Error::NoEntry);
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn ambiguous_entry_is_internal() {
        let err = OsSecretStore::map_error(keyring::Error::Ambiguous(Vec::new()));
        assert!(matches!(err, StoreError::Internal(_)));
    }

    // Integration tests that touch the real keystore are gated behind a
    // feature flag because they require user interaction on macOS
    // (keychain access prompt) or a live Secret Service session on Linux.
    #[cfg(any(feature = "keychain-tests", feature = "secret-service-tests"))]
    mod integration {
        use super::*;

        const SERVICE: &str = "biogate-test";

        #[tokio::test]
        async fn keystore_roundtrip() {
            let store = OsSecretStore::new();

            // Clean up any previous test data
            let _ = store.delete(SERVICE, "roundtrip").await;

            assert_eq!(
                store.get(SERVICE, "roundtrip").await,
                Err(StoreError::NotFound)
            );

            store.set(SERVICE, "roundtrip", "test-secret").await.unwrap();
            assert_eq!(store.get(SERVICE, "roundtrip").await.unwrap(), "test-secret");

            store
                .set(SERVICE, "roundtrip", "updated-secret")
                .await
                .unwrap();
            assert_eq!(
                store.get(SERVICE, "roundtrip").await.unwrap(),
                "updated-secret"
            );

            store.delete(SERVICE, "roundtrip").await.unwrap();
            assert_eq!(
                store.get(SERVICE, "roundtrip").await,
                Err(StoreError::NotFound)
            );
        }

        #[tokio::test]
        async fn delete_of_missing_record_errors() {
            let store = OsSecretStore::new();
            let _ = store.delete(SERVICE, "never-set").await;
            assert_eq!(
                store.delete(SERVICE, "never-set").await,
                Err(StoreError::NotFound)
            );
        }
    }
}
