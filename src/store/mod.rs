//! Secure secret store boundary
//!
//! Platform-specific keyed storage for sensitive strings:
//! - macOS: Keychain
//! - Linux: Secret Service / keyutils
//! - Windows: Credential Manager
//!
//! [`os`] backs the trait with the OS keystore via the `keyring` crate;
//! [`memory`] is an in-process implementation for tests and development.

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod os;

pub use memory::MemorySecretStore;
pub use os::OsSecretStore;

/// Secure store error types.
///
/// `NotFound` is deliberately its own variant: the gated store treats a
/// missing record differently from a store failure on some paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no stored secret for this service/key")]
    NotFound,

    #[error("access to the secure store was denied")]
    AccessDenied,

    #[error("the secure store is locked")]
    Locked,

    #[error("secure store unavailable: {0}")]
    Unavailable(String),

    #[error("secure store failure: {0}")]
    Internal(String),
}

/// Keyed get/set/delete of opaque secret strings.
///
/// Records are identified by a case-sensitive `(service, key)` pair; values
/// are opaque strings with no length contract. Last write wins; no atomicity
/// is guaranteed across concurrent operations on the same pair.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Reads the stored value. A missing record is `StoreError::NotFound`,
    /// never an empty string.
    async fn get(&self, service: &str, key: &str) -> Result<String, StoreError>;

    /// Stores the value, overwriting any existing record.
    async fn set(&self, service: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the record. Deleting a missing record is
    /// `StoreError::NotFound`.
    async fn delete(&self, service: &str, key: &str) -> Result<(), StoreError>;
}
