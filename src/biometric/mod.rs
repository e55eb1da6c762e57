//! Biometric capability contract
//!
//! The platform-neutral interface every OS-specific biometric accessor
//! satisfies, plus the caller-facing error taxonomy. The concrete protocol
//! lives in [`gated`].

use async_trait::async_trait;
use thiserror::Error;

use crate::store::StoreError;

pub mod gated;

pub use gated::{BiometricGatedStore, GatedStoreConfig};

/// Caller-facing biometric errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiometricError {
    /// Device or platform lacks biometric capability. Never raised by the
    /// gated operations themselves; callers use it to decide whether to
    /// offer the gated path at all.
    #[error("biometric authentication is not supported on this device")]
    Unsupported,

    /// The biometric challenge did not succeed. Terminal for the call; no
    /// retry is performed at this layer.
    #[error("biometric authentication failed")]
    AuthFailed,

    /// Underlying secure-store failure, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("biometric initialization failed: {0}")]
    Initialization(String),
}

/// The operations every platform biometric accessor provides.
///
/// All secret access runs through this contract: reads are gated behind a
/// fresh challenge, writes are deduplicated, deletes pass through. Which
/// implementation is active is decided once at startup and injected; there
/// is no runtime platform switch.
#[async_trait]
pub trait BiometricCapability: Send + Sync {
    /// Publishes platform wording into shared application state. Safe to
    /// call more than once.
    async fn initialize(&self) -> Result<(), BiometricError>;

    /// Pure capability probe; never fails. Queried per call, never cached
    /// here.
    async fn supports_biometric(&self) -> bool;

    /// Issues a biometric prompt. `true` only on explicit user-confirmed
    /// success; denial, cancellation, timeout, and platform errors all read
    /// as `false`.
    async fn challenge(&self) -> bool;

    /// Gated read: challenges first, then reads. The store's own not-found
    /// signal passes through as an error, never as an empty value.
    async fn get_secret(&self, service: &str, key: &str) -> Result<String, BiometricError>;

    /// Deduplicated write: a no-op when the stored value already matches.
    async fn set_secret(&self, service: &str, key: &str, value: &str)
        -> Result<(), BiometricError>;

    /// Ungated delete, passed straight through to the store.
    async fn delete_secret(&self, service: &str, key: &str) -> Result<(), BiometricError>;
}
