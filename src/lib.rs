//! biogate — biometric-gated credential store
//!
//! Gates access to an OS-backed secure credential store behind a fresh
//! biometric challenge: every read of a secret requires a user-confirmed
//! prompt, writes are deduplicated against the stored value, and deletes
//! pass straight through. The OS prompt subsystem, the secure store, the
//! message catalog, and application state are collaborators injected behind
//! narrow traits, so each platform variant is just a different wiring of the
//! same [`biometric::BiometricGatedStore`].

pub mod biometric;
pub mod challenge;
pub mod i18n;
pub mod state;
pub mod store;

pub use biometric::{BiometricCapability, BiometricError, BiometricGatedStore, GatedStoreConfig};
pub use challenge::{BiometricChallenger, ChallengeOutcome};
pub use store::{SecretStore, StoreError};
