//! Application state collaborator
//!
//! `initialize` publishes the platform's biometric wording (message keys,
//! not localized text) into shared application state so the UI layer can
//! label its unlock controls. Persistence itself lives outside this crate.

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("state persistence failed: {0}")]
    Persistence(String),
}

/// Shared application state written during initialization.
#[async_trait]
pub trait PlatformState: Send + Sync {
    /// Message key for the unlock-with-biometrics control label.
    async fn set_biometric_text(&self, message_key: &str) -> Result<(), StateError>;

    /// Message key for the "don't prompt automatically" control label.
    async fn set_no_auto_prompt_text(&self, message_key: &str) -> Result<(), StateError>;
}

/// In-memory [`PlatformState`] for tests.
#[derive(Debug, Default)]
pub struct MemoryState {
    biometric_text: Mutex<Option<String>>,
    no_auto_prompt_text: Mutex<Option<String>>,
    next_error: Mutex<Option<StateError>>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next setter call fail with the given error.
    pub fn fail_next_set(&self, error: StateError) {
        *self.next_error.lock() = Some(error);
    }

    pub fn biometric_text(&self) -> Option<String> {
        self.biometric_text.lock().clone()
    }

    pub fn no_auto_prompt_text(&self) -> Option<String> {
        self.no_auto_prompt_text.lock().clone()
    }
}

#[async_trait]
impl PlatformState for MemoryState {
    async fn set_biometric_text(&self, message_key: &str) -> Result<(), StateError> {
        if let Some(error) = self.next_error.lock().take() {
            return Err(error);
        }
        *self.biometric_text.lock() = Some(message_key.to_string());
        Ok(())
    }

    async fn set_no_auto_prompt_text(&self, message_key: &str) -> Result<(), StateError> {
        if let Some(error) = self.next_error.lock().take() {
            return Err(error);
        }
        *self.no_auto_prompt_text.lock() = Some(message_key.to_string());
        Ok(())
    }
}
