//! Biometric-gated store protocol
//!
//! Authenticate-then-read, dedupe-then-write, unconditional delete. The
//! store issues a challenge through the injected challenger when an
//! operation requires one, then performs the underlying store operation.
//! Operations are stateless and memoryless across invocations: every
//! `get_secret` re-challenges, and challenge results are never cached.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::challenge::{BiometricChallenger, ChallengeOutcome};
use crate::i18n::MessageCatalog;
use crate::state::PlatformState;
use crate::store::{SecretStore, StoreError};

use super::{BiometricCapability, BiometricError};

/// Message keys for one platform variant's biometric wording.
///
/// The keys are resolved through the message catalog at prompt time and
/// published to application state by `initialize`; the variants differ only
/// in wording, not in protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatedStoreConfig {
    /// Label for the unlock-with-biometrics control.
    pub biometric_text_key: String,
    /// Label for the automatic-prompt opt-out control.
    pub no_auto_prompt_text_key: String,
    /// Consent message shown on the OS prompt itself.
    pub consent_message_key: String,
}

impl GatedStoreConfig {
    /// Touch ID wording for the macOS variant.
    pub fn darwin() -> Self {
        Self {
            biometric_text_key: "unlockWithTouchId".to_string(),
            no_auto_prompt_text_key: "autoPromptTouchId".to_string(),
            consent_message_key: "touchIdConsentMessage".to_string(),
        }
    }

    /// Windows Hello wording for the Windows variant.
    pub fn windows() -> Self {
        Self {
            biometric_text_key: "unlockWithWindowsHello".to_string(),
            no_auto_prompt_text_key: "autoPromptWindowsHello".to_string(),
            consent_message_key: "windowsHelloConsentMessage".to_string(),
        }
    }
}

/// [`BiometricCapability`] over four injected collaborators.
///
/// Constructed once at startup with the collaborators for the running
/// platform and passed to consumers; there is no runtime platform switch.
/// Provides no mutual exclusion: callers racing on the same `(service, key)`
/// must serialize themselves, and concurrent gated reads each trigger their
/// own independent prompt.
pub struct BiometricGatedStore {
    config: GatedStoreConfig,
    challenger: Arc<dyn BiometricChallenger>,
    store: Arc<dyn SecretStore>,
    messages: Arc<dyn MessageCatalog>,
    state: Arc<dyn PlatformState>,
}

impl BiometricGatedStore {
    pub fn new(
        config: GatedStoreConfig,
        challenger: Arc<dyn BiometricChallenger>,
        store: Arc<dyn SecretStore>,
        messages: Arc<dyn MessageCatalog>,
        state: Arc<dyn PlatformState>,
    ) -> Self {
        Self {
            config,
            challenger,
            store,
            messages,
            state,
        }
    }

    /// Collapses the enumerated prompt outcome into the boolean contract,
    /// logging the cause the caller will never see.
    fn collapse_outcome(outcome: ChallengeOutcome) -> bool {
        match outcome {
            ChallengeOutcome::Confirmed => true,
            cause => {
                tracing::debug!(?cause, "biometric challenge did not succeed");
                false
            }
        }
    }

    /// Ungated pre-check: whether the stored value already equals `value`.
    ///
    /// Reads the store directly so the check neither triggers a prompt nor
    /// is blocked by one. Any failure reads as "unknown", so the write
    /// proceeds; the pre-check never escalates its own failure.
    async fn value_up_to_date(&self, service: &str, key: &str, value: &str) -> bool {
        match self.store.get(service, key).await {
            Ok(existing) => {
                let existing = Zeroizing::new(existing);
                existing.as_str() == value
            }
            Err(StoreError::NotFound) => false,
            Err(error) => {
                tracing::warn!(service, key, %error, "write pre-check failed, treating value as changed");
                false
            }
        }
    }
}

#[async_trait]
impl BiometricCapability for BiometricGatedStore {
    async fn initialize(&self) -> Result<(), BiometricError> {
        self.state
            .set_biometric_text(&self.config.biometric_text_key)
            .await
            .map_err(|e| BiometricError::Initialization(e.to_string()))?;
        self.state
            .set_no_auto_prompt_text(&self.config.no_auto_prompt_text_key)
            .await
            .map_err(|e| BiometricError::Initialization(e.to_string()))?;
        Ok(())
    }

    async fn supports_biometric(&self) -> bool {
        self.challenger.can_challenge().await
    }

    async fn challenge(&self) -> bool {
        let prompt = self.messages.text(&self.config.consent_message_key);
        Self::collapse_outcome(self.challenger.challenge(&prompt).await)
    }

    async fn get_secret(&self, service: &str, key: &str) -> Result<String, BiometricError> {
        if !self.challenge().await {
            return Err(BiometricError::AuthFailed);
        }
        Ok(self.store.get(service, key).await?)
    }

    async fn set_secret(
        &self,
        service: &str,
        key: &str,
        value: &str,
    ) -> Result<(), BiometricError> {
        if self.value_up_to_date(service, key, value).await {
            tracing::debug!(service, key, "stored value unchanged, skipping write");
            return Ok(());
        }
        Ok(self.store.set(service, key, value).await?)
    }

    async fn delete_secret(&self, service: &str, key: &str) -> Result<(), BiometricError> {
        Ok(self.store.delete(service, key).await?)
    }
}
