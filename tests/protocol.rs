//! End-to-end protocol tests over the public API
//!
//! Wires a gated store from the crate's own test collaborators, the way an
//! application would at startup, and drives full secret lifecycles through
//! the `BiometricCapability` contract.

use std::sync::Arc;

use biogate::challenge::{ChallengeOutcome, ScriptedChallenger};
use biogate::i18n::StaticCatalog;
use biogate::state::MemoryState;
use biogate::store::MemorySecretStore;
use biogate::{BiometricCapability, BiometricError, BiometricGatedStore, GatedStoreConfig};

const SERVICE: &str = "com.example.vault";
const KEY: &str = "user@example.com";

fn wire(
    config: GatedStoreConfig,
) -> (
    Arc<ScriptedChallenger>,
    Arc<MemorySecretStore>,
    Arc<MemoryState>,
    BiometricGatedStore,
) {
    let challenger = Arc::new(ScriptedChallenger::new(true));
    let store = Arc::new(MemorySecretStore::new());
    let state = Arc::new(MemoryState::new());

    let catalog: StaticCatalog = [
        ("touchIdConsentMessage", "unlock your vault"),
        ("windowsHelloConsentMessage", "verify your identity"),
    ]
    .into_iter()
    .map(|(key, text)| (key.to_string(), text.to_string()))
    .collect();

    let gated = BiometricGatedStore::new(
        config,
        challenger.clone(),
        store.clone(),
        Arc::new(catalog),
        state.clone(),
    );
    (challenger, store, state, gated)
}

#[tokio::test]
async fn full_secret_lifecycle() {
    let (challenger, store, state, gated) = wire(GatedStoreConfig::darwin());

    gated.initialize().await.unwrap();
    assert_eq!(state.biometric_text().as_deref(), Some("unlockWithTouchId"));
    assert!(gated.supports_biometric().await);

    // First write goes through; a repeat of the same value is a no-op.
    gated.set_secret(SERVICE, KEY, "master-key").await.unwrap();
    gated.set_secret(SERVICE, KEY, "master-key").await.unwrap();
    assert_eq!(store.set_calls(), 1);

    // Reads prompt every time.
    challenger.push(ChallengeOutcome::Confirmed);
    assert_eq!(gated.get_secret(SERVICE, KEY).await.unwrap(), "master-key");

    challenger.push(ChallengeOutcome::Denied);
    assert_eq!(
        gated.get_secret(SERVICE, KEY).await,
        Err(BiometricError::AuthFailed)
    );

    // Delete is ungated, and a second delete surfaces the store's NotFound.
    gated.delete_secret(SERVICE, KEY).await.unwrap();
    assert!(matches!(
        gated.delete_secret(SERVICE, KEY).await,
        Err(BiometricError::Store(_))
    ));
}

#[tokio::test]
async fn consent_message_follows_the_platform_config() {
    let (challenger, _store, _state, gated) = wire(GatedStoreConfig::windows());
    challenger.push(ChallengeOutcome::Confirmed);

    assert!(gated.challenge().await);
    assert_eq!(challenger.prompts(), vec!["verify your identity"]);
}

#[tokio::test]
async fn denial_variants_are_indistinguishable_to_callers() {
    let (challenger, store, _state, gated) = wire(GatedStoreConfig::darwin());
    store.seed(SERVICE, KEY, "master-key");

    for outcome in [
        ChallengeOutcome::Denied,
        ChallengeOutcome::Cancelled,
        ChallengeOutcome::TimedOut,
        ChallengeOutcome::Unavailable,
        ChallengeOutcome::PlatformError("sensor fault".into()),
    ] {
        challenger.push(outcome);
        assert_eq!(
            gated.get_secret(SERVICE, KEY).await,
            Err(BiometricError::AuthFailed)
        );
    }
    assert_eq!(store.get_calls(), 0);
}
