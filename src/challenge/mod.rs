//! Biometric prompt boundary
//!
//! The OS prompt subsystem (Touch ID, Windows Hello, fprintd, ...) sits
//! behind [`BiometricChallenger`]. The trait reports a full
//! [`ChallengeOutcome`] rather than a bare boolean; the gated store decides
//! where to collapse that into the success/failure its callers see.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

/// Outcome of a single biometric prompt.
///
/// Everything except [`Confirmed`](ChallengeOutcome::Confirmed) is a
/// non-success; callers of the gated store cannot distinguish between them,
/// but the variants are kept apart here so the cause can be logged before it
/// is collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// The user confirmed their identity.
    Confirmed,
    /// The platform rejected the biometric (wrong finger, unrecognized face).
    Denied,
    /// The user dismissed the prompt.
    Cancelled,
    /// The prompt expired before the user responded.
    TimedOut,
    /// Biometric hardware is missing, disabled, or not enrolled.
    Unavailable,
    /// The platform reported an error unrelated to the user's response.
    PlatformError(String),
}

impl ChallengeOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// A platform biometric prompt.
#[async_trait]
pub trait BiometricChallenger: Send + Sync {
    /// Whether the device can show a biometric prompt at all. Detection
    /// errors read as `false`.
    async fn can_challenge(&self) -> bool;

    /// Shows the prompt with the given consent message and waits for the
    /// user. No timeout is imposed at this layer; a hung prompt hangs the
    /// calling operation.
    async fn challenge(&self, prompt: &str) -> ChallengeOutcome;
}

/// Scripted challenger for tests: replays a queue of outcomes and records
/// every prompt it was shown.
pub struct ScriptedChallenger {
    available: bool,
    outcomes: Mutex<VecDeque<ChallengeOutcome>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedChallenger {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            outcomes: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queues the outcome for the next unscripted challenge.
    pub fn push(&self, outcome: ChallengeOutcome) {
        self.outcomes.lock().push_back(outcome);
    }

    /// Number of prompts issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Consent messages passed to the prompt, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl BiometricChallenger for ScriptedChallenger {
    async fn can_challenge(&self) -> bool {
        self.available
    }

    async fn challenge(&self, prompt: &str) -> ChallengeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or(ChallengeOutcome::Unavailable)
    }
}
