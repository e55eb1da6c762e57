//! Localized message lookup
//!
//! Used only to build the consent message shown on the biometric prompt.

use std::collections::HashMap;

/// Localized text lookup. Unknown keys echo the key back so a missing
/// translation degrades to a readable placeholder rather than an error.
pub trait MessageCatalog: Send + Sync {
    fn text(&self, key: &str) -> String;
}

/// Map-backed catalog.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    messages: HashMap<String, String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.messages.insert(key.into(), text.into());
        self
    }
}

impl FromIterator<(String, String)> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl MessageCatalog for StaticCatalog {
    fn text(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_echoes_back() {
        let catalog = StaticCatalog::new();
        assert_eq!(catalog.text("touchIdConsentMessage"), "touchIdConsentMessage");
    }

    #[test]
    fn known_key_resolves() {
        let mut catalog = StaticCatalog::new();
        catalog.insert("touchIdConsentMessage", "unlock your vault");
        assert_eq!(catalog.text("touchIdConsentMessage"), "unlock your vault");
    }
}
