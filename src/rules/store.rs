//! Shared, runtime-updatable holder for the current rule set.

use std::sync::{Arc, RwLock};

use crate::config::Settings;
use crate::error::Result;

use super::RuleSet;

/// Holds the current [`RuleSet`] snapshot.
///
/// Readers take an `Arc` snapshot and use it for a whole evaluation, so a
/// concurrent update is never observed halfway. Writers build a complete new
/// rule set first and swap it in under the write lock.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    /// Create a store holding the given rules.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Build a store from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(RuleSet::from_settings(settings)?))
    }

    /// The current rule set.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Replace the whole rule set.
    pub fn replace(&self, rules: RuleSet) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(rules);
    }

    /// Replace the sensitive annotation keys, keeping everything else.
    ///
    /// Surrounding whitespace is trimmed and empty keys are dropped. Output
    /// rendered before the call is not affected.
    pub fn set_sensitive_annotation_keys<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        let next = RuleSet::with_annotation_keys(keys)
            .with_placeholder_style(guard.placeholder_style());
        tracing::info!(
            "Sensitive annotation keys updated ({} configured)",
            next.sensitive_annotation_keys().len()
        );
        *guard = Arc::new(next);
    }

    /// Rebuild the rules from settings.
    ///
    /// # Errors
    ///
    /// Returns the configuration error and keeps the previous rules if the
    /// settings are invalid.
    pub fn apply_settings(&self, settings: &Settings) -> Result<()> {
        let next = match RuleSet::from_settings(settings) {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("Rejected masking settings, keeping previous rules: {}", e);
                return Err(e);
            }
        };
        tracing::debug!(
            "Applying masking settings ({} sensitive annotation keys)",
            next.sensitive_annotation_keys().len()
        );
        self.replace(next);
        Ok(())
    }
}
