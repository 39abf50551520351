//! Scrubbing of free-form text.
//!
//! Messages produced by lower layers may quote resource content verbatim.
//! [`MessageMasker`] replaces every registered value with the placeholder.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use super::PLACEHOLDER;

/// Replaces known sensitive values in text.
///
/// Values are replaced longest first so that a value containing another
/// registered value is never partially revealed.
///
/// # Example
///
/// ```
/// use kubemask::masking::MessageMasker;
///
/// let mut masker = MessageMasker::new();
/// masker.add_value("SECRETVAL");
///
/// let output = masker.mask("token is SECRETVAL here");
/// assert_eq!(output, "token is ++++++++ here");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageMasker {
    values: BTreeSet<String>,
}

impl MessageMasker {
    /// Create a masker with no values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value. Empty strings are ignored.
    pub fn add_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(value);
        }
    }

    /// Register multiple values.
    pub fn add_values(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
        for value in values {
            self.add_value(value);
        }
    }

    /// Replace every registered value in `input`.
    pub fn mask(&self, input: &str) -> String {
        let mut ordered: Vec<&String> = self.values.iter().collect();
        ordered.sort_by_key(|v| Reverse(v.len()));

        let mut result = input.to_string();
        for value in ordered {
            if result.contains(value.as_str()) {
                result = result.replace(value.as_str(), PLACEHOLDER);
            }
        }
        result
    }

    /// Number of registered values.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}
