//! Parsing the sensitive annotation key list.

use std::collections::BTreeSet;

use regex::Regex;

use crate::config::SENSITIVE_ANNOTATIONS_KEY;
use crate::error::{MaskError, Result};

/// Name segment of a qualified key: at most 63 characters, alphanumeric at
/// both ends, `-`, `_` and `.` allowed inside.
const NAME_PATTERN: &str = r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$";

/// Prefix segment: a DNS subdomain of at most 253 characters.
const PREFIX_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$";

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

/// Parse a comma-separated list of annotation keys.
///
/// Whitespace around entries is trimmed and empty entries are ignored, so an
/// empty string yields an empty set.
///
/// # Errors
///
/// Returns `InvalidMaskRule` naming the first entry that is not a valid
/// annotation key (`[prefix/]name`).
///
/// # Example
///
/// ```
/// use kubemask::rules::parse_annotation_keys;
///
/// let keys = parse_annotation_keys(" token, vault.example.com/secret ,").unwrap();
/// assert_eq!(keys.len(), 2);
/// assert!(keys.contains("vault.example.com/secret"));
///
/// assert!(parse_annotation_keys("token,bad key").is_err());
/// ```
pub fn parse_annotation_keys(raw: &str) -> Result<BTreeSet<String>> {
    let name_re = Regex::new(NAME_PATTERN).map_err(|e| MaskError::Other(e.into()))?;
    let prefix_re = Regex::new(PREFIX_PATTERN).map_err(|e| MaskError::Other(e.into()))?;

    let mut keys = BTreeSet::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        if let Some(problem) = check_key(entry, &name_re, &prefix_re) {
            return Err(MaskError::InvalidMaskRule {
                setting: SENSITIVE_ANNOTATIONS_KEY.to_string(),
                message: format!("'{}' is not a valid annotation key: {}", entry, problem),
            });
        }
        keys.insert(entry.to_string());
    }

    Ok(keys)
}

fn check_key(key: &str, name_re: &Regex, prefix_re: &Regex) -> Option<&'static str> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN || !prefix_re.is_match(prefix) {
            return Some("prefix must be a lowercase DNS subdomain");
        }
    }
    if name.is_empty() || name.len() > MAX_NAME_LEN || !name_re.is_match(name) {
        return Some("name must be 63 alphanumeric characters or fewer, with '-', '_' or '.' inside");
    }
    None
}
