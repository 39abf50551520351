//! Deep merge for layered settings files.
//!
//! Project settings can be overridden by a local file. This module implements
//! the merge semantics.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences and scalars in the overlay replace the base
//! - Null values in the overlay delete the corresponding key from the base
//! - An empty file (null document) leaves the merged result unchanged

use serde_yaml::Value;

/// Deep merge two YAML values.
///
/// Later values override earlier values at the point of conflict.
///
/// # Arguments
///
/// * `base` - The base settings
/// * `overlay` - The overlay settings (takes precedence)
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple settings documents in order (later overrides earlier).
///
/// Null documents (empty files) are skipped.
pub fn merge_settings(values: &[Value]) -> Value {
    values
        .iter()
        .filter(|v| !v.is_null())
        .fold(Value::Mapping(Default::default()), |acc, value| {
            deep_merge(&acc, value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn overlay_replaces_single_setting() {
        let base = yaml(
            r#"
data:
  resource.sensitive.mask.annotations: token
  resource.sensitive.mask.diff.markChanges: "true"
"#,
        );
        let overlay = yaml(
            r#"
data:
  resource.sensitive.mask.annotations: token,password
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(
            result["data"]["resource.sensitive.mask.annotations"],
            "token,password"
        );
        assert_eq!(result["data"]["resource.sensitive.mask.diff.markChanges"], "true");
    }

    #[test]
    fn null_removes_inherited_setting() {
        let base = yaml(
            r#"
data:
  resource.sensitive.mask.annotations: token
  other: value
"#,
        );
        let overlay = yaml(
            r#"
data:
  resource.sensitive.mask.annotations: null
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert!(result["data"]
            .get("resource.sensitive.mask.annotations")
            .is_none());
        assert_eq!(result["data"]["other"], "value");
    }

    #[test]
    fn sequences_are_replaced_not_merged() {
        let base = yaml("items: [a, b]");
        let overlay = yaml("items: [c]");

        let result = deep_merge(&base, &overlay);
        let items = result["items"].as_sequence().unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0], "c");
    }

    #[test]
    fn scalar_overlay_replaces_mapping_base() {
        let base = yaml("data:\n  a: b\n");
        let overlay = yaml("data: disabled\n");

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["data"], "disabled");
    }

    #[test]
    fn merge_settings_applies_in_order() {
        let values = vec![yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")];

        let result = merge_settings(&values);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }

    #[test]
    fn merge_settings_skips_empty_documents() {
        let values = vec![yaml("data:\n  a: b\n"), Value::Null];

        let result = merge_settings(&values);

        assert_eq!(result["data"]["a"], "b");
    }

    #[test]
    fn merge_nothing_returns_empty_mapping() {
        let result = merge_settings(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
