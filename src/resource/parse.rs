//! Loading resource documents from YAML or JSON.
//!
//! Parse failures never carry the parser's message: serde errors quote the
//! offending value (`invalid type: integer `12345``), which may be a secret.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{MaskError, Result};

use super::Resource;

/// Parse a multi-document YAML (or JSON) stream into resources.
///
/// Empty documents are skipped and `kind: List` documents are flattened into
/// their `items`.
///
/// # Example
///
/// ```
/// use kubemask::resource::parse_resources;
///
/// let yaml = "apiVersion: v1\nkind: Secret\nmetadata:\n  name: a\n---\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: b\n";
/// let resources = parse_resources(yaml, "inline").unwrap();
/// assert_eq!(resources.len(), 2);
/// assert_eq!(resources[1].kind(), Some("ConfigMap"));
/// ```
pub fn parse_resources(content: &str, source_name: &str) -> Result<Vec<Resource>> {
    let mut resources = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = Value::deserialize(document).map_err(|e| {
            let location = e.location();
            MaskError::ResourceParseError {
                source_name: source_name.to_string(),
                line: location.as_ref().map(|l| l.line()),
                column: location.as_ref().map(|l| l.column()),
            }
        })?;

        match value {
            Value::Null => continue,
            Value::Object(_) => push_document(&mut resources, value, source_name)?,
            _ => {
                return Err(MaskError::ResourceParseError {
                    source_name: format!("{} (document {} is not a mapping)", source_name, index + 1),
                    line: None,
                    column: None,
                })
            }
        }
    }

    tracing::debug!("Parsed {} resources from {}", resources.len(), source_name);
    Ok(resources)
}

fn push_document(resources: &mut Vec<Resource>, value: Value, source_name: &str) -> Result<()> {
    let is_list = value
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind == "List" || kind.ends_with("List"))
        && value.get("items").is_some_and(Value::is_array);

    if !is_list {
        resources.push(Resource::new(value));
        return Ok(());
    }

    if let Some(Value::Array(items)) = value.get("items") {
        for item in items {
            if !item.is_object() {
                return Err(MaskError::ResourceParseError {
                    source_name: format!("{} (list item is not a mapping)", source_name),
                    line: None,
                    column: None,
                });
            }
            resources.push(Resource::new(item.clone()));
        }
    }
    Ok(())
}

/// Read and parse a resource file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read and `ResourceParseError` if it is
/// not a valid YAML/JSON document stream.
pub fn load_resource_file(path: &Path) -> Result<Vec<Resource>> {
    let content = fs::read_to_string(path)?;
    parse_resources(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_single_document() {
        let resources = parse_resources("apiVersion: v1\nkind: Secret\n", "test").unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].kind(), Some("Secret"));
    }

    #[test]
    fn skips_empty_documents() {
        let yaml = "---\n---\napiVersion: v1\nkind: Secret\n---\n";
        let resources = parse_resources(yaml, "test").unwrap();
        assert_eq!(resources.len(), 1);
    }

    #[test]
    fn parses_json_input() {
        let json = r#"{"apiVersion": "v1", "kind": "Secret", "data": {"password": 12345}}"#;
        let resources = parse_resources(json, "test.json").unwrap();
        assert_eq!(resources[0].field("data").unwrap()["password"], 12345);
    }

    #[test]
    fn flattens_lists() {
        let yaml = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: v1
    kind: Secret
    metadata: {name: a}
  - apiVersion: v1
    kind: ConfigMap
    metadata: {name: b}
"#;
        let resources = parse_resources(yaml, "test").unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].name(), Some("a"));
        assert_eq!(resources[1].name(), Some("b"));
    }

    #[test]
    fn list_kind_without_items_is_kept_as_is() {
        let yaml = "apiVersion: example.com/v1\nkind: ShoppingList\nspec: {}\n";
        let resources = parse_resources(yaml, "test").unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].kind(), Some("ShoppingList"));
    }

    #[test]
    fn syntax_error_reports_location_only() {
        let yaml = "apiVersion: v1\nkind: Secret\nstringData:\n  username: [SECRETVAL\n";
        let err = parse_resources(yaml, "secrets.yaml").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("secrets.yaml"));
        assert!(!msg.contains("SECRETVAL"));
    }

    #[test]
    fn scalar_document_is_rejected() {
        let err = parse_resources("just a string\n", "test").unwrap_err();
        assert!(matches!(err, MaskError::ResourceParseError { .. }));
        assert!(!err.to_string().contains("just a string"));
    }

    #[test]
    fn load_resource_file_reads_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("secret.yaml");
        fs::write(&path, "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s\n").unwrap();

        let resources = load_resource_file(&path).unwrap();
        assert_eq!(resources[0].name(), Some("s"));
    }

    #[test]
    fn load_resource_file_missing_is_io_error() {
        let result = load_resource_file(Path::new("/nonexistent/secret.yaml"));
        assert!(matches!(result, Err(MaskError::Io(_))));
    }
}
