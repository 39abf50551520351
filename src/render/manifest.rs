//! Manifest listing hook.

use serde_json::Value;

use super::OutputFormat;
use crate::error::{MaskError, Result};
use crate::masking::mask_resource;
use crate::resource::Resource;
use crate::rules::RuleStore;

/// Render `resources` with every sensitive value masked.
///
/// YAML output is a multi-document stream; JSON output is a single array.
/// One rule set snapshot is used for the whole listing.
///
/// # Example
///
/// ```
/// use kubemask::render::{render_manifests, OutputFormat};
/// use kubemask::resource::parse_resources;
/// use kubemask::rules::RuleStore;
///
/// let resources = parse_resources(
///     "apiVersion: v1\nkind: Secret\nmetadata:\n  name: s\nstringData:\n  username: SECRETVAL\n",
///     "secret.yaml",
/// )
/// .unwrap();
///
/// let output = render_manifests(&resources, &RuleStore::default(), OutputFormat::Yaml).unwrap();
/// assert!(output.contains("username: ++++++++"));
/// assert!(!output.contains("SECRETVAL"));
/// ```
pub fn render_manifests(
    resources: &[Resource],
    store: &RuleStore,
    format: OutputFormat,
) -> Result<String> {
    let rules = store.snapshot();
    let masked: Vec<_> = resources
        .iter()
        .map(|res| mask_resource(res, &rules))
        .collect();

    tracing::debug!("Rendering {} manifests as {:?}", masked.len(), format);

    match format {
        OutputFormat::Yaml => {
            let mut out = String::new();
            for (index, resource) in masked.iter().enumerate() {
                if index > 0 {
                    out.push_str("---\n");
                }
                out.push_str(&resource.to_yaml()?);
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let values: Vec<&Value> = masked.iter().map(|m| m.as_value()).collect();
            let mut out =
                serde_json::to_string_pretty(&values).map_err(|e| MaskError::RenderError {
                    what: "manifests".to_string(),
                    message: e.to_string(),
                })?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use serde_json::json;

    fn resources() -> Vec<Resource> {
        vec![
            Resource::new(json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": {
                    "name": "secret",
                    "annotations": {"token": "SECRETVAL", "app": "test"}
                },
                "stringData": {"username": "SECRETVAL"},
                "data": {"password": "U0VDUkVUVkFM"}
            })),
            Resource::new(json!({
                "apiVersion": "v1",
                "kind": "ConfigMap",
                "metadata": {"name": "cm"},
                "data": {"greeting": "hello"}
            })),
        ]
    }

    #[test]
    fn yaml_listing_masks_secret_and_keeps_configmap() {
        let store = RuleStore::new(RuleSet::with_annotation_keys(["token"]));

        let output = render_manifests(&resources(), &store, OutputFormat::Yaml).unwrap();

        assert!(!output.contains("SECRETVAL"));
        assert!(!output.contains("U0VDUkVUVkFM"));
        assert!(output.contains("app: test"));
        assert!(output.contains("greeting: hello"));
        assert_eq!(output.matches("---\n").count(), 1);
    }

    #[test]
    fn json_listing_is_an_array() {
        let store = RuleStore::default();

        let output = render_manifests(&resources(), &store, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["data"]["password"], "++++++++");
        // Annotation not configured
        assert_eq!(parsed[0]["metadata"]["annotations"]["token"], "SECRETVAL");
    }

    #[test]
    fn empty_listing() {
        let output = render_manifests(&[], &RuleStore::default(), OutputFormat::Yaml).unwrap();
        assert!(output.is_empty());
    }
}
