//! Kubernetes-style resource documents.
//!
//! Resources are held as untyped [`serde_json::Value`] documents so that any
//! shape can be represented, including invalid ones (a `data` entry that is a
//! number, a missing `metadata`, and so on). The masking layer only reads
//! them; it never mutates a caller's resource.
//!
//! - [`Resource`] - A single document with typed accessors
//! - [`GroupKind`] - API group + kind identity
//! - [`ResourceKey`] - Identity used to pair live and target resources
//! - [`parse_resources`] / [`load_resource_file`] - Multi-document loading
//! - [`validate_resource`] - Structural validation with masked issue text

pub mod parse;
pub mod validate;

use std::fmt;

use serde_json::{Map, Value};

pub use parse::{load_resource_file, parse_resources};
pub use validate::{validate_resource, ValidationIssue};

/// Annotation kubectl uses to store the last applied copy of an object.
pub const LAST_APPLIED_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// API group and kind of a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GroupKind {
    /// API group; empty for the core group.
    pub group: String,
    /// Resource kind, e.g. `Secret`.
    pub kind: String,
}

impl GroupKind {
    /// Create a group/kind pair.
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }

    /// Derive the group/kind from an `apiVersion` string and a kind.
    ///
    /// `v1` maps to the core group, `apps/v1` to `apps`.
    ///
    /// # Example
    ///
    /// ```
    /// use kubemask::resource::GroupKind;
    ///
    /// assert_eq!(GroupKind::from_api_version("v1", "Secret"), GroupKind::new("", "Secret"));
    /// assert_eq!(
    ///     GroupKind::from_api_version("apps/v1", "Deployment"),
    ///     GroupKind::new("apps", "Deployment")
    /// );
    /// ```
    pub fn from_api_version(api_version: &str, kind: &str) -> Self {
        let group = match api_version.split_once('/') {
            Some((group, _version)) => group,
            None => "",
        };
        Self::new(group, kind)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// Identity of a resource within a set of manifests.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ResourceKey {
    pub group: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} {}/{}",
            self.group, self.kind, self.namespace, self.name
        )
    }
}

/// A resource document.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    value: Value,
}

impl Resource {
    /// Wrap a parsed document.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the resource, returning the document.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// `apiVersion`, if it is a string.
    pub fn api_version(&self) -> Option<&str> {
        self.value.get("apiVersion").and_then(Value::as_str)
    }

    /// `kind`, if it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.value.get("kind").and_then(Value::as_str)
    }

    /// Group and kind. Missing parts degrade to empty strings.
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::from_api_version(
            self.api_version().unwrap_or_default(),
            self.kind().unwrap_or_default(),
        )
    }

    /// `metadata.name`, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.metadata_str("name")
    }

    /// `metadata.namespace`, if it is a string.
    pub fn namespace(&self) -> Option<&str> {
        self.metadata_str("namespace")
    }

    /// `metadata.annotations`, if it is a mapping.
    pub fn annotations(&self) -> Option<&Map<String, Value>> {
        self.value
            .get("metadata")
            .and_then(|m| m.get("annotations"))
            .and_then(Value::as_object)
    }

    /// A top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.value.get(name)
    }

    /// Identity used for pairing live and target resources.
    pub fn key(&self) -> ResourceKey {
        let gk = self.group_kind();
        ResourceKey {
            group: gk.group,
            kind: gk.kind,
            namespace: self.namespace().unwrap_or_default().to_string(),
            name: self.name().unwrap_or_default().to_string(),
        }
    }

    fn metadata_str(&self, field: &str) -> Option<&str> {
        self.value
            .get("metadata")
            .and_then(|m| m.get(field))
            .and_then(Value::as_str)
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn secret() -> Resource {
        Resource::new(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {
                "name": "secret",
                "namespace": "default",
                "annotations": {"app": "test"}
            },
            "data": {"password": "U0VDUkVUVkFM"}
        }))
    }

    #[test]
    fn group_kind_from_core_api_version() {
        assert_eq!(secret().group_kind(), GroupKind::new("", "Secret"));
    }

    #[test]
    fn group_kind_from_grouped_api_version() {
        let gk = GroupKind::from_api_version("apps/v1", "Deployment");
        assert_eq!(gk.group, "apps");
        assert_eq!(gk.to_string(), "Deployment.apps");
    }

    #[test]
    fn group_kind_display_core() {
        assert_eq!(GroupKind::new("", "Secret").to_string(), "Secret");
    }

    #[test]
    fn accessors_read_metadata() {
        let res = secret();
        assert_eq!(res.name(), Some("secret"));
        assert_eq!(res.namespace(), Some("default"));
        assert_eq!(res.annotations().unwrap()["app"], "test");
        assert!(res.field("data").is_some());
    }

    #[test]
    fn accessors_degrade_on_missing_fields() {
        let res = Resource::new(json!({"kind": 7}));
        assert_eq!(res.kind(), None);
        assert_eq!(res.name(), None);
        assert!(res.annotations().is_none());
        assert_eq!(res.group_kind(), GroupKind::default());
    }

    #[test]
    fn key_formats_like_diff_header() {
        assert_eq!(secret().key().to_string(), "/Secret default/secret");
    }
}
