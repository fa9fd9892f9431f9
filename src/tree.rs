use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::{ConfigError, Result};

/// Reserved delimiter joining path segments.
///
/// Keys containing this character cannot be addressed.
pub const PATH_DELIMITER: char = '|';

/// A loaded configuration document with path-based lookup.
///
/// Paths descend through nested mappings only; sequences are not
/// indexable. For a document like
///
/// ```yaml
/// group_settings:
///   sddc:
///     deploy_keys:
///       qa_puppet:
///         can_push: false
/// ```
///
/// the path `"group_settings|sddc|deploy_keys"` addresses the mapping
/// holding `qa_puppet`.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: Value,
    config_dir: PathBuf,
}

impl ConfigTree {
    /// Wrap a parsed document. Trees only reach callers through the
    /// loader, after validation has passed.
    pub(crate) fn new(root: Value, config_dir: PathBuf) -> Self {
        Self { root, config_dir }
    }

    /// Walk `path` through nested mappings and return the node it
    /// addresses.
    ///
    /// Resolution is strict left-to-right: every segment must be a key
    /// of the mapping reached so far. A missing key or a non-mapping
    /// intermediate node yields `None`. An empty path looks up the
    /// empty-string key; it is not special-cased.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split(PATH_DELIMITER) {
            match current {
                Value::Mapping(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Get the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when the path does not
    /// resolve.
    pub fn get(&self, path: &str) -> Result<&Value> {
        self.resolve(path).ok_or_else(|| ConfigError::KeyNotFound {
            path: path.to_string(),
        })
    }

    /// Get the node at `path`, or `default` when it does not resolve.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.resolve(path).unwrap_or(default)
    }

    /// Deserialize the node at `path` into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::KeyNotFound`] when the path does not
    /// resolve and [`ConfigError::Structure`] when the node does not
    /// match the target type.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let node = self.get(path)?;
        serde_yaml::from_value(node.clone()).map_err(|e| ConfigError::Structure {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Whether `path` resolves to a node.
    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// The root of the parsed document.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Directory the configuration was loaded from.
    ///
    /// Relative file references inside the config are resolved against
    /// this. It is `"."` for string sources.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
group_settings:
  sddc:
    deploy_keys:
      qa_puppet:
        key: some key
        title: some title
        can_push: false
"#;

    fn tree(yaml: &str) -> ConfigTree {
        ConfigTree::new(serde_yaml::from_str(yaml).unwrap(), PathBuf::from("."))
    }

    #[test]
    fn test_get_returns_nested_node() {
        let t = tree(SAMPLE);

        let keys = t.get("group_settings|sddc|deploy_keys").unwrap();
        assert!(keys.is_mapping());

        let can_push = t
            .get("group_settings|sddc|deploy_keys|qa_puppet|can_push")
            .unwrap();
        assert_eq!(can_push, &Value::Bool(false));
    }

    #[test]
    fn test_missing_key_is_key_not_found() {
        let t = tree(SAMPLE);

        let err = t.get("group_settings|missing").unwrap_err();
        assert!(
            matches!(err, ConfigError::KeyNotFound { path } if path == "group_settings|missing")
        );
    }

    #[test]
    fn test_default_substitutes_for_missing_key() {
        let t = tree(SAMPLE);
        let default = Value::from(42);

        assert_eq!(t.get_or("no_such_section", &default), &default);
        // A resolvable path ignores the default.
        assert!(t.get_or("group_settings", &default).is_mapping());
    }

    #[test]
    fn test_sequences_are_not_indexable() {
        let t = tree("items:\n  - a\n  - b\n");

        assert!(t.resolve("items|0").is_none());
        assert!(t.resolve("items|a").is_none());
        assert!(t.get("items").unwrap().is_sequence());
    }

    #[test]
    fn test_empty_path_looks_up_empty_key() {
        let t = tree("\"\": under empty\n");
        assert_eq!(t.get("").unwrap(), &Value::from("under empty"));

        assert!(tree(SAMPLE).resolve("").is_none());
    }

    #[test]
    fn test_typed_extraction() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct DeployKey {
            key: String,
            title: String,
            can_push: bool,
        }

        let t = tree(SAMPLE);
        let dk: DeployKey = t.get_as("group_settings|sddc|deploy_keys|qa_puppet").unwrap();
        assert_eq!(
            dk,
            DeployKey {
                key: "some key".to_string(),
                title: "some title".to_string(),
                can_push: false,
            }
        );
    }

    #[test]
    fn test_typed_extraction_shape_mismatch() {
        let t = tree(SAMPLE);

        let err = t.get_as::<Vec<String>>("group_settings").unwrap_err();
        assert!(matches!(err, ConfigError::Structure { .. }));
    }

    #[test]
    fn test_contains() {
        let t = tree(SAMPLE);
        assert!(t.contains("group_settings|sddc"));
        assert!(!t.contains("project_settings"));
    }
}
