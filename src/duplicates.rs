//! Group and project names are de facto case insensitive downstream:
//! the case of an existing name can be changed, but two entries whose
//! names differ only in case cannot coexist. Such entries in the
//! configuration would be ambiguous, so loading rejects them.

use std::collections::HashSet;

use serde_yaml::Value;

use crate::error::{ConfigError, Result};
use crate::tree::ConfigTree;

/// Section paths checked for almost duplicate names by default.
pub const DEFAULT_SECTIONS: [&str; 4] = [
    "group_settings",
    "project_settings",
    "skip_groups",
    "skip_projects",
];

/// Validates that configured sections contain no case-ambiguous names.
///
/// The checked sections are an ordered list owned by the guard, so the
/// policy can be extended without touching the detection algorithm.
#[derive(Debug, Clone)]
pub struct DuplicateGuard {
    sections: Vec<String>,
}

impl Default for DuplicateGuard {
    fn default() -> Self {
        Self {
            sections: DEFAULT_SECTIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl DuplicateGuard {
    /// Guard over a custom ordered list of section paths.
    pub fn with_sections<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }

    /// The section paths this guard checks.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Check every configured section in order, failing on the first
    /// one that contains almost duplicates.
    ///
    /// Absent sections are skipped, as are sections set to `null` or
    /// `false` (equivalent to not configuring them).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateNames`] for the first offending
    /// section, or [`ConfigError::Structure`] when a section is not a
    /// mapping or a sequence of strings.
    pub fn validate(&self, tree: &ConfigTree) -> Result<()> {
        for section in &self.sections {
            let Some(node) = tree.resolve(section) else {
                continue;
            };
            let Some(items) = section_items(section, node)? else {
                continue;
            };

            let duplicates = find_almost_duplicates(&items);
            if !duplicates.is_empty() {
                return Err(ConfigError::DuplicateNames {
                    section: section.clone(),
                    names: duplicates,
                });
            }
        }
        Ok(())
    }
}

/// Extract the names a section contributes to the duplicate check.
///
/// Mapping sections contribute their keys, sequence sections their
/// elements. `Ok(None)` means the section is disabled (`null` or
/// `false`).
fn section_items(section: &str, node: &Value) -> Result<Option<Vec<String>>> {
    match node {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, _)| match key {
                Value::String(s) => Ok(s.clone()),
                other => Err(ConfigError::Structure {
                    path: section.to_string(),
                    message: format!("expected string keys, found {}", type_name(other)),
                }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Value::Sequence(seq) => seq
            .iter()
            .map(|elem| match elem {
                Value::String(s) => Ok(s.clone()),
                other => Err(ConfigError::Structure {
                    path: section.to_string(),
                    message: format!("expected string elements, found {}", type_name(other)),
                }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        other => Err(ConfigError::Structure {
            path: section.to_string(),
            message: format!("expected a mapping or a sequence, found {}", type_name(other)),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Find items that become identical once case is ignored.
///
/// Returns every colliding original in input order: for
/// `["Foo", "FOO", "foo"]` all three are reported, not just a
/// representative pair. The items themselves are assumed distinct, as
/// mapping keys are.
pub fn find_almost_duplicates<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let folded: Vec<String> = items.iter().map(|s| s.as_ref().to_lowercase()).collect();

    // Equal cardinality after folding means no collisions, so the
    // quadratic scan below can be skipped.
    let originals: HashSet<&str> = items.iter().map(AsRef::as_ref).collect();
    let folded_set: HashSet<&str> = folded.iter().map(String::as_str).collect();
    if originals.len() == folded_set.len() {
        return Vec::new();
    }

    let mut colliding = Vec::new();
    for item in items {
        let lower = item.as_ref().to_lowercase();
        let mut occurrences = 0;
        for candidate in &folded {
            if *candidate == lower {
                occurrences += 1;
                // The item's own folded form is in the list, so a count
                // of 2 means some other item folds to the same name.
                if occurrences == 2 {
                    colliding.push(item.as_ref().to_string());
                    break;
                }
            }
        }
    }
    colliding
}
