//! # conftree
//!
//! Configuration core for group/project automation tools: YAML loading,
//! hierarchical path lookup, and rejection of case-ambiguous names.
//!
//! ## Features
//!
//! - Load configuration from a file, an in-memory string, or the default
//!   location (`~/.conftree/config.yml`)
//! - `|`-delimited path lookup over the parsed document
//! - Typed extraction of sub-trees via serde
//! - Almost-duplicate rejection: sections that feed case-insensitive
//!   group/project names must not contain entries differing only in case
//!
//! ## Quick Start
//!
//! ```rust
//! use conftree::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .text(
//!         r#"
//! group_settings:
//!   sddc:
//!     deploy_keys:
//!       qa_puppet:
//!         can_push: false
//! "#,
//!     )
//!     .load()
//!     .unwrap();
//!
//! let keys = config.get("group_settings|sddc|deploy_keys").unwrap();
//! assert!(keys.is_mapping());
//! ```
//!
//! ## Modules
//!
//! - [`loader`] - Source selection, parsing, and validation wiring
//! - [`tree`] - Path-based access over the parsed document
//! - [`duplicates`] - Case-insensitive near-duplicate detection
//! - [`error`] - Error types and result definitions

/// Case-insensitive near-duplicate detection.
pub mod duplicates;

/// Error types and result definitions for configuration loading.
pub mod error;

/// Configuration loading from files and strings.
pub mod loader;

/// Path-based access over a parsed configuration document.
pub mod tree;

// Re-export main types for convenience
pub use duplicates::{DEFAULT_SECTIONS, DuplicateGuard, find_almost_duplicates};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, DEFAULT_CONFIG_FILE, EXAMPLE_SENTINEL_KEY, HOME_ENV_VAR};
pub use tree::{ConfigTree, PATH_DELIMITER};

pub use serde_yaml::Value;

/// Current version of the conftree implementation
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
