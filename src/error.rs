use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or querying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("config file not found or not readable: {}", .path.display())]
    SourceNotFound {
        /// Path that did not resolve to a readable file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML.
    #[error("invalid configuration from {origin}: {source}")]
    Parse {
        /// The config file path, or the raw input for string sources.
        origin: String,
        /// The underlying YAML parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed, but a node does not have the expected shape.
    #[error("invalid configuration structure at `{path}`: {message}")]
    Structure {
        /// Path of the offending node.
        path: String,
        /// What was expected and what was found.
        message: String,
    },

    /// A `get` without a default traversed a missing key or a
    /// non-mapping node.
    #[error("key not found: `{path}`")]
    KeyNotFound {
        /// The path that failed to resolve.
        path: String,
    },

    /// A checked section contains names that differ only in case. Such
    /// names are ambiguous because group and project names are matched
    /// case-insensitively.
    #[error("almost duplicate names in `{section}`, they differ only in case: {}", .names.join(", "))]
    DuplicateNames {
        /// The section path that failed the check.
        section: String,
        /// Every colliding name, in configuration order.
        names: Vec<String>,
    },

    /// Both a config path and a config string were supplied.
    #[error("initialize with either a config path or a config string, not both")]
    ConflictingSources,

    /// The unedited example configuration was loaded. If you created
    /// your config based on the example one, remove the
    /// `example_config` key.
    #[error(
        "example config detected, aborting; if you created your config from the example one, remove the `example_config` key"
    )]
    ExampleConfig,

    /// The default config location requires a home directory and none
    /// could be determined.
    #[error("could not determine the home directory")]
    NoHomeDirectory,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
