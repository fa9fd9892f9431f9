use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_yaml::Value;

use crate::duplicates::DuplicateGuard;
use crate::error::{ConfigError, Result};
use crate::tree::ConfigTree;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// Directory under the home directory holding the default config.
pub const HOME_CONFIG_DIR: &str = ".conftree";

/// Environment variable overriding the config location.
///
/// When set, the config is read from `$CONFTREE_HOME/config.yml`,
/// taking precedence over an explicit path. This override exists for
/// backwards compatibility and may be removed without notice; do not
/// rely on it.
pub const HOME_ENV_VAR: &str = "CONFTREE_HOME";

/// Top-level key marking the unedited example configuration.
pub const EXAMPLE_SENTINEL_KEY: &str = "example_config";

/// Builder for loading a validated [`ConfigTree`].
///
/// At most one of [`path`](Self::path) and [`text`](Self::text) may be
/// set; with neither, the config is read from the default location.
/// Loading is all or nothing: parsing, the example-config check, and
/// duplicate validation must all pass before a tree is handed out.
///
/// ```rust,no_run
/// use conftree::ConfigLoader;
///
/// let config = ConfigLoader::new().path("my-config.yml").load()?;
/// let settings = config.get("group_settings")?;
/// # Ok::<(), conftree::ConfigError>(())
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    text: Option<String>,
    guard: DuplicateGuard,
}

impl ConfigLoader {
    /// Create a loader with the default duplicate-check sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from a file.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read the configuration from an in-memory string.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Override the sections checked for almost duplicate names.
    pub fn sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.guard = DuplicateGuard::with_sections(sections);
        self
    }

    /// Load, parse, and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConflictingSources`] when both a path and
    /// a string were supplied (checked before any I/O), and otherwise
    /// surfaces read, parse, example-config, and duplicate-name
    /// failures. No partially loaded tree is ever returned.
    pub fn load(self) -> Result<ConfigTree> {
        if self.path.is_some() && self.text.is_some() {
            return Err(ConfigError::ConflictingSources);
        }

        let tree = if let Some(text) = self.text {
            info!("reading config from provided string");
            let root = parse(&text, || text.clone())?;
            ConfigTree::new(root, PathBuf::from("."))
        } else {
            let path = resolve_config_path(
                self.path,
                env::var_os(HOME_ENV_VAR).map(PathBuf::from),
                dirs::home_dir(),
            )?;
            info!("reading config from file: {}", path.display());

            let raw = fs::read_to_string(&path).map_err(|source| ConfigError::SourceNotFound {
                path: path.clone(),
                source,
            })?;
            let root = parse(&raw, || path.display().to_string())?;
            debug!("config parsed successfully as YAML");

            // Files referenced by the config are relative to its directory.
            let config_dir = match path.parent() {
                Some(dir) if dir != Path::new("") => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            ConfigTree::new(root, config_dir)
        };

        if tree.resolve(EXAMPLE_SENTINEL_KEY).is_some_and(is_set) {
            return Err(ConfigError::ExampleConfig);
        }

        self.guard.validate(&tree)?;
        Ok(tree)
    }
}

fn parse(raw: &str, origin: impl FnOnce() -> String) -> Result<Value> {
    serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
        origin: origin(),
        source,
    })
}

/// Whether a sentinel value counts as set. `null` and `false` do not.
fn is_set(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Resolve which file to read: the env override wins, then the explicit
/// path, then the home-directory default. A bare `config.yml` (or
/// `./config.yml`) is anchored at the current working directory.
fn resolve_config_path(
    explicit: Option<PathBuf>,
    env_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = env_home {
        return Ok(dir.join(DEFAULT_CONFIG_FILE));
    }

    match explicit {
        None => {
            let home = home.ok_or(ConfigError::NoHomeDirectory)?;
            Ok(home.join(HOME_CONFIG_DIR).join(DEFAULT_CONFIG_FILE))
        }
        Some(path) => {
            if path == Path::new(DEFAULT_CONFIG_FILE)
                || path == Path::new(".").join(DEFAULT_CONFIG_FILE)
            {
                let cwd = env::current_dir().map_err(|source| ConfigError::SourceNotFound {
                    path: path.clone(),
                    source,
                })?;
                Ok(cwd.join(DEFAULT_CONFIG_FILE))
            } else {
                Ok(path)
            }
        }
    }
}
