//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/proptree/proptree.toml`
//! 3. Local config: `<dir>/.proptree.toml`
//! 4. Environment variables: `PROPTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::InfraError;

/// Unified configuration for proptree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Format used when a file extension names no known format (default: "toml")
    pub default_format: String,
    /// Annotate `show` output with value kinds (default: true)
    pub show_kinds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: "toml".into(),
            show_kinds: true,
        }
    }
}

/// Get the XDG config directory for proptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "proptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("proptree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".proptree.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.proptree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, InfraError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("default_format", defaults.default_format)
            .map_err(config_err)?
            .set_default("show_kinds", defaults.show_kinds)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                builder = builder.add_source(File::from(global_path).format(FileFormat::Toml));
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                builder = builder.add_source(File::from(local_path).format(FileFormat::Toml));
            }
        }

        builder = builder.add_source(Environment::with_prefix("PROPTREE").try_parsing(true));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, InfraError> {
        toml::to_string_pretty(self).map_err(|e| InfraError::load("settings", e))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# proptree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/proptree/proptree.toml
#   Local:  <dir>/.proptree.toml
#   Env:    PROPTREE_* environment variables

# Format used when a file extension is not recognised (toml, json, yaml)
# default_format = "toml"

# Annotate `proptree show` output with value kinds
# show_kinds = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> InfraError {
    InfraError::load("settings", e)
}
