//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/flatforest/flatforest.toml`
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment variables: `FLATFOREST_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// How caller-supplied depth sequences are treated on load.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject malformed encodings before any processing
    #[default]
    Strict,
    /// Accept input as given; results on malformed input are unspecified
    Trust,
}

/// Output rendering of a hierarchy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// `[id:depth, ...]`
    #[default]
    Flat,
    /// One indented line per node
    Outline,
    /// Box-drawing tree per root
    Tree,
}

/// Unified configuration for flatforest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Validation policy for loaded hierarchies (default: strict)
    pub validation: ValidationMode,
    /// Default output style (default: flat)
    pub style: RenderStyle,
    /// Indentation marker for the outline style (default: "-")
    pub outline_marker: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            validation: ValidationMode::default(),
            style: RenderStyle::default(),
            outline_marker: "-".into(),
        }
    }
}

/// Get the XDG config directory for flatforest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flatforest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("flatforest.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Layered load with the global file location made explicit.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("validation", "strict")
            .map_err(config_err)?
            .set_default("style", "flat")
            .map_err(config_err)?
            .set_default("outline_marker", defaults.outline_marker)
            .map_err(config_err)?;

        if let Some(path) = global {
            debug!("global config: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if let Some(path) = explicit {
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("FLATFOREST")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# flatforest configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/flatforest/flatforest.toml
#   Explicit: flatforest --config <path>
#   Env:      FLATFOREST_* environment variables

# Input validation: "strict" rejects malformed depth sequences,
# "trust" accepts them as given (results are then unspecified)
# validation = "strict"

# Output style: "flat", "outline" or "tree"
# style = "flat"

# Indentation marker for the outline style
# outline_marker = "-"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
