//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rserb/rserb.toml`
//! 3. Environment variables: `RSERB_*` prefix
//!
//! Command-line options override the loaded settings per invocation.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::application::ApplicationError;
use crate::domain::Pattern;
use crate::util::path::expand_env_vars;

/// Unified configuration for rserb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Embedded pattern (default: `<% %>`)
    pub pattern: String,
    /// Engine class name (default: `Eruby`)
    pub class: String,
    /// Template include search paths, searched before `-I` paths
    pub include_paths: Vec<PathBuf>,
    /// Kanji code (`utf8`, `none`, ...)
    pub kanji: Option<String>,
    /// Trim statement-only lines (`-T` turns this off)
    pub trim: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pattern: Pattern::DEFAULT.to_string(),
            class: "Eruby".to_string(),
            include_paths: vec![],
            kanji: None,
            trim: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub pattern: Option<String>,
    pub class: Option<String>,
    pub include_paths: Option<Vec<PathBuf>>,
    pub kanji: Option<String>,
    pub trim: Option<bool>,
}

/// Get the XDG config directory for rserb.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rserb").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rserb.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in include paths.
    fn expand_paths(&mut self) {
        self.include_paths = self
            .include_paths
            .iter()
            .map(|p| PathBuf::from(expand_env_vars(p.to_string_lossy().as_ref())))
            .collect();
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            pattern: overlay
                .pattern
                .clone()
                .unwrap_or_else(|| self.pattern.clone()),
            class: overlay.class.clone().unwrap_or_else(|| self.class.clone()),
            include_paths: overlay
                .include_paths
                .clone()
                .unwrap_or_else(|| self.include_paths.clone()),
            kanji: overlay.kanji.clone().or_else(|| self.kanji.clone()),
            trim: overlay.trim.unwrap_or(self.trim),
        }
    }

    /// Load settings from the global config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `global_path` - Config file to layer over the defaults; skipped if missing
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Config file
    /// 3. Environment variables: `RSERB_*` prefix
    pub fn load_from(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply RSERB_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RSERB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("include_paths"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("pattern") {
            settings.pattern = val;
        }
        if let Ok(val) = config.get_string("class") {
            settings.class = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("include_paths") {
            settings.include_paths = val.into_iter().map(PathBuf::from).collect();
        }
        if let Ok(val) = config.get_string("kanji") {
            settings.kanji = Some(val);
        }
        if let Ok(val) = config.get_bool("trim") {
            settings.trim = val;
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
