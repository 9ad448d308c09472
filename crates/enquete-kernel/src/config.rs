//! RON configuration for the survey kernel and its host.
//!
//! Looked up at `--config <path>` or `$XDG_CONFIG_HOME/enquete/config.ron`.
//! A missing default file is not an error; every field has a default.
//!
//! ```ron
//! (
//!     defaults: (page_title: "Page 1", block_title: "Block 1"),
//!     server: (name: "enquete", instructions: None),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SurveyError, SurveyResult};

/// Titles used when containers are synthesized on the caller's behalf.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub page_title: String,
    pub block_title: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_title: "Page 1".to_string(),
            block_title: "Block 1".to_string(),
        }
    }
}

/// Identity the MCP host advertises.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub name: String,
    /// Overrides the built-in server instructions when set.
    pub instructions: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "enquete".to_string(),
            instructions: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnqueteConfig {
    pub defaults: Defaults,
    pub server: ServerSettings,
}

impl EnqueteConfig {
    /// `$XDG_CONFIG_HOME/enquete/config.ron`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("enquete").join("config.ron"))
    }

    /// Parse a RON document.
    pub fn from_ron(text: &str) -> SurveyResult<Self> {
        ron::from_str(text).map_err(|e| SurveyError::Config(e.to_string()))
    }

    /// Load from an explicit path. The file must exist.
    pub fn load(path: &Path) -> SurveyResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SurveyError::Config(format!("{}: {e}", path.display())))?;
        Self::from_ron(&text)
    }

    /// Load from `path` if given, otherwise from the default location if
    /// that file exists, otherwise fall back to defaults.
    pub fn discover(path: Option<&Path>) -> SurveyResult<Self> {
        if let Some(path) = path {
            tracing::info!(path = %path.display(), "Loading config");
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::info!(path = %path.display(), "Loading config");
                Self::load(&path)
            }
            _ => {
                tracing::debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
