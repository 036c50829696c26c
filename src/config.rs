//! Optional TOML config file. Every key has a CLI flag that overrides it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReportError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Kubeconfig used when `--kubeconfig` is not given.
    pub kubeconfig: Option<PathBuf>,
    /// Namespaces scanned when no `--namespace` is given. Empty means all.
    pub namespaces: Vec<String>,
    /// Spreadsheet sheet name.
    pub sheet: Option<String>,
}

impl Config {
    /// Load `explicit` if given (it must exist), otherwise the default
    /// location if present, otherwise an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        toml::from_str(&text).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

/// `~/.config/kuberes/config.toml` on Linux; the platform config dir elsewhere.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kuberes").join("config.toml"))
}
