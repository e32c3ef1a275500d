//! Editor configuration.

use std::path::Path;

use dpe_dom_path::validate::MAX_PATH_LENGTH;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with a patch that descends through a row child index that
/// does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegationPolicy {
    /// Drop the operation and log a warning.
    #[default]
    Ignore,
    /// Fail with [`crate::DpeError::IndexOutOfBounds`].
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    #[serde(default)]
    pub delegation_policy: DelegationPolicy,

    /// Patches with deeper destination paths are rejected.
    #[serde(default = "default_max_path_depth")]
    pub max_path_depth: usize,
}

fn default_max_path_depth() -> usize {
    MAX_PATH_LENGTH
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            delegation_policy: DelegationPolicy::default(),
            max_path_depth: default_max_path_depth(),
        }
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid options: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EditorOptions {
    /// Load options from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(content)?)
    }
}
