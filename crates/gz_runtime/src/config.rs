use std::path::{Path, PathBuf};

use gz_syntax::GzSyntax;
use gz_transpile::{LoopGuard, DEFAULT_LOOP_CEILING};
use serde::{Deserialize, Serialize};

use crate::quickjs::SandboxConfig;

/// Everything a [`Runner`](crate::Runner) needs to know. Missing fields take
/// their defaults, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub syntax: GzSyntax,
    /// Total `while` condition checks allowed per run.
    pub loop_ceiling: u32,
    pub sandbox: SandboxConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            syntax: GzSyntax::default(),
            loop_ceiling: DEFAULT_LOOP_CEILING,
            sandbox: SandboxConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl RunConfig {
    pub fn loop_guard(&self) -> LoopGuard {
        LoopGuard::new(self.loop_ceiling)
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
