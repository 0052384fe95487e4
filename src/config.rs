//! Configuration (pulsecontrol.yaml).
//!
//! Every key is optional:
//!
//! ```yaml
//! pactl: /usr/bin/pactl
//! default_list: sinks
//! json: false
//! null_sink_prefix: Null sink
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PulseError, Result};
use crate::types::EntityKind;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "pulsecontrol.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The pactl binary to run.
    pub pactl: PathBuf,

    /// Entity type `list` shows when none is given on the command line.
    pub default_list: Option<EntityKind>,

    /// Print JSON instead of summary lines.
    pub json: bool,

    /// Name prefix for generated null sinks.
    pub null_sink_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pactl: PathBuf::from("pactl"),
            default_list: None,
            json: false,
            null_sink_prefix: "Null sink".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PulseError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| PulseError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })
    }

    /// Load `explicit` if given, else `pulsecontrol.yaml` in `dir` if present,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}
