//! # Configuration Module
//!
//! Optional user defaults for the mixer, read from a JSON file in the
//! platform configuration directory:
//!
//! - Linux: `~/.config/camelot-mixer/config.json`
//! - macOS: `~/Library/Application Support/camelot-mixer/config.json`
//! - Windows: `%APPDATA%\camelot-mixer\config.json`
//!
//! ## Precedence
//!
//! Command-line flag, then environment variable, then this file, then the
//! built-in strategy preset. A missing file simply means "use the presets".
//!
//! ```json
//! {
//!   "strategy": "bpm-first",
//!   "weight_bpm": 0.5,
//!   "output_dir": "/home/dj/mixes",
//!   "parallel_threshold": 512
//! }
//! ```

use crate::path::PathBuilder;
use crate::strategy::{Strategy, StrategyKind};
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the platform-appropriate config file path.
///
/// Unlike a data directory, nothing is created here: the config file is
/// optional and only read when present.
///
/// # Errors
///
/// Returns an error if the system configuration directory cannot be determined.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Pass --config to point at a config file."
        )
    })?;

    Ok(config_dir.join("camelot-mixer").join("config.json"))
}

/// User defaults for mixing runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixerConfig {
    pub strategy: StrategyKind,
    /// Overrides the BPM weight of `strategy`'s preset when set. Ignored
    /// when another strategy is selected.
    pub weight_bpm: Option<f64>,
    /// Directory for mixes written without an explicit `--output`
    pub output_dir: Option<PathBuf>,
    pub parallel_threshold: usize,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            weight_bpm: None,
            output_dir: None,
            parallel_threshold: PathBuilder::default().parallel_threshold,
        }
    }
}

impl MixerConfig {
    /// Load the config file at `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, or from the platform default location.
    ///
    /// # Errors
    ///
    /// See [`MixerConfig::load_from`] and [`get_config_path`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&get_config_path()?),
        }
    }

    /// Resolve the scoring strategy, letting `kind` and `weight_bpm` from the
    /// command line win over file values.
    ///
    /// The file's `weight_bpm` only applies to the file's own `strategy`;
    /// selecting a different kind starts from that kind's preset weight.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidWeight`] for an unusable weight.
    pub fn strategy(
        &self,
        kind: Option<StrategyKind>,
        weight_bpm: Option<f64>,
    ) -> crate::Result<Strategy> {
        let kind = kind.unwrap_or(self.strategy);
        let file_weight = self.weight_bpm.filter(|_| kind == self.strategy);
        let preset = kind.preset();
        match weight_bpm.or(file_weight) {
            Some(weight) => preset.with_weight_bpm(weight),
            None => Ok(preset),
        }
    }

    #[must_use]
    pub fn path_builder(&self) -> PathBuilder {
        PathBuilder::new(self.parallel_threshold)
    }
}
