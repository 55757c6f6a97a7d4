use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assignment::Handedness;

/// Process-wide preferences read by every assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub traffic: Handedness,
    /// Ignore outgoing bus lanes and treat them as ordinary lanes.
    #[serde(default)]
    pub legacy_mode: bool,
}

impl Settings {
    pub fn new(traffic: Handedness, legacy_mode: bool) -> Self {
        Self { traffic, legacy_mode }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Ok(toml::from_str(&content)?)
    }

    /// Like `try_load`, but logs the failure and returns the defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to save settings to {}", path.display()))?;
        Ok(())
    }
}
