use anyhow::{Context, Result};
use std::path::Path;

pub mod network;
pub mod settings;

pub use network::*;
pub use settings::*;

#[derive(Debug, Clone)]
pub struct JunctionLanesConfig {
    pub network: NetworkConfig,
    pub settings: Settings,
}

impl JunctionLanesConfig {
    /// Loads and validates the network. A missing or broken settings file
    /// falls back to the default settings.
    pub fn load_from_files(network_path: impl AsRef<Path>, settings_path: impl AsRef<Path>) -> Result<Self> {
        let network = NetworkConfig::load(network_path)?;
        let settings = Settings::load(settings_path);

        Ok(JunctionLanesConfig { network, settings })
    }
}

impl NetworkConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read network file {}", path.display()))?;

        let network: NetworkConfig = toml::from_str(&content)?;
        network.validate()?;

        Ok(network)
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
