use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::Endpoints;
use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, ENV_API_KEY, ENV_TIMEOUT_SECS};

/// Client configuration loaded from YAML and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetuxConfig {
    /// Detux API key; usually supplied through `DETUX_API_KEY` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Endpoint URLs
    pub endpoints: Endpoints,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DetuxConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoints: Endpoints::default(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl DetuxConfig {
    /// Load a configuration from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: DetuxConfig = serde_yaml::from_str(&content)
            .context(format!("Failed to parse YAML config: {}", path.display()))?;

        if config.timeout_secs == 0 {
            bail!("timeout_secs in {} must be greater than 0", path.display());
        }

        Ok(config)
    }

    /// Save the configuration as YAML.
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialize config to YAML")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        fs::write(path, yaml).context(format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Apply `DETUX_API_KEY` and `DETUX_TIMEOUT_SECS` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.is_empty()) {
            debug!("Using API key from {}", ENV_API_KEY);
            self.api_key = Some(key);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.timeout_secs = secs,
                _ => warn!("Ignoring invalid {}='{}'", ENV_TIMEOUT_SECS, raw),
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load the configuration at `config_path`, or defaults when no path is given.
///
/// An explicitly named file that does not exist is an error.
pub fn load_or_default(config_path: Option<&Path>) -> Result<DetuxConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            info!("Loading configuration from {}", path.display());
            DetuxConfig::from_yaml_file(path)
        }
        None => {
            debug!("No config path provided, using default configuration");
            Ok(DetuxConfig::default())
        }
    }
}
