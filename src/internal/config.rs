use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};

const DEFAULT_CONFIG_PATH: &str = "config/kernel.json";
const CONFIG_ENV: &str = "KERNEL_SIM_CONFIG";
const UNIT_COST_ENV: &str = "KERNEL_SIM_UNIT_COST_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub time_quantum: i64,
    pub memory_size: usize,
    /// Real milliseconds slept per simulated unit. Zero disables the delay.
    pub unit_cost_ms: u64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            time_quantum: 2,
            memory_size: 100,
            unit_cost_ms: 100,
        }
    }
}

impl KernelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_quantum <= 0 {
            return Err(ConfigError::Invalid(format!(
                "time_quantum must be positive, got {}",
                self.time_quantum
            )));
        }
        if self.memory_size == 0 {
            return Err(ConfigError::Invalid(
                "memory_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_unit_cost_ms(mut self, unit_cost_ms: u64) -> Self {
        self.unit_cost_ms = unit_cost_ms;
        self
    }

    /// Applies `KERNEL_SIM_UNIT_COST_MS` on top of whatever config was chosen.
    pub(crate) fn apply_env_overrides(mut self) -> Self {
        if let Ok(raw) = env::var(UNIT_COST_ENV) {
            match raw.parse::<u64>() {
                Ok(ms) => self.unit_cost_ms = ms,
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", UNIT_COST_ENV, raw, e),
            }
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read kernel config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid kernel config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid kernel config: {0}")]
    Invalid(String),
}

/// Loads the config named by `KERNEL_SIM_CONFIG` (or `config/kernel.json`).
/// Falls back to defaults when the file is missing, unreadable or invalid.
pub fn load_config() -> KernelConfig {
    let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match read_config(Path::new(&path)) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!("Using default kernel config ({}): {}", path, e);
            KernelConfig::default()
        }
    };
    config.apply_env_overrides()
}

pub fn read_config(path: &Path) -> Result<KernelConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: KernelConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
