//! Driver configuration.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::protocol::constants::{CMD_MAX_EXECUTION_TIME_MS, DEFAULT_I2C_ADDRESS, DEFAULT_I2C_BUS};

/// Bus location and timing of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// I2C bus index (`/dev/i2c-<bus>` on Linux).
    pub bus: u8,
    /// 7-bit device address.
    pub address: u8,
    /// Settle delay after wake-up and after each command, in milliseconds.
    pub exec_time_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            bus: DEFAULT_I2C_BUS,
            address: DEFAULT_I2C_ADDRESS,
            exec_time_ms: CMD_MAX_EXECUTION_TIME_MS,
        }
    }
}

impl DeviceConfig {
    pub fn exec_time(&self) -> Duration {
        Duration::from_millis(self.exec_time_ms)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DeviceConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
