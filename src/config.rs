//! Runtime configuration for the herald
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (herald.toml)
//! - Environment variables (HERALD_*)
//!
//! ## Example config file (herald.toml):
//! ```toml
//! [calendars]
//! dir = "./calendars"
//!
//! [dispatch]
//! file = "./send.json"
//! deviation_fix_digits = 3
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the herald binaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// Calendar definition settings
    #[serde(default)]
    pub calendars: CalendarsConfig,

    /// Dispatch settings
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Where calendar definitions and their schema artifact live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarsConfig {
    /// Directory holding definition files and the schema artifact
    #[serde(default = "default_calendars_dir")]
    pub dir: PathBuf,
}

/// Dispatch-run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Path to the dispatch list file
    #[serde(default = "default_dispatch_file")]
    pub file: PathBuf,

    /// Decimal digits of slack when snapping fractional years
    #[serde(default = "default_deviation_fix_digits")]
    pub deviation_fix_digits: u32,
}

fn default_calendars_dir() -> PathBuf {
    PathBuf::from("./calendars")
}

fn default_dispatch_file() -> PathBuf {
    PathBuf::from("./send.json")
}

fn default_deviation_fix_digits() -> u32 {
    3
}

impl Default for CalendarsConfig {
    fn default() -> Self {
        Self {
            dir: default_calendars_dir(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            file: default_dispatch_file(),
            deviation_fix_digits: default_deviation_fix_digits(),
        }
    }
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            calendars: CalendarsConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl HeraldConfig {
    /// Load configuration: defaults, then `herald.toml` if present, then
    /// `HERALD_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("herald").required(false))
            .add_source(Environment::with_prefix("HERALD").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HeraldConfig::default();
        assert_eq!(config.calendars.dir, PathBuf::from("./calendars"));
        assert_eq!(config.dispatch.deviation_fix_digits, 3);
    }

    #[test]
    fn test_sections_default_independently() {
        let config: HeraldConfig =
            serde_json::from_str(r#"{"dispatch": {"file": "lists/send.json"}}"#).unwrap();
        assert_eq!(config.dispatch.file, PathBuf::from("lists/send.json"));
        assert_eq!(config.dispatch.deviation_fix_digits, 3);
        assert_eq!(config.calendars.dir, PathBuf::from("./calendars"));
    }
}
