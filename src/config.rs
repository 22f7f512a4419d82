//! Configuration file parsing
//!
//! Reads mysql-schema-lint.toml configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::checks::{AuditPolicy, CheckId, Severity};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub checks: ChecksConfig,

    #[serde(default)]
    pub capacity: CapacityConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChecksConfig {
    /// Check IDs to skip
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Thresholds for auto_increment_capacity, as consumed fractions of the
/// column type's representable range.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CapacityConfig {
    #[serde(default = "default_warning_ratio")]
    pub warning_ratio: f64,

    #[serde(default = "default_critical_ratio")]
    pub critical_ratio: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            warning_ratio: default_warning_ratio(),
            critical_ratio: default_critical_ratio(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output formats: "text", "json"
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Output directory for report files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Exit non-zero if reports meet or exceed this severity
    #[serde(default = "default_fail_on")]
    pub fail_on: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
        }
    }
}

fn default_warning_ratio() -> f64 {
    0.50
}

fn default_critical_ratio() -> f64 {
    0.90
}

fn default_formats() -> Vec<String> {
    vec!["text".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build/reports/mysql-schema-lint")
}

fn default_fail_on() -> String {
    "warning".to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for id in &self.checks.disabled {
            if id.parse::<CheckId>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "unknown check id '{id}' in checks.disabled"
                )));
            }
        }

        let warning = self.capacity.warning_ratio;
        let critical = self.capacity.critical_ratio;
        if !(0.0..=1.0).contains(&warning) || warning == 0.0 {
            return Err(ConfigError::Validation(format!(
                "capacity.warning_ratio must be in (0, 1], got {warning}"
            )));
        }
        if !(0.0..=1.0).contains(&critical) || critical == 0.0 {
            return Err(ConfigError::Validation(format!(
                "capacity.critical_ratio must be in (0, 1], got {critical}"
            )));
        }
        if warning > critical {
            return Err(ConfigError::Validation(format!(
                "capacity.warning_ratio ({warning}) must not exceed critical_ratio ({critical})"
            )));
        }

        for format in &self.output.formats {
            if !matches!(format.as_str(), "text" | "json") {
                return Err(ConfigError::Validation(format!(
                    "unknown output format '{format}'. Valid values: text, json"
                )));
            }
        }

        let fail_on = &self.cli.fail_on;
        if !fail_on.eq_ignore_ascii_case("none") && Severity::parse(fail_on).is_none() {
            return Err(ConfigError::Validation(format!(
                "invalid fail_on value '{fail_on}'. Valid values: critical, warning, concern, \
                 info, none"
            )));
        }
        Ok(())
    }

    /// The capacity thresholds as an [`AuditPolicy`].
    pub fn policy(&self) -> AuditPolicy {
        AuditPolicy {
            capacity_warning_ratio: self.capacity.warning_ratio,
            capacity_critical_ratio: self.capacity.critical_ratio,
        }
    }

    /// The enabled checks, in registration order.
    pub fn enabled_checks(&self) -> Vec<CheckId> {
        use strum::IntoEnumIterator;
        CheckId::iter()
            .filter(|id| !self.checks.disabled.iter().any(|d| d == id.as_str()))
            .collect()
    }
}
