//! Library configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ROT3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use rot3d_math::EulerSequence;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rot3dConfig {
    /// Numeric tolerance
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    /// Default Euler convention for frames
    #[serde(default)]
    pub euler: EulerConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Rot3dConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ROT3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ROT3D_EULER__SEQUENCE=zyx -> euler.sequence = "zyx"
        figment = figment.merge(Env::prefixed("ROT3D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        log::debug!(
            "Loaded config from {}: epsilon={}, euler={} ({})",
            config_dir.display(),
            config.tolerance.epsilon,
            config.euler.sequence,
            if config.euler.extrinsic { "extrinsic" } else { "intrinsic" }
        );
        Ok(config)
    }

    /// Check values that deserialize fine but are unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let eps = self.tolerance.epsilon;
        if !(eps.is_finite() && eps > 0.0) {
            return Err(ConfigError::invalid(format!(
                "tolerance.epsilon must be positive and finite, got {}",
                eps
            )));
        }
        self.euler.parsed_sequence()?;
        self.debug.level_filter()?;
        Ok(())
    }
}

/// Numeric tolerance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToleranceConfig {
    /// Zero-norm, orthogonality and equality tolerance
    pub epsilon: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            epsilon: rot3d_math::EPSILON,
        }
    }
}

/// Euler convention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EulerConfig {
    /// Axis sequence, e.g. "xyz" or "zxz"
    pub sequence: String,
    /// Rotate about fixed axes instead of the rotating frame
    pub extrinsic: bool,
}

impl Default for EulerConfig {
    fn default() -> Self {
        Self {
            sequence: "xyz".to_string(),
            extrinsic: false,
        }
    }
}

impl EulerConfig {
    /// The configured sequence, which must be one of the 12 decomposable ones
    pub fn parsed_sequence(&self) -> Result<EulerSequence, ConfigError> {
        let sequence: EulerSequence = self
            .sequence
            .parse()
            .map_err(|e| ConfigError::invalid(format!("euler.sequence: {}", e)))?;
        if !sequence.is_decomposable() {
            return Err(ConfigError::invalid(format!(
                "euler.sequence '{}' repeats an axis in adjacent positions",
                self.sequence
            )));
        }
        Ok(sequence)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl DebugConfig {
    /// The configured level as a `log` filter
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level.parse().map_err(|_| {
            ConfigError::invalid(format!(
                "debug.log_level '{}' is not a log level",
                self.log_level
            ))
        })
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
