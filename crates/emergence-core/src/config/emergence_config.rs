//! Top-level emergence configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, DiscoveryConfig, MonitorConfig, StorageConfig};
use crate::errors::ConfigError;

/// Project-level config file name, looked up in the root passed to `load`.
pub const PROJECT_CONFIG_FILE: &str = "emergence.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`EMERGENCE_*`)
/// 3. Project config (`emergence.toml` in the root)
/// 4. User config (`~/.emergence/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmergenceConfig {
    pub storage: StorageConfig,
    pub discovery: DiscoveryConfig,
    pub analysis: AnalysisConfig,
    pub monitor: MonitorConfig,
}

/// Explicit overrides, typically from a host's command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub checkpoint_dir: Option<String>,
    pub archive_raw_features: Option<bool>,
    pub emergence_threshold: Option<f64>,
}

impl EmergenceConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &EmergenceConfig) -> Result<(), ConfigError> {
        let unit_fields = [
            (
                "discovery.min_pattern_strength",
                config.discovery.min_pattern_strength,
            ),
            (
                "discovery.cross_modal_threshold",
                config.discovery.cross_modal_threshold,
            ),
            ("discovery.min_correlation", config.discovery.min_correlation),
            (
                "analysis.emergence_threshold",
                config.analysis.emergence_threshold,
            ),
            (
                "analysis.strong_pattern_threshold",
                config.analysis.strong_pattern_threshold,
            ),
        ];
        for (field, value) in unit_fields {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }

        if let Some(multiple) = config.discovery.unknown_variance_multiple {
            if !multiple.is_finite() || multiple <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "discovery.unknown_variance_multiple".to_string(),
                    message: "must be a positive number".to_string(),
                });
            }
        }

        let non_zero_fields = [
            ("discovery.max_correlations", config.discovery.max_correlations),
            ("analysis.top_patterns_limit", config.analysis.top_patterns_limit),
            (
                "analysis.recent_discoveries_limit",
                config.analysis.recent_discoveries_limit,
            ),
        ];
        for (field, value) in non_zero_fields {
            if value == Some(0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        if config.storage.checkpoint_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.checkpoint_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if config.monitor.refresh_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "monitor.refresh_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Merge a TOML file into the config. Fields present in the file win.
    fn merge_toml_file(config: &mut EmergenceConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file_config: EmergenceConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` take precedence.
    fn merge(base: &mut EmergenceConfig, other: &EmergenceConfig) {
        macro_rules! take {
            ($($section:ident . $field:ident),* $(,)?) => {
                $(
                    if other.$section.$field.is_some() {
                        base.$section.$field = other.$section.$field.clone();
                    }
                )*
            };
        }

        take!(
            storage.checkpoint_dir,
            storage.archive_dir,
            storage.archive_raw_features,
            storage.checkpoint_timeout_ms,
            discovery.min_pattern_strength,
            discovery.cross_modal_threshold,
            discovery.min_correlation,
            discovery.max_lag,
            discovery.max_correlations,
            discovery.meta_min_slope,
            discovery.unknown_variance_multiple,
            analysis.emergence_threshold,
            analysis.strong_pattern_threshold,
            analysis.top_patterns_limit,
            analysis.recent_discoveries_limit,
            monitor.refresh_secs,
            monitor.max_backoff_secs,
            monitor.recent_limit,
        );
    }

    /// Apply environment variable overrides.
    /// Pattern: `EMERGENCE_CHECKPOINT_DIR`, `EMERGENCE_EMERGENCE_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut EmergenceConfig) {
        if let Ok(val) = std::env::var("EMERGENCE_CHECKPOINT_DIR") {
            config.storage.checkpoint_dir = Some(val);
        }
        if let Ok(val) = std::env::var("EMERGENCE_ARCHIVE_DIR") {
            config.storage.archive_dir = Some(val);
        }
        if let Ok(val) = std::env::var("EMERGENCE_ARCHIVE_RAW_FEATURES") {
            if let Ok(v) = val.parse::<bool>() {
                config.storage.archive_raw_features = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EMERGENCE_CHECKPOINT_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.storage.checkpoint_timeout_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EMERGENCE_EMERGENCE_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.analysis.emergence_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EMERGENCE_MIN_CORRELATION") {
            if let Ok(v) = val.parse::<f64>() {
                config.discovery.min_correlation = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EMERGENCE_MONITOR_REFRESH_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.monitor.refresh_secs = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut EmergenceConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.checkpoint_dir {
            config.storage.checkpoint_dir = Some(v.clone());
        }
        if let Some(v) = overrides.archive_raw_features {
            config.storage.archive_raw_features = Some(v);
        }
        if let Some(v) = overrides.emergence_threshold {
            config.analysis.emergence_threshold = Some(v);
        }
    }
}

/// Returns the user-level config file: `~/.emergence/config.toml`.
fn user_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".emergence").join("config.toml"))
}
