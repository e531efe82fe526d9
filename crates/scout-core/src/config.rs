//! Configuration management for Scout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/scout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General application settings
    pub general: GeneralConfig,
    /// Provider registry settings
    pub registry: RegistryConfig,
    /// Shared HTTP client settings
    pub http: HttpConfig,
    /// Orchestration settings
    pub scan: ScanConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SCOUT_SKIP_PASSWORD_RECOVERY`: Exclude side-effect-risky providers (true/false)
    /// - `SCOUT_HTTP_TIMEOUT_SECS`: Override the per-request timeout
    /// - `SCOUT_RUN_DEADLINE_SECS`: Set an overall deadline for one lookup
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup function.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SCOUT_SKIP_PASSWORD_RECOVERY") {
            if let Ok(skip) = val.parse() {
                self.registry.skip_password_recovery = skip;
                tracing::debug!("Override registry.skip_password_recovery from env: {}", skip);
            }
        }

        if let Some(val) = lookup("SCOUT_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.http.timeout_secs = secs;
                tracing::debug!("Override http.timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup("SCOUT_RUN_DEADLINE_SECS") {
            if let Ok(secs) = val.parse() {
                self.scan.run_deadline_secs = Some(secs);
                tracing::debug!("Override scan.run_deadline_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would make the HTTP client or orchestrator unusable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.connect_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.scan.run_deadline_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "scan.run_deadline_secs".to_string(),
                reason: "must be greater than zero when set".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/scout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "scout", "scout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: "info,scout=debug".to_string(),
        }
    }
}

/// Provider registry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Exclude providers whose check triggers a password-reset side effect
    pub skip_password_recovery: bool,
    /// Providers known to have side effects, excluded when the flag above is set
    pub password_recovery_providers: Vec<String>,
    /// Providers that are never run
    pub disabled_providers: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            skip_password_recovery: false,
            password_recovery_providers: vec![
                "adobe".to_string(),
                "mail_ru".to_string(),
                "odnoklassniki".to_string(),
            ],
            disabled_providers: Vec::new(),
        }
    }
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Default User-Agent; probes may override it per request
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: concat!("scout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Orchestration settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Overall deadline for one lookup; `None` waits for every probe
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_deadline_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_filter, "info,scout=debug");
        assert!(!config.registry.skip_password_recovery);
        assert_eq!(config.registry.password_recovery_providers.len(), 3);
        assert_eq!(config.http.timeout_secs, 10);
        assert!(config.scan.run_deadline_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[registry]"));
        assert!(toml_str.contains("[http]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(
            parsed.registry.password_recovery_providers,
            config.registry.password_recovery_providers
        );
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.registry.skip_password_recovery = true;
        config.scan.run_deadline_secs = Some(45);

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert!(loaded.registry.skip_password_recovery);
        assert_eq!(loaded.scan.run_deadline_secs, Some(45));
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_rejects_zero_timeout() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[http]\ntimeout_secs = 0\n").expect("write config file");

        let result = AppConfig::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SCOUT_SKIP_PASSWORD_RECOVERY", "true"),
            ("SCOUT_HTTP_TIMEOUT_SECS", "30"),
            ("SCOUT_RUN_DEADLINE_SECS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(ToString::to_string));

        assert!(config.registry.skip_password_recovery);
        assert_eq!(config.http.timeout_secs, 30);
        // Unparseable values are ignored
        assert!(config.scan.run_deadline_secs.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[registry]
skip_password_recovery = true
disabled_providers = ["biosmods"]
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert!(config.registry.skip_password_recovery);
        assert_eq!(config.registry.disabled_providers, vec!["biosmods"]);
        // These should be defaults
        assert_eq!(config.registry.password_recovery_providers.len(), 3);
        assert_eq!(config.http.connect_timeout_secs, 5);
    }
}
