use crate::core::error::{ConfigError, GateError, GateResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default namespace for every persisted preference key
pub const DEFAULT_KEY_PREFIX: &str = "MBM_";

/// Configuration for mobile-build-gate
/// Searched in order: gate.toml, .gate.toml, .config/gate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
  #[serde(default)]
  pub prefs: PrefsConfig,
  #[serde(default)]
  pub logging: LoggingConfig,
}

/// Where the persisted counters and toggle live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefsConfig {
  /// Preference file (default: .gate/prefs.toml, relative to the project root)
  #[serde(default = "default_prefs_path")]
  pub path: PathBuf,

  /// Prefix applied to every key so gate settings never collide with unrelated ones
  #[serde(default = "default_key_prefix")]
  pub key_prefix: String,
}

fn default_prefs_path() -> PathBuf {
  PathBuf::from(".gate").join("prefs.toml")
}

fn default_key_prefix() -> String {
  DEFAULT_KEY_PREFIX.to_string()
}

impl Default for PrefsConfig {
  fn default() -> Self {
    Self {
      path: default_prefs_path(),
      key_prefix: default_key_prefix(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
  /// Default filter when RUST_LOG is unset
  #[serde(default = "default_log_level")]
  pub level: String,

  #[serde(default)]
  pub format: LogFormat,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      format: LogFormat::default(),
    }
  }
}

impl GateConfig {
  /// Find config file in search order: gate.toml, .gate.toml, .config/gate.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("gate.toml"),
      path.join(".gate.toml"),
      path.join(".config").join("gate.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> GateResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: GateConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config.validate()?;
    Ok(config)
  }

  /// Save config to gate.toml (default location)
  pub fn save(&self, path: &Path) -> GateResult<PathBuf> {
    let config_path = path.join("gate.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }

  pub fn validate(&self) -> GateResult<()> {
    let prefix = &self.prefs.key_prefix;
    if prefix.is_empty() {
      return Err(GateError::Config(ConfigError::Invalid {
        field: "prefs.key_prefix".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
      return Err(GateError::Config(ConfigError::Invalid {
        field: "prefs.key_prefix".to_string(),
        reason: format!("'{}' may only contain ASCII letters, digits and '_'", prefix),
      }));
    }

    match self.logging.level.as_str() {
      "trace" | "debug" | "info" | "warn" | "error" => {}
      other => {
        return Err(GateError::Config(ConfigError::Invalid {
          field: "logging.level".to_string(),
          reason: format!("'{}' must be one of trace, debug, info, warn, error", other),
        }));
      }
    }

    Ok(())
  }

  /// Preference file resolved against the project root
  pub fn prefs_path(&self, root: &Path) -> PathBuf {
    if self.prefs.path.is_absolute() {
      self.prefs.path.clone()
    } else {
      root.join(&self.prefs.path)
    }
  }
}
