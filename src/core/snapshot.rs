//! Release configuration snapshot
//!
//! `BuildConfig` is the immutable value the rules inspect. It is read fresh
//! for every gate pass and every report; nothing here is cached.
//!
//! # Example release.toml
//!
//! ```toml
//! platform = "android"
//! bundle_identifier = "com.acme.app"
//! company_name = "Acme"
//! product_name = "Rocket"
//! bundle_version = "1.4.0"
//! development_build = false
//! scenes = ["Assets/Scenes/Main.unity"]
//!
//! [signing]
//! uses_custom_keystore = true
//! keystore = "release.keystore"
//! ```

use crate::core::error::{GateError, GateResult, SnapshotError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Build target platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  #[serde(alias = "Android")]
  Android,
  #[serde(alias = "iOS", alias = "IOS")]
  Ios,
  /// Anything that is not a mobile target (standalone, web, consoles, ...)
  #[default]
  #[serde(other)]
  Other,
}

impl Platform {
  /// Mobile platforms are the only ones the gate has an opinion about
  pub fn is_mobile(self) -> bool {
    matches!(self, Platform::Android | Platform::Ios)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Platform::Android => "android",
      Platform::Ios => "ios",
      Platform::Other => "other",
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Release signing state
///
/// Only meaningful for Android release (non-development) builds. The gate
/// never sees the secret, only whether a credential is referenced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningState {
  #[serde(default, alias = "uses_custom_keystore")]
  pub uses_custom_credential: bool,
  #[serde(default, alias = "keystore")]
  pub credential_reference: String,
}

/// Immutable snapshot of the release configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  pub platform: Platform,
  pub bundle_identifier: String,
  pub company_name: String,
  pub product_name: String,
  pub scene_count: usize,
  pub is_development_build: bool,
  pub signing: SigningState,
  /// Human-facing version string, display only
  pub bundle_version: String,
}

/// On-disk shape of release.toml
#[derive(Debug, Deserialize)]
struct SnapshotFile {
  #[serde(default)]
  platform: Option<Platform>,
  #[serde(default)]
  bundle_identifier: String,
  #[serde(default)]
  company_name: String,
  #[serde(default)]
  product_name: String,
  #[serde(default)]
  bundle_version: String,
  #[serde(default)]
  development_build: bool,
  #[serde(default)]
  scenes: Option<Vec<String>>,
  #[serde(default)]
  scene_count: Option<usize>,
  #[serde(default)]
  signing: SigningState,
}

impl From<SnapshotFile> for BuildConfig {
  fn from(raw: SnapshotFile) -> Self {
    let scene_count = match (raw.scenes, raw.scene_count) {
      (Some(scenes), _) => scenes.len(),
      (None, Some(count)) => count,
      (None, None) => 0,
    };

    BuildConfig {
      platform: raw.platform.unwrap_or_default(),
      bundle_identifier: raw.bundle_identifier,
      company_name: raw.company_name,
      product_name: raw.product_name,
      scene_count,
      is_development_build: raw.development_build,
      signing: raw.signing,
      bundle_version: raw.bundle_version,
    }
  }
}

impl BuildConfig {
  /// Parse a snapshot from TOML text
  pub fn from_toml(content: &str) -> Result<Self, toml_edit::de::Error> {
    let raw: SnapshotFile = toml_edit::de::from_str(content)?;
    Ok(raw.into())
  }

  /// Read a snapshot file
  pub fn load(path: &Path) -> GateResult<Self> {
    if !path.exists() {
      return Err(GateError::Snapshot(SnapshotError::NotFound {
        path: path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(path)?;
    Self::from_toml(&content).map_err(|e| {
      GateError::Snapshot(SnapshotError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
      })
    })
  }

  /// Same snapshot, evaluated as a build for `platform`
  pub fn for_platform(&self, platform: Platform) -> Self {
    Self {
      platform,
      ..self.clone()
    }
  }
}
