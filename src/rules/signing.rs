//! Android release signing rule
//!
//! Only checks that a signing credential is referenced. The credential
//! itself is never read.

use super::trait_def::{Rule, Severity};
use crate::core::snapshot::{BuildConfig, Platform};

pub struct AndroidReleaseSigning;

impl Rule for AndroidReleaseSigning {
  fn id(&self) -> &'static str {
    "android-release-signing"
  }

  fn label(&self) -> &'static str {
    "Android Keystore (Release)"
  }

  fn severity(&self) -> Severity {
    Severity::Blocking
  }

  fn applies_to(&self, config: &BuildConfig) -> bool {
    config.platform == Platform::Android && !config.is_development_build
  }

  fn check(&self, config: &BuildConfig) -> bool {
    config.signing.uses_custom_credential && !config.signing.credential_reference.trim().is_empty()
  }

  fn failure_message(&self, config: &BuildConfig) -> String {
    if !config.signing.uses_custom_credential {
      "Android release build requires a custom keystore.".to_string()
    } else {
      "Custom keystore is enabled but no keystore file is set.".to_string()
    }
  }

  fn pass_message(&self, _config: &BuildConfig) -> String {
    "Keystore configured for release builds.".to_string()
  }

  fn remediation(&self) -> &'static str {
    "Release builds require signing. Where: Player Settings > Android > Publishing Settings"
  }

  fn value(&self, config: &BuildConfig) -> String {
    if self.check(config) {
      "Set".to_string()
    } else {
      "(missing)".to_string()
    }
  }

  fn scope(&self) -> &'static str {
    "android release builds"
  }
}
