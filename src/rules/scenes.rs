//! Scene list rule

use super::trait_def::{Rule, Severity};
use crate::core::snapshot::BuildConfig;

/// A mobile build with no scenes produces an app that boots into nothing
pub struct ScenesPresent;

impl Rule for ScenesPresent {
  fn id(&self) -> &'static str {
    "scenes-present"
  }

  fn label(&self) -> &'static str {
    "Scenes In Build"
  }

  fn severity(&self) -> Severity {
    Severity::Blocking
  }

  fn applies_to(&self, config: &BuildConfig) -> bool {
    config.platform.is_mobile()
  }

  fn check(&self, config: &BuildConfig) -> bool {
    config.scene_count > 0
  }

  fn failure_message(&self, _config: &BuildConfig) -> String {
    "No scenes are added to Build Settings.".to_string()
  }

  fn pass_message(&self, _config: &BuildConfig) -> String {
    "At least one scene is included.".to_string()
  }

  fn remediation(&self) -> &'static str {
    "Where: Build Settings > Scenes In Build"
  }

  fn value(&self, config: &BuildConfig) -> String {
    if config.scene_count == 0 {
      "(none)".to_string()
    } else {
      config.scene_count.to_string()
    }
  }
}
