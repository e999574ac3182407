//! Bundle identifier rules
//!
//! The identifier must exist for any mobile release. Its shape is only
//! advisory: store tooling accepts odd identifiers, people rarely mean them.

use super::trait_def::{Rule, Severity, display_or};
use crate::core::snapshot::BuildConfig;

/// Mobile builds need a bundle identifier
pub struct BundleIdentifierPresent;

impl Rule for BundleIdentifierPresent {
  fn id(&self) -> &'static str {
    "bundle-identifier-present"
  }

  fn label(&self) -> &'static str {
    "Bundle Identifier"
  }

  fn severity(&self) -> Severity {
    Severity::Blocking
  }

  fn applies_to(&self, config: &BuildConfig) -> bool {
    config.platform.is_mobile()
  }

  fn check(&self, config: &BuildConfig) -> bool {
    !config.bundle_identifier.trim().is_empty()
  }

  fn failure_message(&self, _config: &BuildConfig) -> String {
    "Bundle Identifier is empty.".to_string()
  }

  fn pass_message(&self, _config: &BuildConfig) -> String {
    "Bundle Identifier is set.".to_string()
  }

  fn remediation(&self) -> &'static str {
    "Where: Player Settings > Other Settings > Identification. Example: com.company.product"
  }

  fn value(&self, config: &BuildConfig) -> String {
    display_or(&config.bundle_identifier, "(empty)")
  }
}

/// Identifier should look like reverse-DNS: no spaces, at least one dot
pub struct BundleIdentifierFormat;

impl Rule for BundleIdentifierFormat {
  fn id(&self) -> &'static str {
    "bundle-identifier-format"
  }

  fn label(&self) -> &'static str {
    "Bundle Identifier Format"
  }

  fn severity(&self) -> Severity {
    Severity::Warning
  }

  fn applies_to(&self, config: &BuildConfig) -> bool {
    !config.bundle_identifier.trim().is_empty()
  }

  fn check(&self, config: &BuildConfig) -> bool {
    let id = &config.bundle_identifier;
    !id.contains(' ') && id.contains('.')
  }

  fn failure_message(&self, config: &BuildConfig) -> String {
    format!("Bundle Identifier '{}' does not look like reverse-DNS.", config.bundle_identifier)
  }

  fn pass_message(&self, _config: &BuildConfig) -> String {
    "Bundle Identifier format looks valid.".to_string()
  }

  fn remediation(&self) -> &'static str {
    "Typical format: com.company.product (no spaces, includes at least one dot)."
  }

  fn value(&self, config: &BuildConfig) -> String {
    config.bundle_identifier.clone()
  }

  fn scope(&self) -> &'static str {
    "any platform, when an identifier is set"
  }
}
