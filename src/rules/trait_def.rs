//! Rule trait abstraction for release validation
//!
//! Every rule is a pure function of a `BuildConfig`: it decides whether it
//! applies, then whether the config passes. Rules never see counters or
//! storage, so evaluating them any number of times changes nothing.
//!
//! New rules implement `Rule` and are registered in `default_catalog()`;
//! the engine does not change.

use crate::core::error::BlockReason;
use crate::core::snapshot::BuildConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared severity of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  /// Advisory only, never stops a release
  Warning,
  /// Failure aborts the release
  Blocking,
}

impl fmt::Display for Severity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Severity::Warning => write!(f, "WARN"),
      Severity::Blocking => write!(f, "BLOCK"),
    }
  }
}

/// What evaluating an applicable rule produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observed {
  Ok,
  Warning,
  Blocking,
}

impl Observed {
  pub fn icon(self) -> &'static str {
    match self {
      Observed::Ok => "✅",
      Observed::Warning => "⚠️",
      Observed::Blocking => "❌",
    }
  }
}

/// Result of evaluating one applicable rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
  pub rule_id: String,
  /// Setting the rule inspects, for display ("Bundle Identifier")
  pub label: String,
  pub observed: Observed,
  /// Current value of the inspected setting
  pub value: String,
  pub message: String,
  /// Where to fix it (failures only)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub remediation: Option<String>,
}

impl RuleOutcome {
  pub fn is_blocking(&self) -> bool {
    self.observed == Observed::Blocking
  }

  /// Structured abort payload for a blocking outcome
  pub fn block_reason(&self) -> BlockReason {
    BlockReason {
      rule_id: self.rule_id.clone(),
      message: self.message.clone(),
      remediation: self.remediation.clone().unwrap_or_default(),
    }
  }
}

/// A single release rule
///
/// ```rust,ignore
/// struct MinimumScenes;
///
/// impl Rule for MinimumScenes {
///   fn id(&self) -> &'static str { "minimum-scenes" }
///   fn label(&self) -> &'static str { "Scenes In Build" }
///   fn severity(&self) -> Severity { Severity::Warning }
///   fn applies_to(&self, config: &BuildConfig) -> bool { config.platform.is_mobile() }
///   fn check(&self, config: &BuildConfig) -> bool { config.scene_count >= 2 }
///   fn failure_message(&self, _: &BuildConfig) -> String { "Only one scene.".into() }
///   fn remediation(&self) -> &'static str { "Where: Build Settings > Scenes In Build" }
/// }
/// ```
pub trait Rule: Send + Sync {
  /// Stable identifier (kebab-case)
  fn id(&self) -> &'static str;

  /// Name of the inspected setting
  fn label(&self) -> &'static str;

  fn severity(&self) -> Severity;

  /// Inapplicable rules produce no outcome at all and can never block
  fn applies_to(&self, config: &BuildConfig) -> bool;

  /// `true` when the config satisfies the rule
  fn check(&self, config: &BuildConfig) -> bool;

  fn failure_message(&self, config: &BuildConfig) -> String;

  fn pass_message(&self, _config: &BuildConfig) -> String {
    format!("{} OK.", self.label())
  }

  fn remediation(&self) -> &'static str;

  /// Rendered current value of the inspected setting
  fn value(&self, _config: &BuildConfig) -> String {
    String::new()
  }

  /// Which platforms the rule can apply to, for the catalog listing
  fn scope(&self) -> &'static str {
    "android, ios"
  }
}

/// Render a possibly-blank setting the way the dashboard shows it
pub(crate) fn display_or(value: &str, placeholder: &str) -> String {
  if value.trim().is_empty() {
    placeholder.to_string()
  } else {
    value.to_string()
  }
}
