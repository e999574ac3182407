//! Validation engine for the release rule catalog
//!
//! Gate and dashboard share one per-rule evaluation step. They differ only
//! in `StopPolicy`: the gate stops at the first blocking failure, the
//! dashboard never stops.

use super::trait_def::{Observed, Rule, RuleOutcome, Severity};
use crate::core::error::BlockReason;
use crate::core::snapshot::BuildConfig;
use serde::Serialize;
use std::sync::Arc;

/// When evaluation stops early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
  /// Keep only blocking failures and stop at the first one (gate)
  FirstBlocking,
  /// Evaluate and keep every applicable rule (dashboard)
  Never,
}

/// Ordered outcomes of one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
  pub outcomes: Vec<RuleOutcome>,
}

impl ValidationResult {
  /// True iff at least one applicable blocking rule failed
  pub fn has_blocking_failure(&self) -> bool {
    self.outcomes.iter().any(RuleOutcome::is_blocking)
  }

  pub fn first_blocking(&self) -> Option<&RuleOutcome> {
    self.outcomes.iter().find(|o| o.is_blocking())
  }

  pub fn warnings(&self) -> impl Iterator<Item = &RuleOutcome> {
    self.outcomes.iter().filter(|o| o.observed == Observed::Warning)
  }
}

/// Gate-mode verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
  Clear,
  Blocked(BlockReason),
}

/// Evaluates an ordered rule catalog against a snapshot
pub struct ValidationEngine {
  rules: Vec<Arc<dyn Rule>>,
}

impl ValidationEngine {
  /// Create an engine with no rules
  pub fn new() -> Self {
    Self { rules: Vec::new() }
  }

  /// Append a rule; declaration order is evaluation order
  pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
    self.rules.push(rule);
  }

  /// Get all registered rules
  pub fn rules(&self) -> &[Arc<dyn Rule>] {
    &self.rules
  }

  /// Evaluate the catalog under `policy`
  pub fn evaluate(&self, config: &BuildConfig, policy: StopPolicy) -> ValidationResult {
    let mut result = ValidationResult::default();

    for rule in &self.rules {
      let Some(outcome) = evaluate_rule(rule.as_ref(), config) else {
        continue;
      };

      match policy {
        StopPolicy::Never => result.outcomes.push(outcome),
        StopPolicy::FirstBlocking => {
          if outcome.is_blocking() {
            result.outcomes.push(outcome);
            break;
          }
        }
      }
    }

    result
  }

  /// Fail-fast evaluation used by the gate
  pub fn evaluate_for_gate(&self, config: &BuildConfig) -> GateVerdict {
    match self.evaluate(config, StopPolicy::FirstBlocking).first_blocking() {
      Some(outcome) => GateVerdict::Blocked(outcome.block_reason()),
      None => GateVerdict::Clear,
    }
  }

  /// Full-report evaluation used by the dashboard
  pub fn evaluate_all(&self, config: &BuildConfig) -> ValidationResult {
    self.evaluate(config, StopPolicy::Never)
  }
}

impl Default for ValidationEngine {
  fn default() -> Self {
    Self::new()
  }
}

/// Shared per-rule step: applicability first, then the check
///
/// Returns `None` for inapplicable rules.
fn evaluate_rule(rule: &dyn Rule, config: &BuildConfig) -> Option<RuleOutcome> {
  if !rule.applies_to(config) {
    return None;
  }

  let passed = rule.check(config);
  let observed = match (passed, rule.severity()) {
    (true, _) => Observed::Ok,
    (false, Severity::Warning) => Observed::Warning,
    (false, Severity::Blocking) => Observed::Blocking,
  };

  Some(RuleOutcome {
    rule_id: rule.id().to_string(),
    label: rule.label().to_string(),
    observed,
    value: rule.value(config),
    message: if passed {
      rule.pass_message(config)
    } else {
      rule.failure_message(config)
    },
    remediation: (!passed).then(|| rule.remediation().to_string()),
  })
}

/// Create an engine with the canonical catalog, in evaluation order
pub fn default_catalog() -> ValidationEngine {
  let mut engine = ValidationEngine::new();

  engine.add_rule(Arc::new(super::identifier::BundleIdentifierPresent));
  engine.add_rule(Arc::new(super::scenes::ScenesPresent));
  engine.add_rule(Arc::new(super::signing::AndroidReleaseSigning));
  engine.add_rule(Arc::new(super::identifier::BundleIdentifierFormat));
  engine.add_rule(Arc::new(super::identity::COMPANY_NAME_PRESENT));
  engine.add_rule(Arc::new(super::identity::PRODUCT_NAME_PRESENT));

  engine
}
