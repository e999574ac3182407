//! `mobile-build-gate rules` - list the rule catalog

use mobile_build_gate::{GateResult, Severity, default_catalog};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RuleInfo {
  id: &'static str,
  label: &'static str,
  severity: Severity,
  scope: &'static str,
  remediation: &'static str,
}

/// Run the rules command
pub fn run_rules(json: bool) -> GateResult<()> {
  let engine = default_catalog();
  let rules: Vec<RuleInfo> = engine
    .rules()
    .iter()
    .map(|rule| RuleInfo {
      id: rule.id(),
      label: rule.label(),
      severity: rule.severity(),
      scope: rule.scope(),
      remediation: rule.remediation(),
    })
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&rules)?);
    return Ok(());
  }

  println!("📋 Rules (evaluation order):");
  for (idx, rule) in rules.iter().enumerate() {
    println!("  {}. [{}] {} ({})", idx + 1, rule.severity, rule.id, rule.scope);
  }

  Ok(())
}
