//! `mobile-build-gate gate` - run one pre-build gate pass
//!
//! Exit status is the contract with the release pipeline: 0 means produce
//! the artifact, anything else means abort.

use mobile_build_gate::core::context::ProjectContext;
use mobile_build_gate::{BuildGate, GateError, GateOutcome, GateResult, Platform, default_catalog};
use std::path::Path;

/// Run the gate command
pub fn run_gate(ctx: &ProjectContext, snapshot: &Path, platform: Option<Platform>, json: bool) -> GateResult<()> {
  let config = ctx.read_snapshot(snapshot)?;
  let platform = platform.unwrap_or(config.platform);

  let engine = default_catalog();
  let mut counters = ctx.counter_store();
  let outcome = BuildGate::new(&engine, &mut counters).validate_and_gate(platform, &config)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
  } else if let GateOutcome::Passed(ref report) = outcome {
    if report.skipped {
      println!("⏭️  Non-mobile target ({}): gate checks do not apply.", report.platform);
    } else {
      println!("✅ Validation passed ({})", report.platform);
      if !report.auto_increment {
        println!("   ℹ️  Auto-increment on build is OFF. Build numbers unchanged.");
      }
      for inc in &report.increments {
        println!("   {} {} -> {}", inc.platform, inc.counter, inc.value);
      }
    }
  }

  match outcome {
    GateOutcome::Passed(_) => Ok(()),
    GateOutcome::Blocked(reason) => Err(GateError::Blocked(reason)),
  }
}
