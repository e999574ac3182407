//! `mobile-build-gate report` - full validator dashboard
//!
//! Evaluates every rule and shows counters. Never increments anything and
//! exits 0 even when a release would be blocked.

use mobile_build_gate::core::context::ProjectContext;
use mobile_build_gate::{GateResult, ValidationReport, default_catalog};
use std::path::Path;

/// Run the report command
pub fn run_report(ctx: &ProjectContext, snapshot: &Path, json: bool) -> GateResult<()> {
  let config = ctx.read_snapshot(snapshot)?;
  let engine = default_catalog();
  let counters = ctx.counter_store();

  let report = ValidationReport::build(&engine, &config, &counters)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print!("{}", report.render_text());
  }

  Ok(())
}
