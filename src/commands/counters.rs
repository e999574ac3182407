//! `mobile-build-gate counters` - inspect counters, flip auto-increment
//!
//! Nothing here increments a counter. That only happens inside a passing
//! gate run.

use chrono::{DateTime, Utc};
use mobile_build_gate::core::context::ProjectContext;
use mobile_build_gate::{GateResult, Platform};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CountersOutput {
  android_version_code: u64,
  ios_build_number: u64,
  auto_increment_enabled: bool,
  android_last_increment_at: Option<DateTime<Utc>>,
  ios_last_increment_at: Option<DateTime<Utc>>,
  store: String,
}

/// Show current counter values
pub fn run_counters_show(ctx: &ProjectContext, json: bool) -> GateResult<()> {
  let counters = ctx.counter_store();
  let state = counters.state()?;

  let output = CountersOutput {
    android_version_code: state.android_version_code,
    ios_build_number: state.ios_build_number,
    auto_increment_enabled: state.auto_increment_enabled,
    android_last_increment_at: counters.last_increment_at(Platform::Android)?,
    ios_last_increment_at: counters.last_increment_at(Platform::Ios)?,
    store: counters.store().path().display().to_string(),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&output)?);
    return Ok(());
  }

  let last = |at: Option<DateTime<Utc>>| at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "never".to_string());

  println!("🔢 Build counters ({})", output.store);
  println!(
    "   Android version_code: {} (last increment: {})",
    output.android_version_code,
    last(output.android_last_increment_at)
  );
  println!(
    "   iOS build_number:     {} (last increment: {})",
    output.ios_build_number,
    last(output.ios_last_increment_at)
  );
  println!(
    "   Auto-increment on build: {}",
    if output.auto_increment_enabled { "ON" } else { "OFF" }
  );

  Ok(())
}

/// Persist the auto-increment toggle
pub fn run_counters_auto_increment(ctx: &ProjectContext, enabled: bool) -> GateResult<()> {
  let mut counters = ctx.counter_store();
  counters.set_toggle(enabled)?;

  println!(
    "✅ Auto-increment on build is now {}",
    if enabled { "ON" } else { "OFF" }
  );
  Ok(())
}
