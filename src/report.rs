//! Read-only validation report for the dashboard
//!
//! Rebuilt from scratch on every request. It borrows the counter store
//! immutably, so producing a report can never move a counter.

use crate::core::error::GateResult;
use crate::core::snapshot::{BuildConfig, Platform};
use crate::counters::{CounterStore, PreferenceStore};
use crate::rules::{Observed, RuleOutcome, ValidationEngine};
use serde::Serialize;
use std::fmt::Write as _;

/// Build target row shown above the rule outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRow {
  pub platform: Platform,
  pub observed: Observed,
  pub note: String,
}

/// Current and predicted counter values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterView {
  pub bundle_version: String,
  pub android_version_code: u64,
  pub ios_build_number: u64,
  pub auto_increment_enabled: bool,
  /// Only predicted while auto-increment is on
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_android: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_ios: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
  pub target: TargetRow,
  pub outcomes: Vec<RuleOutcome>,
  pub has_blocking_failure: bool,
  pub counters: CounterView,
}

impl ValidationReport {
  /// Evaluate every rule and read (never write) the counters
  pub fn build<S: PreferenceStore>(
    engine: &ValidationEngine,
    config: &BuildConfig,
    counters: &CounterStore<S>,
  ) -> GateResult<Self> {
    let result = engine.evaluate_all(config);
    let state = counters.state()?;

    let (next_android, next_ios) = if state.auto_increment_enabled {
      (
        Some(counters.peek_next(Platform::Android)?),
        Some(counters.peek_next(Platform::Ios)?),
      )
    } else {
      (None, None)
    };

    Ok(Self {
      target: target_row(config.platform),
      has_blocking_failure: result.has_blocking_failure(),
      outcomes: result.outcomes,
      counters: CounterView {
        bundle_version: config.bundle_version.clone(),
        android_version_code: state.android_version_code,
        ios_build_number: state.ios_build_number,
        auto_increment_enabled: state.auto_increment_enabled,
        next_android,
        next_ios,
      },
    })
  }

  /// Human-readable dashboard
  pub fn render_text(&self) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📋 Validator");
    let _ = writeln!(out, "   ✅ OK   ⚠️  Warning   ❌ Build will be blocked (Android/iOS)\n");
    let _ = writeln!(
      out,
      "{} Build Target: {}\n   {}\n",
      self.target.observed.icon(),
      self.target.platform,
      self.target.note
    );

    for outcome in &self.outcomes {
      let _ = writeln!(out, "{} {}: {}", outcome.observed.icon(), outcome.label, outcome.value);
      let _ = writeln!(out, "   {}", outcome.message);
      if let Some(ref remediation) = outcome.remediation {
        let _ = writeln!(out, "   💡 {}", remediation);
      }
      out.push('\n');
    }

    let c = &self.counters;
    let _ = writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let _ = writeln!(out, "Version & Build Numbers (read-only)");
    let _ = writeln!(
      out,
      "   bundle_version:       {}",
      if c.bundle_version.trim().is_empty() {
        "(empty)"
      } else {
        c.bundle_version.as_str()
      }
    );
    let _ = writeln!(out, "   Android version_code: {}", c.android_version_code);
    let _ = writeln!(out, "   iOS build_number:     {}", c.ios_build_number);

    match (c.next_android, c.next_ios) {
      (Some(android), Some(ios)) => {
        let _ = writeln!(out, "   Next Android version_code (on build): {}", android);
        let _ = writeln!(out, "   Next iOS build_number (on build):     {}", ios);
      }
      _ => {
        let _ = writeln!(
          out,
          "   ℹ️  Auto-increment is OFF. Build numbers will not change when you build."
        );
      }
    }

    if self.has_blocking_failure {
      let _ = writeln!(out, "\n⚠️  A release build would be blocked. Fix the ❌ rows first.");
    }

    out
  }
}

fn target_row(platform: Platform) -> TargetRow {
  if platform.is_mobile() {
    TargetRow {
      platform,
      observed: Observed::Ok,
      note: "Mobile target selected.".to_string(),
    }
  } else {
    TargetRow {
      platform,
      observed: Observed::Warning,
      note: "Not mobile. Build blocking checks apply only for Android/iOS builds.".to_string(),
    }
  }
}
