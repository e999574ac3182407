//! Pre-build validation gate
//!
//! One pass, run immediately before a release artifact is produced:
//!
//! ```text
//! Idle -> Validating -> Blocked
//!                    -> Incrementing -> Passed
//!                    -> Passed            (auto-increment off)
//! Idle -> Passed                          (non-mobile target)
//! ```
//!
//! A blocked pass never touches the counters. A pass whose counters cannot
//! be read or written returns `Err`, and the caller must abort just as it
//! would for `Blocked`.

use crate::core::error::{BlockReason, GateResult};
use crate::core::snapshot::{BuildConfig, Platform};
use crate::counters::{Counter, CounterStore, PreferenceStore};
use crate::rules::{GateVerdict, ValidationEngine};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
  Idle,
  Validating,
  Blocked,
  Incrementing,
  Passed,
}

impl fmt::Display for GateState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      GateState::Idle => "idle",
      GateState::Validating => "validating",
      GateState::Blocked => "blocked",
      GateState::Incrementing => "incrementing",
      GateState::Passed => "passed",
    };
    f.write_str(name)
  }
}

/// A counter the pass advanced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Increment {
  pub platform: Platform,
  pub counter: &'static str,
  pub value: u64,
}

/// What a passing run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
  pub platform: Platform,
  /// Rules were not evaluated because the target is not mobile
  pub skipped: bool,
  pub auto_increment: bool,
  pub increments: Vec<Increment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum GateOutcome {
  Passed(PassReport),
  Blocked(BlockReason),
}

impl GateOutcome {
  pub fn is_passed(&self) -> bool {
    matches!(self, GateOutcome::Passed(_))
  }
}

/// Validation-and-increment gate
///
/// Holds the counter store mutably for its whole lifetime, so no other
/// pass in this process can reach `Incrementing` concurrently.
pub struct BuildGate<'a, S: PreferenceStore> {
  engine: &'a ValidationEngine,
  counters: &'a mut CounterStore<S>,
}

impl<'a, S: PreferenceStore> BuildGate<'a, S> {
  pub fn new(engine: &'a ValidationEngine, counters: &'a mut CounterStore<S>) -> Self {
    Self { engine, counters }
  }

  /// Run one gate pass for a `(platform, config)` pair
  pub fn validate_and_gate(&mut self, platform: Platform, config: &BuildConfig) -> GateResult<GateOutcome> {
    let mut state = GateState::Idle;

    if !platform.is_mobile() {
      tracing::info!(%platform, "non-mobile target, gate skipped");
      advance(&mut state, GateState::Passed);
      return Ok(GateOutcome::Passed(PassReport {
        platform,
        skipped: true,
        auto_increment: false,
        increments: Vec::new(),
      }));
    }

    advance(&mut state, GateState::Validating);
    let config = config.for_platform(platform);

    if let GateVerdict::Blocked(reason) = self.engine.evaluate_for_gate(&config) {
      advance(&mut state, GateState::Blocked);
      tracing::warn!(rule_id = %reason.rule_id, %platform, "build blocked: {}", reason.message);
      return Ok(GateOutcome::Blocked(reason));
    }

    let auto_increment = self.counters.get_toggle()?;
    let mut increments = Vec::new();

    if auto_increment {
      advance(&mut state, GateState::Incrementing);
      for counter_platform in implicated_platforms(platform) {
        let value = self.counters.increment(counter_platform)?;
        let counter = Counter::for_platform(counter_platform)
          .map(Counter::display_name)
          .unwrap_or_default();
        tracing::info!(platform = %counter_platform, "{} {} -> {}", counter_platform, counter, value);
        increments.push(Increment {
          platform: counter_platform,
          counter,
          value,
        });
      }
    } else {
      tracing::info!("auto-increment on build is off");
    }

    advance(&mut state, GateState::Passed);
    tracing::info!(bundle_version = %config.bundle_version, "validation passed");

    Ok(GateOutcome::Passed(PassReport {
      platform,
      skipped: false,
      auto_increment,
      increments,
    }))
  }
}

/// Platforms whose counters a build for `platform` advances
///
/// A build request names exactly one primary platform, so this is at most
/// one entry and no counter can be advanced twice in a pass.
fn implicated_platforms(platform: Platform) -> Option<Platform> {
  Counter::for_platform(platform).map(|_| platform)
}

fn advance(state: &mut GateState, next: GateState) {
  tracing::debug!(from = %state, to = %next, "gate transition");
  *state = next;
}
