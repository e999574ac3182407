//! Per-platform build counters
//!
//! Two monotonic counters (Android version code, iOS build number) and the
//! auto-increment toggle, stored under namespaced keys in a
//! `PreferenceStore`. Only `increment` mutates a counter, and only the gate
//! calls it.

mod prefs;

pub use prefs::{FilePreferenceStore, MemoryPreferenceStore, PrefValue, PreferenceStore};

use crate::core::error::{GateError, GateResult, StorageError};
use crate::core::snapshot::Platform;
use chrono::{DateTime, Utc};
use serde::Serialize;

const AUTO_INCREMENT_KEY: &str = "AutoIncrementOnBuild";

/// Auto-increment is on unless someone turned it off
const AUTO_INCREMENT_DEFAULT: bool = true;

/// A platform build counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
  AndroidVersionCode,
  IosBuildNumber,
}

impl Counter {
  /// The counter a platform's builds advance, if any
  pub fn for_platform(platform: Platform) -> Option<Counter> {
    match platform {
      Platform::Android => Some(Counter::AndroidVersionCode),
      Platform::Ios => Some(Counter::IosBuildNumber),
      Platform::Other => None,
    }
  }

  fn key_name(self) -> &'static str {
    match self {
      Counter::AndroidVersionCode => "AndroidVersionCode",
      Counter::IosBuildNumber => "IosBuildNumber",
    }
  }

  /// Name used in logs and output
  pub fn display_name(self) -> &'static str {
    match self {
      Counter::AndroidVersionCode => "version_code",
      Counter::IosBuildNumber => "build_number",
    }
  }
}

/// Snapshot of everything the store holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterState {
  pub android_version_code: u64,
  pub ios_build_number: u64,
  pub auto_increment_enabled: bool,
}

/// Counter operations over a preference store
pub struct CounterStore<S: PreferenceStore> {
  store: S,
  prefix: String,
}

impl<S: PreferenceStore> CounterStore<S> {
  pub fn new(store: S, prefix: impl Into<String>) -> Self {
    Self {
      store,
      prefix: prefix.into(),
    }
  }

  /// Underlying preference store
  pub fn store(&self) -> &S {
    &self.store
  }

  fn key(&self, name: &str) -> String {
    format!("{}{}", self.prefix, name)
  }

  fn counter(platform: Platform) -> GateResult<Counter> {
    Counter::for_platform(platform).ok_or_else(|| {
      GateError::with_help(
        format!("Platform '{}' has no build counter", platform),
        "Only android and ios builds carry build counters.",
      )
    })
  }

  /// Current persisted value (0 when never written)
  pub fn current(&self, platform: Platform) -> GateResult<u64> {
    let counter = Self::counter(platform)?;
    Ok(self.store.get_int(&self.key(counter.key_name()))?.unwrap_or(0))
  }

  /// Value the next successful gate pass would write, without writing it
  pub fn peek_next(&self, platform: Platform) -> GateResult<u64> {
    let current = self.current(platform)?;
    current
      .checked_add(1)
      .ok_or_else(|| self.overflow(platform))
  }

  /// Read, add one, write back; returns the new value
  ///
  /// The caller is responsible for calling this at most once per platform
  /// per gate pass.
  pub fn increment(&mut self, platform: Platform) -> GateResult<u64> {
    let counter = Self::counter(platform)?;
    let next = self.peek_next(platform)?;

    // counter and timestamp land together or not at all
    self.store.set_many(&[
      (self.key(counter.key_name()), PrefValue::Int(next)),
      (self.last_increment_key(counter), PrefValue::Str(Utc::now().to_rfc3339())),
    ])?;

    Ok(next)
  }

  /// When the platform's counter last moved
  pub fn last_increment_at(&self, platform: Platform) -> GateResult<Option<DateTime<Utc>>> {
    let counter = Self::counter(platform)?;
    let Some(raw) = self.store.get_string(&self.last_increment_key(counter))? else {
      return Ok(None);
    };

    DateTime::parse_from_rfc3339(&raw)
      .map(|dt| Some(dt.with_timezone(&Utc)))
      .map_err(|_| {
        GateError::Storage(StorageError::WrongType {
          key: self.last_increment_key(counter),
          expected: "RFC 3339 timestamp",
        })
      })
  }

  pub fn get_toggle(&self) -> GateResult<bool> {
    Ok(
      self
        .store
        .get_bool(&self.key(AUTO_INCREMENT_KEY))?
        .unwrap_or(AUTO_INCREMENT_DEFAULT),
    )
  }

  /// Flip auto-increment; independent of counters and of validation
  pub fn set_toggle(&mut self, enabled: bool) -> GateResult<()> {
    let key = self.key(AUTO_INCREMENT_KEY);
    self.store.set_bool(&key, enabled)
  }

  pub fn state(&self) -> GateResult<CounterState> {
    Ok(CounterState {
      android_version_code: self.current(Platform::Android)?,
      ios_build_number: self.current(Platform::Ios)?,
      auto_increment_enabled: self.get_toggle()?,
    })
  }

  fn last_increment_key(&self, counter: Counter) -> String {
    self.key(&format!("{}LastIncrementAt", counter.key_name()))
  }

  fn overflow(&self, platform: Platform) -> GateError {
    let name = Counter::for_platform(platform).map(Counter::key_name).unwrap_or_default();
    GateError::Storage(StorageError::Overflow { key: self.key(name) })
  }
}
