//! Pre-release validation gate for mobile release pipelines
//!
//! Before an Android or iOS release artifact is produced, the gate checks a
//! snapshot of the release configuration against an ordered rule catalog.
//! Any blocking failure aborts the release; only a clean pass may advance
//! the per-platform build counter, and only when auto-increment is on.
//!
//! ```rust,ignore
//! use mobile_build_gate::{BuildGate, CounterStore, FilePreferenceStore, GateOutcome, default_catalog};
//!
//! let engine = default_catalog();
//! let mut counters = CounterStore::new(FilePreferenceStore::open(".gate/prefs.toml"), "MBM_");
//! match BuildGate::new(&engine, &mut counters).validate_and_gate(platform, &config)? {
//!   GateOutcome::Passed(_) => produce_artifact(),
//!   GateOutcome::Blocked(reason) => abort(reason),
//! }
//! ```
//!
//! The dashboard side (`ValidationReport`) evaluates every rule and reads
//! counters through a shared reference, so it cannot move them.

pub mod core;
pub mod counters;
pub mod gate;
pub mod logging;
pub mod report;
pub mod rules;

pub use crate::core::error::{BlockReason, GateError, GateResult};
pub use crate::core::snapshot::{BuildConfig, Platform, SigningState};
pub use counters::{CounterState, CounterStore, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use gate::{BuildGate, GateOutcome, PassReport};
pub use report::ValidationReport;
pub use rules::{GateVerdict, Observed, RuleOutcome, Severity, StopPolicy, ValidationEngine, default_catalog};
