//! CLI commands for mobile-build-gate
//!
//! - **gate**: One pre-build validation pass (may increment counters)
//! - **report**: Full validator dashboard (read-only)
//! - **rules**: List the rule catalog
//! - **counters**: Show counters, set the auto-increment toggle
//! - **init**: Write a default gate.toml

pub mod counters;
pub mod gate;
pub mod init;
pub mod report;
pub mod rules;

pub use counters::{run_counters_auto_increment, run_counters_show};
pub use gate::run_gate;
pub use init::run_init;
pub use report::run_report;
pub use rules::run_rules;
