//! Core building blocks shared by the gate, the report and the CLI
//!
//! - **config**: Tool configuration (gate.toml) parsing and validation
//! - **context**: Project context built once in main
//! - **error**: Error types with exit codes and contextual help
//! - **snapshot**: Release configuration snapshot (`BuildConfig`) and its reader

pub mod config;
pub mod context;
pub mod error;
pub mod snapshot;
