//! Release rules and the validation engine
//!
//! All rules implement the `Rule` trait and are registered, in order, by
//! `default_catalog()`. Order matters: in gate mode the first blocking
//! failure is the one reported.
//!
//! # Built-in Rules
//!
//! - **bundle-identifier-present** (blocking, mobile): identifier is not blank
//! - **scenes-present** (blocking, mobile): at least one scene in the build
//! - **android-release-signing** (blocking, Android release): custom keystore configured
//! - **bundle-identifier-format** (warning): no spaces, at least one dot
//! - **company-name-present**, **product-name-present** (warning, all platforms)
//!
//! # Example
//!
//! ```rust,ignore
//! use mobile_build_gate::rules::{GateVerdict, default_catalog};
//!
//! let engine = default_catalog();
//! if let GateVerdict::Blocked(reason) = engine.evaluate_for_gate(&config) {
//!   eprintln!("{}: {}", reason.rule_id, reason.message);
//! }
//! ```

mod engine;
mod identifier;
mod identity;
mod scenes;
mod signing;
mod trait_def;

pub use engine::{GateVerdict, StopPolicy, ValidationEngine, ValidationResult, default_catalog};
pub use trait_def::{Observed, Rule, RuleOutcome, Severity};
