//! Error types for the build gate with contextual messages and exit codes
//!
//! Every error maps to a process exit code and, where one exists, a help
//! message pointing the user at the setting to change.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Exit codes for mobile-build-gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, snapshot, invalid args)
  User = 1,
  /// System error (preference storage, I/O)
  System = 2,
  /// Validation failure (a blocking rule failed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Why the gate refused a release
///
/// Carries everything the release pipeline needs to surface the failure:
/// which rule, what is wrong, and where to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReason {
  pub rule_id: String,
  pub message: String,
  pub remediation: String,
}

impl fmt::Display for BlockReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "BUILD BLOCKED [{}]: {}", self.rule_id, self.message)
  }
}

/// Main error type for mobile-build-gate
#[derive(Debug)]
pub enum GateError {
  /// Tool configuration errors (gate.toml)
  Config(ConfigError),

  /// Release snapshot errors (release.toml)
  Snapshot(SnapshotError),

  /// Persisted counters or toggle could not be read or written
  Storage(StorageError),

  /// A blocking rule failed
  Blocked(BlockReason),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, context, help } => GateError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      GateError::Storage(StorageError::Access { path, reason }) => GateError::Storage(StorageError::Access {
        path,
        reason: format!("{}: {}", ctx_str, reason),
      }),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Config(_) => ExitCode::User,
      GateError::Snapshot(_) => ExitCode::User,
      GateError::Storage(_) => ExitCode::System,
      GateError::Blocked(_) => ExitCode::Validation,
      GateError::Io(_) => ExitCode::System,
      GateError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Config(e) => e.help_message(),
      GateError::Snapshot(e) => e.help_message(),
      GateError::Storage(e) => e.help_message(),
      GateError::Blocked(reason) => Some(reason.remediation.clone()),
      GateError::Message { help, .. } => help.clone(),
      GateError::Io(_) => None,
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Config(e) => write!(f, "{}", e),
      GateError::Snapshot(e) => write!(f, "{}", e),
      GateError::Storage(e) => write!(f, "{}", e),
      GateError::Blocked(reason) => write!(f, "{}", reason),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<String> for GateError {
  fn from(msg: String) -> Self {
    GateError::message(msg)
  }
}

impl From<&str> for GateError {
  fn from(msg: &str) -> Self {
    GateError::message(msg)
  }
}

impl From<toml_edit::de::Error> for GateError {
  fn from(err: toml_edit::de::Error) -> Self {
    GateError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for GateError {
  fn from(err: toml_edit::ser::Error) -> Self {
    GateError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

impl From<anyhow::Error> for GateError {
  fn from(err: anyhow::Error) -> Self {
    GateError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A field holds a value the gate cannot use
  Invalid { field: String, reason: String },

  /// gate.toml already exists and would be overwritten
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { field, .. } => Some(format!("Fix `{}` in gate.toml or delete the file to use defaults.", field)),
      ConfigError::AlreadyExists { .. } => Some("Re-run with --force to overwrite it.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { field, reason } => write!(f, "Invalid configuration value for '{}': {}", field, reason),
      ConfigError::AlreadyExists { path } => write!(f, "Configuration already exists: {}", path.display()),
    }
  }
}

/// Release snapshot errors
#[derive(Debug)]
pub enum SnapshotError {
  /// Snapshot file does not exist
  NotFound { path: PathBuf },

  /// Snapshot file could not be parsed
  Malformed { path: PathBuf, reason: String },
}

impl SnapshotError {
  fn help_message(&self) -> Option<String> {
    match self {
      SnapshotError::NotFound { .. } => {
        Some("Export the current release settings to release.toml or pass --snapshot <path>.".to_string())
      }
      SnapshotError::Malformed { .. } => None,
    }
  }
}

impl fmt::Display for SnapshotError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SnapshotError::NotFound { path } => write!(f, "Release snapshot not found: {}", path.display()),
      SnapshotError::Malformed { path, reason } => {
        write!(f, "Release snapshot {} is malformed: {}", path.display(), reason)
      }
    }
  }
}

/// Preference storage errors
///
/// Always fatal for the current gate pass: the gate cannot prove the
/// increment happened (or was correctly skipped).
#[derive(Debug)]
pub enum StorageError {
  /// The store could not be read, parsed or written
  Access { path: PathBuf, reason: String },

  /// A key holds a value of the wrong type
  WrongType { key: String, expected: &'static str },

  /// A counter cannot grow any further
  Overflow { key: String },
}

impl StorageError {
  fn help_message(&self) -> Option<String> {
    match self {
      StorageError::Access { path, .. } => Some(format!(
        "Check that {} is readable, writable and valid TOML. No artifact should be produced until this is fixed.",
        path.display()
      )),
      StorageError::WrongType { key, expected } => {
        Some(format!("Set '{}' to a {} value or remove it to fall back to the default.", key, expected))
      }
      StorageError::Overflow { .. } => None,
    }
  }
}

impl fmt::Display for StorageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StorageError::Access { path, reason } => {
        write!(f, "Preference store {} is not accessible: {}", path.display(), reason)
      }
      StorageError::WrongType { key, expected } => write!(f, "Preference '{}' is not a {}", key, expected),
      StorageError::Overflow { key } => write!(f, "Counter '{}' overflowed", key),
    }
  }
}

/// Result type alias for mobile-build-gate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn context(self, ctx: impl Into<String>) -> GateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
