//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays clean for `--json` output. `RUST_LOG`
//! takes precedence over `[logging].level`.

use crate::core::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(config: &LoggingConfig) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

  // try_init: a second call (tests, embedders) keeps the first subscriber
  let _ = match config.format {
    LogFormat::Json => tracing_subscriber::registry()
      .with(filter)
      .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
      .try_init(),
    LogFormat::Text => tracing_subscriber::registry()
      .with(filter)
      .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
      .try_init(),
  };
}
