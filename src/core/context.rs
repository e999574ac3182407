//! Project context - load once in main, pass to every command
//!
//! Holds the project root and the resolved `gate.toml`. Release snapshots
//! are deliberately not part of it: they are read fresh per command.

use crate::core::config::GateConfig;
use crate::core::error::GateResult;
use crate::core::snapshot::BuildConfig;
use crate::counters::{CounterStore, FilePreferenceStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Project root directory
  pub root: PathBuf,

  /// Tool configuration (defaults when no gate.toml exists)
  pub config: GateConfig,
}

impl ProjectContext {
  pub fn build(root: &Path) -> GateResult<Self> {
    Ok(Self {
      root: root.to_path_buf(),
      config: GateConfig::load(root)?,
    })
  }

  /// Counter store backed by the configured preference file
  ///
  /// Opening is free; the file is read on first access.
  pub fn counter_store(&self) -> CounterStore<FilePreferenceStore> {
    let prefs = FilePreferenceStore::open(self.config.prefs_path(&self.root));
    CounterStore::new(prefs, self.config.prefs.key_prefix.clone())
  }

  /// Read the release snapshot, resolving relative paths against the root
  pub fn read_snapshot(&self, snapshot: &Path) -> GateResult<BuildConfig> {
    let path = if snapshot.is_absolute() {
      snapshot.to_path_buf()
    } else {
      self.root.join(snapshot)
    };
    BuildConfig::load(&path)
  }
}
