use mobile_build_gate::GateResult;
use mobile_build_gate::core::config::GateConfig;
use mobile_build_gate::core::error::{ConfigError, GateError};
use std::path::Path;

/// Write a default gate.toml into `root`
pub fn run_init(root: &Path, force: bool) -> GateResult<()> {
  if let Some(existing) = GateConfig::find_config_path(root)
    && !force
  {
    return Err(GateError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  let path = GateConfig::default().save(root)?;
  println!("📦 Wrote {}", path.display());
  println!("   Preferences will be stored in {}", GateConfig::default().prefs.path.display());
  Ok(())
}
