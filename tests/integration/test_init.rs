//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let project = TestProject::new()?;

  run_gate_cli_ok(&project.path, &["init"])?;

  assert!(project.file_exists("gate.toml"));
  let config = project.read_file("gate.toml")?;
  assert!(config.contains("[prefs]"));
  assert!(config.contains("MBM_"));
  assert!(config.contains("[logging]"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("gate.toml", "[prefs]\nkey_prefix = \"KEEP_\"\n")?;

  let output = run_gate_cli(&project.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(project.read_file("gate.toml")?.contains("KEEP_"));

  run_gate_cli_ok(&project.path, &["init", "--force"])?;
  assert!(project.read_file("gate.toml")?.contains("MBM_"));

  Ok(())
}

#[test]
fn test_invalid_config_rejected() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_file("gate.toml", "[prefs]\nkey_prefix = \"bad prefix!\"\n")?;

  let output = run_gate_cli(&project.path, &["gate"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("prefs.key_prefix"));

  Ok(())
}
