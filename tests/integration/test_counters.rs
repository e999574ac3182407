//! Tests for the `counters` commands

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_counters_show_defaults() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_gate_cli_ok(&project.path, &["counters", "show", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["android_version_code"], 0);
  assert_eq!(json["ios_build_number"], 0);
  assert_eq!(json["auto_increment_enabled"], true);
  assert!(json["android_last_increment_at"].is_null());
  // reading never creates the store
  assert!(!project.file_exists(".gate/prefs.toml"));

  Ok(())
}

#[test]
fn test_auto_increment_toggle_persists() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_prefs(5, 0, true)?;

  run_gate_cli_ok(&project.path, &["counters", "auto-increment", "off"])?;
  run_gate_cli_ok(&project.path, &["gate"])?;
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(5));

  run_gate_cli_ok(&project.path, &["counters", "auto-increment", "on"])?;
  run_gate_cli_ok(&project.path, &["gate"])?;
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(6));

  Ok(())
}

#[test]
fn test_last_increment_recorded() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;

  run_gate_cli_ok(&project.path, &["gate"])?;

  let output = run_gate_cli_ok(&project.path, &["counters", "show", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(json["android_version_code"], 1);
  assert!(json["android_last_increment_at"].is_string());
  assert!(json["ios_last_increment_at"].is_null());

  Ok(())
}

#[test]
fn test_unrelated_keys_survive_writes() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(".gate/prefs.toml", "# team settings\nOtherTool_Theme = \"dark\"\n")?;

  run_gate_cli_ok(&project.path, &["counters", "auto-increment", "off"])?;

  let prefs = project.read_file(".gate/prefs.toml")?;
  assert!(prefs.contains("# team settings"));
  assert!(prefs.contains("OtherTool_Theme = \"dark\""));
  assert!(prefs.contains("MBM_AutoIncrementOnBuild = false"));

  Ok(())
}
