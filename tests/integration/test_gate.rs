//! Tests for the `gate` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_valid_android_build_passes_and_increments() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_prefs(5, 12, true)?;

  let output = run_gate_cli_ok(&project.path, &["gate"])?;

  assert!(stdout(&output).contains("Validation passed"));
  assert!(stdout(&output).contains("version_code -> 6"));
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(6));
  assert_eq!(project.pref_int("MBM_IosBuildNumber")?, Some(12));

  Ok(())
}

#[test]
fn test_empty_identifier_blocks_with_validation_exit() -> Result<()> {
  let snapshot = VALID_ANDROID.replace("com.acme.rocket", "");
  let project = TestProject::with_snapshot(&snapshot)?;
  project.write_prefs(5, 0, true)?;

  let output = run_gate_cli(&project.path, &["gate"])?;

  assert_eq!(output.status.code(), Some(3));
  let err = stderr(&output);
  assert!(err.contains("BUILD BLOCKED [bundle-identifier-present]"));
  assert!(err.contains("Where:"));
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(5));

  Ok(())
}

#[test]
fn test_missing_keystore_blocks_android_release() -> Result<()> {
  let snapshot = VALID_ANDROID.replace("uses_custom_keystore = true", "uses_custom_keystore = false");
  let project = TestProject::with_snapshot(&snapshot)?;

  let output = run_gate_cli(&project.path, &["gate"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("android-release-signing"));
  assert!(!project.file_exists(".gate/prefs.toml"));

  Ok(())
}

#[test]
fn test_warnings_do_not_block() -> Result<()> {
  let snapshot = VALID_ANDROID
    .replace("company_name = \"Acme\"", "company_name = \"\"")
    .replace("com.acme.rocket", "rocket");
  let project = TestProject::with_snapshot(&snapshot)?;
  project.write_prefs(1, 1, true)?;

  run_gate_cli_ok(&project.path, &["gate"])?;
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(2));

  Ok(())
}

#[test]
fn test_toggle_off_passes_without_increment() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_prefs(5, 0, false)?;

  let output = run_gate_cli_ok(&project.path, &["gate"])?;

  assert!(stdout(&output).contains("Auto-increment on build is OFF"));
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(5));

  Ok(())
}

#[test]
fn test_platform_flag_selects_ios_counter() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_prefs(5, 41, true)?;

  run_gate_cli_ok(&project.path, &["gate", "--platform", "ios"])?;

  assert_eq!(project.pref_int("MBM_IosBuildNumber")?, Some(42));
  assert_eq!(project.pref_int("MBM_AndroidVersionCode")?, Some(5));

  Ok(())
}

#[test]
fn test_non_mobile_target_skips_checks() -> Result<()> {
  // nothing here would pass a mobile check
  let project = TestProject::with_snapshot("platform = \"webgl\"\n")?;

  let output = run_gate_cli_ok(&project.path, &["gate"])?;

  assert!(stdout(&output).contains("Non-mobile target"));
  assert!(!project.file_exists(".gate/prefs.toml"));

  Ok(())
}

#[test]
fn test_json_outcome() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_prefs(9, 0, true)?;

  let output = run_gate_cli_ok(&project.path, &["gate", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["result"], "passed");
  assert_eq!(json["platform"], "android");
  assert_eq!(json["increments"][0]["counter"], "version_code");
  assert_eq!(json["increments"][0]["value"], 10);

  Ok(())
}

#[test]
fn test_json_blocked_outcome() -> Result<()> {
  let project = TestProject::with_snapshot(&VALID_ANDROID.replace("scenes = [\"Boot\", \"Menu\", \"Level1\"]", "scenes = []"))?;

  let output = run_gate_cli(&project.path, &["gate", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(json["result"], "blocked");
  assert_eq!(json["rule_id"], "scenes-present");

  Ok(())
}

#[test]
fn test_missing_snapshot_is_user_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_gate_cli(&project.path, &["gate"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!project.file_exists(".gate/prefs.toml"));

  Ok(())
}

#[test]
fn test_corrupt_prefs_is_system_error() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_file(".gate/prefs.toml", "MBM_AndroidVersionCode = [not toml")?;

  let output = run_gate_cli(&project.path, &["gate"])?;

  assert_eq!(output.status.code(), Some(2));

  Ok(())
}

#[test]
fn test_custom_prefs_location_and_prefix() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_file("gate.toml", "[prefs]\npath = \"state/counters.toml\"\nkey_prefix = \"ACME_\"\n")?;
  project.write_file("state/counters.toml", "ACME_AndroidVersionCode = 30\n")?;

  run_gate_cli_ok(&project.path, &["gate"])?;

  let prefs = project.read_file("state/counters.toml")?;
  assert!(prefs.contains("ACME_AndroidVersionCode = 31"));
  assert!(prefs.contains("ACME_AndroidVersionCodeLastIncrementAt"));

  Ok(())
}
