//! Tests for the `report` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_report_never_increments() -> Result<()> {
  let project = TestProject::with_snapshot(VALID_ANDROID)?;
  project.write_prefs(5, 7, true)?;
  let before = project.read_file(".gate/prefs.toml")?;

  for _ in 0..3 {
    run_gate_cli_ok(&project.path, &["report"])?;
  }

  assert_eq!(project.read_file(".gate/prefs.toml")?, before);

  Ok(())
}

#[test]
fn test_report_shows_failures_but_exits_zero() -> Result<()> {
  let snapshot = VALID_ANDROID.replace("com.acme.rocket", "");
  let project = TestProject::with_snapshot(&snapshot)?;
  project.write_prefs(5, 7, true)?;

  let output = run_gate_cli_ok(&project.path, &["report"])?;
  let text = stdout(&output);

  assert!(text.contains("Bundle Identifier"));
  assert!(text.contains("❌"));
  assert!(text.contains("Next Android version_code (on build): 6"));
  assert!(text.contains("A release build would be blocked"));

  Ok(())
}

#[test]
fn test_report_json_lists_all_outcomes() -> Result<()> {
  let snapshot = VALID_ANDROID
    .replace("com.acme.rocket", "")
    .replace("scenes = [\"Boot\", \"Menu\", \"Level1\"]", "scenes = []");
  let project = TestProject::with_snapshot(&snapshot)?;
  project.write_prefs(2, 3, false)?;

  let output = run_gate_cli_ok(&project.path, &["report", "--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(json["has_blocking_failure"], true);
  let blocking = json["outcomes"]
    .as_array()
    .map(|outcomes| outcomes.iter().filter(|o| o["observed"] == "blocking").count())
    .unwrap_or(0);
  assert_eq!(blocking, 2);
  assert_eq!(json["counters"]["android_version_code"], 2);
  assert!(json["counters"].get("next_android").is_none());

  Ok(())
}
