//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Signed Android release snapshot that every rule accepts
pub const VALID_ANDROID: &str = r#"platform = "android"
bundle_identifier = "com.acme.rocket"
company_name = "Acme"
product_name = "Rocket"
bundle_version = "1.4.0"
development_build = false
scenes = ["Boot", "Menu", "Level1"]

[signing]
uses_custom_keystore = true
keystore = "keys/release.keystore"
"#;

/// A throwaway project directory with a release snapshot
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Project with `release.toml` already written
  pub fn with_snapshot(snapshot: &str) -> Result<Self> {
    let project = Self::new()?;
    project.write_file("release.toml", snapshot)?;
    Ok(project)
  }

  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", rel))?;
    Ok(())
  }

  pub fn read_file(&self, rel: &str) -> Result<String> {
    std::fs::read_to_string(self.path.join(rel)).with_context(|| format!("Failed to read {}", rel))
  }

  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  /// Seed the default preference file
  pub fn write_prefs(&self, android: u64, ios: u64, auto_increment: bool) -> Result<()> {
    self.write_file(
      ".gate/prefs.toml",
      &format!(
        "MBM_AndroidVersionCode = {}\nMBM_IosBuildNumber = {}\nMBM_AutoIncrementOnBuild = {}\n",
        android, ios, auto_increment
      ),
    )
  }

  /// Read one integer from the default preference file
  pub fn pref_int(&self, key: &str) -> Result<Option<i64>> {
    if !self.file_exists(".gate/prefs.toml") {
      return Ok(None);
    }
    let doc = self.read_file(".gate/prefs.toml")?.parse::<toml_edit::DocumentMut>()?;
    Ok(doc.get(key).and_then(|item| item.as_integer()))
  }
}

/// Run the binary and return its output, whatever the exit status
pub fn run_gate_cli(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_mobile-build-gate");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run mobile-build-gate")
}

/// Run the binary and fail unless it exits 0
pub fn run_gate_cli_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_gate_cli(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "mobile-build-gate command failed: {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
