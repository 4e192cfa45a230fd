//! Test helpers for integration tests

use anyhow::{Context, Result};
use assert_cmd::cargo::cargo_bin_cmd;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throw-away git repository with library-style modules
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Initialize an empty repository (no commits)
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().canonicalize()?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["config", "tag.gpgsign", "false"])?;

    Ok(Self { _root: root, path })
  }

  /// Write a file relative to the repository root, creating parent dirs
  pub fn write(&self, relative: &str, content: &str) -> Result<()> {
    let file = self.path.join(relative);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file, content)?;
    Ok(())
  }

  /// Stage everything and commit
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a lightweight tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", name])?;
    Ok(())
  }

  /// Two Java-style libraries, committed
  pub fn with_libraries() -> Result<Self> {
    let repo = Self::new()?;
    repo.write("settings.gradle.kts", "include(\"library-a\", \"library-b\")\n")?;
    repo.write("library-a/src/Foo.java", "class Foo {}\n")?;
    repo.write("library-b/src/Bar.java", "class Bar {}\n")?;
    repo.commit("Add libraries")?;
    Ok(repo)
  }

  /// `monorail` invocation rooted at this repository with both libraries declared
  pub fn monorail(&self) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("monorail");
    cmd
      .current_dir(&self.path)
      .env_remove("GITHUB_OUTPUT")
      .env_remove("RUST_LOG")
      .args(["--module", "library-a=library-a", "--module", "library-b=library-b"]);
    cmd
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Stdout of a successful monorail run
pub fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
  let output = cmd.assert().success().get_output().stdout.clone();
  String::from_utf8_lossy(&output).into_owned()
}
