//! Integration tests for `monorail affected` and `monorail files`

use crate::helpers::{TestRepo, git, stdout_of};
use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_tagged_release_reports_changed_library() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.tag("v1.0.0")?;

  repo.write("library-a/src/Foo.java", "class Foo { int x; }\n")?;
  repo.commit("Change library-a")?;

  let stdout = stdout_of(repo.monorail().args(["affected", "--format", "json"]));
  assert_eq!(stdout, "[\"library-a\"]\n");

  let stdout = stdout_of(repo.monorail().args(["affected"]));
  assert!(stdout.contains("Since: v1.0.0"), "got: {}", stdout);
  assert!(stdout.contains("library-a"));
  assert!(!stdout.contains("library-b"));

  Ok(())
}

#[test]
fn test_no_tag_single_commit_lists_root_commit_files() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("library-b/src/Bar.java", "class Bar {}\n")?;
  repo.commit("Initial library-b")?;

  repo
    .monorail()
    .args(["affected", "--format", "json"])
    .assert()
    .success()
    .stdout("[\"library-b\"]\n")
    .stderr(predicate::str::contains("no release tag found"));

  Ok(())
}

#[test]
fn test_no_tag_compares_against_parent_commit() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.write("library-b/src/Bar.java", "class Bar { int y; }\n")?;
  repo.commit("Change library-b")?;

  let stdout = stdout_of(repo.monorail().args(["affected", "--format", "names"]));
  assert_eq!(stdout, "library-b\n");

  Ok(())
}

#[test]
fn test_repository_without_commits_is_empty() -> Result<()> {
  let repo = TestRepo::new()?;

  repo
    .monorail()
    .args(["affected", "--format", "json"])
    .assert()
    .success()
    .stdout("[]\n");

  Ok(())
}

#[test]
fn test_unstaged_changes_are_included() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.tag("v1.0.0")?;

  repo.write("library-b/src/Bar.java", "class Bar { /* wip */ }\n")?;

  let stdout = stdout_of(repo.monorail().args(["affected", "--format", "json"]));
  assert_eq!(stdout, "[\"library-b\"]\n");

  let stdout = stdout_of(repo.monorail().args(["files"]));
  assert!(stdout.contains("Changed files (since v1.0.0)"));
  assert!(stdout.contains("  library-b/src/Bar.java"));

  Ok(())
}

#[test]
fn test_untracked_files_are_ignored() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.tag("v1.0.0")?;

  repo.write("library-a/src/New.java", "class New {}\n")?;

  let stdout = stdout_of(repo.monorail().args(["affected", "--format", "json"]));
  assert_eq!(stdout, "[]\n");

  Ok(())
}

#[test]
fn test_module_prefix_respects_path_boundary() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write("lib/a.txt", "a\n")?;
  repo.write("lib-other/x.txt", "x\n")?;
  repo.commit("Initial")?;
  repo.tag("v1.0.0")?;

  repo.write("lib-other/x.txt", "changed\n")?;
  repo.commit("Touch lib-other")?;

  let mut cmd = cargo_bin_cmd!("monorail");
  cmd
    .current_dir(&repo.path)
    .env_remove("GITHUB_OUTPUT")
    .args(["--module", "lib=lib", "--module", "lib-other=lib-other", "affected", "--format", "json"]);
  assert_eq!(stdout_of(&mut cmd), "[\"lib-other\"]\n");

  Ok(())
}

#[test]
fn test_since_overrides_last_tag() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.tag("v1.0.0")?;
  repo.write("library-a/src/Foo.java", "class Foo { int a; }\n")?;
  repo.commit("Change library-a")?;
  git(&repo.path, &["branch", "baseline"])?;
  repo.write("library-b/src/Bar.java", "class Bar { int b; }\n")?;
  repo.commit("Change library-b")?;

  let stdout = stdout_of(repo.monorail().args(["affected", "--since", "baseline", "--format", "json"]));
  assert_eq!(stdout, "[\"library-b\"]\n");

  let stdout = stdout_of(repo.monorail().args(["affected", "--format", "json"]));
  assert_eq!(stdout, "[\"library-a\",\"library-b\"]\n");

  Ok(())
}

#[test]
fn test_since_is_never_parsed_as_git_option() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.write("library-a/src/Foo.java", "class Foo { int a; }\n")?;
  repo.commit("Change library-a")?;

  let written = repo.path.join("written.txt");
  let since = format!("--since=--output={}", written.display());

  repo
    .monorail()
    .args(["affected", &since, "--format", "json"])
    .assert()
    .success()
    .stdout("[]\n")
    .stderr(predicate::str::contains("failed"));

  assert!(!written.exists(), "git wrote {}", written.display());

  Ok(())
}

#[test]
fn test_since_ref_named_like_a_directory() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  git(&repo.path, &["branch", "library-a"])?;
  repo.write("library-b/src/Bar.java", "class Bar { int b; }\n")?;
  repo.commit("Change library-b")?;

  let stdout = stdout_of(repo.monorail().args(["affected", "--since", "library-a", "--format", "json"]));
  assert_eq!(stdout, "[\"library-b\"]\n");

  Ok(())
}

#[test]
fn test_results_are_stable_across_runs() -> Result<()> {
  let repo = TestRepo::with_libraries()?;
  repo.tag("v1.0.0")?;
  repo.write("library-b/src/Bar.java", "class Bar { int b; }\n")?;
  repo.write("library-a/src/Foo.java", "class Foo { int a; }\n")?;
  repo.commit("Change both")?;

  let first = stdout_of(repo.monorail().args(["files"]));
  let second = stdout_of(repo.monorail().args(["files"]));
  assert_eq!(first, second);

  Ok(())
}

#[test]
fn test_unknown_format_is_user_error() -> Result<()> {
  let repo = TestRepo::with_libraries()?;

  repo
    .monorail()
    .args(["affected", "--format", "yaml"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Unknown format"));

  Ok(())
}
