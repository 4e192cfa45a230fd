//! History queries for SystemGit (tags, committed diffs, unstaged files)

use super::system_git::SystemGit;
use super::{HistoryQuery, Lookup, TagReference};
use crate::utils::unquote_git_path;

impl SystemGit {
  /// Whether HEAD has a parent commit.
  ///
  /// `Known(false)` means HEAD is a root commit; a repository without any
  /// commit is `Unknown`.
  pub fn head_has_parent(&self) -> Lookup<bool> {
    let parent = self.run(&["rev-parse", "--verify", "--quiet", "HEAD~1^{commit}"]);
    match parent {
      Lookup::Known(output) if output.status.success() => Lookup::Known(true),
      Lookup::Known(_) => self
        .run(&["rev-parse", "--verify", "--quiet", "HEAD^{commit}"])
        .and_then(|head| {
          if head.status.success() {
            Lookup::Known(false)
          } else {
            Lookup::unknown("repository has no commits yet")
          }
        }),
      Lookup::Unknown(reason) => Lookup::Unknown(reason),
    }
  }

  /// `git diff --name-only <from> HEAD`
  ///
  /// `from` may come from the command line, so it is never parsed as an
  /// option and never as a pathspec.
  fn diff_names(&self, from: &str) -> Lookup<Vec<String>> {
    self
      .query(&["diff", "--name-only", "--end-of-options", from, "HEAD", "--"])
      .map(|out| parse_name_list(&out))
  }

  /// Files introduced by a root commit (diff against the empty tree)
  fn root_commit_files(&self) -> Lookup<Vec<String>> {
    self
      .query(&["diff-tree", "--root", "--no-commit-id", "--name-only", "-r", "HEAD"])
      .map(|out| parse_name_list(&out))
  }
}

impl HistoryQuery for SystemGit {
  fn last_tag(&self) -> Lookup<String> {
    self.query(&["describe", "--tags", "--abbrev=0"]).and_then(|out| {
      let tag = out.trim();
      if tag.is_empty() {
        Lookup::unknown("git describe printed no tag")
      } else {
        Lookup::Known(tag.to_string())
      }
    })
  }

  fn diff_since(&self, since: &TagReference) -> Lookup<Vec<String>> {
    match since {
      TagReference::Tag(tag) => self.diff_names(tag),
      TagReference::Head => match self.head_has_parent() {
        Lookup::Known(true) => self.diff_names("HEAD~1"),
        Lookup::Known(false) => self.root_commit_files(),
        Lookup::Unknown(reason) => Lookup::Unknown(reason),
      },
    }
  }

  fn unstaged_files(&self) -> Lookup<Vec<String>> {
    self.query(&["diff", "--name-only"]).map(|out| parse_name_list(&out))
  }
}

/// Parse `--name-only` output: one path per line, blank lines skipped.
pub(crate) fn parse_name_list(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .filter(|line| !line.trim().is_empty())
    .map(unquote_git_path)
    .collect()
}
