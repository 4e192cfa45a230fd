//! Version-control queries behind a narrow port
//!
//! The detector only ever needs three read-only answers from history: the last
//! release tag, the files changed since a reference, and the unstaged files.
//! `HistoryQuery` is that port; `SystemGit` answers it by shelling out to git,
//! and tests answer it with fixed data.

pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use std::fmt;

/// Reference the change set is computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagReference {
  /// The most recent reachable tag
  Tag(String),
  /// No tag found; compare HEAD against its parent
  Head,
}

impl TagReference {
  pub const HEAD: &'static str = "HEAD";

  /// Parse a user-supplied ref. `HEAD` maps to the sentinel.
  pub fn parse(reference: &str) -> Self {
    let reference = reference.trim();
    if reference.is_empty() || reference == Self::HEAD {
      TagReference::Head
    } else {
      TagReference::Tag(reference.to_string())
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      TagReference::Tag(tag) => tag,
      TagReference::Head => Self::HEAD,
    }
  }
}

impl fmt::Display for TagReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Outcome of one history query: data, or the reason it could not be had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
  Known(T),
  Unknown(String),
}

impl<T> Lookup<T> {
  pub fn unknown(reason: impl Into<String>) -> Self {
    Lookup::Unknown(reason.into())
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
    match self {
      Lookup::Known(value) => Lookup::Known(f(value)),
      Lookup::Unknown(reason) => Lookup::Unknown(reason),
    }
  }

  pub fn and_then<U>(self, f: impl FnOnce(T) -> Lookup<U>) -> Lookup<U> {
    match self {
      Lookup::Known(value) => f(value),
      Lookup::Unknown(reason) => Lookup::Unknown(reason),
    }
  }

  /// Collapse to a value, recording the reason when there was none.
  pub fn or_note(self, fallback: T, notes: &mut Vec<String>) -> T {
    match self {
      Lookup::Known(value) => value,
      Lookup::Unknown(reason) => {
        log::debug!("history query unavailable: {}", reason);
        notes.push(reason);
        fallback
      }
    }
  }
}

/// Read-only questions the change detector asks of version control.
pub trait HistoryQuery {
  /// Most recent reachable tag (`git describe --tags --abbrev=0`).
  fn last_tag(&self) -> Lookup<String>;

  /// Files changed between `since` and HEAD. For `TagReference::Head` the
  /// comparison point is HEAD's parent, or the empty tree for a root commit.
  fn diff_since(&self, since: &TagReference) -> Lookup<Vec<String>>;

  /// Files modified in the working tree but not staged.
  fn unstaged_files(&self) -> Lookup<Vec<String>>;
}

impl<Q: HistoryQuery + ?Sized> HistoryQuery for &Q {
  fn last_tag(&self) -> Lookup<String> {
    (**self).last_tag()
  }

  fn diff_since(&self, since: &TagReference) -> Lookup<Vec<String>> {
    (**self).diff_since(since)
  }

  fn unstaged_files(&self) -> Lookup<Vec<String>> {
    (**self).unstaged_files()
  }
}
