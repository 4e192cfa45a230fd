//! Change set: deduplicated union of committed and unstaged files

use std::collections::HashSet;

/// Changed files in first-seen order, each path at most once.
///
/// Order carries no meaning for matching, but keeping it stable makes CI logs
/// reproducible between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
  files: Vec<String>,
  seen: HashSet<String>,
}

impl ChangeSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Union of committed changes (first) and unstaged changes.
  pub fn from_parts(committed: Vec<String>, unstaged: Vec<String>) -> Self {
    let mut set = Self::new();
    set.extend(committed);
    set.extend(unstaged);
    set
  }

  /// Add one path; returns false when it was already present.
  pub fn insert(&mut self, path: impl Into<String>) -> bool {
    let path = path.into();
    if path.is_empty() || self.seen.contains(&path) {
      return false;
    }
    self.seen.insert(path.clone());
    self.files.push(path);
    true
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.files.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

impl Extend<String> for ChangeSet {
  fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
    for path in iter {
      self.insert(path);
    }
  }
}
