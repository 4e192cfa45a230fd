//! Affected module detection
//!
//! Given a history port and the module list, determine:
//! - The comparison point (last release tag, or HEAD's parent without one)
//! - The change set (committed since that point ∪ unstaged)
//! - Which modules own at least one changed path
//!
//! Every history failure degrades to "no information" and a note; nothing
//! here returns an error.

use super::ChangeSet;
use crate::core::vcs::{HistoryQuery, Lookup, TagReference};
use crate::modules::Module;
use log::debug;
use std::cell::RefCell;
use std::collections::HashSet;

/// Outcome of one detector run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
  /// Reference the committed diff was taken against
  pub since: TagReference,

  /// Files changed since `since`, plus unstaged files
  pub changes: ChangeSet,

  /// Modules owning at least one changed file, in input order
  pub affected: Vec<Module>,

  /// Why some history was unavailable (empty when every query succeeded)
  pub notes: Vec<String>,
}

impl Detection {
  pub fn affected_names(&self) -> Vec<&str> {
    self.affected.iter().map(|m| m.name.as_str()).collect()
  }

  pub fn has_changes(&self) -> bool {
    !self.affected.is_empty()
  }
}

/// Best-effort change detector over a `HistoryQuery`
///
/// Each operation answers on its own; reasons for missing history pile up in
/// the detector and are handed out with the next `Detection`.
pub struct ChangeDetector<Q> {
  history: Q,
  notes: RefCell<Vec<String>>,
}

impl<Q: HistoryQuery> ChangeDetector<Q> {
  pub fn new(history: Q) -> Self {
    Self {
      history,
      notes: RefCell::new(Vec::new()),
    }
  }

  /// Last release tag, or `TagReference::Head` when there is none.
  pub fn resolve_last_tag(&self) -> TagReference {
    match self.history.last_tag() {
      Lookup::Known(tag) => TagReference::Tag(tag),
      Lookup::Unknown(reason) => {
        debug!("no release tag: {}", reason);
        self.notes.borrow_mut().push(format!(
          "no release tag found, comparing HEAD against its parent commit ({})",
          reason
        ));
        TagReference::Head
      }
    }
  }

  /// Files changed between `since` and the current checkout; empty on failure.
  pub fn changed_since(&self, since: &TagReference) -> Vec<String> {
    self.history.diff_since(since).or_note(Vec::new(), &mut self.notes.borrow_mut())
  }

  /// Working-tree modifications not yet staged; empty on failure.
  pub fn unstaged_files(&self) -> Vec<String> {
    self.history.unstaged_files().or_note(Vec::new(), &mut self.notes.borrow_mut())
  }

  /// Modules touched since the last release, in input order.
  // Library entry point; the CLI renders the whole `Detection` instead
  #[allow(dead_code)]
  pub fn affected_modules(&self, modules: &[Module]) -> Vec<Module> {
    self.detect(modules).affected
  }

  /// Full run against the last release tag.
  pub fn detect(&self, modules: &[Module]) -> Detection {
    self.notes.borrow_mut().clear();
    let since = self.resolve_last_tag();
    self.collect(since, modules)
  }

  /// Full run against an explicit reference instead of the last tag.
  pub fn detect_since(&self, since: TagReference, modules: &[Module]) -> Detection {
    self.notes.borrow_mut().clear();
    self.collect(since, modules)
  }

  fn collect(&self, since: TagReference, modules: &[Module]) -> Detection {
    let committed = self.changed_since(&since);
    let unstaged = self.unstaged_files();
    debug!(
      "{} committed and {} unstaged paths since {}",
      committed.len(),
      unstaged.len(),
      since
    );

    let changes = ChangeSet::from_parts(committed, unstaged);
    let affected = filter_modules(modules, &changes);

    Detection {
      since,
      changes,
      affected,
      notes: self.notes.take(),
    }
  }
}

/// Keep the modules that own at least one changed path.
///
/// Input order is preserved and a module name is reported once even when the
/// list repeats it.
pub fn filter_modules(modules: &[Module], changes: &ChangeSet) -> Vec<Module> {
  if changes.is_empty() {
    return Vec::new();
  }

  let mut reported = HashSet::new();
  modules
    .iter()
    .filter(|module| changes.iter().any(|path| module.owns(path)))
    .filter(|module| reported.insert(module.name.clone()))
    .cloned()
    .collect()
}
