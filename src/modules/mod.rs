//! Repository modules: the immutable input list of the detector
//!
//! A module is a name plus a root directory relative to the repository root.
//! Modules are enumerated by the caller (flags, config, or the Cargo workspace),
//! never discovered by the detector itself.

pub mod cargo;

use crate::core::error::{RailResult, UsageError};
use crate::utils::normalize_repo_path;
use std::collections::HashSet;
use std::fmt;

/// An independently versioned unit of the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
  /// Unique module name
  pub name: String,

  /// Root directory, repository-relative with forward slashes (`.` = repo root)
  pub root: String,

  /// Declared version, when the source knows one
  pub version: Option<String>,
}

impl Module {
  pub fn new(name: impl Into<String>, root: impl AsRef<str>) -> Self {
    Self {
      name: name.into().trim().to_string(),
      root: normalize_repo_path(root.as_ref()),
      version: None,
    }
  }

  pub fn with_version(mut self, version: impl Into<String>) -> Self {
    self.version = Some(version.into());
    self
  }

  /// Whether `path` lies inside this module's root.
  ///
  /// Case-sensitive and boundary-aware: root `lib` owns `lib` and `lib/x`,
  /// never `lib-other/x` or `libextra/x`.
  pub fn owns(&self, path: &str) -> bool {
    if self.root == "." {
      return true;
    }
    match path.strip_prefix(self.root.as_str()) {
      Some(rest) => rest.is_empty() || rest.starts_with('/'),
      None => false,
    }
  }
}

impl fmt::Display for Module {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.root)
  }
}

/// Where the module list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSource {
  Flags,
  Config,
  CargoWorkspace,
}

impl fmt::Display for ModuleSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ModuleSource::Flags => write!(f, "--module flags"),
      ModuleSource::Config => write!(f, "monorail.toml"),
      ModuleSource::CargoWorkspace => write!(f, "Cargo workspace"),
    }
  }
}

/// Parse a `--module name=path` flag value.
pub fn parse_module_spec(spec: &str) -> RailResult<Module> {
  let (name, path) = spec.split_once('=').ok_or_else(|| UsageError::BadModuleSpec {
    spec: spec.to_string(),
  })?;

  if name.trim().is_empty() || path.trim().is_empty() {
    return Err(
      UsageError::BadModuleSpec {
        spec: spec.to_string(),
      }
      .into(),
    );
  }

  Ok(Module::new(name, path))
}

/// Reject malformed module lists before any git query runs.
pub fn validate_modules(modules: &[Module]) -> RailResult<()> {
  let mut names = HashSet::new();
  let mut roots = HashSet::new();

  for module in modules {
    if module.name.is_empty() {
      return Err(invalid(module, "name is empty"));
    }
    if module.name.chars().any(char::is_whitespace) {
      return Err(invalid(module, "name contains whitespace"));
    }
    if module.root.starts_with('/') || has_drive_prefix(&module.root) {
      return Err(invalid(module, "root must be relative to the repository root"));
    }
    if module.root.split('/').any(|segment| segment == "..") {
      return Err(invalid(module, "root must not leave the repository ('..')"));
    }
    if let Some(version) = &module.version
      && semver::Version::parse(version).is_err()
    {
      return Err(invalid(module, &format!("version '{}' is not valid semver", version)));
    }

    if !names.insert(module.name.as_str()) {
      return Err(
        UsageError::DuplicateModule {
          name: module.name.clone(),
        }
        .into(),
      );
    }
    if !roots.insert(module.root.as_str()) {
      return Err(invalid(module, &format!("root '{}' is already used by another module", module.root)));
    }
  }

  Ok(())
}

fn invalid(module: &Module, reason: &str) -> crate::core::error::RailError {
  UsageError::InvalidModule {
    name: module.name.clone(),
    reason: reason.to_string(),
  }
  .into()
}

fn has_drive_prefix(root: &str) -> bool {
  let bytes = root.as_bytes();
  bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
