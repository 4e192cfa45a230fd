//! Module list from a Cargo workspace, via cargo_metadata
//!
//! Each workspace member below the root becomes a module rooted at its
//! manifest directory. A package at the workspace root is not a module.

use super::Module;
use crate::core::error::{RailResult, ResultExt};
use crate::utils::path_to_git_format;
use cargo_metadata::MetadataCommand;
use log::debug;
use std::path::Path;

/// Whether `root` looks like a Cargo workspace.
pub fn is_cargo_workspace(root: &Path) -> bool {
  root.join("Cargo.toml").is_file()
}

/// Enumerate workspace members as modules, in workspace member order.
pub fn discover(root: &Path) -> RailResult<Vec<Module>> {
  let metadata = MetadataCommand::new()
    .manifest_path(root.join("Cargo.toml"))
    .no_deps()
    .exec()
    .with_context(|| format!("Failed to read Cargo workspace at {}", root.display()))?;

  let mut modules = Vec::new();

  for package in metadata.workspace_packages() {
    let Some(manifest_dir) = package.manifest_path.parent() else {
      continue;
    };
    let manifest_dir = manifest_dir.as_std_path();

    // Members outside the repository keep their absolute path and are
    // rejected by module validation.
    let relative = manifest_dir.strip_prefix(root).unwrap_or(manifest_dir);

    // A root package would own every path; only members below the root count.
    if relative.as_os_str().is_empty() {
      debug!("skipping root package {}", package.name);
      continue;
    }

    let module = Module::new(package.name.to_string(), path_to_git_format(relative))
      .with_version(package.version.to_string());
    debug!("cargo member {} -> {}", module.name, module.root);
    modules.push(module);
  }

  Ok(modules)
}
