//! Per-invocation repository context - build once, pass to every command
//!
//! Building the context is where usage errors surface: a missing root, a
//! root that is not the repository top level, or a malformed module list all
//! fail here, before any change detection runs.

use crate::core::config::RailConfig;
use crate::core::error::{RailResult, ResultExt, UsageError};
use crate::core::vcs::{Lookup, SystemGit};
use crate::detect::ChangeDetector;
use crate::modules::{self, Module, ModuleSource};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Inputs for building a context, straight from the CLI
#[derive(Debug, Clone, Default)]
pub struct ContextOptions {
  /// Explicit config file (`--config`)
  pub config_path: Option<PathBuf>,

  /// `--module name=path` values, in flag order
  pub module_specs: Vec<String>,
}

/// Everything one command needs about the repository
#[derive(Debug, Clone)]
pub struct RepoContext {
  /// Repository root (absolute, canonical)
  pub root: PathBuf,

  /// Loaded configuration (defaults when no file exists)
  pub config: RailConfig,

  /// Validated module list
  pub modules: Vec<Module>,

  /// Where `modules` came from
  pub source: ModuleSource,
}

impl RepoContext {
  pub fn build(root: &Path, options: &ContextOptions) -> RailResult<Self> {
    if !root.is_dir() {
      return Err(
        UsageError::RootMissing {
          path: root.to_path_buf(),
        }
        .into(),
      );
    }
    let root = root.canonicalize().context("Failed to resolve repository root")?;

    let config = match &options.config_path {
      Some(path) => RailConfig::load_from(path)?,
      None => RailConfig::load(&root)?,
    };

    let git = SystemGit::open(&root).with_timeout(config.timeout());
    ensure_repo_root(&git, &root)?;

    let (modules, source) = resolve_modules(&root, &config, &options.module_specs)?;
    modules::validate_modules(&modules)?;
    info!("{} modules from {}", modules.len(), source);

    Ok(Self {
      root,
      config,
      modules,
      source,
    })
  }

  /// Detector bound to this repository's git
  pub fn detector(&self) -> ChangeDetector<SystemGit> {
    ChangeDetector::new(SystemGit::open(&self.root).with_timeout(self.config.timeout()))
  }
}

/// Fail when git places the repository top level somewhere other than `root`.
/// When git cannot answer, the check is skipped; detection degrades later.
fn ensure_repo_root(git: &SystemGit, root: &Path) -> RailResult<()> {
  match git.toplevel() {
    Lookup::Known(toplevel) => {
      let toplevel = toplevel.canonicalize().unwrap_or(toplevel);
      if toplevel != root {
        return Err(
          UsageError::NotRepoRoot {
            path: root.to_path_buf(),
            toplevel,
          }
          .into(),
        );
      }
      Ok(())
    }
    Lookup::Unknown(reason) => {
      debug!("skipping repository root check: {}", reason);
      Ok(())
    }
  }
}

/// Pick the module list: flags, then `[[modules]]`, then the Cargo workspace.
fn resolve_modules(root: &Path, config: &RailConfig, specs: &[String]) -> RailResult<(Vec<Module>, ModuleSource)> {
  if !specs.is_empty() {
    let modules = specs
      .iter()
      .map(|spec| modules::parse_module_spec(spec))
      .collect::<RailResult<Vec<_>>>()?;
    return Ok((modules, ModuleSource::Flags));
  }

  if !config.modules.is_empty() {
    return Ok((config.declared_modules(), ModuleSource::Config));
  }

  if modules::cargo::is_cargo_workspace(root) {
    let modules = modules::cargo::discover(root)?;
    if !modules.is_empty() {
      return Ok((modules, ModuleSource::CargoWorkspace));
    }
  }

  Err(
    UsageError::NoModules {
      root: root.to_path_buf(),
    }
    .into(),
  )
}
