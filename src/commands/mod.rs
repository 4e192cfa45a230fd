//! CLI commands for monorail
//!
//! - **affected**: Modules changed since the last release (text, JSON, names)
//! - **files**: Changed files since the last release
//! - **ci**: key=value outputs for CI (`projects`, `has-changes`)
//! - **versions**: Declared version of every module
//!
//! All commands accept `&RepoContext`; detection never fails the command; notes
//! about unavailable history go to stderr.

pub mod affected;
pub mod ci;
pub mod files;
pub mod versions;

pub use affected::run_affected;
pub use ci::run_ci_output;
pub use files::run_files;
pub use versions::run_versions;

use crate::core::context::RepoContext;
use crate::core::vcs::TagReference;
use crate::detect::Detection;

/// One detector run for a command, with notes printed to stderr.
pub(crate) fn detect(ctx: &RepoContext, since: Option<&str>) -> Detection {
  let detector = ctx.detector();
  let detection = match since {
    Some(reference) => detector.detect_since(TagReference::parse(reference), &ctx.modules),
    None => detector.detect(&ctx.modules),
  };

  for note in &detection.notes {
    eprintln!("ℹ️  {}", note);
  }

  detection
}
