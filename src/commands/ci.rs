//! `monorail ci-output` - Publish changed modules as CI step outputs
//!
//! Inside GitHub Actions (or any CI exporting a file path in the configured
//! variable, `GITHUB_OUTPUT` by default) the lines
//!
//! ```text
//! projects=["library-a"]
//! has-changes=true
//! ```
//!
//! are appended to that file. Outside CI they are printed to stdout.

use super::affected::names_json;
use crate::core::context::RepoContext;
use crate::core::error::{RailResult, ResultExt};
use crate::detect::Detection;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Run the ci-output command
pub fn run_ci_output(ctx: &RepoContext, since: Option<String>) -> RailResult<()> {
  let detection = super::detect(ctx, since.as_deref());
  let lines = output_lines(&detection)?;

  let env_name = &ctx.config.ci.output_env;
  match std::env::var_os(env_name).filter(|value| !value.is_empty()) {
    Some(path) => {
      let path = Path::new(&path);
      append_lines(path, &lines).with_context(|| format!("Failed to write CI output to {}", path.display()))?;
      println!("Set CI output ({}): {}", env_name, lines[0]);
    }
    None => {
      log::debug!("{} is not set, printing outputs", env_name);
      for line in &lines {
        println!("{}", line);
      }
    }
  }

  Ok(())
}

/// `projects=<json>` and `has-changes=<bool>`
pub fn output_lines(detection: &Detection) -> RailResult<Vec<String>> {
  Ok(vec![
    format!("projects={}", names_json(detection)?),
    format!("has-changes={}", detection.has_changes()),
  ])
}

/// Append lines to the CI output file, creating it if needed.
pub fn append_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
  let mut file = OpenOptions::new().create(true).append(true).open(path)?;
  for line in lines {
    writeln!(file, "{}", line)?;
  }
  Ok(())
}
