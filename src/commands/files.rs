//! `monorail files` - Show which files changed since the last release

use crate::core::context::RepoContext;
use crate::core::error::RailResult;
use crate::detect::Detection;

/// Run the files command
pub fn run_files(ctx: &RepoContext, since: Option<String>) -> RailResult<()> {
  let detection = super::detect(ctx, since.as_deref());
  print!("{}", render_files(&detection));
  Ok(())
}

/// Changed (committed since the reference, then unstaged) files, one per line
pub fn render_files(detection: &Detection) -> String {
  let mut out = format!("Changed files (since {})\n", detection.since);
  out.push_str("========================================\n");

  if detection.changes.is_empty() {
    out.push_str("No changes detected\n");
  } else {
    for file in detection.changes.iter() {
      out.push_str(&format!("  {}\n", file));
    }
  }

  out
}
