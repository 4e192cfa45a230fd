//! `monorail affected` - Show which modules changed since the last release
//!
//! Formats:
//! - `text`: human-readable listing
//! - `json`: compact JSON array of names, e.g. `["library-a","library-b"]`
//! - `names`: one module name per line

use crate::core::context::RepoContext;
use crate::core::error::{RailError, RailResult};
use crate::detect::Detection;

/// Output format for affected command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json,
  NamesOnly,
}

impl OutputFormat {
  pub fn from_str(s: &str) -> RailResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::NamesOnly),
      _ => Err(RailError::with_help(
        format!("Unknown format '{}'", s),
        "Valid formats: text, json, names",
      )),
    }
  }
}

/// Run the affected command
pub fn run_affected(ctx: &RepoContext, since: Option<String>, format: String) -> RailResult<()> {
  let output_format = OutputFormat::from_str(&format)?;
  let detection = super::detect(ctx, since.as_deref());

  let rendered = match output_format {
    OutputFormat::Text => render_text(&detection),
    OutputFormat::Json => render_json(&detection)?,
    OutputFormat::NamesOnly => render_names(&detection),
  };
  print!("{}", rendered);

  Ok(())
}

/// Human-readable listing
pub fn render_text(detection: &Detection) -> String {
  let mut out = String::new();
  out.push_str("Changed Modules\n");
  out.push_str("===============\n");
  out.push_str(&format!("Since: {}\n", detection.since));
  out.push_str(&format!("Changed files: {}\n\n", detection.changes.len()));

  if detection.affected.is_empty() {
    out.push_str("No changes detected\n");
  } else {
    for module in &detection.affected {
      out.push_str(&format!("  📦 {}\n", module.name));
    }
  }

  out
}

/// Compact JSON array of module names, newline-terminated
pub fn render_json(detection: &Detection) -> RailResult<String> {
  Ok(format!("{}\n", names_json(detection)?))
}

/// `["a","b"]` without whitespace, as CI scripts expect
pub fn names_json(detection: &Detection) -> RailResult<String> {
  Ok(serde_json::to_string(&detection.affected_names())?)
}

/// One name per line
pub fn render_names(detection: &Detection) -> String {
  detection
    .affected_names()
    .iter()
    .map(|name| format!("{}\n", name))
    .collect()
}
