//! `monorail versions` - Show the declared version of every module

use crate::core::context::RepoContext;
use crate::core::error::RailResult;
use crate::modules::Module;

/// Run the versions command
pub fn run_versions(ctx: &RepoContext) -> RailResult<()> {
  println!("Module versions ({}, from {})", ctx.root.display(), ctx.source);
  print!("{}", render_versions(&ctx.modules));
  Ok(())
}

pub fn render_versions(modules: &[Module]) -> String {
  modules
    .iter()
    .map(|module| format!("{}: {}\n", module.name, module.version.as_deref().unwrap_or("unspecified")))
    .collect()
}
