mod commands;
mod core;
mod detect;
mod modules;
mod utils;

use clap::{ArgAction, Args, Parser, Subcommand};
use crate::core::context::{ContextOptions, RepoContext};
use crate::core::error::{RailError, print_error};
use std::path::PathBuf;

/// Detect which modules of a multi-module repository changed since the last release
#[derive(Parser)]
#[command(name = "monorail")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(flatten)]
  global: GlobalArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
  /// Repository root (default: current directory)
  #[arg(long, global = true, value_name = "DIR")]
  root: Option<PathBuf>,

  /// Config file (default: monorail.toml, .monorail.toml or .config/monorail.toml under the root)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Module as NAME=PATH; repeatable, overrides config and Cargo discovery
  #[arg(long = "module", global = true, value_name = "NAME=PATH")]
  modules: Vec<String>,

  /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
  /// List modules changed since the last release tag
  Affected {
    /// Git ref to compare against instead of the last tag
    #[arg(long)]
    since: Option<String>,
    /// Output format: text (default), json, names
    #[arg(long, default_value = "text")]
    format: String,
  },

  /// List files changed since the last release tag (including unstaged)
  Files {
    /// Git ref to compare against instead of the last tag
    #[arg(long)]
    since: Option<String>,
  },

  /// Write `projects` and `has-changes` outputs for CI (GITHUB_OUTPUT)
  CiOutput {
    /// Git ref to compare against instead of the last tag
    #[arg(long)]
    since: Option<String>,
  },

  /// Show the declared version of every module
  Versions,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(verbose: u8) {
  let default_filter = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .format_timestamp(None)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.global.verbose);

  let root = match cli.global.root {
    Some(root) => root,
    None => match std::env::current_dir() {
      Ok(dir) => dir,
      Err(e) => {
        eprintln!("Error: Failed to get current directory: {}", e);
        std::process::exit(1);
      }
    },
  };

  let options = ContextOptions {
    config_path: cli.global.config,
    module_specs: cli.global.modules,
  };

  let ctx = match RepoContext::build(&root, &options) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Affected { since, format } => commands::run_affected(&ctx, since, format),
    Commands::Files { since } => commands::run_files(&ctx, since),
    Commands::CiOutput { since } => commands::run_ci_output(&ctx, since),
    Commands::Versions => commands::run_versions(&ctx),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RailError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
