//! Error types for monorail with contextual messages and exit codes
//!
//! Only usage and configuration mistakes surface here. Failures of the git
//! queries themselves never become a `RailError`: the detector turns them into
//! `Lookup::Unknown` and carries on with a best-effort result.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for monorail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, malformed module list)
  User = 1,
  /// System error (I/O while writing outputs)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for monorail
#[derive(Debug)]
pub enum RailError {
  /// Configuration errors
  Config(ConfigError),

  /// Programming or configuration mistakes by the caller
  Usage(UsageError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RailError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RailError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RailError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RailError::Message { message, context, help } => RailError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RailError::Io(err) => RailError::Io(io::Error::new(err.kind(), format!("{}: {}", ctx_str, err))),
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RailError::Config(_) => ExitCode::User,
      RailError::Usage(_) => ExitCode::User,
      RailError::Io(_) => ExitCode::System,
      RailError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RailError::Config(e) => e.help_message(),
      RailError::Usage(e) => e.help_message(),
      RailError::Message { help, .. } => help.clone(),
      RailError::Io(_) => None,
    }
  }
}

impl fmt::Display for RailError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RailError::Config(e) => write!(f, "{}", e),
      RailError::Usage(e) => write!(f, "{}", e),
      RailError::Io(e) => write!(f, "I/O error: {}", e),
      RailError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RailError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RailError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RailError {
  fn from(err: io::Error) -> Self {
    RailError::Io(err)
  }
}

impl From<String> for RailError {
  fn from(msg: String) -> Self {
    RailError::message(msg)
  }
}

impl From<&str> for RailError {
  fn from(msg: &str) -> Self {
    RailError::message(msg)
  }
}

impl From<toml_edit::de::Error> for RailError {
  fn from(err: toml_edit::de::Error) -> Self {
    RailError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for RailError {
  fn from(err: serde_json::Error) -> Self {
    RailError::message(format!("JSON error: {}", err))
  }
}

impl From<cargo_metadata::Error> for RailError {
  fn from(err: cargo_metadata::Error) -> Self {
    RailError::message(format!("Cargo metadata error: {}", err))
  }
}

impl From<UsageError> for RailError {
  fn from(err: UsageError) -> Self {
    RailError::Usage(err)
  }
}

impl From<ConfigError> for RailError {
  fn from(err: ConfigError) -> Self {
    RailError::Config(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Explicit --config path does not exist
  NotFound { path: PathBuf },

  /// A field holds a value we cannot use
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Omit --config to search monorail.toml, .monorail.toml and .config/monorail.toml.".to_string())
      }
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}' in config: {}", field, reason)
      }
    }
  }
}

/// Mistakes in how monorail was invoked. These fail fast instead of degrading.
#[derive(Debug)]
pub enum UsageError {
  /// Root directory does not exist or is not a directory
  RootMissing { path: PathBuf },

  /// Invoked below the repository root
  NotRepoRoot { path: PathBuf, toplevel: PathBuf },

  /// No module list could be obtained from any source
  NoModules { root: PathBuf },

  /// A module entry is malformed
  InvalidModule { name: String, reason: String },

  /// Two modules share a name
  DuplicateModule { name: String },

  /// `--module` flag that is not `name=path`
  BadModuleSpec { spec: String },
}

impl UsageError {
  fn help_message(&self) -> Option<String> {
    match self {
      UsageError::RootMissing { .. } => Some("Pass an existing directory with --root.".to_string()),
      UsageError::NotRepoRoot { toplevel, .. } => Some(format!(
        "Run monorail from the repository root, or pass --root {}",
        toplevel.display()
      )),
      UsageError::NoModules { .. } => Some(
        "Declare [[modules]] in monorail.toml, pass --module name=path, or run inside a Cargo workspace."
          .to_string(),
      ),
      UsageError::InvalidModule { .. } | UsageError::DuplicateModule { .. } => {
        Some("Module roots must be unique, relative paths inside the repository.".to_string())
      }
      UsageError::BadModuleSpec { .. } => Some("Use --module <name>=<path>, e.g. --module library-a=library-a".to_string()),
    }
  }
}

impl fmt::Display for UsageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      UsageError::RootMissing { path } => write!(f, "Root directory not found: {}", path.display()),
      UsageError::NotRepoRoot { path, toplevel } => write!(
        f,
        "{} is not the repository root (git toplevel is {})",
        path.display(),
        toplevel.display()
      ),
      UsageError::NoModules { root } => write!(f, "No modules defined for {}", root.display()),
      UsageError::InvalidModule { name, reason } => write!(f, "Invalid module '{}': {}", name, reason),
      UsageError::DuplicateModule { name } => write!(f, "Module '{}' is defined more than once", name),
      UsageError::BadModuleSpec { spec } => write!(f, "Malformed module spec '{}'", spec),
    }
  }
}

/// Result type alias for monorail
pub type RailResult<T> = Result<T, RailError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RailResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RailResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RailError>,
{
  fn context(self, ctx: impl Into<String>) -> RailResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RailResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RailError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
