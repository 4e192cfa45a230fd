use crate::core::error::{ConfigError, RailError, RailResult, ResultExt};
use crate::core::vcs::system_git::DEFAULT_TIMEOUT;
use crate::modules::Module;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for monorail
/// Searched in order: monorail.toml, .monorail.toml, .config/monorail.toml
///
/// Every section is optional; a repository without a config file runs on
/// defaults and takes its modules from flags or the Cargo workspace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RailConfig {
  #[serde(default)]
  pub detector: DetectorConfig,
  #[serde(default)]
  pub ci: CiConfig,
  #[serde(default)]
  pub modules: Vec<ModuleConfig>,
}

/// Change detector settings
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorConfig {
  /// Deadline for each git process, in seconds (default: 30)
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
  DEFAULT_TIMEOUT.as_secs()
}

impl Default for DetectorConfig {
  fn default() -> Self {
    Self {
      timeout_secs: default_timeout_secs(),
    }
  }
}

/// CI integration settings
#[derive(Debug, Clone, Deserialize)]
pub struct CiConfig {
  /// Environment variable naming the file that receives key=value outputs
  #[serde(default = "default_output_env")]
  pub output_env: String,
}

fn default_output_env() -> String {
  "GITHUB_OUTPUT".to_string()
}

impl Default for CiConfig {
  fn default() -> Self {
    Self {
      output_env: default_output_env(),
    }
  }
}

/// A module declared in the config file
///
/// ```toml
/// [[modules]]
/// name = "library-a"
/// path = "library-a"
/// version = "1.0.0"  # optional
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
  pub name: String,
  pub path: String,
  #[serde(default)]
  pub version: Option<String>,
}

impl ModuleConfig {
  pub fn to_module(&self) -> Module {
    let module = Module::new(&self.name, &self.path);
    match &self.version {
      Some(version) => module.with_version(version),
      None => module,
    }
  }
}

impl RailConfig {
  /// Find config file in search order: monorail.toml, .monorail.toml, .config/monorail.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("monorail.toml"),
      path.join(".monorail.toml"),
      path.join(".config").join("monorail.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config from the repository root, falling back to defaults when no
  /// config file exists.
  pub fn load(root: &Path) -> RailResult<Self> {
    match Self::find_config_path(root) {
      Some(path) => Self::load_from(&path),
      None => Ok(Self::default()),
    }
  }

  /// Load config from an explicit file
  pub fn load_from(config_path: &Path) -> RailResult<Self> {
    if !config_path.is_file() {
      return Err(RailError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    log::debug!("loaded config from {}", config_path.display());
    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> RailResult<Self> {
    let config: RailConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> RailResult<()> {
    if self.detector.timeout_secs == 0 {
      return Err(RailError::Config(ConfigError::InvalidField {
        field: "detector.timeout_secs".to_string(),
        reason: "must be greater than 0".to_string(),
      }));
    }

    if self.ci.output_env.trim().is_empty() {
      return Err(RailError::Config(ConfigError::InvalidField {
        field: "ci.output_env".to_string(),
        reason: "must name an environment variable".to_string(),
      }));
    }

    for module in &self.modules {
      if let Some(version) = &module.version
        && semver::Version::parse(version).is_err()
      {
        return Err(RailError::Config(ConfigError::InvalidField {
          field: format!("modules.{}.version", module.name),
          reason: format!("'{}' is not valid semver", version),
        }));
      }
    }

    Ok(())
  }

  /// Per-process git deadline
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.detector.timeout_secs)
  }

  /// Modules declared under `[[modules]]`, in file order
  pub fn declared_modules(&self) -> Vec<Module> {
    self.modules.iter().map(ModuleConfig::to_module).collect()
  }
}
