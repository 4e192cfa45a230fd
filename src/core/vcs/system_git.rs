//! System git backend
//!
//! Every query is a read-only git subprocess. Processes run under a deadline;
//! a git that hangs (credential prompt, lock contention, huge history) is
//! killed and reported as `Lookup::Unknown` like any other failure.

use super::Lookup;
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default per-process deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Git backend using system git (zero crate dependencies)
#[derive(Debug, Clone)]
pub struct SystemGit {
  /// Repository working directory
  pub(crate) work_tree: PathBuf,

  /// Deadline for each git process
  pub(crate) timeout: Duration,
}

/// Captured result of a finished process
#[derive(Debug)]
pub(crate) struct ProcessOutput {
  pub status: ExitStatus,
  pub stdout: String,
  pub stderr: String,
}

impl SystemGit {
  /// Point at a working tree. Nothing is executed until a query runs.
  pub fn open(path: &Path) -> Self {
    Self {
      work_tree: path.to_path_buf(),
      timeout: DEFAULT_TIMEOUT,
    }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Repository top-level directory (`git rev-parse --show-toplevel`)
  pub fn toplevel(&self) -> Lookup<PathBuf> {
    self
      .query(&["rev-parse", "--show-toplevel"])
      .and_then(|stdout| {
        let top = stdout.trim();
        if top.is_empty() {
          Lookup::unknown("git rev-parse --show-toplevel printed nothing")
        } else {
          Lookup::Known(PathBuf::from(top))
        }
      })
  }

  /// Run git and return stdout, treating a non-zero exit as unknown.
  pub(crate) fn query(&self, args: &[&str]) -> Lookup<String> {
    self.run(args).and_then(|output| {
      if output.status.success() {
        Lookup::Known(output.stdout)
      } else {
        let stderr = output.stderr.trim();
        Lookup::unknown(format!(
          "`git {}` failed ({}){}",
          args.join(" "),
          describe_status(&output.status),
          if stderr.is_empty() {
            String::new()
          } else {
            format!(": {}", stderr)
          }
        ))
      }
    })
  }

  /// Run git to completion or until the deadline.
  pub(crate) fn run(&self, args: &[&str]) -> Lookup<ProcessOutput> {
    let mut cmd = self.git_cmd();
    cmd.args(args);
    debug!("running `git {}` in {}", args.join(" "), self.work_tree.display());
    run_with_timeout(cmd, &format!("git {}", args.join(" ")), self.timeout)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);

    // Isolated environment (GIT_DIR and friends must not leak in)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("color.ui=false");

    cmd
  }
}

/// Spawn `cmd`, drain its pipes on helper threads and poll until it exits or
/// `timeout` elapses. Timed-out children are killed.
pub(crate) fn run_with_timeout(mut cmd: Command, label: &str, timeout: Duration) -> Lookup<ProcessOutput> {
  cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

  let mut child = match cmd.spawn() {
    Ok(child) => child,
    Err(e) => return Lookup::unknown(format!("failed to run `{}`: {}", label, e)),
  };

  let stdout = child.stdout.take().map(drain);
  let stderr = child.stderr.take().map(drain);

  let deadline = Instant::now() + timeout;
  let status = loop {
    match child.try_wait() {
      Ok(Some(status)) => break status,
      Ok(None) if Instant::now() >= deadline => {
        let _ = child.kill();
        let _ = child.wait();
        warn!("`{}` timed out after {:?}, killed", label, timeout);
        return Lookup::unknown(format!("`{}` timed out after {}s", label, timeout.as_secs_f32()));
      }
      Ok(None) => thread::sleep(POLL_INTERVAL),
      Err(e) => {
        let _ = child.kill();
        return Lookup::unknown(format!("failed to wait for `{}`: {}", label, e));
      }
    }
  };

  let output = ProcessOutput {
    status,
    stdout: collect(stdout),
    stderr: collect(stderr),
  };
  debug!("`{}` exited with {}", label, describe_status(&output.status));
  if !output.stderr.trim().is_empty() {
    debug!("`{}` stderr: {}", label, output.stderr.trim());
  }

  Lookup::Known(output)
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
  thread::spawn(move || {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    buf
  })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
  handle
    .and_then(|h| h.join().ok())
    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    .unwrap_or_default()
}

fn describe_status(status: &ExitStatus) -> String {
  match status.code() {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  }
}
