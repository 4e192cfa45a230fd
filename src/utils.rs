//! Path helpers shared by module sources and git output parsing

use std::path::Path;

/// Convert a path to Git format (always forward slashes)
///
/// Git expects paths with forward slashes, even on Windows.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Normalize a repository-relative directory for prefix matching.
///
/// Backslashes become `/`, `./` prefixes and trailing slashes are dropped, and
/// an empty result means the repository root (`.`).
pub fn normalize_repo_path(raw: &str) -> String {
  let mut path = raw.trim().replace('\\', "/");

  while let Some(rest) = path.strip_prefix("./") {
    path = rest.to_string();
  }
  while path.contains("//") {
    path = path.replace("//", "/");
  }
  while path.len() > 1 && path.ends_with('/') {
    path.pop();
  }

  if path.is_empty() { ".".to_string() } else { path }
}

/// Undo git's C-style quoting of unusual file names.
///
/// With `core.quotePath=false` only names containing `"`, `\` or control
/// characters are quoted, e.g. `"tab\there"` or `"caf\303\251"`.
pub fn unquote_git_path(line: &str) -> String {
  let inner = match line.strip_prefix('"').and_then(|l| l.strip_suffix('"')) {
    Some(inner) => inner,
    None => return line.to_string(),
  };

  let mut bytes = Vec::with_capacity(inner.len());
  let mut chars = inner.bytes().peekable();
  while let Some(b) = chars.next() {
    if b != b'\\' {
      bytes.push(b);
      continue;
    }
    match chars.next() {
      Some(b'n') => bytes.push(b'\n'),
      Some(b't') => bytes.push(b'\t'),
      Some(b'r') => bytes.push(b'\r'),
      Some(b'a') => bytes.push(0x07),
      Some(b'b') => bytes.push(0x08),
      Some(b'f') => bytes.push(0x0c),
      Some(b'v') => bytes.push(0x0b),
      Some(d @ b'0'..=b'7') => {
        let mut value = u32::from(d - b'0');
        for _ in 0..2 {
          match chars.peek() {
            Some(&o @ b'0'..=b'7') => {
              value = value * 8 + u32::from(o - b'0');
              chars.next();
            }
            _ => break,
          }
        }
        bytes.push(value as u8);
      }
      Some(other) => bytes.push(other),
      None => bytes.push(b'\\'),
    }
  }

  String::from_utf8_lossy(&bytes).into_owned()
}
