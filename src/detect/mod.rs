//! Changed-module detection
//!
//! Pure matching logic over the history port: no process spawning lives here,
//! so every rule is testable with injected data.

pub mod affected;
pub mod changes;

pub use affected::{ChangeDetector, Detection};
pub use changes::ChangeSet;
