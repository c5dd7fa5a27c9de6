//! # Configuration Module
//!
//! Settings persisted in git configuration:
//!
//! ```text
//! whenmerged.<name>.pattern   multi-valued reference regexes for group <name>
//! whenmerged.abbrev           default abbreviation length (<= 0 disables)
//! ```
//!
//! Command-line flags override these; see the app's CLI module.

use crate::refs::{PatternError, RefPatterns};
use crate::{GitBackend, WhenMergedError};

/// Key holding the default abbreviation length.
pub const ABBREV_KEY: &str = "whenmerged.abbrev";

/// Group read by `--default`.
pub const DEFAULT_GROUP: &str = "default";

/// Configuration key holding the patterns of group `name`.
#[must_use]
pub fn pattern_key(name: &str) -> String {
    format!("whenmerged.{}.pattern", name)
}

/// Load the patterns configured for group `name`.
///
/// A group with no values at all is an error. Values that fail to compile
/// are returned next to the valid ones so the caller can warn and go on.
pub fn load_named_patterns<B: GitBackend + ?Sized>(
    backend: &B,
    name: &str,
) -> Result<(RefPatterns, Vec<PatternError>), WhenMergedError> {
    let key = pattern_key(name);
    let values = backend
        .config_values(&key)?
        .ok_or(WhenMergedError::MissingPatternConfig(key))?;
    Ok(RefPatterns::compile(
        values.iter().map(String::as_str).filter(|v| !v.is_empty()),
    ))
}

/// Normalize an abbreviation length: zero or negative means "do not
/// abbreviate".
#[must_use]
pub fn normalize_abbrev(len: i64) -> Option<u32> {
    u32::try_from(len).ok().filter(|&n| n > 0)
}

/// Abbreviation length from `whenmerged.abbrev`, if set and positive.
pub fn configured_abbrev<B: GitBackend + ?Sized>(backend: &B) -> Result<Option<u32>, WhenMergedError> {
    Ok(backend.config_int(ABBREV_KEY)?.and_then(normalize_abbrev))
}
