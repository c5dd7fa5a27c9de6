//! # Core Type Definitions
//!
//! This module contains the core types shared by the search and the app:
//! - Object identifiers (`CommitId`) and log records (`CommitRecord`)
//! - Per-reference search outcomes (`NotMerged`)
//! - Error types (`WhenMergedError`)
//!
//! ## Identifier Guarantees
//!
//! A `CommitId` always holds a full, lowercase hexadecimal object name.
//! Abbreviated names never enter the core; they are only produced for
//! display by the naming module.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// OBJECT IDENTIFIERS
// =============================================================================

/// Length of a full SHA-1 object name in hex digits.
pub const SHA1_HEX_LEN: usize = 40;

/// Length of a full SHA-256 object name in hex digits.
pub const SHA256_HEX_LEN: usize = 64;

/// Full object name of a commit.
///
/// Ordering is lexicographic on the hex text, which keeps any map keyed by
/// commits deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// Parse a full object name as printed by `git rev-parse` or `git log`.
    ///
    /// Surrounding whitespace is ignored. Uppercase hex is normalized.
    pub fn parse(text: &str) -> Result<Self, WhenMergedError> {
        let hex = text.trim();
        let valid_len = hex.len() == SHA1_HEX_LEN || hex.len() == SHA256_HEX_LEN;
        if !valid_len || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(WhenMergedError::MalformedOutput {
                command: "object name".to_string(),
                line: text.to_string(),
            });
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Get the object name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `PARENT^1..SELF` range covering everything this merge brought in.
    #[must_use]
    pub fn merged_range(&self) -> String {
        format!("{0}^1..{0}", self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommitId {
    type Error = WhenMergedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

// =============================================================================
// LOG RECORDS
// =============================================================================

/// One commit and its parents, in parent order.
///
/// Produced from a `git log --format='%H %P'` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// The commit itself.
    pub id: CommitId,
    /// Parents in order; the first one is the first-parent link.
    pub parents: Vec<CommitId>,
}

impl CommitRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(id: CommitId, parents: Vec<CommitId>) -> Self {
        Self { id, parents }
    }
}

// =============================================================================
// SEARCH OUTCOMES
// =============================================================================

/// Why a reference has no (further) merge to report.
///
/// These are per-reference outcomes, not fatal errors: the run moves on to
/// the next reference unless the output mode says otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotMerged {
    /// The reference does not name a commit.
    InvalidCommit,
    /// The commit is not an ancestor of the reference.
    DoesNotContain,
    /// The commit sits on the reference's first-parent history itself.
    DirectlyOnBranch,
    /// More than one parent of a merge brought the commit in.
    ViaMultipleParents(Vec<CommitId>),
}

impl fmt::Display for NotMerged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCommit => f.write_str("Is not a valid commit!"),
            Self::DoesNotContain => f.write_str("Does not contain commit."),
            Self::DirectlyOnBranch => f.write_str("Commit is directly on this branch."),
            Self::ViaMultipleParents(parents) => {
                f.write_str("Merged via multiple parents:")?;
                for parent in parents {
                    write!(f, " {}", parent)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that abort a `git when-merged` run.
///
/// Use `Result<T, WhenMergedError>` for fallible operations. Per-reference
/// misses are `NotMerged` values and only become errors through
/// `WhenMergedError::NotMerged` in the output modes that stop at the first miss.
#[derive(Debug, Error)]
pub enum WhenMergedError {
    /// A commit-ish given by the user could not be resolved.
    #[error("'{0}' is not a valid commit!")]
    InvalidCommit(String),

    /// `--name NAME` was used but `whenmerged.NAME.pattern` is unset.
    #[error("There is no configuration setting for '{0}'!")]
    MissingPatternConfig(String),

    /// A git query command exited unsuccessfully.
    #[error("git {command} failed: {message}")]
    GitFailed { command: String, message: String },

    /// A git query command printed something we could not interpret.
    #[error("unexpected output from {command}: {line:?}")]
    MalformedOutput { command: String, line: String },

    /// A child process could not be started, or stdout could not be flushed before it.
    #[error("cannot run {program}: {message}")]
    Spawn { program: String, message: String },

    /// A log, diff or visualizer child exited unsuccessfully.
    #[error("command \"{program}\" failed with {status}")]
    RenderFailed { program: String, status: String },

    /// A reference had no merge while only merges may be printed.
    #[error("{reference:<38} {reason}")]
    NotMerged { reference: String, reason: NotMerged },

    /// JSON output could not be produced.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// TESTS
// =============================================================================
