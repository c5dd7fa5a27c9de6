//! # Backend Module
//!
//! The query primitives the search needs from a version-control system.
//!
//! The core never talks to git directly. The app implements `GitBackend`
//! with `git` subprocesses; tests implement it over an in-memory history.

use crate::{CommitId, CommitRecord, WhenMergedError};

// =============================================================================
// GITBACKEND TRAIT
// =============================================================================

/// Read-only repository queries.
///
/// Every method maps onto one git plumbing command. Implementations must not
/// cache across calls; each run asks the repository afresh.
pub trait GitBackend {
    /// Resolve a commit-ish to the full name of the commit it peels to.
    ///
    /// Returns `WhenMergedError::InvalidCommit(spec)` when the spec does not
    /// name a commit.
    fn resolve_commit(&self, spec: &str) -> Result<CommitId, WhenMergedError>;

    /// Full reference name for `spec` (`master` → `refs/heads/master`).
    ///
    /// `None` when `spec` is not a reference at all (for example a raw object
    /// name or `HEAD~3`).
    fn full_ref_name(&self, spec: &str) -> Result<Option<String>, WhenMergedError>;

    /// Commits that are descendants of `commit` and ancestors of `tip`
    /// (`git log --ancestry-path commit..tip`), with their parents.
    fn ancestry_path(
        &self,
        commit: &CommitId,
        tip: &CommitId,
    ) -> Result<Vec<CommitRecord>, WhenMergedError>;

    /// Names of all references that point at commits, directly or through
    /// an annotated tag.
    fn commit_refs(&self) -> Result<Vec<String>, WhenMergedError>;

    /// Shortest unambiguous prefix of `id` that is at least `len` characters.
    fn abbreviate(&self, id: &CommitId, len: u32) -> Result<String, WhenMergedError>;

    /// `git describe` name of `id`, or `None` when git cannot describe it.
    ///
    /// With `contains`, describe relative to a tag that contains the commit
    /// instead of the most recent tag reachable from it.
    fn describe(&self, id: &CommitId, contains: bool) -> Option<String>;

    /// All values of a multi-valued configuration key; `None` when unset.
    fn config_values(&self, key: &str) -> Result<Option<Vec<String>>, WhenMergedError>;

    /// Integer value of a configuration key; `None` when unset or not an
    /// integer.
    fn config_int(&self, key: &str) -> Result<Option<i64>, WhenMergedError>;
}
