//! # when-merged-core
//!
//! Finds the merge commit that brought a commit into a reference's
//! first-parent history - THE LOGIC behind `git when-merged`.
//!
//! ## Layout
//!
//! - `backend` → the `GitBackend` trait: every repository query the search needs
//! - `graph` → commits on an ancestry path and first-parent walks over them
//! - `search` → `find_merge` and the lazy `MergeWalk`
//! - `refs` → destination reference selection (patterns, explicit names, HEAD)
//! - `config` → `whenmerged.*` configuration keys
//! - `naming` / `report` → how merges and misses are printed
//!
//! ## Architectural Constraints
//!
//! - No subprocesses: the app crate implements `GitBackend` with `git`
//! - No logging: user-facing messages and tracing belong to the app
//! - Lazy: a search only asks for as much history as the caller consumes

// =============================================================================
// MODULES
// =============================================================================

pub mod backend;
pub mod config;
pub mod graph;
pub mod naming;
pub mod refs;
pub mod report;
pub mod search;
pub mod types;

#[cfg(test)]
mod testing;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CommitId, CommitRecord, NotMerged, WhenMergedError};

// =============================================================================
// RE-EXPORTS: Search
// =============================================================================

pub use backend::GitBackend;
pub use graph::{CommitGraph, FirstParentPath, parse_log_line, parse_log_output};
pub use naming::{NameStyle, name_commit};
pub use refs::{PatternError, RefPattern, RefPatterns, Target, collect_targets, full_name};
pub use report::{OutputMode, TargetReport};
pub use search::{MergeWalk, find_merge};
