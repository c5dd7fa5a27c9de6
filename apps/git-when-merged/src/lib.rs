//! # git-when-merged
//!
//! Library half of the `git when-merged` binary: the CLI definition, the
//! `git` subprocess backend and the per-merge renderers. Exposed so the
//! integration tests can drive the backend against fixture repositories.

pub mod cli;
pub mod git;
pub mod render;
