//! # Merge Search Module
//!
//! Finds the merge that brought a commit into a reference's first-parent
//! history, and optionally the chain of merges behind it.
//!
//! ## Algorithm
//!
//! Load the ancestry path `COMMIT..TIP`. Every commit on it descends from
//! COMMIT, so the oldest commit on TIP's first-parent history that is still
//! on the path is the one that brought COMMIT in. If COMMIT is a parent of
//! that merge we are done; otherwise exactly one of the merge's parents lies
//! on the path, and the search repeats from there.
//!
//! Content is assumed to enter through the second or later parents of a
//! merge. A merge whose first parent is COMMIT means COMMIT sits on the
//! first-parent history itself.

use crate::graph::CommitGraph;
use crate::{CommitId, GitBackend, NotMerged, WhenMergedError};

/// Start a merge search for `commit` on `target`.
///
/// Resolution failures of `target` are not errors: they come back as a
/// walk that yields `NotMerged::InvalidCommit`. Only failures of the
/// ancestry-path query itself are returned as `Err`.
pub fn find_merge<B: GitBackend + ?Sized>(
    backend: &B,
    commit: &CommitId,
    target: &str,
) -> Result<MergeWalk, WhenMergedError> {
    let tip = match backend.resolve_commit(target) {
        Ok(tip) => tip,
        Err(WhenMergedError::InvalidCommit(_)) => {
            return Ok(MergeWalk::failed(commit, NotMerged::InvalidCommit));
        }
        Err(e) => return Err(e),
    };

    if &tip == commit {
        return Ok(MergeWalk::failed(commit, NotMerged::DirectlyOnBranch));
    }

    let graph = CommitGraph::from_records(backend.ancestry_path(commit, &tip)?);
    Ok(MergeWalk::new(graph, commit.clone(), tip))
}

// =============================================================================
// MERGE WALK
// =============================================================================

#[derive(Debug)]
enum WalkState {
    Searching(CommitId),
    Failed(NotMerged),
    Done,
}

/// Lazy iterator over the merges that brought a commit into a tip.
///
/// Yields `Ok(merge)` for each merge, outermost first, and at most one
/// `Err(NotMerged)` as its final item. Consumers that only want the merge
/// on the tip's own history take the first item and stop.
#[derive(Debug)]
pub struct MergeWalk {
    graph: CommitGraph,
    commit: CommitId,
    state: WalkState,
}

impl MergeWalk {
    /// Walk an already loaded ancestry path `commit..tip`.
    #[must_use]
    pub fn new(graph: CommitGraph, commit: CommitId, tip: CommitId) -> Self {
        Self {
            graph,
            commit,
            state: WalkState::Searching(tip),
        }
    }

    /// A walk that yields only `reason`.
    fn failed(commit: &CommitId, reason: NotMerged) -> Self {
        Self {
            graph: CommitGraph::new(),
            commit: commit.clone(),
            state: WalkState::Failed(reason),
        }
    }

    /// One step from `tip`: the merge found and the state after it.
    fn step(&self, tip: &CommitId) -> (Result<CommitId, NotMerged>, WalkState) {
        let Some(merge) = self.graph.first_parent_path(tip).last() else {
            return (Err(NotMerged::DoesNotContain), WalkState::Done);
        };

        let parents = self.graph.parents(&merge).unwrap_or_default();
        match parents.first() {
            None => return (Err(NotMerged::DoesNotContain), WalkState::Done),
            Some(first) if first == &self.commit => {
                return (Err(NotMerged::DirectlyOnBranch), WalkState::Done);
            }
            Some(_) => {}
        }

        if parents.contains(&self.commit) {
            return (Ok(merge), WalkState::Done);
        }

        let on_path: Vec<CommitId> = parents
            .iter()
            .filter(|parent| self.graph.contains(parent))
            .cloned()
            .collect();

        let next = match on_path.as_slice() {
            [] => WalkState::Failed(NotMerged::DoesNotContain),
            [only] => WalkState::Searching(only.clone()),
            _ => WalkState::Failed(NotMerged::ViaMultipleParents(on_path)),
        };
        (Ok(merge), next)
    }
}

impl Iterator for MergeWalk {
    type Item = Result<CommitId, NotMerged>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, WalkState::Done) {
            WalkState::Done => None,
            WalkState::Failed(reason) => Some(Err(reason)),
            WalkState::Searching(tip) => {
                let (item, next) = self.step(&tip);
                self.state = next;
                Some(item)
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
