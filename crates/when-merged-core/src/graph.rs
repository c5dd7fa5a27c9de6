//! # Commit Graph Module
//!
//! An in-memory view of the commits on an ancestry path, as listed by
//! `git log --format='%H %P' --ancestry-path COMMIT..TIP`.
//!
//! The graph only holds the commits git listed. Parents outside the listing
//! are still recorded as parents, but `contains` is false for them, which is
//! what bounds every walk.

use crate::{CommitId, CommitRecord, WhenMergedError};
use std::collections::BTreeMap;

/// Command name used in parse errors.
const LOG_COMMAND: &str = "git log --format='%H %P'";

/// Parse one `%H %P` line: the commit, then its parents in order.
pub fn parse_log_line(line: &str) -> Result<CommitRecord, WhenMergedError> {
    let malformed = || WhenMergedError::MalformedOutput {
        command: LOG_COMMAND.to_string(),
        line: line.to_string(),
    };

    let mut words = line.split_whitespace();
    let id = words
        .next()
        .ok_or_else(malformed)
        .and_then(|w| CommitId::parse(w).map_err(|_| malformed()))?;
    let parents = words
        .map(|w| CommitId::parse(w).map_err(|_| malformed()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CommitRecord::new(id, parents))
}

/// Parse whole `%H %P` log output. Blank lines are skipped.
pub fn parse_log_output(output: &str) -> Result<Vec<CommitRecord>, WhenMergedError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_log_line)
        .collect()
}

// =============================================================================
// COMMIT GRAPH
// =============================================================================

/// Commits on an ancestry path, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    commits: BTreeMap<CommitId, Vec<CommitId>>,
}

impl CommitGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from log records. Later duplicates replace earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = CommitRecord>) -> Self {
        let commits = records
            .into_iter()
            .map(|record| (record.id, record.parents))
            .collect();
        Self { commits }
    }

    /// Whether the commit was part of the listing.
    #[must_use]
    pub fn contains(&self, id: &CommitId) -> bool {
        self.commits.contains_key(id)
    }

    /// Parents of a listed commit, in order.
    #[must_use]
    pub fn parents(&self, id: &CommitId) -> Option<&[CommitId]> {
        self.commits.get(id).map(Vec::as_slice)
    }

    /// Number of listed commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether nothing was listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Iterate the first-parent ancestry of `start` that lies inside the graph.
    ///
    /// Yields `start` itself first (if listed), then its first parent, and so
    /// on. Stops at the first commit that is not listed, or after a root.
    #[must_use]
    pub fn first_parent_path<'g>(&'g self, start: &CommitId) -> FirstParentPath<'g> {
        FirstParentPath {
            graph: self,
            next: Some(start.clone()),
        }
    }
}

/// Iterator returned by [`CommitGraph::first_parent_path`].
#[derive(Debug)]
pub struct FirstParentPath<'g> {
    graph: &'g CommitGraph,
    next: Option<CommitId>,
}

impl Iterator for FirstParentPath<'_> {
    type Item = CommitId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let parents = self.graph.parents(&current)?;
        self.next = parents.first().cloned();
        Some(current)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(c: char) -> CommitId {
        CommitId::parse(&c.to_string().repeat(40)).expect("id")
    }

    #[test]
    fn parse_line_with_parents() {
        let line = format!("{} {} {}", id('a'), id('b'), id('c'));
        let record = parse_log_line(&line).expect("parse");
        assert_eq!(record.id, id('a'));
        assert_eq!(record.parents, vec![id('b'), id('c')]);
    }

    #[test]
    fn parse_root_commit_line() {
        let record = parse_log_line(&format!("{}\n", id('a'))).expect("parse");
        assert!(record.parents.is_empty());
    }

    #[test]
    fn parse_output_fails_on_first_bad_line() {
        let output = format!("{}\nzzz\n", id('a'));
        assert!(matches!(
            parse_log_output(&output),
            Err(WhenMergedError::MalformedOutput { line, .. }) if line == "zzz"
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_log_line("").is_err());
        assert!(parse_log_line("not-a-sha").is_err());
        let bad_parent = format!("{} xyz", id('a'));
        assert!(matches!(
            parse_log_line(&bad_parent),
            Err(WhenMergedError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn parse_output_skips_blank_lines() {
        let output = format!("{} {}\n\n{}\n  \n", id('b'), id('a'), id('a'));
        let records = parse_log_output(&output).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], CommitRecord::new(id('b'), vec![id('a')]));

        let graph = CommitGraph::from_records(records);
        assert_eq!(graph.len(), 2);
        assert!(graph.contains(&id('a')));
        assert_eq!(graph.parents(&id('b')), Some(&[id('a')][..]));
    }

    #[test]
    fn first_parent_path_stops_outside_graph() {
        // d -> c -> b, where b's first parent a was not listed.
        let graph = CommitGraph::from_records([
            CommitRecord::new(id('d'), vec![id('c'), id('e')]),
            CommitRecord::new(id('c'), vec![id('b')]),
            CommitRecord::new(id('b'), vec![id('a')]),
            CommitRecord::new(id('e'), vec![id('a')]),
        ]);

        let path: Vec<_> = graph.first_parent_path(&id('d')).collect();
        assert_eq!(path, vec![id('d'), id('c'), id('b')]);
    }

    #[test]
    fn first_parent_path_ends_at_root() {
        let graph = CommitGraph::from_records([
            CommitRecord::new(id('b'), vec![id('a')]),
            CommitRecord::new(id('a'), vec![]),
        ]);
        let path: Vec<_> = graph.first_parent_path(&id('b')).collect();
        assert_eq!(path, vec![id('b'), id('a')]);
    }

    #[test]
    fn first_parent_path_of_unlisted_start_is_empty() {
        let graph = CommitGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.first_parent_path(&id('a')).count(), 0);
    }
}
