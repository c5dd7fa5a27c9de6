//! # Report Module
//!
//! Text and JSON rendering of search results.
//!
//! ## Line Formats
//!
//! ```text
//! table, first merge   refs/heads/master                      <name>
//! table, later merges                                          via <name>
//! --show-commit        <name>
//! --show-branch        <name>^1..<name>
//! warning              refs/heads/master                      <message>
//! ```
//!
//! The reference column is left-justified to 38 characters.

use crate::NotMerged;
use serde::Serialize;

/// Width of the reference column.
pub const REF_COLUMN_WIDTH: usize = 38;

/// What each reported merge is printed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Reference column followed by the merge name.
    #[default]
    Table,
    /// The merge name alone.
    CommitOnly,
    /// The range of commits the merge brought in.
    BranchRange,
}

impl OutputMode {
    /// Whether a reference without a merge ends the run.
    ///
    /// Modes that print bare names cannot interleave warnings with results,
    /// so the first miss becomes a fatal error instead.
    #[must_use]
    pub fn stops_on_miss(self) -> bool {
        !matches!(self, Self::Table)
    }
}

/// Line for one merge. `first` is true for the merge on the reference's own
/// first-parent history, false for merges found by recursion.
#[must_use]
pub fn merge_line(mode: OutputMode, label: &str, name: &str, first: bool) -> String {
    match mode {
        OutputMode::Table if first => format!("{:<width$} {}", label, name, width = REF_COLUMN_WIDTH),
        OutputMode::Table => format!("{:<width$} via {}", "", name, width = REF_COLUMN_WIDTH),
        OutputMode::CommitOnly => name.to_string(),
        OutputMode::BranchRange => format!("{0}^1..{0}", name),
    }
}

/// Reference column for a miss, or `None` when the miss is not reported.
///
/// After at least one merge was printed, "directly on this branch" only
/// means recursion reached the commit's own line of history, which is not
/// worth a warning. A multiple-parent miss is still reported, without
/// repeating the reference.
#[must_use]
pub fn warning_reference<'a>(label: &'a str, reason: &NotMerged, first: bool) -> Option<&'a str> {
    match (reason, first) {
        (NotMerged::DirectlyOnBranch, false) => None,
        (NotMerged::ViaMultipleParents(_), false) => Some(""),
        _ => Some(label),
    }
}

/// Warning line for a miss.
#[must_use]
pub fn warning_line(reference: &str, reason: &NotMerged) -> String {
    format!("{:<width$} {}", reference, reason, width = REF_COLUMN_WIDTH)
}

// =============================================================================
// JSON REPORT
// =============================================================================

/// Machine-readable result for one reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetReport {
    /// Full reference name, or the commit-ish as given.
    pub reference: String,
    /// Display label (first pattern group, or the reference).
    pub label: String,
    /// Merges found, outermost first, already named.
    pub merges: Vec<String>,
    /// Why the search stopped short, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_merged: Option<String>,
}

impl TargetReport {
    /// Start an empty report for a reference.
    #[must_use]
    pub fn new(reference: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            label: label.into(),
            merges: Vec::new(),
            not_merged: None,
        }
    }

    /// Whether the reference reported at least one merge and no miss.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        !self.merges.is_empty() && self.not_merged.is_none()
    }
}

// =============================================================================
// TESTS
// =============================================================================
