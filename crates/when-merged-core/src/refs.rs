//! # Reference Selection Module
//!
//! Decides which destination references a run reports on.
//!
//! References come from two places:
//! - patterns (`--pattern`, or configured groups via `--name`), matched
//!   against every reference that points at a commit
//! - explicit arguments, normalized to full reference names
//!
//! The union is sorted by full reference name. With neither, `HEAD` is used.

use crate::{GitBackend, WhenMergedError};
use regex::Regex;
use std::collections::BTreeMap;

// =============================================================================
// PATTERNS
// =============================================================================

/// A regex searched anywhere in a full reference name such as
/// `refs/heads/master`.
///
/// If the regex has a capture group, the text matched by the first group is
/// shown instead of the full reference name.
#[derive(Debug, Clone)]
pub struct RefPattern {
    regex: Regex,
}

impl RefPattern {
    /// Compile a pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// Whether the pattern occurs in `refname`.
    #[must_use]
    pub fn is_match(&self, refname: &str) -> bool {
        self.regex.is_match(refname)
    }

    /// Text of the first capture group, if the pattern has one and it took
    /// part in the match.
    #[must_use]
    pub fn label(&self, refname: &str) -> Option<String> {
        if self.regex.captures_len() < 2 {
            return None;
        }
        self.regex
            .captures(refname)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// A pattern that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// The pattern as written.
    pub pattern: String,
    /// Why the regex engine rejected it.
    pub message: String,
}

/// Patterns from every source, in the order given.
#[derive(Debug, Clone, Default)]
pub struct RefPatterns {
    patterns: Vec<RefPattern>,
}

impl RefPatterns {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `sources`, keeping the valid ones.
    ///
    /// Invalid patterns are returned separately so the caller can warn about
    /// them; they never abort a run.
    pub fn compile<'a>(sources: impl IntoIterator<Item = &'a str>) -> (Self, Vec<PatternError>) {
        let mut patterns = Self::new();
        let mut errors = Vec::new();
        for source in sources {
            match RefPattern::new(source) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => errors.push(PatternError {
                    pattern: source.to_string(),
                    message: e.to_string(),
                }),
            }
        }
        (patterns, errors)
    }

    /// Add a compiled pattern.
    pub fn push(&mut self, pattern: RefPattern) {
        self.patterns.push(pattern);
    }

    /// Append all patterns of `other`.
    pub fn extend(&mut self, other: Self) {
        self.patterns.extend(other.patterns);
    }

    /// Whether no patterns were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any pattern occurs in `refname`.
    #[must_use]
    pub fn matches_any(&self, refname: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(refname))
    }

    /// Display label for `refname`: the first group of the first matching
    /// pattern that has one, else the full name.
    #[must_use]
    pub fn label_for(&self, refname: &str) -> String {
        self.patterns
            .iter()
            .filter(|p| p.is_match(refname))
            .find_map(|p| p.label(refname))
            .unwrap_or_else(|| refname.to_string())
    }
}

// =============================================================================
// REFERENCE LISTING
// =============================================================================

/// Interpret one `%(refname) %(objecttype) %(*objecttype)` line.
///
/// Returns the reference name when it points at a commit, or at an
/// annotated tag of a commit. Blobs, trees, and tags of other tags or of
/// non-commits are skipped.
#[must_use]
pub fn parse_ref_line(line: &str) -> Option<String> {
    let mut words = line.split_whitespace();
    let refname = words.next()?;
    let types: Vec<&str> = words.collect();
    match types.as_slice() {
        ["commit"] | ["tag", "commit"] => Some(refname.to_string()),
        _ => None,
    }
}

/// Full reference name for `spec`, or `spec` itself when it is not a
/// reference but still names a commit.
///
/// Symbolic references resolve to the reference they point at, so `HEAD`
/// on a branch becomes `refs/heads/<branch>`.
pub fn full_name<B: GitBackend + ?Sized>(backend: &B, spec: &str) -> Result<String, WhenMergedError> {
    if let Some(full) = backend.full_ref_name(spec)? {
        if !full.is_empty() {
            return Ok(full);
        }
    }
    backend.resolve_commit(spec)?;
    Ok(spec.to_string())
}

// =============================================================================
// TARGETS
// =============================================================================

/// A destination reference to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Full reference name, or the commit-ish as given.
    pub reference: String,
    /// What to print in the reference column.
    pub label: String,
}

/// Collect the references to search, sorted by full name.
///
/// References matching `patterns` come first in precedence for labels;
/// explicit arguments are normalized with [`full_name`]. When both are
/// empty, `HEAD` is used.
pub fn collect_targets<B: GitBackend + ?Sized>(
    backend: &B,
    patterns: &RefPatterns,
    explicit: &[String],
) -> Result<Vec<Target>, WhenMergedError> {
    let mut targets: BTreeMap<String, String> = BTreeMap::new();

    if !patterns.is_empty() {
        for refname in backend.commit_refs()? {
            if patterns.matches_any(&refname) {
                let label = patterns.label_for(&refname);
                targets.insert(refname, label);
            }
        }
    }

    for spec in explicit {
        let reference = full_name(backend, spec)?;
        targets.entry(reference.clone()).or_insert(reference);
    }

    if targets.is_empty() {
        let head = full_name(backend, "HEAD")?;
        targets.insert(head.clone(), head);
    }

    Ok(targets
        .into_iter()
        .map(|(reference, label)| Target { reference, label })
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================
