//! # Naming Module
//!
//! How a merge commit is shown: full id, abbreviated id, or a
//! `git describe` name.

use crate::{CommitId, GitBackend, WhenMergedError};

/// Display style for merge commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// The full object name.
    #[default]
    Full,
    /// An unambiguous prefix of at least this many characters.
    Abbrev(u32),
    /// Relative to the most recent tag reachable from the commit.
    Describe,
    /// Relative to a nearby tag that contains the commit.
    DescribeContains,
}

impl NameStyle {
    /// Style from an optional abbreviation length (`None` → full names).
    #[must_use]
    pub fn from_abbrev(len: Option<u32>) -> Self {
        len.map_or(Self::Full, Self::Abbrev)
    }
}

/// Name `id` according to `style`.
///
/// Describe styles fall back to the full id when git cannot describe it.
pub fn name_commit<B: GitBackend + ?Sized>(
    backend: &B,
    id: &CommitId,
    style: NameStyle,
) -> Result<String, WhenMergedError> {
    match style {
        NameStyle::Full => Ok(id.to_string()),
        NameStyle::Abbrev(len) => backend.abbreviate(id, len),
        NameStyle::Describe => Ok(backend.describe(id, false).unwrap_or_else(|| id.to_string())),
        NameStyle::DescribeContains => {
            Ok(backend.describe(id, true).unwrap_or_else(|| id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryRepo, id};

    #[test]
    fn full_and_abbreviated() {
        let repo = MemoryRepo::default().commit('a', &[]);
        let name = name_commit(&repo, &id('a'), NameStyle::Full).expect("name");
        assert_eq!(name, "a".repeat(40));

        let name = name_commit(&repo, &id('a'), NameStyle::from_abbrev(Some(7))).expect("name");
        assert_eq!(name, "aaaaaaa");
    }

    #[test]
    fn describe_falls_back_to_full_id() {
        let repo = MemoryRepo::default()
            .commit('a', &[])
            .commit('b', &['a'])
            .described('a', "v1.0-3-gaaaaaaa");

        let name = name_commit(&repo, &id('a'), NameStyle::Describe).expect("name");
        assert_eq!(name, "v1.0-3-gaaaaaaa");

        let name = name_commit(&repo, &id('b'), NameStyle::DescribeContains).expect("name");
        assert_eq!(name, "b".repeat(40));
    }

    #[test]
    fn no_abbrev_means_full() {
        assert_eq!(NameStyle::from_abbrev(None), NameStyle::Full);
    }
}
