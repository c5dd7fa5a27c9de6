//! # git when-merged CLI Module
//!
//! This module implements the command-line interface.
//!
//! ## Option Groups
//!
//! - destinations: `BRANCH...`, `--pattern`, `--name`, `--default`
//! - output: `--show-commit` | `--show-branch` | `--json`
//! - naming: `--abbrev` | `--no-abbrev` | `--describe` | `--describe-contains`
//! - actions: `--log`, `--diff`, `--visualize`

mod commands;

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use when_merged_core::config::{DEFAULT_GROUP, configured_abbrev, normalize_abbrev};
use when_merged_core::{GitBackend, NameStyle, OutputMode, WhenMergedError};

use crate::render::RenderOptions;

pub use commands::*;

const EXAMPLES: &str = r#"Examples:
  git when-merged 0a1b                   # Find the merge commit that brought
                                         # commit 0a1b into the current branch
  git when-merged 0a1b v1.10 v1.11       # Find merge into given tags/branches
  git when-merged 0a1b -p feature-[0-9]+ # Specify tags/branches by regex
  git when-merged 0a1b -n releases       # Use whenmerged.releases.pattern
  git when-merged 0a1b -s                # Use whenmerged.default.pattern

  git when-merged -r 0a1b                # If the commit was merged indirectly,
                                         # show each intermediate merge.
  git when-merged -l 0a1b                # Show the log for the merge commit
  git when-merged -lb 0a1b               # Show log for the whole merged branch
  git when-merged -v 0a1b                # Visualize the merge commit in gitk
  git when-merged -vb 0a1b               # Visualize the whole merged branch
  git when-merged -d 0a1b                # Show the diff for the merge commit
  git when-merged -c 0a1b                # Print only the merge's SHA-1

Configuration:
  whenmerged.<name>.pattern
      Regular expressions that match reference names for the pattern
      called <name>. A regexp is sought in the full reference name,
      in the form "refs/heads/master". This option can be multivalued, in
      which case references matching any of the patterns are considered.

          git config whenmerged.default.pattern '^refs/heads/master$'
          git config --add whenmerged.default.pattern '^refs/heads/maint$'

  whenmerged.abbrev
      If this value is set to a positive integer, then SHA-1s are
      abbreviated to this number of characters (or longer if needed to
      avoid ambiguity). Overridden by --abbrev=N or --no-abbrev.

Environment:
  RUST_LOG                 tracing filter (default: git_when_merged=warn)
  WHENMERGED_LOG_FORMAT    "json" for JSON log lines on stderr
"#;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Find when a commit was merged into one or more branches.
///
/// Find the merge commit that brought COMMIT into the specified BRANCH(es).
/// Specifically, look for the oldest commit on the first-parent history of
/// each BRANCH that contains the COMMIT as an ancestor.
#[derive(Parser, Debug)]
#[command(name = "git when-merged", bin_name = "git when-merged")]
#[command(version, about, after_help = EXAMPLES)]
#[command(group(
    ArgGroup::new("show")
        .args(["show_commit", "show_branch"])
        .multiple(false)
))]
#[command(group(
    ArgGroup::new("naming")
        .args(["abbrev", "no_abbrev", "describe", "describe_contains"])
        .multiple(false)
))]
pub struct Cli {
    /// Run as if started in PATH
    #[arg(short = 'C', long = "directory", value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Show when COMMIT was merged to the references matching this regexp.
    /// If the regexp has a group, the part of the reference name matching the
    /// first group is displayed
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Show when COMMIT was merged to the references matching the configured
    /// pattern(s) whenmerged.<NAME>.pattern
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Shorthand for "--name=default"
    #[arg(short = 's', long = "default")]
    pub default: bool,

    /// Follow merges back recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Display only the SHA-1 of the merge commit. Exit with a nonzero
    /// status if the commit was not merged via a merge commit
    #[arg(short = 'c', long)]
    pub show_commit: bool,

    /// Display the range of commits merged at the same time as COMMIT. Exit
    /// with a nonzero status if the commit was not merged via a merge commit.
    /// Also affects --log and --visualize
    #[arg(short = 'b', long)]
    pub show_branch: bool,

    /// Abbreviate SHA-1s to N characters (or more if needed to avoid ambiguity)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub abbrev: Option<i64>,

    /// Do not abbreviate SHA-1s
    #[arg(long)]
    pub no_abbrev: bool,

    /// Describe the merge commit in terms of the most recent tag reachable
    /// from it (see git-describe(1))
    #[arg(long)]
    pub describe: bool,

    /// Describe the merge commit in terms of a nearby tag that contains it
    #[arg(long)]
    pub describe_contains: bool,

    /// Show the log for the merge commit (with -b, for the whole merged branch)
    #[arg(short, long)]
    pub log: bool,

    /// Show the diff for the merge commit
    #[arg(short, long)]
    pub diff: bool,

    /// Visualize the merge commit using gitk (with -b, only the merged branch)
    #[arg(short, long)]
    pub visualize: bool,

    /// Print results as JSON (for programmatic access)
    #[arg(
        long,
        conflicts_with_all = ["show_commit", "show_branch", "log", "diff", "visualize"]
    )]
    pub json: bool,

    /// The commit whose destiny you would like to determine
    pub commit: String,

    /// Destination branch(es) into which COMMIT might have been merged; any
    /// commit-ish git understands. Defaults to HEAD when no BRANCH, --pattern
    /// or --name is given
    #[arg(value_name = "BRANCH")]
    pub branches: Vec<String>,
}

impl Cli {
    /// How each merge is printed.
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        if self.show_commit {
            OutputMode::CommitOnly
        } else if self.show_branch {
            OutputMode::BranchRange
        } else {
            OutputMode::Table
        }
    }

    /// Configured pattern groups to read, `--default` included.
    #[must_use]
    pub fn pattern_groups(&self) -> Vec<String> {
        let mut groups = self.names.clone();
        if self.default {
            groups.push(DEFAULT_GROUP.to_string());
        }
        groups
    }

    /// Naming style: command-line options first, then `whenmerged.abbrev`.
    pub fn name_style<B: GitBackend + ?Sized>(&self, backend: &B) -> Result<NameStyle, WhenMergedError> {
        if self.describe {
            return Ok(NameStyle::Describe);
        }
        if self.describe_contains {
            return Ok(NameStyle::DescribeContains);
        }
        if self.no_abbrev {
            return Ok(NameStyle::Full);
        }
        let len = match self.abbrev {
            Some(len) => normalize_abbrev(len),
            None => configured_abbrev(backend)?,
        };
        Ok(NameStyle::from_abbrev(len))
    }

    /// Per-merge actions.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            log: self.log,
            diff: self.diff,
            visualize: self.visualize,
            whole_branch: self.show_branch,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
