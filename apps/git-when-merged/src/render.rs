//! # Render Module
//!
//! Optional per-merge actions: show the log, show the diff, or open gitk.
//!
//! Children inherit stdout/stderr so their output interleaves with the
//! result lines, which is why stdout is flushed before every child.

use crate::git::GitCli;
use std::io::Write;
use when_merged_core::{CommitId, WhenMergedError};

/// History browser launched by `--visualize`.
pub const VISUALIZER: &str = "gitk";

/// Which actions to run for each merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// `--log`
    pub log: bool,
    /// `--diff`
    pub diff: bool,
    /// `--visualize`
    pub visualize: bool,
    /// `--show-branch`: log and visualize the whole merged range.
    pub whole_branch: bool,
}

impl RenderOptions {
    /// Whether any action is requested.
    #[must_use]
    pub fn any(&self) -> bool {
        self.log || self.diff || self.visualize
    }
}

/// Runs the requested actions for each merge.
#[derive(Debug)]
pub struct Renderer<'a> {
    git: &'a GitCli,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    /// Create a renderer for `git`'s working directory.
    #[must_use]
    pub fn new(git: &'a GitCli, options: RenderOptions) -> Self {
        Self { git, options }
    }

    /// Run every requested action for `merge`, which brought in `commit`.
    pub fn render(&self, merge: &CommitId, commit: &CommitId) -> Result<(), WhenMergedError> {
        if !self.options.any() {
            return Ok(());
        }
        if self.options.log {
            self.run("git", &log_args(merge, self.options.whole_branch))?;
        }
        if self.options.diff {
            self.run("git", &diff_args(merge))?;
        }
        if self.options.visualize {
            self.run(
                VISUALIZER,
                &visualize_args(merge, commit, self.options.whole_branch),
            )?;
        }
        Ok(())
    }

    fn run(&self, program: &str, args: &[String]) -> Result<(), WhenMergedError> {
        let command_line = format!("{} {}", program, args.join(" "));

        // Result lines are already printed; keep them ahead of the child's output.
        std::io::stdout()
            .flush()
            .map_err(|e| WhenMergedError::Spawn {
                program: program.to_string(),
                message: format!("flushing stdout: {}", e),
            })?;

        tracing::debug!(command = %command_line, "rendering");
        let status = self
            .git
            .command(program)
            .args(args)
            .status()
            .map_err(|e| WhenMergedError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(WhenMergedError::RenderFailed {
                program: command_line,
                status: status.to_string(),
            })
        }
    }
}

/// `git log` arguments for a merge: the merge alone, or everything it
/// brought in.
#[must_use]
pub fn log_args(merge: &CommitId, whole_branch: bool) -> Vec<String> {
    let mut args = vec!["--no-pager".to_string(), "log".to_string()];
    if whole_branch {
        args.push("--topo-order".to_string());
        args.push(merge.merged_range());
    } else {
        args.push("--no-walk".to_string());
        args.push(merge.to_string());
    }
    args
}

/// `git diff` arguments showing what a merge changed on its first parent.
#[must_use]
pub fn diff_args(merge: &CommitId) -> Vec<String> {
    vec![
        "--no-pager".to_string(),
        "diff".to_string(),
        merge.merged_range(),
    ]
}

/// gitk arguments: the merged range with the commit selected, or all
/// history with the merge selected.
#[must_use]
pub fn visualize_args(merge: &CommitId, commit: &CommitId, whole_branch: bool) -> Vec<String> {
    if whole_branch {
        vec![
            merge.merged_range(),
            format!("--select-commit={}", commit),
        ]
    } else {
        vec!["--all".to_string(), format!("--select-commit={}", merge)]
    }
}

// =============================================================================
// TESTS
// =============================================================================
