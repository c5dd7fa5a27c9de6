//! # Git Subprocess Backend
//!
//! Implements `GitBackend` by running `git` plumbing commands and parsing
//! their text output. One child at a time, stdin closed, stdout captured.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use when_merged_core::graph::parse_log_output;
use when_merged_core::refs::parse_ref_line;
use when_merged_core::{CommitId, CommitRecord, GitBackend, WhenMergedError};

/// Format for `git for-each-ref`: name, object type, peeled object type.
const REF_FORMAT: &str = "--format=%(refname) %(objecttype) %(*objecttype)";

/// Format for `git log`: commit followed by its parents.
const PARENTS_FORMAT: &str = "--format=%H %P";

/// `git` run in a fixed working directory.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run git as if started in `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            workdir: Some(dir.as_ref().to_path_buf()),
        }
    }

    /// A `Command` for `program` set up in this working directory.
    #[must_use]
    pub fn command(&self, program: &str) -> Command {
        let mut cmd = Command::new(program);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output, WhenMergedError> {
        tracing::debug!(args = ?args, "running git");
        self.command("git")
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| WhenMergedError::Spawn {
                program: "git".to_string(),
                message: e.to_string(),
            })
    }

    /// Run git and return its stdout; a nonzero exit is an error.
    pub fn run(&self, args: &[&str]) -> Result<String, WhenMergedError> {
        let output = self.output(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(WhenMergedError::GitFailed {
                command: args.join(" "),
                message: stderr.trim().to_string(),
            })
        }
    }

    /// Run git and return its stdout, or `None` on a nonzero exit.
    ///
    /// For queries where failure is an answer (unset config, unknown name).
    pub fn run_optional(&self, args: &[&str]) -> Result<Option<String>, WhenMergedError> {
        let output = self.output(args)?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
        } else {
            tracing::debug!(args = ?args, status = %output.status, "git query had no answer");
            Ok(None)
        }
    }
}

impl GitBackend for GitCli {
    fn resolve_commit(&self, spec: &str) -> Result<CommitId, WhenMergedError> {
        let peeled = format!("{}^{{commit}}", spec);
        match self.run_optional(&["rev-parse", "--verify", "-q", &peeled])? {
            Some(out) => CommitId::parse(&out),
            None => Err(WhenMergedError::InvalidCommit(spec.to_string())),
        }
    }

    fn full_ref_name(&self, spec: &str) -> Result<Option<String>, WhenMergedError> {
        let out = self.run_optional(&["rev-parse", "--verify", "-q", "--symbolic-full-name", spec])?;
        Ok(out
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    fn ancestry_path(
        &self,
        commit: &CommitId,
        tip: &CommitId,
    ) -> Result<Vec<CommitRecord>, WhenMergedError> {
        let range = format!("{}..{}", commit, tip);
        let out = self.run(&["log", PARENTS_FORMAT, "--ancestry-path", &range, "--"])?;
        let records = parse_log_output(&out)?;
        tracing::debug!(range = %range, commits = records.len(), "loaded ancestry path");
        Ok(records)
    }

    fn commit_refs(&self) -> Result<Vec<String>, WhenMergedError> {
        let out = self.run(&["for-each-ref", REF_FORMAT])?;
        Ok(out.lines().filter_map(parse_ref_line).collect())
    }

    fn abbreviate(&self, id: &CommitId, len: u32) -> Result<String, WhenMergedError> {
        let short = format!("--short={}", len);
        let out = self.run(&["rev-parse", "--verify", "-q", &short, id.as_str()])?;
        Ok(out.trim().to_string())
    }

    fn describe(&self, id: &CommitId, contains: bool) -> Option<String> {
        let mut args = vec!["describe"];
        if contains {
            args.push("--contains");
        }
        args.push(id.as_str());

        match self.run_optional(&args) {
            Ok(Some(out)) => Some(out.trim().to_string()).filter(|s| !s.is_empty()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("git describe unavailable: {}", e);
                None
            }
        }
    }

    fn config_values(&self, key: &str) -> Result<Option<Vec<String>>, WhenMergedError> {
        let out = self.run_optional(&["config", "--get-all", "--null", key])?;
        Ok(out.map(|s| {
            s.split('\0')
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        }))
    }

    fn config_int(&self, key: &str) -> Result<Option<i64>, WhenMergedError> {
        let out = self.run_optional(&["config", "--int", key])?;
        Ok(out.and_then(|s| match s.trim().parse() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!("ignoring non-integer {} = {:?}", key, s.trim());
                None
            }
        }))
    }
}
