//! # CLI Command Implementation
//!
//! Resolves the commit, selects the destination references, runs one merge
//! search per reference and prints the results.

use super::Cli;
use crate::git::GitCli;
use crate::render::Renderer;
use when_merged_core::config::load_named_patterns;
use when_merged_core::refs::{PatternError, RefPatterns, Target, collect_targets};
use when_merged_core::report::{merge_line, warning_line, warning_reference};
use when_merged_core::{
    CommitId, GitBackend, NameStyle, OutputMode, TargetReport, WhenMergedError, find_merge,
    name_commit,
};

// =============================================================================
// RUN SUMMARY
// =============================================================================

/// What a completed run found, for the exit status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-reference results, in output order.
    pub reports: Vec<TargetReport>,
}

impl RunSummary {
    /// Whether every reference reported at least one merge.
    #[must_use]
    pub fn all_merged(&self) -> bool {
        self.reports.iter().all(TargetReport::is_merged)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<RunSummary, WhenMergedError> {
    let git = match &cli.directory {
        Some(dir) => GitCli::in_dir(dir),
        None => GitCli::new(),
    };

    let commit = git.resolve_commit(&cli.commit)?;
    tracing::info!(commit = %commit, "resolved commit");

    let patterns = load_patterns(&git, &cli)?;
    let targets = collect_targets(&git, &patterns, &cli.branches)?;
    tracing::info!(
        targets = targets.len(),
        patterns = !patterns.is_empty(),
        "selected destination references"
    );

    let search = Search {
        git: &git,
        commit: &commit,
        mode: cli.output_mode(),
        style: cli.name_style(&git)?,
        recursive: cli.recursive,
        json: cli.json,
        renderer: Renderer::new(&git, cli.render_options()),
    };

    let mut summary = RunSummary::default();
    for target in &targets {
        summary.reports.push(search.report_target(target)?);
    }

    if cli.json {
        let output = serde_json::to_string_pretty(&summary.reports)
            .map_err(|e| WhenMergedError::Serialization(e.to_string()))?;
        println!("{}", output);
    }

    Ok(summary)
}

/// Patterns from `--pattern` plus every configured group requested.
fn load_patterns(git: &GitCli, cli: &Cli) -> Result<RefPatterns, WhenMergedError> {
    let (mut patterns, errors) = RefPatterns::compile(cli.patterns.iter().map(String::as_str));
    report_pattern_errors("pattern", &errors);

    for group in cli.pattern_groups() {
        let (configured, errors) = load_named_patterns(git, &group)?;
        report_pattern_errors("branch pattern", &errors);
        patterns.extend(configured);
    }

    Ok(patterns)
}

fn report_pattern_errors(kind: &str, errors: &[PatternError]) {
    for e in errors {
        eprintln!("Error compiling {} '{}'; ignoring: {}", kind, e.pattern, e.message);
    }
}

// =============================================================================
// PER-REFERENCE SEARCH
// =============================================================================

struct Search<'a> {
    git: &'a GitCli,
    commit: &'a CommitId,
    mode: OutputMode,
    style: NameStyle,
    recursive: bool,
    json: bool,
    renderer: Renderer<'a>,
}

impl Search<'_> {
    /// Search one reference, printing as results arrive.
    ///
    /// In modes that stop on a miss, the first reported miss is returned as
    /// `WhenMergedError::NotMerged`.
    fn report_target(&self, target: &Target) -> Result<TargetReport, WhenMergedError> {
        let mut report = TargetReport::new(&target.reference, &target.label);
        let limit = if self.recursive { usize::MAX } else { 1 };

        for item in find_merge(self.git, self.commit, &target.reference)?.take(limit) {
            let first = report.merges.is_empty();
            match item {
                Ok(merge) => {
                    let name = name_commit(self.git, &merge, self.style)?;
                    if !self.json {
                        println!("{}", merge_line(self.mode, &target.label, &name, first));
                        self.renderer.render(&merge, self.commit)?;
                    }
                    report.merges.push(name);
                }
                Err(reason) => {
                    tracing::debug!(reference = %target.reference, %reason, "search stopped");
                    let Some(reference) = warning_reference(&target.label, &reason, first) else {
                        continue;
                    };
                    if self.mode.stops_on_miss() {
                        return Err(WhenMergedError::NotMerged {
                            reference: reference.to_string(),
                            reason,
                        });
                    }
                    if !self.json {
                        println!("{}", warning_line(reference, &reason));
                    }
                    report.not_merged = Some(reason.to_string());
                }
            }
        }

        Ok(report)
    }
}
