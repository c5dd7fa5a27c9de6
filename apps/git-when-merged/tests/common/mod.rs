//! Fixture repositories built with the real `git` binary.

#![allow(dead_code, clippy::unwrap_used, clippy::panic)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Environment that isolates fixture git runs from the user's configuration.
pub fn isolate(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_AUTHOR_NAME", "test")
        .env("GIT_AUTHOR_EMAIL", "a@b")
        .env("GIT_COMMITTER_NAME", "test")
        .env("GIT_COMMITTER_EMAIL", "a@b")
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE");
}

/// A repository in a temporary directory plus names for its commits.
pub struct Repo {
    tmp: TempDir,
    names: BTreeMap<String, String>,
}

impl Repo {
    pub fn init() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("repo")).unwrap();
        let repo = Self {
            tmp,
            names: BTreeMap::new(),
        };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    pub fn path(&self) -> PathBuf {
        self.tmp.path().join("repo")
    }

    pub fn home(&self) -> &Path {
        self.tmp.path()
    }

    /// Run git in the repository, panicking on failure; returns stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(self.path());
        isolate(&mut cmd, self.home());
        let output = cmd.output().expect("spawn git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit a new file named after `name` and remember the commit as `name`.
    pub fn commit(&mut self, name: &str) -> String {
        fs::write(self.path().join(format!("{name}.txt")), format!("{name}\n")).unwrap();
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", name]);
        self.remember(name)
    }

    /// `git merge --no-ff` and remember the merge as `name`.
    pub fn merge(&mut self, branch: &str, name: &str) -> String {
        self.merge_all(&[branch], name)
    }

    /// Merge several branches at once (an octopus when more than one).
    pub fn merge_all(&mut self, branches: &[&str], name: &str) -> String {
        let mut args = vec!["merge", "-q", "--no-ff", "-m", name];
        args.extend_from_slice(branches);
        self.git(&args);
        self.remember(name)
    }

    pub fn checkout(&self, branch: &str) {
        self.git(&["checkout", "-q", branch]);
    }

    pub fn branch_from(&self, branch: &str, start: &str) {
        let start = self.id(start);
        self.git(&["checkout", "-q", "-b", branch, &start]);
    }

    fn remember(&mut self, name: &str) -> String {
        let id = self.git(&["rev-parse", "HEAD"]);
        self.names.insert(name.to_string(), id.clone());
        id
    }

    /// Full id of a remembered commit.
    pub fn id(&self, name: &str) -> String {
        self.names
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("no commit named {name}"))
    }
}

/// The shared history used by most tests.
///
/// ```text
/// main:     A - B ------ M1 - C ----------------- M2
///                \      /      \                 /
/// feature:        F1 - F2       \               /
/// outer:                         G1 ---- MT - G2
/// topic:            (from B)  T1 --------'
/// unrelated:  (from A) U1
/// ```
///
/// `v1.0` is an annotated tag on M1. HEAD is left on `main`.
pub fn history() -> Repo {
    let mut repo = Repo::init();
    repo.commit("A");
    repo.commit("B");

    repo.branch_from("feature", "B");
    repo.commit("F1");
    repo.commit("F2");

    repo.checkout("main");
    repo.merge("feature", "M1");
    repo.commit("C");

    repo.branch_from("topic", "B");
    repo.commit("T1");

    repo.branch_from("outer", "C");
    repo.commit("G1");
    repo.merge("topic", "MT");
    repo.commit("G2");

    repo.checkout("main");
    repo.merge("outer", "M2");

    repo.branch_from("unrelated", "A");
    repo.commit("U1");

    repo.checkout("main");
    let m1 = repo.id("M1");
    repo.git(&["tag", "-a", "v1.0", "-m", "v1.0", &m1]);
    repo
}

/// A commit that reached `main` through two parents of an octopus merge.
///
/// ```text
/// main:   A - B ---------------- MM
///          \   \                /
/// octo:     \   O1 ---------- MO
///            \               / |
/// x:          P ---- X1 ----'  |
/// y:           \---- Y1 -------'
/// ```
///
/// `P` sits on branch `base`; `MO` has parents `[O1, X1, Y1]`.
pub fn octopus() -> Repo {
    let mut repo = Repo::init();
    repo.commit("A");
    repo.commit("B");

    repo.branch_from("base", "A");
    repo.commit("P");

    repo.branch_from("x", "P");
    repo.commit("X1");
    repo.branch_from("y", "P");
    repo.commit("Y1");

    repo.branch_from("octo", "B");
    repo.commit("O1");
    repo.merge_all(&["x", "y"], "MO");

    repo.checkout("main");
    repo.merge("octo", "MM");
    repo
}
