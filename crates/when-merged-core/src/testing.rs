//! In-memory `GitBackend` for unit tests.

use crate::{CommitId, CommitRecord, GitBackend, WhenMergedError};
use std::collections::BTreeMap;

/// Id made of one repeated hex digit, e.g. `id('a')` = `aaaa…`.
pub fn id(c: char) -> CommitId {
    CommitId::parse(&c.to_string().repeat(40)).expect("id")
}

/// History as commit -> parents, refs by full name, and config values.
#[derive(Debug, Default)]
pub struct MemoryRepo {
    parents: BTreeMap<CommitId, Vec<CommitId>>,
    refs: BTreeMap<String, CommitId>,
    config: BTreeMap<String, Vec<String>>,
    descriptions: BTreeMap<CommitId, String>,
}

impl MemoryRepo {
    pub fn commit(mut self, c: char, parents: &[char]) -> Self {
        self.parents
            .insert(id(c), parents.iter().map(|&p| id(p)).collect());
        self
    }

    pub fn branch(mut self, name: &str, c: char) -> Self {
        self.refs.insert(format!("refs/heads/{name}"), id(c));
        self
    }

    pub fn tag(mut self, name: &str, c: char) -> Self {
        self.refs.insert(format!("refs/tags/{name}"), id(c));
        self
    }

    pub fn detached_head(mut self, c: char) -> Self {
        self.refs.insert("HEAD".to_string(), id(c));
        self
    }

    pub fn config(mut self, key: &str, value: &str) -> Self {
        self.config
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn described(mut self, c: char, name: &str) -> Self {
        self.descriptions.insert(id(c), name.to_string());
        self
    }

    fn lookup_ref(&self, spec: &str) -> Option<(&String, &CommitId)> {
        [
            spec.to_string(),
            format!("refs/heads/{spec}"),
            format!("refs/tags/{spec}"),
        ]
        .iter()
        .find_map(|name| self.refs.get_key_value(name.as_str()))
    }

    fn is_ancestor(&self, ancestor: &CommitId, of: &CommitId) -> bool {
        let mut stack = vec![of.clone()];
        while let Some(next) = stack.pop() {
            if &next == ancestor {
                return true;
            }
            if let Some(ps) = self.parents.get(&next) {
                stack.extend(ps.iter().cloned());
            }
        }
        false
    }
}

impl GitBackend for MemoryRepo {
    fn resolve_commit(&self, spec: &str) -> Result<CommitId, WhenMergedError> {
        if let Some((_, tip)) = self.lookup_ref(spec) {
            return Ok(tip.clone());
        }
        CommitId::parse(spec)
            .ok()
            .filter(|c| self.parents.contains_key(c))
            .ok_or_else(|| WhenMergedError::InvalidCommit(spec.to_string()))
    }

    fn full_ref_name(&self, spec: &str) -> Result<Option<String>, WhenMergedError> {
        Ok(self.lookup_ref(spec).map(|(name, _)| name.clone()))
    }

    fn ancestry_path(
        &self,
        commit: &CommitId,
        tip: &CommitId,
    ) -> Result<Vec<CommitRecord>, WhenMergedError> {
        Ok(self
            .parents
            .iter()
            .filter(|(c, _)| *c != commit && self.is_ancestor(commit, c) && self.is_ancestor(c, tip))
            .map(|(c, ps)| CommitRecord::new(c.clone(), ps.clone()))
            .collect())
    }

    fn commit_refs(&self) -> Result<Vec<String>, WhenMergedError> {
        Ok(self.refs.keys().cloned().collect())
    }

    fn abbreviate(&self, id: &CommitId, len: u32) -> Result<String, WhenMergedError> {
        Ok(id.as_str().chars().take(len as usize).collect())
    }

    fn describe(&self, id: &CommitId, _contains: bool) -> Option<String> {
        self.descriptions.get(id).cloned()
    }

    fn config_values(&self, key: &str) -> Result<Option<Vec<String>>, WhenMergedError> {
        Ok(self.config.get(key).cloned())
    }

    fn config_int(&self, key: &str) -> Result<Option<i64>, WhenMergedError> {
        Ok(self
            .config
            .get(key)
            .and_then(|values| values.last())
            .and_then(|v| v.parse().ok()))
    }
}
