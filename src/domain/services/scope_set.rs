//! Scope set: ordered, de-duplicated union of change-source outputs

use std::collections::HashSet;

use crate::domain::value_objects::RepoPath;

/// Files a run will check
///
/// First occurrence wins the position; later duplicates are dropped.
/// Exclusions are applied by [`ScopeSet::exclude`], after which an excluded
/// path can never be re-inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
    paths: Vec<RepoPath>,
    seen: HashSet<RepoPath>,
    excluded: HashSet<RepoPath>,
}

impl ScopeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path; returns false if it was already present or excluded
    pub fn insert(&mut self, path: RepoPath) -> bool {
        if path.is_empty() || self.excluded.contains(&path) || self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    /// Insert every path in order; returns how many were new
    pub fn extend<I>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = RepoPath>,
    {
        paths.into_iter().filter(|p| self.insert(p.clone())).count()
    }

    /// Remove `paths` now and reject them on any later insert
    pub fn exclude<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = RepoPath>,
    {
        for path in paths {
            self.seen.remove(&path);
            self.excluded.insert(path);
        }
        let excluded = &self.excluded;
        self.paths.retain(|p| !excluded.contains(p));
    }

    pub fn contains(&self, path: &RepoPath) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepoPath> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[RepoPath] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<RepoPath> {
        self.paths
    }
}

impl FromIterator<RepoPath> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = RepoPath>>(iter: I) -> Self {
        let mut set = ScopeSet::new();
        set.extend(iter);
        set
    }
}
