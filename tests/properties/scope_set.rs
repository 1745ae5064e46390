//! Property tests for scope resolution.

use std::collections::HashSet;

use proptest::prelude::*;

use tsratchet::application::ChangeSetResolver;
use tsratchet::domain::ports::{StatusEntry, VersionControl};
use tsratchet::domain::services::ScopeSet;
use tsratchet::domain::value_objects::{ChangeSource, CutoverDate, RepoPath};
use tsratchet::RatchetResult;

/// Answers every query from fixed lists
struct ListVcs {
    staged: Vec<RepoPath>,
    not_on_branch: Vec<RepoPath>,
}

impl VersionControl for ListVcs {
    fn current_branch(&self) -> RatchetResult<String> {
        Ok("main".to_string())
    }

    fn staged_new_files(&self) -> RatchetResult<Vec<RepoPath>> {
        Ok(self.staged.clone())
    }

    fn files_committed_since(&self, _: &str, _: &CutoverDate) -> RatchetResult<Vec<RepoPath>> {
        Ok(Vec::new())
    }

    fn files_in_commits_not_on_other_branches(&self, _: &str) -> RatchetResult<Vec<RepoPath>> {
        Ok(self.not_on_branch.clone())
    }

    fn status(&self) -> RatchetResult<Vec<StatusEntry>> {
        Ok(Vec::new())
    }

    fn stage(&self, _: &[RepoPath]) -> RatchetResult<()> {
        Ok(())
    }
}

/// Small pool of names so that duplicates and overlaps are common
fn repo_path() -> impl Strategy<Value = RepoPath> {
    prop_oneof![
        proptest::string::string_regex("(src|lib)/[a-d]\\.(ts|tsx|js)").unwrap(),
        proptest::string::string_regex("\\./src/[a-d]\\.ts").unwrap(),
        proptest::string::string_regex("node_modules/p/[a-b]\\.js").unwrap(),
    ]
    .prop_map(RepoPath::new)
}

fn path_list(max: usize) -> impl Strategy<Value = Vec<RepoPath>> {
    proptest::collection::vec(repo_path(), 0..=max)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the scope is exactly the union of all sources minus exclusions.
    #[test]
    fn property_scope_is_union_minus_exclusions(
        staged in path_list(8),
        not_on_branch in path_list(8),
        extra in path_list(4),
        exclusions in path_list(4),
    ) {
        let vcs = ListVcs { staged: staged.clone(), not_on_branch: not_on_branch.clone() };
        let sources = vec![
            ChangeSource::StagedFiles,
            ChangeSource::CommittedNotOnBranch { branch: "main".to_string() },
            ChangeSource::ExplicitExtra { paths: extra.clone() },
        ];

        let resolved = ChangeSetResolver::new(&vcs).resolve(&sources, &exclusions).unwrap();

        let excluded: HashSet<&RepoPath> = exclusions.iter().collect();
        let expected: HashSet<&RepoPath> = staged
            .iter()
            .chain(not_on_branch.iter())
            .chain(extra.iter())
            .filter(|p| !excluded.contains(p))
            .collect();
        let actual: HashSet<&RepoPath> = resolved.scope.iter().collect();
        prop_assert_eq!(actual, expected);

        for path in &exclusions {
            prop_assert!(!resolved.scope.contains(path));
            prop_assert!(!resolved.staged.contains(path));
        }
    }

    /// PROPERTY: no path appears twice and first occurrence keeps its position.
    #[test]
    fn property_scope_is_deduplicated_in_first_seen_order(
        paths in path_list(24),
    ) {
        let scope: ScopeSet = paths.iter().cloned().collect();

        let mut seen = HashSet::new();
        let expected: Vec<RepoPath> = paths
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        prop_assert_eq!(scope.as_slice(), expected.as_slice());
    }

    /// PROPERTY: an excluded path can never be inserted again.
    #[test]
    fn property_excluded_paths_stay_out(
        before in path_list(8),
        exclusions in path_list(4),
        after in path_list(8),
    ) {
        let mut scope = ScopeSet::new();
        scope.extend(before);
        scope.exclude(exclusions.clone());
        scope.extend(after);

        for path in &exclusions {
            prop_assert!(!scope.contains(path));
            prop_assert!(!scope.iter().any(|p| p == path));
        }
    }

    /// PROPERTY: `./x` and `x` name the same scope entry.
    #[test]
    fn property_dot_prefix_is_normalized(name in "[a-z]{1,8}\\.ts") {
        let mut scope = ScopeSet::new();
        prop_assert!(scope.insert(RepoPath::new(&name)));
        let dotted = RepoPath::new(format!("./{}", name));
        prop_assert!(!scope.insert(dotted));
        prop_assert_eq!(scope.len(), 1);
    }
}
