//! Scenario: Scoping working-tree changes by cutover date
//!
//! Journey: A repository has files from before and after the strict-mode
//! cutover. Developer edits some of them and adds new ones.
//!
//! Success Criteria:
//! - Modified files are in scope only when added after the cutover
//! - New files (staged or untracked) are always in scope
//! - Files not touched in the working tree are never in scope

use std::collections::BTreeSet;

use tsratchet::application::ChangeSetResolver;
use tsratchet::domain::ports::VersionControl;
use tsratchet::domain::value_objects::{ChangeSource, CutoverDate, RepoPath};
use tsratchet::infrastructure::GitCli;

use crate::common::*;

/// 2020-01-01T00:00:00Z
const BEFORE_CUTOVER: i64 = 1_577_836_800;
/// 2024-01-15T00:00:00Z
const CUTOVER: i64 = 1_705_276_800;
/// 2024-02-01T00:00:00Z
const AFTER_CUTOVER: i64 = 1_706_745_600;

fn fixture() -> TestRepo {
    let repo = TestRepo::init();
    repo.write("src/old_untouched.ts", "export const a = 1;\n")
        .write("src/old_modified.ts", "export const b = 1;\n")
        .commit_at(
            &["src/old_untouched.ts", "src/old_modified.ts"],
            "legacy code",
            BEFORE_CUTOVER,
        );
    repo.write("src/recent_modified.ts", "export const c = 1;\n")
        .commit_at(&["src/recent_modified.ts"], "strict code", AFTER_CUTOVER);

    repo.write("src/old_modified.ts", "export const b = 2;\n")
        .write("src/recent_modified.ts", "export const c = 2;\n")
        .write("src/new.ts", "export const d = 1;\n")
        .write("src/staged_new.ts", "export const e = 1;\n")
        .stage(&["src/staged_new.ts"]);
    repo
}

fn names(paths: Vec<RepoPath>) -> BTreeSet<String> {
    paths.into_iter().map(String::from).collect()
}

/// SCENARIO: unstaged-and-staged-since-date picks the right files
#[test]
fn scenario_unstaged_since_date_scope() {
    if !has_git() {
        return;
    }
    let repo = fixture();
    let git = GitCli::new(repo.root());
    let source = ChangeSource::UnstagedAndStagedSinceDate {
        branch: "main".to_string(),
        date: CutoverDate::from_unix(CUTOVER).unwrap(),
    };

    let files = ChangeSetResolver::new(&git).evaluate(&source).unwrap();

    let expected: BTreeSet<String> = ["src/new.ts", "src/recent_modified.ts", "src/staged_new.ts"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names(files), expected);
}

/// SCENARIO: committed-since-date sees only post-cutover additions
#[test]
fn scenario_committed_since_date_scope() {
    if !has_git() {
        return;
    }
    let repo = fixture();
    let git = GitCli::new(repo.root());

    let files = git
        .files_committed_since("main", &CutoverDate::from_unix(CUTOVER).unwrap())
        .unwrap();

    assert_eq!(files, vec![RepoPath::new("src/recent_modified.ts")]);
}

/// SCENARIO: staged-files source reports only newly added files
#[test]
fn scenario_staged_new_files_scope() {
    if !has_git() {
        return;
    }
    let repo = fixture();
    repo.stage(&["src/old_modified.ts"]);
    let git = GitCli::new(repo.root());

    let files = git.staged_new_files().unwrap();

    assert_eq!(files, vec![RepoPath::new("src/staged_new.ts")]);
    assert_eq!(git.current_branch().unwrap(), "main");
}

/// SCENARIO: commits no other branch has
#[test]
fn scenario_committed_not_on_other_branches_scope() {
    if !has_git() {
        return;
    }
    let repo = TestRepo::init();
    repo.write("src/base.ts", "export const a = 1;\n")
        .commit_at(&["src/base.ts"], "base", BEFORE_CUTOVER);
    repo.git(&["checkout", "-q", "-b", "feature"]);
    repo.write("src/feature.ts", "export const f = 1;\n")
        .commit_at(&["src/feature.ts"], "feature work", AFTER_CUTOVER + 60);
    let git = GitCli::new(repo.root());

    let files = git.files_in_commits_not_on_other_branches("feature").unwrap();

    assert_eq!(files, vec![RepoPath::new("src/feature.ts")]);
}
