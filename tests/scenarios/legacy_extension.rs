//! Scenario: A legacy file sneaks into the commit
//!
//! Journey: Developer stages a new `.ts` file and a new `.js` file.
//!
//! Success Criteria:
//! - The run fails on the extension check
//! - Neither the linter nor the compiler runs
//! - Nothing is restaged

use tsratchet::domain::value_objects::RepoPath;
use tsratchet::infrastructure::GitCli;
use tsratchet::{Orchestrator, OrchestratorOptions};

use crate::common::*;

/// SCENARIO: staged `.js` file is rejected before checking
#[test]
fn scenario_staged_js_file_fails_the_guard() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.ts"), "export const a = 1;\n").unwrap();
    std::fs::write(dir.path().join("b.js"), "module.exports = 1;\n").unwrap();

    let vcs = StaticVcs::with_staged(&["a.ts", "b.js"]);
    let stage_calls = vcs.stage_calls.clone();
    let options = OrchestratorOptions::new(dir.path()).with_staged_files(true);
    let mut orchestrator =
        Orchestrator::new(options, vcs, MarkerChecker::default(), MarkerLinter::default());

    let result = orchestrator.run().unwrap();

    assert!(!result.success);
    assert!(result.is_guard_failure());
    assert!(!result.lint_success);
    assert!(!result.check_success);
    assert_eq!(result.guard.violations.len(), 1);
    assert_eq!(result.guard.violations[0].file, RepoPath::new("b.js"));
    assert!(result.lint.is_none());
    assert!(result.check.is_none());
    assert_eq!(orchestrator.linter().engine().calls, 0);
    assert_eq!(orchestrator.engine().checker().builds, 0);
    assert!(stage_calls.lock().unwrap().is_empty());
}

/// SCENARIO: same journey against a real index
#[test]
fn scenario_git_staged_js_file_fails_the_guard() {
    if !has_git() {
        return;
    }
    let repo = TestRepo::init();
    repo.write("src/a.ts", "export const a = 1;\n")
        .write("src/b.js", "module.exports = 1;\n")
        .stage(&["src/a.ts", "src/b.js"]);

    let options = OrchestratorOptions::new(repo.root()).with_staged_files(true);
    let mut orchestrator = Orchestrator::new(
        options,
        GitCli::new(repo.root()),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );

    let preview = orchestrator.preview().unwrap();
    assert_eq!(preview.branch, "main");
    assert_eq!(preview.candidates.len(), 2);
    assert_eq!(preview.checkable, vec![RepoPath::new("src/a.ts")]);

    let result = orchestrator.run().unwrap();
    assert!(!result.success);
    let flagged: Vec<&str> = result
        .guard
        .violations
        .iter()
        .map(|v| v.file.as_str())
        .collect();
    assert_eq!(flagged, vec!["src/b.js"]);
    assert!(result.guard.message.contains("src/b.js"));
    assert_eq!(orchestrator.engine().checker().builds, 0);
}

/// SCENARIO: a vendored `.js` file does not block the commit
#[test]
fn scenario_vendored_js_file_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.ts"), "export const a = 1;\n").unwrap();

    let vcs = StaticVcs::with_staged(&["a.ts", "node_modules/pkg/index.js"]);
    let options = OrchestratorOptions::new(dir.path()).with_staged_files(true);
    let mut orchestrator =
        Orchestrator::new(options, vcs, MarkerChecker::default(), MarkerLinter::default());

    let result = orchestrator.run().unwrap();

    assert!(result.success, "vendored files should pass: {:?}", result.guard);
    assert_eq!(result.scope_files, vec![RepoPath::new("a.ts")]);
}
