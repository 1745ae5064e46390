//! Scenario: Nothing changed
//!
//! Journey: Developer runs a check with nothing staged and no extras.
//!
//! Success Criteria:
//! - The run succeeds immediately
//! - The compiler is never started

use tsratchet::infrastructure::GitCli;
use tsratchet::{Orchestrator, OrchestratorOptions};

use crate::common::*;

/// SCENARIO: no sources produce files
#[test]
fn scenario_empty_scope_succeeds_without_compiling() {
    let dir = tempfile::tempdir().unwrap();
    let options = OrchestratorOptions::new(dir.path()).with_staged_files(true);
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );

    let result = orchestrator.run().unwrap();

    assert!(result.success);
    assert!(result.lint_success);
    assert!(result.check_success);
    assert!(result.scope_files.is_empty());
    assert_eq!(orchestrator.engine().checker().builds, 0);
    assert_eq!(orchestrator.linter().engine().calls, 0);
}

/// SCENARIO: only non-TypeScript files are staged in a real repository
#[test]
fn scenario_git_only_docs_staged() {
    if !has_git() {
        return;
    }
    let repo = TestRepo::init();
    repo.write("README.md", "# app\n").stage(&["README.md"]);

    let options = OrchestratorOptions::new(repo.root()).with_staged_files(true);
    let mut orchestrator = Orchestrator::new(
        options,
        GitCli::new(repo.root()),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );

    let result = orchestrator.run().unwrap();

    assert!(result.success);
    assert!(result.scope_files.is_empty());
    assert_eq!(orchestrator.engine().checker().builds, 0);
}
