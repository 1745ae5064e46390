//! Scenario: Types pass, lint does not
//!
//! Journey: Developer asks for two extra files to be checked. Both compile
//! cleanly but carry lint errors.
//!
//! Success Criteria:
//! - Lint error counts are reported per file, in scope order
//! - The type check succeeds on its own
//! - The overall run fails

use tsratchet::{Orchestrator, OrchestratorOptions};

use crate::common::*;

/// SCENARIO: per-file lint errors fail the run
#[test]
fn scenario_lint_errors_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.ts"), source_with(LINT_ERROR, 3)).unwrap();
    std::fs::write(dir.path().join("b.ts"), source_with(LINT_ERROR, 12)).unwrap();

    let options = OrchestratorOptions::new(dir.path()).with_extra_files(["a.ts", "b.ts"]);
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );

    let result = orchestrator.run().unwrap();

    assert_eq!(result.lint_error_counts(), vec![3, 12]);
    assert!(!result.lint_success);
    assert!(result.check_success);
    assert!(!result.success);
    assert_eq!(result.type_error_count(), 0);
}

/// SCENARIO: fixing the files makes the next run pass
#[test]
fn scenario_fixing_lint_errors_passes_next_run() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    std::fs::write(&file, source_with(LINT_ERROR, 2)).unwrap();

    let options = OrchestratorOptions::new(dir.path()).with_extra_files(["a.ts"]);
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );

    assert!(!orchestrator.run().unwrap().success);

    std::fs::write(&file, source_with(LINT_ERROR, 0)).unwrap();
    let result = orchestrator.run().unwrap();

    assert!(result.success);
    assert_eq!(result.lint_error_counts(), vec![0]);
}

/// SCENARIO: type errors alone fail the run
#[test]
fn scenario_type_errors_fail_with_clean_lint() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.ts"), source_with(TYPE_ERROR, 2)).unwrap();

    let options = OrchestratorOptions::new(dir.path()).with_extra_files(["a.ts"]);
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );

    let result = orchestrator.run().unwrap();

    assert!(result.lint_success);
    assert!(!result.check_success);
    assert!(!result.success);
    assert_eq!(result.type_error_count(), 2);
    let check = result.check.as_ref().unwrap();
    assert!(check.diagnostics_text.contains("TS2322"), "{}", check.diagnostics_text);
}
