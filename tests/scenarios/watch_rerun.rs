//! Scenario: Fixing a file in watch mode
//!
//! Journey: Developer starts watch mode on a file with type errors, then
//! saves a fixed version.
//!
//! Success Criteria:
//! - The initial run reports the errors
//! - Exactly one follow-up run happens after the save
//! - The follow-up run is clean
//! - Stopping ends the watch with a shutdown event
//! - A save that lands while a run is in flight still gets its own run
//! - A run that rejects the scope stops watching the old scope files

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tsratchet::{Orchestrator, OrchestratorOptions, WatchEvent};

use crate::common::*;

const RUN_TIMEOUT: Duration = Duration::from_secs(10);

/// SCENARIO: one save triggers one clean re-run
#[test]
fn scenario_save_triggers_single_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    std::fs::write(&file, source_with(TYPE_ERROR, 2)).unwrap();

    let (results_tx, results_rx) = mpsc::channel();
    let options = OrchestratorOptions::new(dir.path())
        .with_extra_files(["a.ts"])
        .with_watch_included_files(true)
        .with_debounce(Duration::from_millis(200))
        .on_results(move |result| {
            let _ = results_tx.send(result.type_error_count());
        });
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );
    let stop = orchestrator.stop_handle();

    let (events_tx, events_rx) = mpsc::channel();
    let watcher = thread::spawn(move || {
        orchestrator
            .watch(|event| {
                let _ = events_tx.send(event);
            })
            .unwrap();
    });

    let initial = results_rx.recv_timeout(RUN_TIMEOUT).expect("initial run");
    assert_eq!(initial, 2);

    // Let the watcher settle before editing
    thread::sleep(Duration::from_millis(300));
    std::fs::write(&file, source_with(TYPE_ERROR, 0)).unwrap();

    let rerun = results_rx.recv_timeout(RUN_TIMEOUT).expect("re-run after save");
    assert_eq!(rerun, 0);
    assert!(
        results_rx.recv_timeout(Duration::from_secs(1)).is_err(),
        "a single save should produce a single re-run"
    );

    stop.stop();
    watcher.join().unwrap();

    let events: Vec<WatchEvent> = events_rx.try_iter().collect();
    assert!(matches!(events.first(), Some(WatchEvent::WatchStarted { .. })));
    assert!(matches!(events.last(), Some(WatchEvent::Shutdown)));
    let changed = events
        .iter()
        .filter(|e| matches!(e, WatchEvent::FilesChanged { .. }))
        .count();
    assert_eq!(changed, 1);
    let completed: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            WatchEvent::RunComplete { success, .. } => Some(*success),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![false, true]);
}

/// SCENARIO: rewriting a file with identical content does not re-run
#[test]
fn scenario_identical_save_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    let content = source_with(TYPE_ERROR, 1);
    std::fs::write(&file, &content).unwrap();

    let (results_tx, results_rx) = mpsc::channel();
    let options = OrchestratorOptions::new(dir.path())
        .with_extra_files(["a.ts"])
        .with_watch_included_files(true)
        .with_debounce(Duration::from_millis(100))
        .on_results(move |result| {
            let _ = results_tx.send(result.success);
        });
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );
    let stop = orchestrator.stop_handle();

    let watcher = thread::spawn(move || {
        orchestrator.watch(|_| {}).unwrap();
    });

    assert!(!results_rx.recv_timeout(RUN_TIMEOUT).expect("initial run"));

    thread::sleep(Duration::from_millis(300));
    std::fs::write(&file, &content).unwrap();

    assert!(
        results_rx.recv_timeout(Duration::from_secs(1)).is_err(),
        "unchanged content should not trigger a run"
    );

    stop.stop();
    watcher.join().unwrap();
}

/// SCENARIO: a save made while the tools run is picked up afterwards
#[test]
fn scenario_save_during_run_triggers_another_run() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    std::fs::write(&file, source_with(TYPE_ERROR, 2)).unwrap();

    let (results_tx, results_rx) = mpsc::channel();
    let options = OrchestratorOptions::new(dir.path())
        .with_extra_files(["a.ts"])
        .with_watch_included_files(true)
        .with_debounce(Duration::from_millis(100))
        .on_results(move |result| {
            let lint_errors: usize = result.lint_error_counts().iter().sum();
            let _ = results_tx.send((result.type_error_count(), lint_errors));
        });
    // The second lint pass appends a lint error to a.ts before returning
    let mut orchestrator = Orchestrator::new(
        options,
        StaticVcs::default(),
        MarkerChecker::default(),
        MidRunEditLinter::editing_on_call(2),
    );
    let stop = orchestrator.stop_handle();

    let watcher = thread::spawn(move || {
        orchestrator.watch(|_| {}).unwrap();
    });

    assert_eq!(results_rx.recv_timeout(RUN_TIMEOUT).expect("initial run"), (2, 0));

    thread::sleep(Duration::from_millis(300));
    std::fs::write(&file, source_with(TYPE_ERROR, 0)).unwrap();

    assert_eq!(results_rx.recv_timeout(RUN_TIMEOUT).expect("re-run after save"), (0, 0));
    assert_eq!(
        results_rx.recv_timeout(RUN_TIMEOUT).expect("run for the mid-run edit"),
        (0, 1)
    );
    assert!(
        results_rx.recv_timeout(Duration::from_secs(1)).is_err(),
        "the mid-run edit should be picked up exactly once"
    );

    stop.stop();
    watcher.join().unwrap();
}

/// SCENARIO: after the guard rejects the scope, old scope files no longer trigger runs
#[test]
fn scenario_guard_failure_releases_previous_scope() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.ts");
    std::fs::write(&file, source_with(TYPE_ERROR, 0)).unwrap();

    let vcs = StaticVcs::with_staged(&["a.ts"]);
    let (results_tx, results_rx) = mpsc::channel();
    let options = OrchestratorOptions::new(dir.path())
        .with_staged_files(true)
        .with_watch_included_files(true)
        .with_debounce(Duration::from_millis(100))
        .on_results(move |result| {
            let _ = results_tx.send(result.is_guard_failure());
        });
    let mut orchestrator = Orchestrator::new(
        options,
        vcs.clone(),
        MarkerChecker::default(),
        MarkerLinter::default(),
    );
    let stop = orchestrator.stop_handle();

    let watcher = thread::spawn(move || {
        orchestrator.watch(|_| {}).unwrap();
    });

    assert!(!results_rx.recv_timeout(RUN_TIMEOUT).expect("initial run"));

    vcs.set_staged(&["a.ts", "b.js"]);
    thread::sleep(Duration::from_millis(300));
    std::fs::write(&file, source_with(TYPE_ERROR, 1)).unwrap();
    assert!(results_rx.recv_timeout(RUN_TIMEOUT).expect("guarded re-run"));

    thread::sleep(Duration::from_millis(300));
    std::fs::write(&file, source_with(TYPE_ERROR, 2)).unwrap();
    assert!(
        results_rx.recv_timeout(Duration::from_secs(1)).is_err(),
        "a file outside the last accepted scope should not be watched"
    );

    stop.stop();
    watcher.join().unwrap();
}
