//! Orchestrator implementation

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::application::engine::{CheckOutcome, IncrementalCheckEngine};
use crate::application::lint::{LintAdapter, LintOutcome};
use crate::application::resolver::ChangeSetResolver;
use crate::application::watch::{event_key, Debouncer, FsEvent, FsEventKind, WatchCoordinator, WatchEvent};
use crate::domain::ports::{LintEngine, ProgramHandle, TypeChecker, VersionControl};
use crate::domain::services::ExtensionGuard;
use crate::domain::value_objects::{normalize_root, ContentHash, IgnorePatterns, RepoPath, SourceKind};
use crate::error::RatchetResult;

use super::options::{OrchestratorOptions, ResultCallback};
use super::result::{RunResult, ScopePreview};

/// How long one poll of the event channel may block
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Ends a watch loop from another thread (e.g. a Ctrl+C handler)
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Resolve, guard, lint, check, and restage; once or on every change
///
/// `run` takes `&mut self`, so runs never overlap: events that arrive while
/// a run is in flight wait in the channel and become one follow-up trigger.
pub struct Orchestrator<V, C, L>
where
    V: VersionControl,
    C: TypeChecker,
    L: LintEngine,
{
    root: PathBuf,
    options: OrchestratorOptions,
    on_results: Option<ResultCallback>,
    vcs: V,
    engine: IncrementalCheckEngine<C>,
    linter: LintAdapter<L>,
    coordinator: WatchCoordinator,
    /// Absolute scope files of the last run (file-level watch set)
    targets: Vec<PathBuf>,
    /// Scope files as event keys, for re-filtering directory events
    scope_keys: HashSet<PathBuf>,
    /// Content of each scope file when the last run started
    fingerprints: HashMap<PathBuf, ContentHash>,
    /// Scope files edited while a run was in flight, not yet queued
    pending: Vec<PathBuf>,
    running: Arc<AtomicBool>,
}

impl<V, C, L> Orchestrator<V, C, L>
where
    V: VersionControl,
    C: TypeChecker,
    L: LintEngine,
{
    pub fn new(mut options: OrchestratorOptions, vcs: V, checker: C, linter: L) -> Self {
        let root = normalize_root(&options.repo_path);

        // Scope paths are compared repo-relative
        options.extra_files = options.extra_files.iter().map(|p| p.relative_to(&root)).collect();
        options.exclude_files = options.exclude_files.iter().map(|p| p.relative_to(&root)).collect();

        let engine = IncrementalCheckEngine::new(checker, options.type_checker_config.clone(), &root);
        let linter = LintAdapter::new(linter, options.lint_config.clone())
            .with_type_aware(options.type_aware_lint);

        Self {
            on_results: options.on_results.take(),
            root,
            options,
            vcs,
            engine,
            linter,
            coordinator: WatchCoordinator::new(),
            targets: Vec::new(),
            scope_keys: HashSet::new(),
            fingerprints: HashMap::new(),
            pending: Vec::new(),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn options(&self) -> &OrchestratorOptions {
        &self.options
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn engine(&self) -> &IncrementalCheckEngine<C> {
        &self.engine
    }

    pub fn linter(&self) -> &LintAdapter<L> {
        &self.linter
    }

    /// Paths currently registered with the watcher
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        self.coordinator.subscription()
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    /// Tear down watching; a watch loop exits before its next trigger
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.coordinator.close();
        info!("watch stopped");
    }

    /// Resolve the scope and run the guard, without compiling or linting
    pub fn preview(&self) -> RatchetResult<ScopePreview> {
        let branch = self.vcs.current_branch()?;
        let sources = self.options.change_sources(&branch);
        let resolved = ChangeSetResolver::new(&self.vcs).resolve(&sources, &self.options.exclude_files)?;
        let guard = ExtensionGuard::check(resolved.scope.as_slice());
        let checkable = resolved
            .scope
            .iter()
            .filter(|p| SourceKind::is_checkable(p))
            .cloned()
            .collect();
        Ok(ScopePreview {
            branch,
            sources: sources.iter().map(|s| s.label().to_string()).collect(),
            candidates: resolved.scope.into_vec(),
            checkable,
            guard,
        })
    }

    /// One full pass over the current scope
    ///
    /// Version-control and tool failures abort with an error; a rejected or
    /// empty scope is a result, not an error.
    pub fn run(&mut self) -> RatchetResult<RunResult> {
        let started = Instant::now();
        let branch = self.vcs.current_branch()?;
        let sources = self.options.change_sources(&branch);
        let resolved = ChangeSetResolver::new(&self.vcs).resolve(&sources, &self.options.exclude_files)?;

        let guard = ExtensionGuard::check(resolved.scope.as_slice());
        if !guard.success {
            for violation in &guard.violations {
                warn!(file = %violation.file, "{}", violation.reason);
            }
            self.forget_scope();
            return Ok(self.finish(RunResult::guard_failed(branch, guard), started));
        }

        let scope_files: Vec<RepoPath> = resolved
            .scope
            .iter()
            .filter(|p| SourceKind::is_checkable(p))
            .cloned()
            .collect();
        if scope_files.is_empty() {
            debug!(candidates = resolved.scope.len(), "nothing to check");
            self.forget_scope();
            return Ok(self.finish(RunResult::empty(branch, guard), started));
        }

        let files: Vec<PathBuf> = scope_files.iter().map(|p| p.join_to(&self.root)).collect();
        self.snapshot(&files);

        let program = self.engine.create_program(&files)?;

        let outcomes = if self.options.watch_included_files {
            let previous = std::mem::take(&mut self.targets);
            self.unwatch_targets(&previous);
            let outcomes = self.lint_and_check(&files, program.as_ref());
            self.watch_targets(&files);
            outcomes
        } else {
            self.lint_and_check(&files, program.as_ref())
        };
        self.requeue_mid_run_edits(&files);
        self.targets = files;
        let (lint, check) = outcomes?;

        let mut warnings = Vec::new();
        if self.options.include_staged_files && !resolved.staged.is_empty() {
            if let Err(e) = self.vcs.stage(&resolved.staged) {
                warn!(error = %e, files = resolved.staged.len(), "could not restage files");
                warnings.push(format!("could not restage files: {}", e));
            }
        }

        let result = RunResult::checked(branch, scope_files, guard, lint, check)
            .with_staging(resolved.staged, warnings);
        Ok(self.finish(result, started))
    }

    /// Block until stopped: run once, then re-run on every debounced change
    ///
    /// A run that fails is reported as an `Error` event and the loop keeps
    /// watching.
    pub fn watch<F>(&mut self, mut on_event: F) -> RatchetResult<()>
    where
        F: FnMut(WatchEvent),
    {
        if !self.coordinator.is_active() {
            let ignore = IgnorePatterns::from_patterns(&self.root, &self.options.ignore_files_from_watch)?;
            self.coordinator.init(ignore)?;
        }

        let dirs: Vec<PathBuf> = self
            .options
            .watch_files
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { self.root.join(p) })
            .collect();
        self.coordinator.watch_files(&dirs)?;

        on_event(WatchEvent::WatchStarted {
            root: self.root.display().to_string(),
            watching: self.display_paths(&self.coordinator.subscription()),
            debounce_ms: self.options.debounce.as_millis() as u64,
        });
        info!(root = %self.root.display(), "watching for changes");

        let mut debouncer = Debouncer::new(self.options.debounce);
        self.run_and_report(&mut on_event);
        self.drain_pending(&mut debouncer);

        while self.running.load(Ordering::SeqCst) {
            if let Some(event) = self.coordinator.next_event(POLL_INTERVAL) {
                if let Some(path) = self.accept_event(&event) {
                    debug!(kind = ?event.kind, path = %path.display(), "change queued");
                    debouncer.add_change(path);
                }
            }

            if debouncer.should_fire() {
                let changes = debouncer.take_changes();
                info!(files = changes.len(), "changes detected, re-running");
                on_event(WatchEvent::FilesChanged {
                    paths: self.display_paths(&changes),
                });
                self.run_and_report(&mut on_event);
                self.drain_pending(&mut debouncer);
            }
        }

        self.coordinator.close();
        on_event(WatchEvent::Shutdown);
        Ok(())
    }

    fn run_and_report<F>(&mut self, on_event: &mut F)
    where
        F: FnMut(WatchEvent),
    {
        match self.run() {
            Ok(result) => on_event(WatchEvent::run_complete(&result)),
            Err(e) => {
                error!(error = %e, "run failed");
                on_event(WatchEvent::Error {
                    message: e.to_string(),
                });
            }
        }
    }

    fn lint_and_check(
        &mut self,
        files: &[PathBuf],
        program: Option<&ProgramHandle>,
    ) -> RatchetResult<(LintOutcome, CheckOutcome)> {
        let lint = self.linter.lint(files, program)?;
        let check = self.engine.check()?;
        Ok((lint, check))
    }

    fn finish(&mut self, result: RunResult, started: Instant) -> RunResult {
        info!(
            branch = %result.branch,
            files = result.scope_files.len(),
            success = result.success,
            lint_success = result.lint_success,
            check_success = result.check_success,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run complete"
        );
        if let Some(callback) = self.on_results.as_mut() {
            callback(&result);
        }
        result
    }

    /// Record scope membership and file contents as of run start
    ///
    /// Edits made while the run is in flight differ from this snapshot and
    /// therefore still trigger a follow-up run.
    fn snapshot(&mut self, files: &[PathBuf]) {
        if !self.coordinator.is_active() {
            return;
        }
        self.scope_keys = files.iter().map(|f| event_key(f)).collect();
        self.fingerprints = files
            .iter()
            .filter_map(|f| {
                let key = event_key(f);
                ContentHash::of_file(&key).map(|hash| (key, hash))
            })
            .collect();
    }

    /// Queue scope files whose content moved on since `snapshot`
    ///
    /// Scope files are unwatched while the tools run, so a save in that
    /// window produces no event.
    fn requeue_mid_run_edits(&mut self, files: &[PathBuf]) {
        if !self.coordinator.is_active() {
            return;
        }
        for file in files {
            let key = event_key(file);
            let current = ContentHash::of_file(&key);
            if current.as_ref() == self.fingerprints.get(&key) {
                continue;
            }
            match current {
                Some(hash) => {
                    self.fingerprints.insert(key.clone(), hash);
                }
                None => {
                    self.fingerprints.remove(&key);
                }
            }
            debug!(path = %key.display(), "edited during run");
            self.pending.push(key);
        }
    }

    fn drain_pending(&mut self, debouncer: &mut Debouncer) {
        for path in self.pending.drain(..) {
            debouncer.add_change(path);
        }
    }

    /// Drop the previous scope from the watch set and event filters
    fn forget_scope(&mut self) {
        let previous = std::mem::take(&mut self.targets);
        if !previous.is_empty() {
            self.unwatch_targets(&previous);
        }
        self.scope_keys.clear();
        self.fingerprints.clear();
    }

    fn unwatch_targets(&mut self, previous: &[PathBuf]) {
        if let Err(e) = self.coordinator.unwatch_files(previous) {
            warn!(error = %e, "could not unwatch previous scope");
        }
    }

    fn watch_targets(&mut self, files: &[PathBuf]) {
        if !self.coordinator.is_active() {
            return;
        }
        if let Err(e) = self.coordinator.watch_files(files) {
            warn!(error = %e, "could not watch scope files");
        }
    }

    /// Decide whether an event should (eventually) trigger a run
    ///
    /// Changes to files outside the last scope only matter when working-tree
    /// changes feed the scope. Events whose content matches the snapshot are
    /// dropped.
    fn accept_event(&mut self, event: &FsEvent) -> Option<PathBuf> {
        let key = event_key(&event.path);
        let in_scope = self.scope_keys.contains(&key);

        match event.kind {
            FsEventKind::AddDir | FsEventKind::UnlinkDir => None,
            FsEventKind::Unlink => {
                if in_scope {
                    self.fingerprints.remove(&key);
                    Some(key)
                } else {
                    None
                }
            }
            FsEventKind::Add | FsEventKind::Change => {
                let repo_path = RepoPath::from_path(&key);
                if SourceKind::of(&repo_path) == SourceKind::Other
                    || SourceKind::is_vendored(&repo_path)
                {
                    return None;
                }
                if !in_scope && !self.options.include_unstaged_files {
                    return None;
                }
                let hash = ContentHash::of_file(&key)?;
                if self.fingerprints.get(&key) == Some(&hash) {
                    return None;
                }
                self.fingerprints.insert(key.clone(), hash);
                Some(key)
            }
        }
    }

    fn display_paths(&self, paths: &[PathBuf]) -> Vec<String> {
        let canonical_root = event_key(&self.root);
        paths
            .iter()
            .map(|p| {
                let relative = RepoPath::from_path(p).relative_to(&canonical_root);
                if relative.is_absolute() {
                    RepoPath::from_path(p).relative_to(&self.root).to_string()
                } else {
                    relative.to_string()
                }
            })
            .collect()
    }
}
