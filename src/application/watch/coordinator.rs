//! Watch coordinator
//!
//! Narrow wrapper over the filesystem notifier. The subscription can grow
//! and shrink while the notifier keeps running; events from every watched
//! path arrive on one channel and are drained by the caller's thread.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::domain::value_objects::IgnorePatterns;
use crate::error::{RatchetError, RatchetResult};

/// Kind of a filesystem change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FsEventKind {
    Add,
    Change,
    Unlink,
    AddDir,
    UnlinkDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FsEvent {
    pub kind: FsEventKind,
    pub path: PathBuf,
}

impl FsEvent {
    pub fn new(kind: FsEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Translate one notifier event into zero or more `FsEvent`s
///
/// Access and metadata-only events carry no content change and are dropped.
pub fn translate(event: &Event) -> Vec<FsEvent> {
    let each = |kind: FsEventKind| {
        event
            .paths
            .iter()
            .map(|p| FsEvent::new(kind, p.clone()))
            .collect::<Vec<_>>()
    };

    match event.kind {
        EventKind::Create(CreateKind::Folder) => each(FsEventKind::AddDir),
        EventKind::Create(_) => event
            .paths
            .iter()
            .map(|p| {
                let kind = if p.is_dir() {
                    FsEventKind::AddDir
                } else {
                    FsEventKind::Add
                };
                FsEvent::new(kind, p.clone())
            })
            .collect(),
        EventKind::Remove(RemoveKind::Folder) => each(FsEventKind::UnlinkDir),
        EventKind::Remove(_) => each(FsEventKind::Unlink),
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(ModifyKind::Name(mode)) => match mode {
            RenameMode::From => each(FsEventKind::Unlink),
            RenameMode::To => each(FsEventKind::Add),
            RenameMode::Both if event.paths.len() == 2 => vec![
                FsEvent::new(FsEventKind::Unlink, event.paths[0].clone()),
                FsEvent::new(FsEventKind::Add, event.paths[1].clone()),
            ],
            _ => event
                .paths
                .iter()
                .map(|p| {
                    let kind = if p.exists() {
                        FsEventKind::Add
                    } else {
                        FsEventKind::Unlink
                    };
                    FsEvent::new(kind, p.clone())
                })
                .collect(),
        },
        EventKind::Modify(_) => each(FsEventKind::Change),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}

/// Filesystem watch over a live, mutable subscription
pub struct WatchCoordinator {
    watcher: Option<RecommendedWatcher>,
    rx: Option<Receiver<FsEvent>>,
    ignore: IgnorePatterns,
    /// Watched path → whether it was registered recursively
    subscription: BTreeMap<PathBuf, bool>,
}

impl Default for WatchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchCoordinator {
    /// An unstarted coordinator; call `init` before watching anything
    pub fn new() -> Self {
        Self {
            watcher: None,
            rx: None,
            ignore: IgnorePatterns::empty(),
            subscription: BTreeMap::new(),
        }
    }

    /// Start the notifier with an empty subscription
    pub fn init(&mut self, ignore: IgnorePatterns) -> RatchetResult<()> {
        let (tx, rx) = channel();
        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    for fs_event in translate(&event) {
                        let _ = tx.send(fs_event);
                    }
                }
                Err(e) => warn!(error = %e, "watch backend error"),
            },
            Config::default(),
        )?;

        self.watcher = Some(watcher);
        self.rx = Some(rx);
        self.ignore = ignore;
        self.subscription.clear();
        debug!(patterns = self.ignore.pattern_count(), "watcher started");
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.watcher.is_some()
    }

    /// Add paths to the subscription
    ///
    /// Directories are watched recursively, files individually. Paths that
    /// do not exist are skipped with a warning; already watched paths are
    /// left alone.
    pub fn watch_files(&mut self, paths: &[PathBuf]) -> RatchetResult<()> {
        let watcher = self
            .watcher
            .as_mut()
            .ok_or_else(|| RatchetError::Watch("watcher is not running".to_string()))?;

        for path in paths {
            if self.subscription.contains_key(path) {
                continue;
            }
            if !path.exists() {
                warn!(path = %path.display(), "not watching missing path");
                continue;
            }
            let recursive = path.is_dir();
            let mode = if recursive {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher.watch(path, mode)?;
            trace!(path = %path.display(), recursive, "watching");
            self.subscription.insert(path.clone(), recursive);
        }
        Ok(())
    }

    /// Remove paths from the subscription; unknown paths are ignored
    pub fn unwatch_files(&mut self, paths: &[PathBuf]) -> RatchetResult<()> {
        let Some(watcher) = self.watcher.as_mut() else {
            return Ok(());
        };

        for path in paths {
            if self.subscription.remove(path).is_none() {
                continue;
            }
            if let Err(e) = watcher.unwatch(path) {
                // A deleted file has already dropped out of the backend
                debug!(path = %path.display(), error = %e, "unwatch failed");
            }
        }
        Ok(())
    }

    /// Paths currently registered with the notifier
    pub fn subscription(&self) -> Vec<PathBuf> {
        self.subscription.keys().cloned().collect()
    }

    /// Next non-ignored event, waiting at most `timeout`
    ///
    /// Returns `None` on timeout, after `close`, or when the notifier is gone.
    pub fn next_event(&self, timeout: Duration) -> Option<FsEvent> {
        let rx = self.rx.as_ref()?;
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(event) => {
                    if self.is_ignored(&event) {
                        trace!(path = %event.path.display(), "ignored event");
                        continue;
                    }
                    return Some(event);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    /// Next event of one kind; events of other kinds are discarded
    pub fn next_event_of(&self, kind: FsEventKind, timeout: Duration) -> Option<FsEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let event = self.next_event(remaining)?;
            if event.kind == kind {
                return Some(event);
            }
        }
    }

    /// Release the notifier; no events are delivered afterwards
    pub fn close(&mut self) {
        if self.watcher.take().is_some() {
            debug!(paths = self.subscription.len(), "watcher closed");
        }
        self.rx = None;
        self.subscription.clear();
    }

    fn is_ignored(&self, event: &FsEvent) -> bool {
        let is_dir = matches!(event.kind, FsEventKind::AddDir | FsEventKind::UnlinkDir);
        self.ignore.is_ignored(&event.path, is_dir)
    }
}

impl Drop for WatchCoordinator {
    fn drop(&mut self) {
        self.close();
    }
}

/// Path form used to match events against scope files
///
/// Notifier backends may report canonical paths (e.g. `/private/var` on
/// macOS) while the scope is built from the configured root.
pub fn event_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
