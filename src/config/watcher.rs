// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot-reloading the scale catalog.
//!
//! Modifications are debounced, then the changed catalog is loaded and
//! validated on the watcher thread. Consumers poll for [`CatalogEvent`]s.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::debug;

use super::PatternFile;

/// Events emitted by the catalog watcher
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// Catalog file was modified and successfully reloaded
    Reloaded(Box<PatternFile>),
    /// Catalog file was modified but failed to load or validate
    Error(String),
    /// A new file was created in the watch directory
    FileCreated(PathBuf),
    /// A file was deleted from the watch directory
    FileDeleted(PathBuf),
}

/// Catalog file watcher with debouncing and validation
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<CatalogEvent>,
    watched_path: PathBuf,
}

fn is_catalog_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "json" || ext == "yaml" || ext == "yml")
}

fn load_event(path: &Path) -> CatalogEvent {
    match PatternFile::load(path) {
        Ok(catalog) => CatalogEvent::Reloaded(Box::new(catalog)),
        Err(e) => CatalogEvent::Error(format!("Failed to load {:?}: {:#}", path, e)),
    }
}

impl CatalogWatcher {
    /// Create a new catalog watcher for a file or directory
    ///
    /// # Arguments
    /// * `path` - Path to watch (file or directory)
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        let (event_tx, event_rx): (Sender<CatalogEvent>, Receiver<CatalogEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        let mode = if watched_path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&watched_path, mode)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", watched_path, e))?;

        let target = watched_path.clone();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;
            let mut pending_paths: Vec<PathBuf> = Vec::new();

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => {
                        debug!(kind = ?event.kind, paths = ?event.paths, "catalog watcher event");
                        match event.kind {
                            EventKind::Create(_) => {
                                for path in event.paths {
                                    let _ = event_tx.send(CatalogEvent::FileCreated(path));
                                }
                            }
                            EventKind::Remove(_) => {
                                for path in event.paths {
                                    let _ = event_tx.send(CatalogEvent::FileDeleted(path));
                                }
                            }
                            EventKind::Modify(_) => {
                                for path in event.paths {
                                    if !pending_paths.contains(&path) {
                                        pending_paths.push(path);
                                    }
                                }
                                last_event_time = Some(Instant::now());
                            }
                            _ => {}
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        let settled = last_event_time
                            .is_some_and(|last| last.elapsed() >= debounce_duration);
                        if settled {
                            for path in pending_paths.drain(..) {
                                if is_catalog_file(&path) || path == target {
                                    let _ = event_tx.send(load_event(&path));
                                }
                            }
                            last_event_time = None;
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // Watcher was dropped
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next catalog event (non-blocking)
    pub fn try_recv(&self) -> Option<CatalogEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending catalog events
    pub fn recv_all(&self) -> Vec<CatalogEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Block until the next catalog event is received
    pub fn recv(&self) -> Option<CatalogEvent> {
        self.event_receiver.recv().ok()
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}
