use crate::graph::ReferenceGraph;
use crate::{Analyzer, Error};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;

/// Result of re-reading the watched file
#[derive(Debug)]
pub enum WatchOutcome<'a> {
    /// Contents changed and parsed; the new graph replaces the previous one
    Updated(&'a ReferenceGraph),
    /// Same contents as the last successful run
    Unchanged,
    /// Contents changed but could not be analyzed; the previous graph is kept
    Failed(Error),
}

/// Re-analyzes a single source file whenever it changes on disk.
pub struct Watcher {
    path: PathBuf,
    analyzer: Analyzer,
    last_hash: Option<blake3::Hash>,
    last_graph: Option<ReferenceGraph>,
}

impl Watcher {
    pub fn new(path: PathBuf, analyzer: Analyzer) -> Self {
        Self {
            path,
            analyzer,
            last_hash: None,
            last_graph: None,
        }
    }

    /// Graph from the most recent successful analysis
    pub fn current(&self) -> Option<&ReferenceGraph> {
        self.last_graph.as_ref()
    }

    /// Read the file and rebuild the graph if its contents changed
    pub fn process(&mut self) -> WatchOutcome<'_> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => return WatchOutcome::Failed(e.into()),
        };

        let hash = blake3::hash(content.as_bytes());
        if self.last_hash == Some(hash) {
            return WatchOutcome::Unchanged;
        }

        match self.analyzer.analyze(&content) {
            Ok(graph) => {
                tracing::debug!("Rebuilt graph for {}", self.path.display());
                self.last_hash = Some(hash);
                WatchOutcome::Updated(self.last_graph.insert(graph))
            }
            Err(e) => {
                tracing::warn!("Keeping previous graph for {}: {}", self.path.display(), e);
                WatchOutcome::Failed(e)
            }
        }
    }

    /// Process once, then again on every modification until the channel closes
    pub fn run<F>(&mut self, mut on_change: F) -> anyhow::Result<()>
    where
        F: FnMut(&Path, WatchOutcome<'_>),
    {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        let path = self.path.clone();
        on_change(&path, self.process());

        for res in rx {
            match res {
                Ok(event) => {
                    use notify::EventKind;
                    if matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                        match self.process() {
                            WatchOutcome::Unchanged => {}
                            outcome => on_change(&path, outcome),
                        }
                    }
                }
                Err(e) => tracing::error!("watch error: {:?}", e),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildOptions;

    fn watcher_for(path: PathBuf) -> Watcher {
        Watcher::new(path, Analyzer::new(BuildOptions::default()).unwrap())
    }

    #[test]
    fn test_process_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.js");
        std::fs::write(&path, "var a = 1").unwrap();

        let mut watcher = watcher_for(path.clone());
        match watcher.process() {
            WatchOutcome::Updated(graph) => assert_eq!(graph.edges().len(), 1),
            other => panic!("expected update, got {:?}", other),
        }
        assert!(matches!(watcher.process(), WatchOutcome::Unchanged));

        std::fs::write(&path, "var a = 1\nvar b = a").unwrap();
        match watcher.process() {
            WatchOutcome::Updated(graph) => assert_eq!(graph.edges().len(), 3),
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_failure_keeps_previous_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.js");
        std::fs::write(&path, "var a = 1").unwrap();

        let mut watcher = watcher_for(path.clone());
        assert!(matches!(watcher.process(), WatchOutcome::Updated(_)));

        std::fs::write(&path, "var a = ;").unwrap();
        assert!(matches!(watcher.process(), WatchOutcome::Failed(Error::Parse(_))));
        assert_eq!(watcher.current().map(|g| g.edges().len()), Some(1));

        // Broken contents are retried on the next pass rather than cached
        assert!(matches!(watcher.process(), WatchOutcome::Failed(_)));
    }

    #[test]
    fn test_missing_file_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = watcher_for(dir.path().join("absent.js"));
        assert!(matches!(watcher.process(), WatchOutcome::Failed(Error::Io(_))));
        assert!(watcher.current().is_none());
    }
}
