// Inbox watching: polls for newly created files and dispatches them FIFO

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use walkdir::WalkDir;

/// Callback invoked once per newly created file. The pipeline implements
/// this; event sourcing stays fully decoupled from business logic.
pub trait FileEventHandler {
    fn on_file_created(&self, path: &Path);
}

/// Polling watcher over one directory tree. Only files that appear after
/// priming are reported; directories are ignored. Files are dispatched one
/// at a time, to completion, in sorted order per scan.
pub struct PollWatcher {
    root: PathBuf,
    interval: Duration,
    seen: HashSet<PathBuf>,
}

impl PollWatcher {
    pub fn new(root: &Path, interval: Duration) -> Self {
        PollWatcher {
            root: root.to_path_buf(),
            interval,
            seen: HashSet::new(),
        }
    }

    /// Record every file currently present without reporting it.
    pub fn prime(&mut self) {
        for path in self.list_files() {
            self.seen.insert(path);
        }
    }

    /// One scan pass: returns files that appeared since the last pass,
    /// sorted by path. Entries that vanished (moved out by the pipeline)
    /// are forgotten so a later re-creation counts as a new event.
    pub fn scan_once(&mut self) -> Vec<PathBuf> {
        self.seen.retain(|p| p.exists());

        let mut created = Vec::new();
        for path in self.list_files() {
            if self.seen.insert(path.clone()) {
                created.push(path);
            }
        }
        created.sort();
        created
    }

    /// Watch until the stop flag is set, dispatching each new file to the
    /// handler before looking at the next.
    pub fn run(&mut self, handler: &dyn FileEventHandler, stop: &AtomicBool) {
        self.prime();
        log::info!("Watching {} for new files", self.root.display());

        while !stop.load(Ordering::SeqCst) {
            for path in self.scan_once() {
                handler.on_file_created(&path);
            }
            thread::sleep(self.interval);
        }

        log::info!("Watcher stopped");
    }

    fn list_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct RecordingHandler {
        seen: Mutex<Vec<PathBuf>>,
    }

    impl FileEventHandler for RecordingHandler {
        fn on_file_created(&self, path: &Path) {
            self.seen.lock().unwrap().push(path.to_path_buf());
        }
    }

    #[test]
    fn test_primed_scan_reports_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("existing.mp4"), b"old").unwrap();

        let mut watcher = PollWatcher::new(tmp.path(), Duration::from_millis(1));
        watcher.prime();
        assert!(watcher.scan_once().is_empty());
    }

    #[test]
    fn test_new_files_reported_once_in_order() {
        let tmp = TempDir::new().unwrap();
        let mut watcher = PollWatcher::new(tmp.path(), Duration::from_millis(1));
        watcher.prime();

        fs::write(tmp.path().join("b.mp4"), b"2").unwrap();
        fs::write(tmp.path().join("a.mp4"), b"1").unwrap();

        let created = watcher.scan_once();
        assert_eq!(
            created,
            vec![tmp.path().join("a.mp4"), tmp.path().join("b.mp4")]
        );

        // Second pass: nothing new
        assert!(watcher.scan_once().is_empty());
    }

    #[test]
    fn test_directories_are_ignored_and_subtrees_scanned() {
        let tmp = TempDir::new().unwrap();
        let mut watcher = PollWatcher::new(tmp.path(), Duration::from_millis(1));
        watcher.prime();

        let subdir = tmp.path().join("card1");
        fs::create_dir_all(&subdir).unwrap();
        fs::write(subdir.join("clip.mov"), b"x").unwrap();

        let created = watcher.scan_once();
        assert_eq!(created, vec![subdir.join("clip.mov")]);
    }

    #[test]
    fn test_vanished_file_can_reappear() {
        let tmp = TempDir::new().unwrap();
        let mut watcher = PollWatcher::new(tmp.path(), Duration::from_millis(1));
        watcher.prime();

        let path = tmp.path().join("a.mp4");
        fs::write(&path, b"first").unwrap();
        assert_eq!(watcher.scan_once().len(), 1);

        // Pipeline moved it away, then an identically named file arrives
        fs::remove_file(&path).unwrap();
        assert!(watcher.scan_once().is_empty());
        fs::write(&path, b"second").unwrap();
        assert_eq!(watcher.scan_once(), vec![path]);
    }

    #[test]
    fn test_handler_dispatch() {
        let tmp = TempDir::new().unwrap();
        let mut watcher = PollWatcher::new(tmp.path(), Duration::from_millis(1));
        watcher.prime();

        fs::write(tmp.path().join("a.mp4"), b"1").unwrap();

        let handler = RecordingHandler {
            seen: Mutex::new(Vec::new()),
        };
        for path in watcher.scan_once() {
            handler.on_file_created(&path);
        }
        assert_eq!(*handler.seen.lock().unwrap(), vec![tmp.path().join("a.mp4")]);
    }
}
