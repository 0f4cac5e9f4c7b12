//! Config file watcher.
//!
//! Watches the directory holding the config file (so atomic saves via
//! rename are seen) and reacts to events for the config file name only.
//! Events are debounced, the file is re-read on the watcher thread, and a
//! successfully parsed config is handed to a [`ReloadSink`]. Reload and
//! watch errors are logged; the previous tray state stays live.

use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::TrayConfig;
use crate::error::WatchError;

/// Default debounce window for editor save bursts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Receives reloaded configurations on behalf of the UI loop.
pub trait ReloadSink: Send + 'static {
    /// Hand over a new config. Returns false once the receiver is gone.
    fn deliver(&self, config: TrayConfig) -> bool;
}

impl ReloadSink for mpsc::Sender<TrayConfig> {
    fn deliver(&self, config: TrayConfig) -> bool {
        self.send(config).is_ok()
    }
}

/// Watch setup for one config file.
#[derive(Debug, Clone)]
pub struct ConfigWatcher {
    path: PathBuf,
    debounce: Duration,
}

/// Keeps the watch alive. Dropping it stops the watcher thread.
pub struct WatchHandle {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    _thread: JoinHandle<()>,
}

impl WatchHandle {
    /// Wait for the watcher thread to finish.
    #[cfg(test)]
    pub fn join(self) {
        drop(self._debouncer);
        let _ = self._thread.join();
    }
}

impl ConfigWatcher {
    pub fn new(path: &Path, debounce: Duration) -> Result<Self, WatchError> {
        let path = std::path::absolute(path).map_err(|source| WatchError::Path {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { path, debounce })
    }

    /// Absolute path of the watched config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Establish the watch and start the reload thread.
    pub fn spawn<S: ReloadSink>(self, sink: S) -> Result<WatchHandle, WatchError> {
        let (file_name, dir) = match (self.path.file_name(), self.path.parent()) {
            (Some(name), Some(dir)) => (name.to_os_string(), dir.to_path_buf()),
            _ => {
                return Err(WatchError::Path {
                    path: self.path.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "config path has no file name",
                    ),
                })
            }
        };

        let (tx, rx) = mpsc::channel::<DebounceEventResult>();

        let mut debouncer =
            new_debouncer(self.debounce, tx).map_err(|source| WatchError::Establish {
                path: self.path.clone(),
                source,
            })?;

        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Establish {
                path: self.path.clone(),
                source,
            })?;

        info!(
            path = %self.path().display(),
            debounce_ms = self.debounce.as_millis() as u64,
            "Watching configuration file"
        );

        let path = self.path;
        let thread = std::thread::spawn(move || run_watch_loop(rx, &path, &file_name, sink));

        Ok(WatchHandle {
            _debouncer: debouncer,
            _thread: thread,
        })
    }
}

fn run_watch_loop<S: ReloadSink>(
    rx: mpsc::Receiver<DebounceEventResult>,
    path: &Path,
    file_name: &OsStr,
    sink: S,
) {
    // Ends when the debouncer is dropped
    for result in rx {
        match result {
            Ok(events) => {
                let touched = events
                    .iter()
                    .any(|event| event.path.file_name() == Some(file_name));

                if !touched {
                    continue;
                }

                info!(path = %path.display(), "Configuration file modified, reloading...");

                match TrayConfig::load(path) {
                    Ok(config) => {
                        debug!(title = %config.title, entries = config.entry_count(), "Configuration reloaded");
                        if !sink.deliver(config) {
                            debug!("Reload receiver closed, stopping watcher");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to reload tray configuration");
                    }
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Filesystem watch error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: Duration = Duration::from_secs(5);
    const QUIET: Duration = Duration::from_millis(1500);

    fn write_config(path: &Path, title: &str) {
        let json = format!(
            r#"{{ "title": "{title}", "items": [ {{ "title": "{title} item", "exec": "true" }} ] }}"#
        );
        std::fs::write(path, json).unwrap();
    }

    fn start(path: &Path) -> (WatchHandle, mpsc::Receiver<TrayConfig>) {
        let (tx, rx) = mpsc::channel();
        let handle = ConfigWatcher::new(path, Duration::from_millis(100))
            .unwrap()
            .spawn(tx)
            .unwrap();
        // Let the backend settle before the first write
        std::thread::sleep(Duration::from_millis(200));
        (handle, rx)
    }

    #[test]
    fn test_new_makes_path_absolute() {
        let watcher = ConfigWatcher::new(Path::new("tray.json"), DEFAULT_DEBOUNCE).unwrap();
        assert!(watcher.path().is_absolute());
        assert!(watcher.path().ends_with("tray.json"));
    }

    #[test]
    fn test_reload_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");
        write_config(&path, "first");

        let (handle, rx) = start(&path);

        write_config(&path, "second");
        let config = rx.recv_timeout(WAIT).expect("no reload after write");
        assert_eq!(config.title, "second");
        assert_eq!(config.items[0].title, "second item");

        handle.join();
    }

    #[test]
    fn test_reload_on_replace_by_rename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");
        write_config(&path, "first");

        let (handle, rx) = start(&path);

        let staged = dir.path().join("tray.json.tmp");
        write_config(&staged, "renamed");
        std::fs::rename(&staged, &path).unwrap();

        let config = loop {
            let config = rx.recv_timeout(WAIT).expect("no reload after rename");
            if config.title == "renamed" {
                break config;
            }
        };
        assert_eq!(config.items.len(), 1);

        handle.join();
    }

    #[test]
    fn test_invalid_config_keeps_watching() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");
        write_config(&path, "first");

        let (handle, rx) = start(&path);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(rx.recv_timeout(QUIET).is_err(), "invalid config was delivered");

        write_config(&path, "fixed");
        let config = rx.recv_timeout(WAIT).expect("watcher stopped after bad config");
        assert_eq!(config.title, "fixed");

        handle.join();
    }

    #[test]
    fn test_other_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");
        write_config(&path, "first");

        let (handle, rx) = start(&path);

        write_config(&dir.path().join("other.json"), "other");
        assert!(rx.recv_timeout(QUIET).is_err());

        handle.join();
    }

    #[test]
    fn test_stops_when_sink_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.json");
        write_config(&path, "first");

        let (handle, rx) = start(&path);
        drop(rx);

        write_config(&path, "second");
        // Thread exits on the failed delivery; join must not hang
        handle.join();
    }
}
