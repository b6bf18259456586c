//! Watch mode: keep the generated module in sync with the asset root.
//!
//! File system events and the stop signal share one channel. The loop runs
//! the whole pipeline once at startup, then again whenever a burst of
//! qualifying events has settled. Runs never overlap; changes seen while a
//! run is in flight schedule exactly one follow-up run.

mod debouncer;
mod gate;

use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use walkdir::WalkDir;

use crate::config::Config;
use crate::discovery::{extension_of, is_supported_asset};
use crate::error::{AssetsGenError, Result};
use crate::output::{display_path, Logger};
use crate::pipeline::generate;

pub use debouncer::{Debouncer, DEBOUNCE_MS};
pub use gate::{RunGate, RunState};

/// Message delivered to the watch loop.
#[derive(Debug)]
pub enum WatchMessage {
    Fs(notify::Result<Event>),
    Stop,
}

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Kind of change a qualifying event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Renamed,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Renamed => "renamed",
        }
    }
}

/// Classify an event.
///
/// Additions, removals and renames of files with a supported extension
/// qualify. A directory arriving with assets inside qualifies too, and so
/// does an extensionless path leaving, since it may have been a directory.
/// Content edits never qualify.
pub fn classify(event: &Event) -> Option<ChangeKind> {
    let kind = match event.kind {
        EventKind::Create(_) => ChangeKind::Added,
        EventKind::Remove(_) => ChangeKind::Removed,
        EventKind::Modify(ModifyKind::Name(_)) => ChangeKind::Renamed,
        _ => return None,
    };

    let relevant = event.paths.iter().any(|path| {
        if path.is_dir() {
            return kind != ChangeKind::Removed && contains_assets(path);
        }
        let may_be_directory = kind != ChangeKind::Added && extension_of(path).is_none();
        is_supported_asset(path) || may_be_directory
    });

    relevant.then_some(kind)
}

fn contains_assets(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_type().is_file() && is_supported_asset(entry.path()))
}

/// Drives regeneration from a stream of [`WatchMessage`]s.
pub struct WatchCoordinator<F>
where
    F: FnMut() -> Result<()>,
{
    regenerate: F,
    gate: RunGate,
    debouncer: Debouncer,
    runs: usize,
}

impl<F> WatchCoordinator<F>
where
    F: FnMut() -> Result<()>,
{
    pub fn new(regenerate: F) -> Self {
        Self {
            regenerate,
            gate: RunGate::new(),
            debouncer: Debouncer::default(),
            runs: 0,
        }
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debouncer = Debouncer::new(window);
        self
    }

    /// Number of pipeline runs attempted so far.
    pub fn run_count(&self) -> usize {
        self.runs
    }

    pub fn state(&self) -> RunState {
        self.gate.state()
    }

    /// Run until a stop message arrives or every sender is gone.
    pub fn run(&mut self, rx: &Receiver<WatchMessage>, logger: &dyn Logger) {
        if self.gate.request() && self.cycle(rx, logger) == Flow::Stop {
            return;
        }

        loop {
            let message = match rx.recv() {
                Ok(message) => message,
                Err(_) => return,
            };

            match message {
                WatchMessage::Stop => return,
                WatchMessage::Fs(Err(err)) => {
                    logger.error(&format!("Watcher error: {}", err));
                }
                WatchMessage::Fs(Ok(event)) => {
                    if !self.qualifies(&event, logger) {
                        continue;
                    }
                    if self.settle(rx, logger) == Flow::Stop {
                        return;
                    }
                    if self.gate.request() && self.cycle(rx, logger) == Flow::Stop {
                        return;
                    }
                }
            }
        }
    }

    /// Run the pipeline, then keep running while follow-ups are owed.
    fn cycle(&mut self, rx: &Receiver<WatchMessage>, logger: &dyn Logger) -> Flow {
        loop {
            self.attempt(logger);

            if self.drain(rx, logger) == Flow::Stop {
                return Flow::Stop;
            }

            if !self.gate.finish() {
                return Flow::Continue;
            }

            logger.debug("Changes arrived during regeneration, running again");
            if self.settle(rx, logger) == Flow::Stop {
                return Flow::Stop;
            }
        }
    }

    fn attempt(&mut self, logger: &dyn Logger) {
        self.runs += 1;
        if let Err(err) = (self.regenerate)() {
            logger.error(&format!("Failed to regenerate: {}", err));
        }
    }

    /// Collect everything that queued up during a run without blocking.
    fn drain(&mut self, rx: &Receiver<WatchMessage>, logger: &dyn Logger) -> Flow {
        loop {
            match rx.try_recv() {
                Ok(WatchMessage::Stop) | Err(TryRecvError::Disconnected) => return Flow::Stop,
                Ok(WatchMessage::Fs(Err(err))) => {
                    logger.error(&format!("Watcher error: {}", err));
                }
                Ok(WatchMessage::Fs(Ok(event))) => {
                    if self.qualifies(&event, logger) {
                        self.gate.request();
                        self.debouncer.note(Instant::now());
                    }
                }
                Err(TryRecvError::Empty) => return Flow::Continue,
            }
        }
    }

    /// Wait until no event has arrived for a full debounce window.
    fn settle(&mut self, rx: &Receiver<WatchMessage>, logger: &dyn Logger) -> Flow {
        self.debouncer.note(Instant::now());

        while let Some(remaining) = self.debouncer.remaining(Instant::now()) {
            match rx.recv_timeout(remaining) {
                Ok(WatchMessage::Stop) | Err(RecvTimeoutError::Disconnected) => return Flow::Stop,
                Ok(WatchMessage::Fs(Err(err))) => {
                    logger.error(&format!("Watcher error: {}", err));
                }
                Ok(WatchMessage::Fs(Ok(event))) => {
                    self.qualifies(&event, logger);
                    self.debouncer.note(Instant::now());
                }
                Err(RecvTimeoutError::Timeout) => break,
            }
        }

        self.debouncer.reset();
        Flow::Continue
    }

    fn qualifies(&self, event: &Event, logger: &dyn Logger) -> bool {
        match classify(event) {
            Some(kind) => {
                for path in &event.paths {
                    logger.info(&format!("Asset {}: {}", kind.label(), display_path(path)));
                }
                true
            }
            None => false,
        }
    }
}

/// Watch the configured asset root and regenerate until Ctrl+C.
pub fn watch(config: &Config, project_root: &Path, logger: &dyn Logger) -> Result<()> {
    let assets_path = config.assets_path(project_root);

    if !assets_path.exists() {
        std::fs::create_dir_all(&assets_path)
            .map_err(|e| AssetsGenError::io(&assets_path, "Failed to create assets directory", e))?;
        logger.info(&format!("Created assets directory: {}", config.assets_dir));
    }

    let (tx, rx) = mpsc::channel();

    let fs_tx = tx.clone();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.send(WatchMessage::Fs(res));
        },
        notify::Config::default(),
    )
    .map_err(|e| AssetsGenError::Watch {
        message: format!("Failed to start file watcher: {}", e),
        help: None,
    })?;

    watcher
        .watch(&assets_path, RecursiveMode::Recursive)
        .map_err(|e| AssetsGenError::Watch {
            message: format!("Failed to watch {}: {}", assets_path.display(), e),
            help: Some("Check that the assets directory is readable".to_string()),
        })?;

    ctrlc::set_handler(move || {
        let _ = tx.send(WatchMessage::Stop);
    })
    .map_err(|e| AssetsGenError::Watch {
        message: format!("Failed to set Ctrl+C handler: {}", e),
        help: None,
    })?;

    logger.info(&format!("Watching for changes in: {}", config.assets_dir));
    logger.info("Press Ctrl+C to stop");

    let mut coordinator = WatchCoordinator::new(|| generate(config, project_root, logger).map(|_| ()));
    coordinator.run(&rx, logger);

    logger.info("Stopping watcher...");
    drop(watcher);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{Level, MemoryLogger};
    use crate::config::Config;
    use notify::event::{CreateKind, DataChange, RemoveKind, RenameMode};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use std::sync::mpsc::Sender;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    fn added(path: &str) -> WatchMessage {
        WatchMessage::Fs(Ok(event(EventKind::Create(CreateKind::File), path)))
    }

    fn send_all(tx: &Sender<WatchMessage>, messages: Vec<WatchMessage>) {
        for message in messages {
            tx.send(message).unwrap();
        }
    }

    #[test]
    fn test_classify_events() {
        assert_eq!(
            classify(&event(EventKind::Create(CreateKind::File), "/a/logo.png")),
            Some(ChangeKind::Added)
        );
        assert_eq!(
            classify(&event(EventKind::Remove(RemoveKind::File), "/a/icon.SVG")),
            Some(ChangeKind::Removed)
        );
        assert_eq!(
            classify(&event(
                EventKind::Modify(ModifyKind::Name(RenameMode::Any)),
                "/a/font.woff2"
            )),
            Some(ChangeKind::Renamed)
        );
    }

    #[test]
    fn test_classify_ignores_irrelevant_events() {
        assert_eq!(
            classify(&event(EventKind::Create(CreateKind::File), "/a/notes.txt")),
            None
        );
        assert_eq!(
            classify(&event(EventKind::Create(CreateKind::Folder), "/a/icons")),
            None
        );
        assert_eq!(
            classify(&event(
                EventKind::Modify(ModifyKind::Data(DataChange::Content)),
                "/a/logo.png"
            )),
            None
        );
        assert_eq!(classify(&event(EventKind::Any, "/a/logo.png")), None);
    }

    #[test]
    fn test_classify_directory_moves() {
        let dir = tempdir().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir_all(&icons).unwrap();
        fs::write(icons.join("a.png"), b"png").unwrap();
        fs::write(icons.join("b.svg"), b"<svg/>").unwrap();
        let empty = dir.path().join("empty");
        fs::create_dir_all(&empty).unwrap();

        let moved_in = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path(icons.clone());
        assert_eq!(classify(&moved_in), Some(ChangeKind::Renamed));

        let created = Event::new(EventKind::Create(CreateKind::Folder)).add_path(icons);
        assert_eq!(classify(&created), Some(ChangeKind::Added));

        let created_empty = Event::new(EventKind::Create(CreateKind::Folder)).add_path(empty);
        assert_eq!(classify(&created_empty), None);

        let moved_out = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
            .add_path(dir.path().join("gone"));
        assert_eq!(classify(&moved_out), Some(ChangeKind::Renamed));

        assert_eq!(
            classify(&event(EventKind::Remove(RemoveKind::Folder), "/a/old-icons")),
            Some(ChangeKind::Removed)
        );
        assert_eq!(
            classify(&event(EventKind::Remove(RemoveKind::File), "/a/notes.txt")),
            None
        );
    }

    #[test]
    fn test_directory_moved_into_root_regenerates() {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let staging = root.join("staging/icons");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(staging.join("a.png"), b"png").unwrap();
        fs::write(staging.join("b.svg"), b"<svg/>").unwrap();

        let config = Config::default();
        let (tx, rx) = mpsc::channel();
        let run_tx = tx.clone();
        let logger = MemoryLogger::new();
        let mut calls = 0;

        let mut coordinator = WatchCoordinator::new(|| {
            calls += 1;
            generate(&config, &root, &logger)?;
            if calls == 1 {
                let target = root.join("assets/icons");
                fs::rename(&staging, &target).unwrap();
                let moved = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
                    .add_path(target);
                send_all(&run_tx, vec![WatchMessage::Fs(Ok(moved))]);
            } else {
                send_all(&run_tx, vec![WatchMessage::Stop]);
            }
            Ok(())
        })
        .with_debounce(Duration::from_millis(5));

        coordinator.run(&rx, &logger);

        assert_eq!(coordinator.run_count(), 2);
        let content = fs::read_to_string(config.output_path(&root)).unwrap();
        assert!(content.contains("icons: {"));
        assert!(content.contains("a: '/assets/icons/a.png',"));
        drop(tx);
    }

    #[test]
    fn test_startup_run_happens_without_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(WatchMessage::Stop).unwrap();
        let logger = MemoryLogger::new();

        let mut coordinator = WatchCoordinator::new(|| Ok(())).with_debounce(Duration::from_millis(5));
        coordinator.run(&rx, &logger);

        assert_eq!(coordinator.run_count(), 1);
    }

    #[test]
    fn test_events_during_run_trigger_single_follow_up() {
        let (tx, rx) = mpsc::channel();
        let run_tx = tx.clone();
        let logger = MemoryLogger::new();
        let mut calls = 0;

        let mut coordinator = WatchCoordinator::new(move || {
            calls += 1;
            match calls {
                1 => send_all(
                    &run_tx,
                    vec![added("/a/one.png"), added("/a/two.png"), added("/a/three.png")],
                ),
                _ => send_all(&run_tx, vec![WatchMessage::Stop]),
            }
            Ok(())
        })
        .with_debounce(Duration::from_millis(5));

        coordinator.run(&rx, &logger);

        assert_eq!(coordinator.run_count(), 2);
        assert_eq!(logger.messages(Level::Info).len(), 3);
        drop(tx);
    }

    #[test]
    fn test_burst_while_idle_triggers_one_run() {
        let (tx, rx) = mpsc::channel();
        let run_tx = tx.clone();
        let logger = MemoryLogger::new();
        let mut calls = 0;

        let mut coordinator = WatchCoordinator::new(move || {
            calls += 1;
            match calls {
                // Startup run: a burst lands after the run completes.
                1 => {}
                _ => send_all(&run_tx, vec![WatchMessage::Stop]),
            }
            Ok(())
        })
        .with_debounce(Duration::from_millis(20));

        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            send_all(
                &tx,
                vec![added("/a/x.png"), added("/a/y.png"), added("/a/z.svg")],
            );
        });

        coordinator.run(&rx, &logger);

        assert_eq!(coordinator.run_count(), 2);
        assert_eq!(logger.messages(Level::Info).len(), 3);
    }

    #[test]
    fn test_unqualified_events_are_ignored() {
        let (tx, rx) = mpsc::channel();
        let run_tx = tx.clone();
        let logger = MemoryLogger::new();

        let mut coordinator = WatchCoordinator::new(move || {
            send_all(
                &run_tx,
                vec![
                    WatchMessage::Fs(Ok(event(EventKind::Create(CreateKind::File), "/a/x.txt"))),
                    WatchMessage::Fs(Ok(event(
                        EventKind::Modify(ModifyKind::Data(DataChange::Any)),
                        "/a/x.png",
                    ))),
                    WatchMessage::Stop,
                ],
            );
            Ok(())
        })
        .with_debounce(Duration::from_millis(5));

        coordinator.run(&rx, &logger);

        assert_eq!(coordinator.run_count(), 1);
        drop(tx);
    }

    #[test]
    fn test_failed_run_does_not_stop_loop() {
        let (tx, rx) = mpsc::channel();
        let run_tx = tx.clone();
        let logger = MemoryLogger::new();
        let mut calls = 0;

        let mut coordinator = WatchCoordinator::new(move || {
            calls += 1;
            if calls == 1 {
                send_all(&run_tx, vec![added("/a/logo.png")]);
                return Err(AssetsGenError::Io {
                    path: PathBuf::from("/a/out.ts"),
                    message: "Failed to write output: denied".to_string(),
                });
            }
            send_all(&run_tx, vec![WatchMessage::Stop]);
            Ok(())
        })
        .with_debounce(Duration::from_millis(5));

        coordinator.run(&rx, &logger);

        assert_eq!(coordinator.run_count(), 2);
        let errors = logger.messages(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to regenerate"));
        drop(tx);
    }

    #[test]
    fn test_watcher_errors_are_reported() {
        let (tx, rx) = mpsc::channel();
        send_all(
            &tx,
            vec![
                WatchMessage::Fs(Err(notify::Error::generic("boom"))),
                WatchMessage::Stop,
            ],
        );
        let logger = MemoryLogger::new();

        let mut coordinator = WatchCoordinator::new(|| Ok(())).with_debounce(Duration::from_millis(5));
        coordinator.run(&rx, &logger);

        // The startup run drains both queued messages.
        assert_eq!(coordinator.run_count(), 1);
        assert_eq!(logger.messages(Level::Error).len(), 1);
    }
}
