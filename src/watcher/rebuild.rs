//! Watch loop

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{WeaveError, WeaveResult};
use crate::site;

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Render once, then re-render whenever a source file changes until `running`
/// is cleared.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> WeaveResult<()> {
    event_callback(WatchEvent::WatchStarted {
        source: options.source.display().to_string(),
    });

    rebuild(&options, &event_callback)?;

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| WeaveError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&options.source, RecursiveMode::Recursive)
        .map_err(|e| WeaveError::Io(std::io::Error::other(e.to_string())))?;

    let output = options
        .output
        .canonicalize()
        .unwrap_or_else(|_| options.output.clone());
    let mut state = WatcherState::new();

    // notify may report the existing files right after registration
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end && running.load(Ordering::SeqCst) {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            if is_relevant(&path, &output) {
                state.add_change(path);
            }
        }

        if state.should_build() {
            for path in state.take_changes() {
                event_callback(WatchEvent::FileChanged {
                    path: path.display().to_string(),
                });
            }
            // A broken page must not end the session
            let _ = rebuild(&options, &event_callback);
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// Changes inside the output directory or to hidden files never trigger a build
pub(crate) fn is_relevant(path: &Path, output: &Path) -> bool {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if canonical.starts_with(output) {
        return false;
    }
    !path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn rebuild(options: &WatchOptions, callback: &impl Fn(WatchEvent)) -> WeaveResult<()> {
    callback(WatchEvent::BuildStarted);

    let report = match site::build(&options.source, &options.output, &options.config) {
        Ok(report) => report,
        Err(e) => {
            callback(WatchEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    callback(WatchEvent::BuildComplete {
        pages: report.pages.len(),
        copied: report.copied.len(),
        errors: report.error_count(),
        warnings: report.warning_count(),
    });
    Ok(())
}
