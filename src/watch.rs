//! Continuous single-job rebuild loop.
//!
//! Watch mode builds one bundle, then blocks on filesystem notifications
//! over the project root and rebuilds on every relevant change. It is the
//! terminal operation of the process: it never returns under normal
//! operation, only on watcher failure or external interrupt. Watch runs do
//! not wipe dist and do not stage for publish.
//!
//! Changes under the dist and staging directories are ignored (our own
//! writes would otherwise retrigger the loop), as are dotfiles. Rapid event
//! bursts from editors are debounced into a single rebuild. A failing
//! rebuild is reported and the loop keeps watching — a broken intermediate
//! edit must not kill the session.

use crate::engine::{BuildEngine, EngineError};
use crate::job::JobDescriptor;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use thiserror::Error;

/// Debounce window for editor save bursts.
const DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),
    #[error("file watcher channel closed")]
    Disconnected,
}

/// Directories whose changes never trigger a rebuild.
#[derive(Debug, Clone)]
pub struct WatchIgnore {
    dirs: Vec<PathBuf>,
}

impl WatchIgnore {
    /// Ignore the driver's own output areas.
    pub fn new(dist_dir: &str, staging_dir: &str) -> Self {
        Self {
            dirs: vec![PathBuf::from(dist_dir), PathBuf::from(staging_dir)],
        }
    }

    /// True if a change at `path` is irrelevant to the watched job.
    fn should_ignore(&self, path: &Path, root: &Path) -> bool {
        let rel = match path.strip_prefix(root) {
            Ok(rel) => rel,
            // Outside the project root entirely.
            Err(_) => return true,
        };
        if self.dirs.iter().any(|dir| rel.starts_with(dir)) {
            return true;
        }
        rel.components().any(|c| match c {
            Component::Normal(name) => name.to_string_lossy().starts_with('.'),
            _ => false,
        })
    }
}

/// Build `job` once, then rebuild it on every relevant change under
/// `project_root`. Blocks forever; `Ok` is unreachable.
pub fn watch(
    project_root: &Path,
    job: &JobDescriptor,
    engine: &impl BuildEngine,
    ignore: &WatchIgnore,
) -> Result<Infallible, WatchError> {
    report(job, engine.build(job));

    let (tx, rx) = mpsc::channel::<Event>();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;
    watcher.watch(project_root, RecursiveMode::Recursive)?;
    println!("Watching {} (ctrl-c to stop)", project_root.display());

    loop {
        let event = rx.recv().map_err(|_| WatchError::Disconnected)?;
        if !is_relevant(&event, project_root, ignore) {
            continue;
        }
        // Swallow the rest of the burst before rebuilding.
        while let Ok(extra) = rx.recv_timeout(DEBOUNCE) {
            let _ = extra;
        }
        report(job, engine.build(job));
    }
}

fn is_relevant(event: &Event, root: &Path, ignore: &WatchIgnore) -> bool {
    let interesting = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    interesting
        && event
            .paths
            .iter()
            .any(|path| !ignore.should_ignore(path, root))
}

fn report(job: &JobDescriptor, result: Result<(), EngineError>) {
    match result {
        Ok(()) => println!("Built {} → {}", job.name, job.output.display()),
        Err(err) => eprintln!("Build failed for {}: {err}", job.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore() -> WatchIgnore {
        WatchIgnore::new("dist", "lib")
    }

    #[test]
    fn own_output_areas_are_ignored() {
        let root = Path::new("/project");
        assert!(ignore().should_ignore(Path::new("/project/dist/chart.js"), root));
        assert!(ignore().should_ignore(Path::new("/project/lib/index.js"), root));
    }

    #[test]
    fn sources_are_watched() {
        let root = Path::new("/project");
        assert!(!ignore().should_ignore(Path::new("/project/src/index.js"), root));
        assert!(!ignore().should_ignore(Path::new("/project/lang/en.js"), root));
        assert!(!ignore().should_ignore(Path::new("/project/extension/geomap/index.js"), root));
    }

    #[test]
    fn hidden_paths_are_ignored() {
        let root = Path::new("/project");
        assert!(ignore().should_ignore(Path::new("/project/.git/HEAD"), root));
        assert!(ignore().should_ignore(Path::new("/project/src/.index.js.swp"), root));
    }

    #[test]
    fn paths_outside_the_root_are_ignored() {
        let root = Path::new("/project");
        assert!(ignore().should_ignore(Path::new("/elsewhere/src/index.js"), root));
    }

    #[test]
    fn metadata_only_events_are_irrelevant() {
        let root = Path::new("/project");
        let event = Event::new(EventKind::Access(notify::event::AccessKind::Read))
            .add_path(PathBuf::from("/project/src/index.js"));
        assert!(!is_relevant(&event, root, &ignore()));
    }

    #[test]
    fn modify_under_src_is_relevant() {
        let root = Path::new("/project");
        let event = Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/project/src/index.js"));
        assert!(is_relevant(&event, root, &ignore()));
    }
}
