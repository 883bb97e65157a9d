//! RON data files: typed loading and a directory change flag.
//!
//! Settings and levels both live as `.ron` files under `data/`. Loading is
//! lenient at the directory level (bad files are logged and skipped) and
//! strict per file (`load_ron_file` returns a typed error).

use bevy::log::warn;
use bevy::prelude::Resource;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Failure reading or parsing a single RON file.
#[derive(Debug, Error)]
pub enum RonLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Raised flag for a watched directory. The OS watcher handle lives as long
/// as the resource; a stub has none and never raises the flag.
#[derive(Resource)]
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>,
    _watcher: Option<RecommendedWatcher>,
}

impl RonWatcher {
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Read and clear the changed flag, recovering from a poisoned mutex.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(flag) => flag,
            Err(poisoned) => {
                warn!("RON watcher mutex poisoned, recovering");
                poisoned.into_inner()
            }
        };
        std::mem::replace(&mut *flag, false)
    }
}

/// Read and deserialize a single RON file.
///
/// # Errors
/// `RonLoadError::Io` if the file cannot be read, `RonLoadError::Parse` if
/// its contents are not a valid `T`.
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, RonLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| RonLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str::<T>(&content).map_err(|source| RonLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Every `.ron` file in `path` that parses as `T`, ordered by file name.
/// A missing directory yields an empty list.
#[must_use]
pub fn load_ron_files<T: DeserializeOwned>(path: &str) -> Vec<T> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();

    files
        .iter()
        .filter_map(|p| match load_ron_file::<T>(p) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("{e}");
                None
            }
        })
        .collect()
}

/// Watch `path` (non-recursively) and raise the flag when a file in it is
/// created or modified.
///
/// # Errors
/// Returns the `notify::Error` if the watcher cannot be created or `path`
/// cannot be watched.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&changed);
    let root: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    return;
                }
                let touched_ron = event.paths.iter().any(|p| {
                    let p = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
                    p.starts_with(&root) && p.extension().is_some_and(|ext| ext == "ron")
                });
                if touched_ron {
                    match flag.lock() {
                        Ok(mut flag) => *flag = true,
                        Err(poisoned) => *poisoned.into_inner() = true,
                    }
                }
            }
            Err(e) => warn!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        value: u32,
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lensfall-ron-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn loads_valid_files_and_skips_broken_ones() {
        let dir = scratch_dir("mixed");
        std::fs::write(dir.join("a.ron"), "(value: 1)").unwrap();
        std::fs::write(dir.join("b.ron"), "(value: ").unwrap();
        std::fs::write(dir.join("c.txt"), "(value: 3)").unwrap();
        std::fs::write(dir.join("d.ron"), "(value: 4)").unwrap();

        let items: Vec<Probe> = load_ron_files(dir.to_str().unwrap());
        assert_eq!(items, vec![Probe { value: 1 }, Probe { value: 4 }]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_empty() {
        let items: Vec<Probe> = load_ron_files("/definitely/not/here");
        assert!(items.is_empty());
    }

    #[test]
    fn parse_error_is_typed() {
        let dir = scratch_dir("typed");
        let file = dir.join("bad.ron");
        std::fs::write(&file, "nope").unwrap();
        assert!(matches!(load_ron_file::<Probe>(&file), Err(RonLoadError::Parse { .. })));
        assert!(matches!(
            load_ron_file::<Probe>(&dir.join("missing.ron")),
            Err(RonLoadError::Io { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn stub_watcher_flag_is_taken_once() {
        let w = RonWatcher::stub();
        assert!(!w.take_changed());
        *w.changed.lock().unwrap() = true;
        assert!(w.take_changed());
        assert!(!w.take_changed());
    }
}
