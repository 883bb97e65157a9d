//! Reading `Settings` from `data/settings` and reloading them while the game runs.
//!
//! The first `.ron` file (by name) that parses wins. At startup a missing or
//! broken directory falls back to defaults; on reload the live settings are
//! kept instead, so a half-saved file never resets player tuning mid-run.
use crate::ron_loader::{load_ron_files, setup_ron_watcher, RonWatcher};
use crate::settings::Settings;
use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};

pub const SETTINGS_DIR: &str = "data/settings";

/// Change flag for a watched settings directory.
#[derive(Resource)]
pub struct SettingsWatcher {
    watcher: RonWatcher,
    dir: String,
}

impl SettingsWatcher {
    /// Watcher that never reports a change; used when the directory is missing.
    #[must_use]
    pub fn stub() -> Self {
        Self {
            watcher: RonWatcher::stub(),
            dir: SETTINGS_DIR.to_string(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &str {
        &self.dir
    }
}

fn first_settings(path: &str) -> Option<Settings> {
    load_ron_files::<Settings>(path).into_iter().next()
}

/// Settings from `path`, or `Settings::defaults()` when nothing parses.
///
/// # Example
/// ```ignore
/// let settings = load_settings_from_dir(SETTINGS_DIR);
/// ```
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    first_settings(path).unwrap_or_else(|| {
        info!("no settings found in {path}, using defaults");
        Settings::defaults()
    })
}

/// Start watching `path` for edits.
///
/// # Errors
/// Returns the `notify::Error` if the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    Ok(SettingsWatcher {
        watcher: setup_ron_watcher(path)?,
        dir: path.to_string(),
    })
}

/// Reload `Settings` after the watched directory changes.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if !watcher.watcher.take_changed() {
        return;
    }
    match first_settings(watcher.dir()) {
        Some(fresh) => {
            info!("settings changed, reloading");
            *settings = fresh;
        }
        None => warn!("settings in {} no longer parse, keeping current values", watcher.dir()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_gives_defaults() {
        let s = load_settings_from_dir("this/dir/does/not/exist");
        assert_eq!(s.lives.max_lives, Settings::defaults().lives.max_lives);
    }

    #[test]
    fn stub_watches_default_dir() {
        assert_eq!(SettingsWatcher::stub().dir(), SETTINGS_DIR);
    }
}
