// ── Durable UI state ──
//
// One JSON record: `{ theme, sidebarOpen, layout, widgets, user }`. Read
// once at startup to rehydrate the store, written on every change to the
// persisted subset. A missing or corrupt file falls back to defaults --
// losing UI preferences is never fatal.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::warn;

use pulseboard_core::PersistedState;

use crate::ConfigError;

/// Resolve the UI-state file path via XDG / platform conventions.
pub fn ui_state_path() -> PathBuf {
    ProjectDirs::from("io", "pulseboard", "pulseboard").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".local");
            p.push("share");
            p.push("pulseboard");
            p.push("ui-state.json");
            p
        },
        |dirs| dirs.data_dir().join("ui-state.json"),
    )
}

/// Load the persisted UI state from the canonical path.
pub fn load_ui_state() -> PersistedState {
    load_ui_state_from(&ui_state_path())
}

/// Load from an explicit path. Missing file → defaults; unreadable or
/// corrupt file → defaults with a warning.
pub fn load_ui_state_from(path: &Path) -> PersistedState {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return PersistedState::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read UI state, using defaults");
            return PersistedState::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt UI state, using defaults");
            PersistedState::default()
        }
    }
}

/// Save the persisted UI state to the canonical path.
pub fn save_ui_state(state: &PersistedState) -> Result<(), ConfigError> {
    save_ui_state_to(&ui_state_path(), state)
}

/// Save to an explicit path. Writes a sibling temp file first and renames
/// it into place so a crash mid-write cannot corrupt the record.
pub fn save_ui_state_to(path: &Path, state: &PersistedState) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pulseboard_core::{Layout, Theme};

    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui-state.json");

        let state = PersistedState {
            theme: Theme::Dark,
            sidebar_open: false,
            layout: Layout::List,
            ..PersistedState::default()
        };
        save_ui_state_to(&path, &state).unwrap();

        let loaded = load_ui_state_from(&path);
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_ui_state_from(&dir.path().join("nope.json"));
        assert_eq!(loaded, PersistedState::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui-state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let loaded = load_ui_state_from(&path);
        assert_eq!(loaded, PersistedState::default());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/ui-state.json");

        save_ui_state_to(&path, &PersistedState::default()).unwrap();
        assert!(path.exists());
    }
}
