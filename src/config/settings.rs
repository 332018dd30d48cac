//! User settings snapshot and its JSON-backed store.
//!
//! The engine never reads settings fields directly from storage: it is handed an
//! `Arc<Settings>` and swaps it whole when the live update signal arrives.
//! Parsing is lenient per field, so a half-written or hand-edited file still
//! yields usable values for everything that is present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::wage::{WageConfig, WageType};

pub const DEFAULT_HOVER_ENABLED: bool = true;
pub const DEFAULT_WAGE: f64 = 20.0;
pub const DEFAULT_HOURS_PER_WEEK: f64 = 40.0;
pub const DEFAULT_TAKE_HOME_PERCENT: f64 = 70.0;
pub const DEFAULT_DEBUG_ENABLED: bool = false;

/// Resolved configuration snapshot consumed by the hover engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub hover_enabled: bool,
    pub wage_type: WageType,
    pub wage: f64,
    pub hours_per_week: f64,
    pub take_home_percent: f64,
    pub debug_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hover_enabled: DEFAULT_HOVER_ENABLED,
            wage_type: WageType::default(),
            wage: DEFAULT_WAGE,
            hours_per_week: DEFAULT_HOURS_PER_WEEK,
            take_home_percent: DEFAULT_TAKE_HOME_PERCENT,
            debug_enabled: DEFAULT_DEBUG_ENABLED,
        }
    }
}

impl Settings {
    /// Build a snapshot from an arbitrary JSON value.
    /// Every missing or malformed field falls back to its own default.
    pub fn from_json_value(value: &Value) -> Self {
        let empty = Map::new();
        let map = value.as_object().unwrap_or(&empty);
        let defaults = Self::default();

        Self {
            hover_enabled: read_bool(map, "hoverEnabled", defaults.hover_enabled),
            wage_type: read_wage_type(map, "wageType", defaults.wage_type),
            wage: read_number(map, "wage", defaults.wage),
            hours_per_week: read_number(map, "hoursPerWeek", defaults.hours_per_week),
            take_home_percent: read_number(map, "takeHomePercent", defaults.take_home_percent),
            debug_enabled: read_bool(map, "debugEnabled", defaults.debug_enabled),
        }
    }

    /// Parse a JSON document. Invalid JSON is treated like an empty object.
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_json_value(&value),
            Err(e) => {
                log::warn!("Settings JSON unreadable ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn wage_config(&self) -> WageConfig {
        WageConfig::new(
            self.wage_type,
            self.wage,
            self.hours_per_week,
            self.take_home_percent,
        )
    }

    pub fn effective_hourly_rate(&self) -> f64 {
        self.wage_config().effective_hourly_rate()
    }
}

fn read_bool(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => match s.trim() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

// Numeric strings are accepted, everything else non-numeric falls back.
fn read_number(map: &Map<String, Value>, key: &str, default: f64) -> f64 {
    let parsed = match map.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}

fn read_wage_type(map: &Map<String, Value>, key: &str, default: WageType) -> WageType {
    map.get(key)
        .and_then(Value::as_str)
        .and_then(|s| WageType::from_str(s.trim()).ok())
        .unwrap_or(default)
}

/// JSON-file-backed settings store.
///
/// Holds the current snapshot behind an `RwLock<Arc<_>>`: readers clone the
/// `Arc` and keep using it even if a reload swaps the inner value meanwhile.
pub struct SettingsStore {
    path: Option<PathBuf>,
    current: RwLock<Arc<Settings>>,
}

impl SettingsStore {
    /// Open a store backed by `path`. A missing or unreadable file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = read_settings_file(&path);
        Self {
            path: Some(path),
            current: RwLock::new(Arc::new(settings)),
        }
    }

    /// A store with no backing file; `update` only swaps the snapshot.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            current: RwLock::new(Arc::new(settings)),
        }
    }

    pub fn snapshot(&self) -> Arc<Settings> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-read the backing file and swap the snapshot.
    pub fn reload(&self) -> Arc<Settings> {
        let Some(path) = &self.path else {
            return self.snapshot();
        };
        let fresh = Arc::new(read_settings_file(path));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        fresh
    }

    /// Replace the snapshot, persisting it when the store is file-backed.
    pub fn update(&self, settings: Settings) -> Result<Arc<Settings>> {
        if let Some(path) = &self.path {
            let serialized = serde_json::to_string_pretty(&settings)?;
            fs::write(path, serialized)
                .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        }
        let fresh = Arc::new(settings);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        Ok(fresh)
    }
}

// Unreadable files (directory, permissions, non-UTF-8) degrade to defaults.
fn read_settings_file(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    match fs::read_to_string(path) {
        Ok(contents) => Settings::from_json_str(&contents),
        Err(e) => {
            log::warn!(
                "Failed to read settings from {} ({e}), using defaults",
                path.display()
            );
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_individually() {
        let settings = Settings::from_json_value(&json!({ "wage": 35, "wageType": "annual" }));

        assert_eq!(settings.wage, 35.0);
        assert_eq!(settings.wage_type, WageType::Annual);
        assert_eq!(settings.hours_per_week, DEFAULT_HOURS_PER_WEEK);
        assert_eq!(settings.take_home_percent, DEFAULT_TAKE_HOME_PERCENT);
        assert!(settings.hover_enabled);
        assert!(!settings.debug_enabled);
    }

    #[test]
    fn malformed_fields_are_defaulted_not_fatal() {
        let settings = Settings::from_json_value(&json!({
            "hoverEnabled": "maybe",
            "wageType": "weekly",
            "wage": "25.5",
            "hoursPerWeek": null,
            "takeHomePercent": [1, 2],
        }));

        assert!(settings.hover_enabled);
        assert_eq!(settings.wage_type, WageType::Hourly);
        assert_eq!(settings.wage, 25.5);
        assert_eq!(settings.hours_per_week, DEFAULT_HOURS_PER_WEEK);
        assert_eq!(settings.take_home_percent, DEFAULT_TAKE_HOME_PERCENT);
    }

    #[test]
    fn non_object_json_gives_defaults() {
        assert_eq!(Settings::from_json_str("[1,2,3]"), Settings::default());
        assert_eq!(Settings::from_json_str("{not json"), Settings::default());
    }

    #[test]
    fn serializes_with_extension_field_names() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["wageType"], "hourly");
        assert_eq!(value["takeHomePercent"], 70.0);
        assert_eq!(Settings::from_json_value(&value), Settings::default());
    }

    #[test]
    fn store_swaps_snapshot_without_touching_held_arcs() {
        let store = SettingsStore::in_memory(Settings::default());
        let before = store.snapshot();

        let updated = Settings {
            wage: 50.0,
            ..Settings::default()
        };
        store.update(updated).unwrap();

        assert_eq!(before.wage, DEFAULT_WAGE);
        assert_eq!(store.snapshot().wage, 50.0);
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let path = std::env::temp_dir()
            .join(format!("hourvest-settings-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        let store = SettingsStore::open(&path);
        assert_eq!(*store.snapshot(), Settings::default());

        store
            .update(Settings {
                hover_enabled: false,
                ..Settings::default()
            })
            .unwrap();

        let reopened = SettingsStore::open(&path);
        assert!(!reopened.snapshot().hover_enabled);

        fs::write(&path, r#"{"wage": 99}"#).unwrap();
        assert_eq!(store.reload().wage, 99.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unreadable_paths_fall_back_to_defaults() {
        let dir = std::env::temp_dir()
            .join(format!("hourvest-settings-dir-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let store = SettingsStore::open(&dir);
        assert_eq!(*store.snapshot(), Settings::default());
        assert_eq!(*store.reload(), Settings::default());
        let _ = fs::remove_dir(&dir);

        let path = std::env::temp_dir()
            .join(format!("hourvest-settings-bin-{}.json", std::process::id()));
        fs::write(&path, [0xff, 0xfe, b'{', 0x80]).unwrap();
        let store = SettingsStore::open(&path);
        assert_eq!(*store.snapshot(), Settings::default());
        let _ = fs::remove_file(&path);
    }
}
