use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use color_eyre::eyre::{eyre, Result};
use serde_json::Value;

use super::event::PlannerEvent;
use super::routine::default_routine;

pub const EVENTS_KEY: &str = "smart-planner-events";
pub const POINTS_KEY: &str = "smart-planner-points";
pub const THEME_KEY: &str = "smart-planner-theme";
pub const STREAK_KEY: &str = "smart-planner-streak";
pub const LAST_VISIT_KEY: &str = "smart-planner-last-visit";

/// Minimal key-value surface over the local store. Keeps the adapter
/// testable with an in-memory fake.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One file per key under the platform data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| eyre!("no data directory on this platform"))?
            .join("smart-planner");
        Self::at(dir)
    }

    pub fn at(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Everything read at session start. Slices are independent keys; a
/// missing or corrupt slice falls back per-slice instead of failing the
/// whole load.
pub struct PersistedState {
    pub events: Vec<PlannerEvent>,
    pub points: u32,
    pub streak: u32,
    pub dark_mode: bool,
    pub last_visit: Option<NaiveDate>,
}

pub fn load(storage: &dyn Storage, today: NaiveDate) -> PersistedState {
    let events = match storage.get(EVENTS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<PlannerEvent>>(&raw) {
            Ok(events) if !events.is_empty() => events,
            // Corrupt or empty payload: regenerate the default day.
            _ => default_routine(today),
        },
        _ => default_routine(today),
    };

    let points = read_u32(storage, POINTS_KEY);
    let streak = read_u32(storage, STREAK_KEY);
    let dark_mode = !matches!(storage.get(THEME_KEY), Ok(Some(ref s)) if s == "light");
    let last_visit = match storage.get(LAST_VISIT_KEY) {
        Ok(Some(raw)) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok(),
        _ => None,
    };

    PersistedState {
        events,
        points,
        streak,
        dark_mode,
        last_visit,
    }
}

fn read_u32(storage: &dyn Storage, key: &str) -> u32 {
    match storage.get(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

pub fn save_events(storage: &mut dyn Storage, events: &[PlannerEvent]) -> Result<()> {
    storage.set(EVENTS_KEY, &serde_json::to_string(events)?)
}

pub fn save_points(storage: &mut dyn Storage, points: u32) -> Result<()> {
    storage.set(POINTS_KEY, &points.to_string())
}

pub fn save_streak(storage: &mut dyn Storage, streak: u32) -> Result<()> {
    storage.set(STREAK_KEY, &streak.to_string())
}

pub fn save_theme(storage: &mut dyn Storage, dark_mode: bool) -> Result<()> {
    storage.set(THEME_KEY, if dark_mode { "dark" } else { "light" })
}

pub fn save_last_visit(storage: &mut dyn Storage, date: NaiveDate) -> Result<()> {
    storage.set(LAST_VISIT_KEY, &date.format("%Y-%m-%d").to_string())
}

/// Bundle every slice plus an export timestamp into one JSON blob.
pub fn export_all(
    events: &[PlannerEvent],
    points: u32,
    streak: u32,
    dark_mode: bool,
) -> Result<String> {
    let blob = serde_json::json!({
        "events": events,
        "points": points,
        "streak": streak,
        "theme": if dark_mode { "dark" } else { "light" },
        "exportDate": Local::now().to_rfc3339(),
    });
    Ok(serde_json::to_string_pretty(&blob)?)
}

pub fn backup_filename(today: NaiveDate) -> String {
    format!("smart-planner-backup-{}.json", today.format("%Y-%m-%d"))
}

/// Result of a successful import. Companion slices are best-effort:
/// `None` means "leave the current value unchanged".
pub struct ImportedState {
    pub events: Vec<PlannerEvent>,
    pub points: Option<u32>,
    pub streak: Option<u32>,
    pub dark_mode: Option<bool>,
}

/// Parse a backup blob. The import is rejected wholesale when `events` is
/// missing or not an array (or its elements don't parse); points, streak
/// and theme are applied independently when present and well-typed.
pub fn import_all(blob: &str) -> Result<ImportedState> {
    let value: Value =
        serde_json::from_str(blob).map_err(|e| eyre!("not valid JSON: {e}"))?;

    let events_value = value
        .get("events")
        .filter(|v| v.is_array())
        .ok_or_else(|| eyre!("backup has no events array"))?;
    let events: Vec<PlannerEvent> = serde_json::from_value(events_value.clone())
        .map_err(|e| eyre!("events array is malformed: {e}"))?;

    let points = value
        .get("points")
        .and_then(Value::as_u64)
        .map(|p| p as u32);
    let streak = value
        .get("streak")
        .and_then(Value::as_u64)
        .map(|s| s as u32);
    let dark_mode = value
        .get("theme")
        .and_then(Value::as_str)
        .map(|t| t != "light");

    Ok(ImportedState {
        events,
        points,
        streak,
        dark_mode,
    })
}
