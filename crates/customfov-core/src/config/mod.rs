//! User configuration loaded from `CustomFOV.toml`
//!
//! The file has global `fov`/`distance`/`height` keys at the top level, which
//! the optional `[hub]`, `[room]` and `[quest]` tables inherit from for any
//! key they leave out. Bad values are reported and skipped rather than
//! failing the whole file.

mod store;

pub use store::{ConfigStore, ReloadOutcome};

use std::fs;
use std::path::Path;

use serde::Serialize;
use toml::{Table, Value};
use tracing::{debug, error, warn};

use crate::camera::Context;
use crate::error::Result;

pub const DEFAULT_FOV: f32 = 53.0;
pub const MIN_FOV: f32 = 30.0;
pub const MAX_FOV: f32 = 120.0;

const TOP_LEVEL_KEYS: &[&str] = &[
    "fov",
    "distance",
    "height",
    "hub",
    "room",
    "quest",
    "disable_room_shift",
    "live_reload",
];
// `shift` is accepted from older files and has no effect.
const SETTINGS_KEYS: &[&str] = &["fov", "distance", "height", "shift"];

/// Camera settings for one context
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settings {
    /// Target FOV in degrees
    pub fov: f32,
    /// Distance scale factor
    pub distance: f32,
    /// Height scale factor
    pub height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV,
            distance: 1.0,
            height: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserConfig {
    pub disable_room_shift: bool,
    /// Re-read the file when it changes; when off it is read once
    pub live_reload: bool,
    pub hub: Settings,
    pub room: Settings,
    pub quest: Settings,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            disable_room_shift: false,
            live_reload: true,
            hub: Settings::default(),
            room: Settings::default(),
            quest: Settings::default(),
        }
    }
}

impl UserConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Parsing config file '{}'...", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let table: Table = content.parse()?;
        warn_unknown_keys(&table, TOP_LEVEL_KEYS, None);

        let global = settings_from_table(&table, None, &Settings::default());
        let resolve = |context: Context| settings_at_key(&table, context.as_str(), &global);

        let defaults = Self::default();
        Ok(Self {
            disable_room_shift: read_bool(&table, "disable_room_shift", None)
                .unwrap_or(defaults.disable_room_shift),
            live_reload: read_bool(&table, "live_reload", None).unwrap_or(defaults.live_reload),
            hub: resolve(Context::Hub),
            room: resolve(Context::Room),
            quest: resolve(Context::Quest),
        })
    }

    pub fn get_settings(&self, context: Context) -> Settings {
        match context {
            Context::Hub => self.hub,
            Context::Room => self.room,
            Context::Quest => self.quest,
        }
    }
}

fn key_path(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => format!("{parent}.{key}"),
        None => key.to_string(),
    }
}

fn warn_unknown_keys(table: &Table, expected: &[&str], parent: Option<&str>) {
    for key in table.keys() {
        if !expected.contains(&key.as_str()) {
            warn!("Unknown key {} will be ignored.", key_path(parent, key));
        }
    }
}

fn report_type_mismatch(parent: Option<&str>, key: &str, expected: &str, value: &Value) {
    error!(
        "Expected {} to be a {}, but got a {}!",
        key_path(parent, key),
        expected,
        value.type_str()
    );
}

fn read_float(table: &Table, key: &str, parent: Option<&str>) -> Option<f32> {
    match table.get(key)? {
        Value::Float(value) if !value.is_finite() => {
            error!(
                "Expected {} to be a finite number, but got {}!",
                key_path(parent, key),
                value
            );
            None
        }
        Value::Float(value) => Some(*value as f32),
        Value::Integer(value) => Some(*value as f32),
        other => {
            report_type_mismatch(parent, key, "floating-point", other);
            None
        }
    }
}

fn read_bool(table: &Table, key: &str, parent: Option<&str>) -> Option<bool> {
    match table.get(key)? {
        Value::Boolean(value) => Some(*value),
        other => {
            report_type_mismatch(parent, key, "boolean", other);
            None
        }
    }
}

pub fn clamp_fov(value: f32) -> f32 {
    let clamped = value.clamp(MIN_FOV, MAX_FOV);
    if clamped != value {
        warn!("FOV clamped to range [{MIN_FOV}, {MAX_FOV}].");
    }
    clamped
}

fn settings_from_table(table: &Table, parent: Option<&str>, defaults: &Settings) -> Settings {
    // Top-level unknown keys are reported against the full top-level key list.
    if parent.is_some() {
        warn_unknown_keys(table, SETTINGS_KEYS, parent);
    }
    Settings {
        fov: read_float(table, "fov", parent)
            .map(clamp_fov)
            .unwrap_or(defaults.fov),
        distance: read_float(table, "distance", parent).unwrap_or(defaults.distance),
        height: read_float(table, "height", parent).unwrap_or(defaults.height),
    }
}

fn settings_at_key(table: &Table, key: &str, defaults: &Settings) -> Settings {
    match table.get(key) {
        None => *defaults,
        Some(Value::Table(sub_table)) => settings_from_table(sub_table, Some(key), defaults),
        Some(other) => {
            report_type_mismatch(None, key, "table", other);
            *defaults
        }
    }
}
