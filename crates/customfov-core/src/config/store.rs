use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use tracing::{debug, error, info, warn};

use super::{Settings, UserConfig};
use crate::camera::Context;

/// Result of a [`ConfigStore::reload`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// File could not be stat'ed; retried on the next call
    Unavailable,
    /// File not modified since the last parse
    Unchanged,
    /// File modified, but live reload is turned off
    Disabled,
    Reloaded,
    /// Parse failed; the previous config stays active
    Failed,
}

/// Holds the active [`UserConfig`] and re-parses the file when its
/// modification time moves past the recorded watermark.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: UserConfig,
    last_write_time: Option<SystemTime>,
}

impl ConfigStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            config: UserConfig::default(),
            last_write_time: None,
        }
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    pub fn get_settings(&self, context: Context) -> Settings {
        self.config.get_settings(context)
    }

    /// Cheap when nothing changed: a single stat of the config file.
    pub fn reload(&mut self) -> ReloadOutcome {
        let last_write_time = match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(time) => time,
            Err(_) => return ReloadOutcome::Unavailable,
        };

        if let Some(watermark) = self.last_write_time {
            if last_write_time <= watermark {
                return ReloadOutcome::Unchanged;
            }
            if !self.config.live_reload {
                self.last_write_time = Some(last_write_time);
                return ReloadOutcome::Disabled;
            }
        }
        self.last_write_time = Some(last_write_time);

        match UserConfig::load(&self.path) {
            Ok(config) => {
                info!("Loaded config from {}", self.path.display());
                if let Ok(dump) = toml::to_string(&config) {
                    debug!("Active config:\n{}", dump);
                }
                if !config.live_reload {
                    info!("Live reload was disabled.");
                }
                self.config = config;
                ReloadOutcome::Reloaded
            }
            Err(e) => {
                error!("Failed to load config from {}: {}", self.path.display(), e);
                warn!("Keeping existing settings.");
                ReloadOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str, modified: SystemTime) -> PathBuf {
        let path = dir.path().join("CustomFOV.toml");
        fs::write(&path, content).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
        path
    }

    fn epoch_plus(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ConfigStore::new(dir.path().join("CustomFOV.toml"));
        assert_eq!(store.reload(), ReloadOutcome::Unavailable);
        assert_eq!(store.config(), &UserConfig::default());
    }

    #[test]
    fn test_reload_twice_parses_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "fov = 60\n", epoch_plus(0));
        let mut store = ConfigStore::new(&path);

        assert_eq!(store.reload(), ReloadOutcome::Reloaded);
        assert_eq!(store.reload(), ReloadOutcome::Unchanged);
        assert_eq!(store.get_settings(Context::Quest).fov, 60.0);
    }

    #[test]
    fn test_newer_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "fov = 60\n", epoch_plus(0));
        let mut store = ConfigStore::new(&path);
        store.reload();

        write_config(&dir, "fov = 75\n", epoch_plus(10));
        assert_eq!(store.reload(), ReloadOutcome::Reloaded);
        assert_eq!(store.get_settings(Context::Hub).fov, 75.0);
    }

    #[test]
    fn test_older_timestamp_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "fov = 60\n", epoch_plus(10));
        let mut store = ConfigStore::new(&path);
        store.reload();

        write_config(&dir, "fov = 75\n", epoch_plus(5));
        assert_eq!(store.reload(), ReloadOutcome::Unchanged);
        assert_eq!(store.get_settings(Context::Hub).fov, 60.0);
    }

    #[test]
    fn test_broken_file_keeps_previous_config_and_advances_watermark() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "fov = 60\n", epoch_plus(0));
        let mut store = ConfigStore::new(&path);
        store.reload();

        write_config(&dir, "fov = = 60\n", epoch_plus(10));
        assert_eq!(store.reload(), ReloadOutcome::Failed);
        assert_eq!(store.get_settings(Context::Room).fov, 60.0);
        assert_eq!(store.reload(), ReloadOutcome::Unchanged);
    }

    #[test]
    fn test_live_reload_off_reads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "live_reload = false\nfov = 60\n", epoch_plus(0));
        let mut store = ConfigStore::new(&path);
        assert_eq!(store.reload(), ReloadOutcome::Reloaded);

        write_config(&dir, "fov = 90\n", epoch_plus(10));
        assert_eq!(store.reload(), ReloadOutcome::Disabled);
        assert_eq!(store.reload(), ReloadOutcome::Unchanged);
        assert_eq!(store.get_settings(Context::Quest).fov, 60.0);
    }
}
