//! Game settings and preferences
//!
//! Persisted separately from scores: a JSON file on native, LocalStorage in
//! the browser. A missing or unreadable settings source falls back to defaults.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use crate::error::SettingsError;
use crate::sim::Playfield;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    /// Host viewport size in pixels; the playfield is clamped from this
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Visual Effects ===
    /// Explosion particles
    pub particles: bool,

    // === Debug ===
    /// Draw a dot at ship and asteroid centers
    pub show_center_dot: bool,
    /// Fixed RNG seed (None = seed from the clock each run)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: 820.0,
            viewport_height: 620.0,
            particles: true,
            show_center_dot: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Playfield for the configured viewport
    pub fn playfield(&self) -> Playfield {
        Playfield::from_viewport(self.viewport_width, self.viewport_height)
    }

    /// Seed for the next run
    pub fn run_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Read settings from a JSON file. Missing keys take their defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Like `load_from`, but any failure yields defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "asteroids_settings";

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }

    /// Settings from LocalStorage; anything missing or unreadable gives defaults
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::local_storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        let Some(json) = stored else {
            log::info!("No stored settings, using defaults");
            return Self::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Stored settings are malformed ({}); using defaults", e);
            Self::default()
        })
    }

    /// Write to LocalStorage. Failures are logged, never fatal.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::local_storage() else {
            log::warn!("LocalStorage unavailable; settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Writing settings to LocalStorage failed");
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_playfield_is_full_size() {
        let pf = Settings::default().playfield();
        assert_eq!((pf.width, pf.height), (800.0, 600.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"particles": false, "seed": 5}"#).unwrap();
        assert!(!settings.particles);
        assert_eq!(settings.run_seed(), 5);
        assert_eq!(settings.viewport_width, 820.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            show_center_dot: true,
            viewport_width: 500.0,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);

        std::fs::write(&path, "garbage").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(SettingsError::Json(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
