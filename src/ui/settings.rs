use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct UiSettings {
    pub ui_scale: f32,
    pub muted: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            muted: false,
        }
    }
}

impl UiSettings {
    pub fn load() -> UiSettings {
        fs::read_to_string(settings_path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(settings_path(), json);
        }
    }
}

fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jejak-amal");
    fs::create_dir_all(&path).ok();
    path.push("ui_settings.json");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_through_json() {
        let settings = UiSettings {
            ui_scale: 1.5,
            muted: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: UiSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn unknown_file_content_falls_back_to_defaults() {
        assert!(serde_json::from_str::<UiSettings>("not json").is_err());
        let d = UiSettings::default();
        assert_eq!(d.ui_scale, 1.0);
        assert!(!d.muted);
    }
}
