use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chat::ClockFormatter;
use crate::common::DisplayPreferences;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub viewer_id: String,
    pub display_name: String,
    /// Start the session waiting in the lobby.
    pub knocking: bool,
    pub show_display_name: bool,
    pub show_timestamp: bool,
    /// JSON transcript replayed into the chat.
    pub transcript: Option<String>,
    pub replay_interval_ms: u64,
    /// Timestamp zone; the machine's local zone when unset.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewer_id: "local".to_string(),
            display_name: "Me".to_string(),
            knocking: false,
            show_display_name: true,
            show_timestamp: true,
            transcript: None,
            replay_interval_ms: 1500,
            utc_offset_minutes: None,
        }
    }
}

impl AppConfig {
    pub fn display_preferences(&self) -> DisplayPreferences {
        DisplayPreferences {
            show_display_name: self.show_display_name,
            show_timestamp: self.show_timestamp,
        }
    }

    pub fn replay_interval(&self) -> Duration {
        Duration::from_millis(self.replay_interval_ms)
    }

    pub fn clock(&self) -> ClockFormatter {
        match self.utc_offset_minutes {
            Some(minutes) => ClockFormatter::with_offset_minutes(minutes).unwrap_or_else(|| {
                log::warn!("utc_offset_minutes {minutes} out of range; using local time");
                ClockFormatter::local()
            }),
            None => ClockFormatter::local(),
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        assert_eq!(load_config("no/such/config.json"), AppConfig::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"viewer_id": "u7", "show_timestamp": false}"#).unwrap();

        assert_eq!(config.viewer_id, "u7");
        assert_eq!(config.display_name, "Me");
        assert!(!config.display_preferences().show_timestamp);
        assert!(config.display_preferences().show_display_name);
        assert_eq!(config.replay_interval(), Duration::from_millis(1500));
    }
}
