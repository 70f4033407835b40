//! Configuration resolution for Komp.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/komp/settings.json)
//! 3. Environment variables (highest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete Komp configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the competitions backend.
    pub base_url: String,
    /// Per-request timeout (seconds).
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Terminal UI tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a toast stays on screen before auto-dismiss (milliseconds).
    pub toast_duration_ms: u64,
    /// Friend-request badge poll interval (seconds).
    pub badge_poll_secs: u64,
    /// Quiet period before a search fires (milliseconds).
    pub search_debounce_ms: u64,
    /// Minimum trimmed query length before a search fires.
    pub search_min_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            badge_poll_secs: 30,
            search_debounce_ms: 500,
            search_min_chars: 2,
        }
    }
}

/// Load configuration with hierarchical resolution.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    // Load global config
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            let global = load_config_file(&global_path)?;
            merge_config(&mut config, global);
        }
    }

    // Apply environment overrides
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|h| PathBuf::from(h).join(".komp").join("settings.json"))
    }
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join("Library/Application Support/komp/settings.json"))
    }
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
            .map(|p| p.join("komp").join("settings.json"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        None
    }
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    base.api = overlay.api;
    base.ui = overlay.ui;
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("KOMP_API_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("KOMP_REQUEST_TIMEOUT_SECS") {
        if let Ok(n) = val.parse() {
            config.api.request_timeout_secs = n;
        }
    }
    if let Ok(val) = std::env::var("KOMP_BADGE_POLL_SECS") {
        if let Ok(n) = val.parse() {
            config.ui.badge_poll_secs = n;
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_localhost() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn default_toast_duration_is_3s() {
        let config = Config::default();
        assert_eq!(config.ui.toast_duration_ms, 3000);
    }

    #[test]
    fn default_badge_poll_is_30s() {
        let config = Config::default();
        assert_eq!(config.ui.badge_poll_secs, 30);
    }

    #[test]
    fn default_debounce_is_500ms_2_chars() {
        let config = Config::default();
        assert_eq!(config.ui.search_debounce_ms, 500);
        assert_eq!(config.ui.search_min_chars, 2);
    }

    #[test]
    fn config_roundtrip_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let loaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.api.base_url, config.api.base_url);
        assert_eq!(loaded.ui.search_debounce_ms, config.ui.search_debounce_ms);
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let json = r#"{"api": {"base_url": "https://komp.example", "request_timeout_secs": 10}}"#;
        let loaded: Config = serde_json::from_str(json).unwrap();
        assert_eq!(loaded.api.base_url, "https://komp.example");
        assert_eq!(loaded.ui.toast_duration_ms, 3000);
    }
}
