use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    /// Quiet period after the last keystroke before a search is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Queries shorter than this never reach the network.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_tick_rate() -> f64 {
    30.0
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_query_len() -> usize {
    3
}

fn default_per_page() -> u32 {
    30
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_fps: default_tick_rate(),
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            per_page: default_per_page(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl AppConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/octoscout/config.toml"))
}

pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    toml::from_str(&contents).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_behavior() {
        let config = AppConfig::default();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.min_query_len, 3);
        assert_eq!(config.per_page, 30);
        assert_eq!(config.api_base_url, "https://api.github.com");
    }

    #[test]
    fn partial_config_falls_back_per_field() {
        let config: AppConfig = toml::from_str("debounce_ms = 250\n").unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.min_query_len, 3);
    }
}
