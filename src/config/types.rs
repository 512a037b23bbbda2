use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Connection settings for the operator backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API (e.g., "https://api.example.com/admin").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Default list settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Rows requested per list page (default: 20).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw/tick interval in milliseconds (default: 250).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// How many ticks a notification stays on screen (default: 12).
    #[serde(default = "default_toast_ticks")]
    pub toast_ticks: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u32 {
    20
}

fn default_tick_ms() -> u64 {
    250
}

fn default_toast_ticks() -> u32 {
    12
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            toast_ticks: default_toast_ticks(),
        }
    }
}
