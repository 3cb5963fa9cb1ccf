use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dashboard_client::Period;

pub const MIN_RECONNECT_DELAY_MS: u64 = 250;

/// Configuration for the call-center dashboard backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    /// Sent as `Accept-Language` on every REST call.
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    #[serde(default)]
    pub surfaces: SurfaceSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ws_url: default_ws_url(),
            language: default_language(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            surfaces: SurfaceSettings::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    /// Never below [`MIN_RECONNECT_DELAY_MS`].
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms.max(MIN_RECONNECT_DELAY_MS))
    }
}

/// Display surfaces the binary can drive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    Overview,
    Display,
    Agents,
    Calls,
    Leaderboard,
    Statistics,
    Comparison,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 7] = [
        SurfaceKind::Overview,
        SurfaceKind::Display,
        SurfaceKind::Agents,
        SurfaceKind::Calls,
        SurfaceKind::Leaderboard,
        SurfaceKind::Statistics,
        SurfaceKind::Comparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Overview => "overview",
            SurfaceKind::Display => "display",
            SurfaceKind::Agents => "agents",
            SurfaceKind::Calls => "calls",
            SurfaceKind::Leaderboard => "leaderboard",
            SurfaceKind::Statistics => "statistics",
            SurfaceKind::Comparison => "comparison",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurfaceSettings {
    #[serde(default = "default_enabled")]
    pub enabled: Vec<SurfaceKind>,

    #[serde(default = "default_overview_interval")]
    pub overview_interval_secs: u64,

    #[serde(default = "default_display_interval")]
    pub display_interval_secs: u64,

    #[serde(default = "default_agents_interval")]
    pub agents_interval_secs: u64,

    #[serde(default = "default_calls_interval")]
    pub calls_interval_secs: u64,

    #[serde(default = "default_leaderboard_interval")]
    pub leaderboard_interval_secs: u64,

    #[serde(default = "default_statistics_interval")]
    pub statistics_interval_secs: u64,

    #[serde(default = "default_comparison_interval")]
    pub comparison_interval_secs: u64,

    #[serde(default)]
    pub statistics_period: Period,

    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: u32,

    #[serde(default = "default_display_leaderboard_limit")]
    pub display_leaderboard_limit: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            overview_interval_secs: default_overview_interval(),
            display_interval_secs: default_display_interval(),
            agents_interval_secs: default_agents_interval(),
            calls_interval_secs: default_calls_interval(),
            leaderboard_interval_secs: default_leaderboard_interval(),
            statistics_interval_secs: default_statistics_interval(),
            comparison_interval_secs: default_comparison_interval(),
            statistics_period: Period::default(),
            leaderboard_limit: default_leaderboard_limit(),
            display_leaderboard_limit: default_display_leaderboard_limit(),
        }
    }
}

impl SurfaceSettings {
    pub fn interval(&self, kind: SurfaceKind) -> Duration {
        let secs = match kind {
            SurfaceKind::Overview => self.overview_interval_secs,
            SurfaceKind::Display => self.display_interval_secs,
            SurfaceKind::Agents => self.agents_interval_secs,
            SurfaceKind::Calls => self.calls_interval_secs,
            SurfaceKind::Leaderboard => self.leaderboard_interval_secs,
            SurfaceKind::Statistics => self.statistics_interval_secs,
            SurfaceKind::Comparison => self.comparison_interval_secs,
        };
        Duration::from_secs(secs.max(1))
    }
}

fn default_api_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_ws_url() -> String {
    "ws://localhost:8080/ws/events".to_string()
}

fn default_language() -> String {
    "tr".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_reconnect_delay_ms() -> u64 {
    3_000
}

fn default_enabled() -> Vec<SurfaceKind> {
    SurfaceKind::ALL.to_vec()
}

fn default_overview_interval() -> u64 {
    30
}

fn default_display_interval() -> u64 {
    5
}

fn default_agents_interval() -> u64 {
    30
}

fn default_calls_interval() -> u64 {
    5
}

fn default_leaderboard_interval() -> u64 {
    60
}

fn default_statistics_interval() -> u64 {
    60
}

fn default_comparison_interval() -> u64 {
    300
}

fn default_leaderboard_limit() -> u32 {
    20
}

fn default_display_leaderboard_limit() -> u32 {
    5
}
