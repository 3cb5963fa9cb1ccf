use std::path::Path;

use tokio::fs;
use tracing::{info, warn};

use crate::types::DashboardError;

use super::{paths, Config};

const API_URL_ENV: &str = "CALLBOARD_API_URL";
const WS_URL_ENV: &str = "CALLBOARD_WS_URL";
const LANGUAGE_ENV: &str = "CALLBOARD_LANGUAGE";

impl Config {
    /// Load configuration from config.json and the environment
    /// Falls back to defaults if the file doesn't exist or can't be parsed
    pub async fn load() -> Self {
        let mut config = match Self::try_load().await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = ?err, "Failed to load config.json, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        info!(
            api = %config.api_url,
            ws = %config.ws_url,
            surfaces = config.surfaces.enabled.len(),
            "Loaded configuration"
        );
        config
    }

    async fn try_load() -> Result<Self, DashboardError> {
        let config_path = paths::get_config_path()?;
        Self::load_from(&config_path).await
    }

    /// Read a config file, treating a missing file as "all defaults".
    pub async fn load_from(path: &Path) -> Result<Self, DashboardError> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .await
            .map_err(|err| DashboardError::Config(format!("Failed to read config file: {err}")))?;

        serde_json::from_str(&contents)
            .map_err(|err| DashboardError::Config(format!("Failed to parse config.json: {err}")))
    }

    /// Apply `CALLBOARD_*` overrides; blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(url) = read(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(url) = read(WS_URL_ENV) {
            self.ws_url = url;
        }
        if let Some(language) = read(LANGUAGE_ENV) {
            self.language = language;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::SurfaceKind;
    use crate::dashboard_client::Period;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"))
            .await
            .unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "http://localhost:8080/api/v1");
        assert_eq!(config.ws_url, "ws://localhost:8080/ws/events");
        assert_eq!(config.reconnect_delay(), Duration::from_secs(3));
        assert_eq!(config.surfaces.enabled.len(), SurfaceKind::ALL.len());
    }

    #[tokio::test]
    async fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "api_url": "http://pbx.local/api/v1",
                "surfaces": {{ "enabled": ["display"], "statistics_period": "last30days" }}
            }}"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).await.unwrap();

        assert_eq!(config.api_url, "http://pbx.local/api/v1");
        assert_eq!(config.ws_url, "ws://localhost:8080/ws/events");
        assert_eq!(config.surfaces.enabled, vec![SurfaceKind::Display]);
        assert_eq!(config.surfaces.statistics_period, Period::Last30Days);
        assert_eq!(config.surfaces.calls_interval_secs, 5);
    }

    #[tokio::test]
    async fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::load_from(file.path()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn env_overrides_replace_urls_and_skip_blanks() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CALLBOARD_API_URL", "https://calls.example.com/api/v1"),
            ("CALLBOARD_WS_URL", "   "),
            ("CALLBOARD_LANGUAGE", "de"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "https://calls.example.com/api/v1");
        assert_eq!(config.ws_url, "ws://localhost:8080/ws/events");
        assert_eq!(config.language, "de");
    }

    #[test]
    fn zero_reconnect_delay_is_raised_to_floor() {
        let config = Config {
            reconnect_delay_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.reconnect_delay(), Duration::from_millis(250));

        let config = Config {
            reconnect_delay_ms: 1_500,
            ..Config::default()
        };
        assert_eq!(config.reconnect_delay(), Duration::from_millis(1_500));
    }

    #[test]
    fn surface_intervals_never_drop_to_zero() {
        let mut settings = crate::config::SurfaceSettings::default();
        settings.calls_interval_secs = 0;
        assert_eq!(settings.interval(SurfaceKind::Calls), Duration::from_secs(1));
        assert_eq!(
            settings.interval(SurfaceKind::Overview),
            Duration::from_secs(30)
        );
    }
}
