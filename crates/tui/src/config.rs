use anyhow::{Context, Result};
use directories::UserDirs;
use lebenslauf_licht_backend::api::{parse_base_url, DEFAULT_BASE_URL};
use lebenslauf_licht_backend::ClientSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "LEBENSLAUF_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub health_interval_secs: u64,
    pub health_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Where generated PDFs are saved. Defaults to the user's download folder.
    pub directory: Option<PathBuf>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            health_interval_secs: 5,
            health_timeout_secs: 3,
            request_timeout_secs: 120,
            connect_timeout_secs: 5,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Using default config: {:#}", e);
                }
                Self::default()
            }
        }
    }

    /// Loads `.env` if present, then applies environment overrides.
    pub fn apply_env_overrides(&mut self) {
        dotenvy::dotenv().ok();
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.backend.base_url = url.trim().to_string();
        }
    }

    pub fn client_settings(&self) -> Result<ClientSettings> {
        let base_url = parse_base_url(&self.backend.base_url)
            .with_context(|| format!("Check [backend] base_url or {API_URL_ENV}"))?;
        Ok(ClientSettings {
            base_url,
            request_timeout: Duration::from_secs(self.backend.request_timeout_secs.max(1)),
            connect_timeout: Duration::from_secs(self.backend.connect_timeout_secs.max(1)),
            health_timeout: Duration::from_secs(self.backend.health_timeout_secs.max(1)),
        })
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.backend.health_interval_secs.max(1))
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download
            .directory
            .clone()
            .or_else(|| UserDirs::new().and_then(|d| d.download_dir().map(Path::to_path_buf)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_to_local_backend() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8001");
        assert_eq!(config.health_interval(), Duration::from_secs(5));

        let settings = config.client_settings().expect("default settings are valid");
        assert_eq!(settings.base_url.as_str(), "http://localhost:8001/");
        assert_eq!(settings.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config: Config = toml::from_str(
            r#"
            [backend]
            base_url = "https://cv.example.org"

            [download]
            directory = "/tmp/cvs"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.backend.base_url, "https://cv.example.org");
        assert_eq!(config.backend.health_interval_secs, 5);
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/cvs"));
    }

    #[test]
    fn env_override_replaces_base_url() {
        let mut config = Config::default();
        config.apply_overrides_from(|key| {
            (key == API_URL_ENV).then(|| " http://backend:9000 ".to_string())
        });
        assert_eq!(config.backend.base_url, "http://backend:9000");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides_from(|_| Some("   ".to_string()));
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut config = Config::default();
        config.backend.base_url = "localhost:8001".to_string();
        assert!(config.client_settings().is_err());
    }

    #[test]
    fn zero_intervals_are_clamped() {
        let mut config = Config::default();
        config.backend.health_interval_secs = 0;
        config.backend.request_timeout_secs = 0;
        assert_eq!(config.health_interval(), Duration::from_secs(1));
        assert_eq!(
            config.client_settings().expect("valid").request_timeout,
            Duration::from_secs(1)
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_or_default(&dir.path().join("config.toml"));
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }
}
