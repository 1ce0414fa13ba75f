use crate::{TrelloError, TrelloResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_HTTP_SERVER_PORT: u16 = 8000;
const DEFAULT_DOWNLOAD_CONCURRENCY: usize = 4;
const OUTPUT_DIR_NAME: &str = "trello-backup-output";
const TITLE_CACHE_FILE_NAME: &str = "webpage_title_cache";

pub const ENV_API_KEY: &str = "TRELLO_API_KEY";
pub const ENV_TOKEN: &str = "TRELLO_TOKEN";
pub const ENV_OUTPUT_DIR: &str = "TRELLO_BACKUP_OUTPUT_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    /// Organization whose boards are listed. Without it, the member's boards are used.
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub http_server_port: Option<u16>,
    #[serde(default)]
    pub download_concurrency: Option<usize>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/trello-backup/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("trello-backup/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("trello-backup\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Loads the config file and applies environment overrides.
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let mut config: Self = Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();
        config.apply_env_overrides();
        config
    }

    /// Loads an explicitly chosen config file. Unlike [`load`](Self::load),
    /// a missing or invalid file is an error.
    pub fn load_from(path: &Path) -> TrelloResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrelloError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> TrelloResult<Self> {
        toml::from_str(content).map_err(|e| TrelloError::Config(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Ok(dir) = std::env::var(ENV_OUTPUT_DIR) {
            self.output_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns `(api_key, token)` or a config error naming what is missing.
    pub fn credentials(&self) -> TrelloResult<(&str, &str)> {
        let key = self.api_key.as_deref().filter(|s| !s.is_empty());
        let token = self.token.as_deref().filter(|s| !s.is_empty());
        match (key, token) {
            (Some(key), Some(token)) => Ok((key, token)),
            _ => Err(TrelloError::Config(format!(
                "Undefined value for config: {} (set it in {} or via {}/{})",
                [("api_key", key.is_none()), ("token", token.is_none())]
                    .iter()
                    .filter(|(_, missing)| *missing)
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "config.toml".to_string()),
                ENV_API_KEY,
                ENV_TOKEN
            ))),
        }
    }

    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(OUTPUT_DIR_NAME)
        })
    }

    pub fn attachments_dir(&self) -> PathBuf {
        self.effective_output_dir().join("attachments")
    }

    pub fn title_cache_path(&self) -> PathBuf {
        self.effective_output_dir().join(TITLE_CACHE_FILE_NAME)
    }

    pub fn effective_http_server_port(&self) -> u16 {
        self.http_server_port.unwrap_or(DEFAULT_HTTP_SERVER_PORT)
    }

    pub fn effective_download_concurrency(&self) -> usize {
        self.download_concurrency
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_DOWNLOAD_CONCURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_http_server_port(), 8000);
        assert_eq!(config.effective_download_concurrency(), 4);
        assert!(config
            .title_cache_path()
            .ends_with("trello-backup-output/webpage_title_cache"));
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            api_key = "key"
            token = "tok"
            output_dir = "/tmp/out"
            download_concurrency = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.credentials().unwrap(), ("key", "tok"));
        assert_eq!(config.attachments_dir(), PathBuf::from("/tmp/out/attachments"));
        // zero falls back to the default width
        assert_eq!(config.effective_download_concurrency(), 4);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = AppConfig::from_toml_str("serve_attachments = true\nhttp_server_port = 9001\n")
            .unwrap();
        assert_eq!(config.effective_http_server_port(), 9001);
    }

    #[test]
    fn test_missing_credentials() {
        let config = AppConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let err = config.credentials().unwrap_err().to_string();
        assert!(err.contains("token"));
        assert!(!err.contains("api_key"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, TrelloError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "organization_id = \"org\"\nhttp_server_port = 9000\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.organization_id.as_deref(), Some("org"));
        assert_eq!(config.effective_http_server_port(), 9000);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AppConfig::from_toml_str("http_server_port = \"maybe\"").is_err());
    }
}
