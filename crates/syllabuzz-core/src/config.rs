use crate::error::{ClientError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Runtime configuration of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base API origin, e.g. `http://127.0.0.1:5000/api`
    pub api_url: String,
    pub timeout_secs: u64,
    /// Overrides the data directory; `None` resolves through `SYLLABUZZ_DIR` or `~/.syllabuzz`.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Debug, Deserialize)]
struct ApiSection {
    #[serde(default = "default_api_url")]
    url: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct StorageSection {
    #[serde(default)]
    dir: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load from the first config file found, else from the environment.
    pub fn load() -> Result<Self> {
        if let Some(file_config) = load_from_file()? {
            return Ok(file_config.into());
        }

        Ok(Self::from_env())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let parsed: FileConfig = toml::from_str(contents)
            .map_err(|err| ClientError::Config(format!("Failed to parse config: {err}")))?;
        Ok(parsed.into())
    }

    fn from_env() -> Self {
        let api_url = env::var("SYLLABUZZ_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(default_api_url);
        let timeout_secs = env::var("SYLLABUZZ_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or_else(default_timeout_secs);
        let data_dir = env::var("SYLLABUZZ_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            api_url,
            timeout_secs,
            data_dir,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Parse the API origin. Trailing slashes are dropped so paths can be appended.
    pub fn base_url(&self) -> Result<Url> {
        let trimmed = self.api_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|err| {
            ClientError::Config(format!("Invalid API url '{}': {err}", self.api_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "Unsupported API url scheme '{}'",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Directory holding the database and logs.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => syllabuzz_storage::paths::resolve_syllabuzz_dir()
                .map_err(|err| ClientError::Config(err.to_string())),
        }
    }
}

impl From<FileConfig> for ClientConfig {
    fn from(file_config: FileConfig) -> Self {
        Self {
            api_url: file_config.api.url,
            timeout_secs: file_config.api.timeout_secs,
            data_dir: file_config.storage.dir,
        }
    }
}

fn load_from_file() -> Result<Option<FileConfig>> {
    let path = if let Ok(path) = env::var("SYLLABUZZ_CONFIG") {
        Some(PathBuf::from(path))
    } else if Path::new("syllabuzz.toml").exists() {
        Some(PathBuf::from("syllabuzz.toml"))
    } else {
        syllabuzz_storage::paths::config_path()
            .ok()
            .filter(|path| path.exists())
    };

    let Some(path) = path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path).map_err(|err| {
        ClientError::Config(format!("Failed to read config {}: {err}", path.display()))
    })?;
    let parsed: FileConfig = toml::from_str(&contents).map_err(|err| {
        ClientError::Config(format!("Failed to parse config {}: {err}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "Loaded client config");
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            [storage]
            dir = "/tmp/syllabuzz"
            "#,
        )
        .unwrap();
        assert_eq!(config.api_url, default_api_url());
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/syllabuzz")));
    }

    #[test]
    fn test_full_file() {
        let config = ClientConfig::from_toml_str(
            r#"
            [api]
            url = "https://syllabuzz.example.com/api/"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://syllabuzz.example.com/api"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        let config = ClientConfig::default().with_api_url("not a url");
        assert!(matches!(config.base_url(), Err(ClientError::Config(_))));

        let config = ClientConfig::default().with_api_url("ftp://example.com");
        assert!(matches!(config.base_url(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            ClientConfig::from_toml_str("[api\nurl ="),
            Err(ClientError::Config(_))
        ));
    }
}
