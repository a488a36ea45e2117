use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "WINDINGROAD_API_URL";
pub const NAVER_CLIENT_ID_ENV: &str = "NAVER_CLIENT_ID";
pub const NAVER_CLIENT_SECRET_ENV: &str = "NAVER_CLIENT_SECRET";

fn default_api_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_attempts() -> u32 {
    3
}
fn default_image_dir() -> PathBuf {
    PathBuf::from("public/images/courses")
}
fn default_static_map_url() -> String {
    "https://maps.apigw.ntruss.com/map-static/v2/raster".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FileConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total request attempts, including the first; 3 means up to two retries
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Local catalog directory, used instead of the API when set
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    #[serde(default)]
    pub static_map: StaticMapConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            data_dir: None,
            image_dir: default_image_dir(),
            static_map: StaticMapConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticMapConfig {
    #[serde(default = "default_static_map_url")]
    pub url: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl Default for StaticMapConfig {
    fn default() -> Self {
        Self {
            url: default_static_map_url(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

impl StaticMapConfig {
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl FileConfig {
    /// Search the usual locations, falling back to defaults
    pub fn load() -> Self {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        Self::default()
    }

    /// Load an explicitly requested config file; a missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Apply environment overrides read through `var`
    pub fn with_env<F>(mut self, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.is_empty());

        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(id) = non_empty(NAVER_CLIENT_ID_ENV) {
            self.static_map.client_id = id;
        }
        if let Some(secret) = non_empty(NAVER_CLIENT_SECRET_ENV) {
            self.static_map.client_secret = secret;
        }
        self
    }

    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("windingroad.toml"));
    paths.push(PathBuf::from(".windingroad.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("windingroad").join("config.toml"));
        paths.push(config_dir.join("windingroad.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".windingroad.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.image_dir, PathBuf::from("public/images/courses"));
        assert!(config.data_dir.is_none());
        assert!(!config.static_map.has_credentials());
    }

    #[test]
    fn test_parse_full_file() {
        let config: FileConfig = toml::from_str(
            r#"
            api_url = "https://roads.example.com/api"
            max_attempts = 1
            data_dir = "data"

            [static_map]
            client_id = "id"
            client_secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://roads.example.com/api");
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.data_dir, Some(PathBuf::from("data")));
        assert!(config.static_map.has_credentials());
        assert_eq!(
            config.static_map.url,
            "https://maps.apigw.ntruss.com/map-static/v2/raster"
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (API_URL_ENV, "http://10.0.0.2:8080/api"),
            (NAVER_CLIENT_ID_ENV, "env-id"),
            (NAVER_CLIENT_SECRET_ENV, ""),
        ]
        .into_iter()
        .collect();

        let mut base = FileConfig::default();
        base.static_map.client_secret = "file-secret".to_string();

        let config = base.with_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_url, "http://10.0.0.2:8080/api");
        assert_eq!(config.static_map.client_id, "env-id");
        // empty values do not clobber the file
        assert_eq!(config.static_map.client_secret, "file-secret");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        assert!(FileConfig::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("windingroad.toml");
        std::fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.timeout_secs, 5);
    }
}
