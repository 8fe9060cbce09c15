use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pamphlet.config.json";

/// Pamphlet configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON file holding every project
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Base URL share links point at
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Pointer travel before a press becomes a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,

    #[serde(default)]
    pub enhancer: EnhancerConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_store_path() -> String {
    ".pamphlet/projects.json".to_string()
}

fn default_share_base_url() -> String {
    "http://localhost:3030".to_string()
}

fn default_drag_threshold() -> f64 {
    pamphlet_editor::DEFAULT_DRAG_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancerConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    pamphlet_enhance::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    pamphlet_enhance::DEFAULT_API_KEY_ENV.to_string()
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the project store
    pub fn get_store_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            share_base_url: default_share_base_url(),
            drag_threshold: default_drag_threshold(),
            enhancer: EnhancerConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storePath": "data/pages.json",
            "shareBaseUrl": "https://pages.example.org",
            "dragThreshold": 4,
            "enhancer": { "apiKeyEnv": "GEMINI_KEY" },
            "server": { "port": 8080 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_path, "data/pages.json");
        assert_eq!(config.share_base_url, "https://pages.example.org");
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(config.enhancer.api_key_env, "GEMINI_KEY");
        assert_eq!(config.enhancer.model, "gemini-2.5-flash");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store_path, ".pamphlet/projects.json");
        assert_eq!(config.drag_threshold, 8.0);
    }

    #[test]
    fn test_load_missing_and_present() {
        let dir = tempfile::TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        assert_eq!(Config::load(&cwd).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "shareBaseUrl": "https://x.org" }"#).unwrap();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.share_base_url, "https://x.org");
        assert_eq!(config.get_store_path(&cwd), dir.path().join(".pamphlet/projects.json"));
    }
}
