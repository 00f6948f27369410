use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, RotaError};

/// Top-level configuration for the Rota application.
///
/// Loaded from `rota.toml` by default. Each section corresponds to a
/// subsystem; all fields have defaults so a partial file is enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl RotaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RotaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| RotaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3040,
        }
    }
}

/// HR assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Whether the assistant endpoint is enabled.
    pub enabled: bool,
    /// Maximum accepted query length in characters.
    pub max_query_length: usize,
    /// Remote text-generation service settings.
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_query_length: 2000,
            remote: RemoteConfig::default(),
        }
    }
}

/// Remote grounded-generation service settings.
///
/// The credential is carried here and handed to the remote strategy's
/// constructor; business logic never reads the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// OpenAI-compatible chat-completions endpoint.
    pub api_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Bearer credential. When absent the remote strategy is skipped
    /// entirely and answers come from the local renderer.
    pub api_key: Option<String>,
    /// Sampling temperature. Kept low to bias toward factual phrasing.
    pub temperature: f32,
    /// Maximum completion length in tokens.
    pub max_tokens: u32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            api_key: None,
            temperature: 0.3,
            max_tokens: 1024,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = RotaConfig::default();
        assert_eq!(config.general.data_dir, "./data");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.port, 3040);
        assert!(config.assistant.enabled);
        assert_eq!(config.assistant.max_query_length, 2000);
        assert!(config.assistant.remote.api_key.is_none());
        assert_eq!(config.assistant.remote.model, "llama-3.1-8b-instant");
        assert!((config.assistant.remote.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.assistant.remote.max_tokens, 1024);
        assert_eq!(config.assistant.remote.timeout_secs, 30);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
data_dir = "/var/lib/rota"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080

[assistant]
enabled = true
max_query_length = 500

[assistant.remote]
api_url = "http://localhost:11434/v1/chat/completions"
model = "llama3.2"
api_key = "secret"
temperature = 0.1
max_tokens = 256
timeout_secs = 10
"#;
        let file = create_temp_config(content);
        let config = RotaConfig::load(file.path()).unwrap();
        assert_eq!(config.general.data_dir, "/var/lib/rota");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.assistant.max_query_length, 500);
        assert_eq!(config.assistant.remote.api_key.as_deref(), Some("secret"));
        assert_eq!(config.assistant.remote.timeout_secs, 10);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[general]
log_level = "warn"
"#;
        let file = create_temp_config(content);
        let config = RotaConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.data_dir, "./data");
        assert_eq!(config.server.port, 3040);
        assert!(config.assistant.enabled);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = RotaConfig::load_or_default(Path::new("/nonexistent/rota.toml"));
        assert_eq!(config.general.data_dir, "./data");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is {{ not TOML");
        assert!(RotaConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("rota.toml");

        let mut config = RotaConfig::default();
        config.assistant.remote.api_key = Some("k".to_string());
        config.save(&path).unwrap();

        let reloaded = RotaConfig::load(&path).unwrap();
        assert_eq!(reloaded.assistant.remote.api_key.as_deref(), Some("k"));
        assert_eq!(reloaded.server.port, config.server.port);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = RotaConfig::load(file.path()).unwrap();
        assert_eq!(config.assistant.max_query_length, 2000);
        assert!(config.assistant.remote.api_key.is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = RotaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: RotaConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.general.log_level, config.general.log_level);
        assert_eq!(back.assistant.remote.model, config.assistant.remote.model);
    }
}
