use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config/knowledge_base.json";

pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful AI assistant for a knowledge base system. Provide clear, concise, and accurate answers to help users with their questions.";
pub const DEFAULT_GREETING: &str =
    "Hi! I'm your knowledge base assistant. How can I help you today?";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assistant: AssistantConfig,
    pub storage: StorageConfig,
}

/// Hosted assistant settings. The API key stays optional so a missing key
/// only fails the first request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub instructions: String,
    pub title: String,
    pub greeting: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            title: "Knowledge Base Assistant".to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

/// Object store settings, all resolved lazily on first upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Loads the JSON config file, then lets environment variables override it.
pub fn load_config(path: &str) -> AppConfig {
    let mut config = match read_config_file(Path::new(path)) {
        Ok(config) => config,
        Err(ConfigError::Io(err)) => {
            log::info!("Config file {path} not found ({err}); using defaults");
            AppConfig::default()
        }
        Err(err) => {
            log::warn!("Failed to load config file {path}: {err}");
            AppConfig::default()
        }
    };
    apply_overrides(&mut config, |key| env::var(key).ok());
    config
}

pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(key) = lookup("ASSISTANT_API_KEY") {
        config.assistant.api_key = Some(key);
    }
    if let Some(url) = lookup("ASSISTANT_BASE_URL") {
        config.assistant.base_url = url;
    }
    if let Some(model) = lookup("ASSISTANT_MODEL") {
        config.assistant.model = model;
    }

    let storage = &mut config.storage;
    for (key, slot) in [
        ("AWS_REGION", &mut storage.region),
        ("S3_BUCKET_NAME", &mut storage.bucket),
        ("AWS_ACCESS_KEY_ID", &mut storage.access_key_id),
        ("AWS_SECRET_ACCESS_KEY", &mut storage.secret_access_key),
        ("S3_ENDPOINT_URL", &mut storage.endpoint_url),
    ] {
        if let Some(value) = lookup(key) {
            *slot = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(read_config_file(&path), Err(ConfigError::Io(_))));

        let config = load_config(path.to_str().unwrap());
        assert_eq!(config.assistant.model, "gpt-4o-mini");
        assert_eq!(config.assistant.instructions, DEFAULT_INSTRUCTIONS);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "assistant": {{ "model": "gpt-4o" }}, "storage": {{ "bucket": "kb-files" }} }}"#
        )
        .unwrap();

        let config = read_config_file(file.path()).unwrap();
        assert_eq!(config.assistant.model, "gpt-4o");
        assert_eq!(config.assistant.greeting, DEFAULT_GREETING);
        assert_eq!(config.storage.bucket.as_deref(), Some("kb-files"));
        assert!(config.storage.region.is_none());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            read_config_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("ASSISTANT_API_KEY", "sk-test"),
            ("AWS_REGION", "eu-west-1"),
            ("S3_BUCKET_NAME", "kb-uploads"),
            ("S3_ENDPOINT_URL", "  "),
        ]);
        let mut config = AppConfig::default();
        config.storage.bucket = Some("from-file".into());

        apply_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.assistant.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.storage.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.storage.bucket.as_deref(), Some("kb-uploads"));
        assert!(config.storage.endpoint_url.is_none());
    }
}
