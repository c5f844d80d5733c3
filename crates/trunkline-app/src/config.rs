//! Application configuration loading from file and environment
//! variables.

use serde::Deserialize;
use thiserror::Error;
use trunkline_engine::EngineConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Flow-definition source settings.
    #[serde(default)]
    pub flow: FlowConfig,

    /// Flow-execution engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Prompt-rendering settings.
    #[serde(default)]
    pub tts: TtsConfig,
}

/// Where the flow definition is read from.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Path to the JSON flow document. A missing or invalid file falls
    /// back to the built-in default flow.
    #[serde(default = "default_flow_path")]
    pub path: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "trunkline_engine=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Which synthesis strategy renders prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsBackend {
    /// Deterministic `tts://` URIs resolved by the media server.
    #[default]
    Static,
    /// Native synthesis via espeak-ng.
    Espeak,
    /// Cloud synthesis over HTTP.
    Http,
}

/// Prompt-rendering configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TtsConfig {
    #[serde(default)]
    pub backend: TtsBackend,

    /// Synthesis endpoint URL, required for the `http` backend.
    #[serde(default)]
    pub endpoint: String,
}

fn default_flow_path() -> String {
    "/etc/trunkline/flows.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            path: default_flow_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `TRUNKLINE_FLOW_PATH` overrides `flow.path`
/// - `TRUNKLINE_LOG_LEVEL` overrides `logging.level`
/// - `TRUNKLINE_LOG_JSON` overrides `logging.json` (set to "true")
/// - `TRUNKLINE_TTS_ENDPOINT` overrides `tts.endpoint`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or
/// parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(flow_path) = std::env::var("TRUNKLINE_FLOW_PATH") {
        config.flow.path = flow_path;
    }
    if let Ok(level) = std::env::var("TRUNKLINE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("TRUNKLINE_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(endpoint) = std::env::var("TRUNKLINE_TTS_ENDPOINT") {
        config.tts.endpoint = endpoint;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_path_given() {
        let config = load_config(None).expect("defaults should load");
        assert_eq!(config.engine.initial_node, "main_menu");
        assert_eq!(config.tts.backend, TtsBackend::Static);
    }

    #[test]
    fn parses_a_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "[flow]\npath = \"flows/office.json\"\n\n[engine]\nmax_iterations = 10\n\n[tts]\nbackend = \"espeak\"\n"
        )
        .expect("write config");

        let config = load_config(file.path().to_str()).expect("config should parse");
        assert_eq!(config.flow.path, "flows/office.json");
        assert_eq!(config.engine.max_iterations, 10);
        // Untouched sections keep their defaults.
        assert_eq!(config.engine.digit_count, 1);
        assert_eq!(config.tts.backend, TtsBackend::Espeak);
    }
}
