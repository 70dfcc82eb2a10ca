//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Speech engine configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Path to the screening configuration file (YAML)
    #[serde(default = "default_screening_config_path")]
    pub screening_config_path: String,
}

fn default_screening_config_path() -> String {
    "config/screening.yaml".to_string()
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_observability()?;
        self.validate_speech()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        if server.max_audio_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_audio_bytes".to_string(),
                message: "Audio upload limit must be at least 1 byte".to_string(),
            });
        }

        if self.environment.is_production() && server.cors_enabled && server.cors_origins.is_empty()
        {
            tracing::warn!(
                "CORS is enabled in production but no origins are configured. \
                 This may block legitimate requests."
            );
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.as_str();
        if !matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!("Unknown log level '{}'", level),
            });
        }
        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        let speech = &self.speech;

        if speech.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "speech.timeout_seconds".to_string(),
                message: "Timeout must be at least 1 second".to_string(),
            });
        }

        for (field, endpoint) in [
            ("speech.stt_endpoint", &speech.stt_endpoint),
            ("speech.tts_endpoint", &speech.tts_endpoint),
        ] {
            if let Some(url) = endpoint {
                if url.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        message: "Endpoint must not be empty (omit the key to disable)"
                            .to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Largest accepted audio upload after base64 decoding, in bytes
    #[serde(default = "default_max_audio_bytes")]
    pub max_audio_bytes: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_max_audio_bytes() -> usize {
    10 * 1024 * 1024
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            max_audio_bytes: default_max_audio_bytes(),
            cors_enabled: default_true(),
            // Empty by default - must be explicitly configured for production
            cors_origins: Vec::new(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Speech engine configuration
///
/// Both engines are HTTP sidecar services. Leaving an endpoint unset
/// disables that engine: without a transcription endpoint audio
/// requests are rejected, without a synthesis endpoint responses are
/// text-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Transcription (speech-to-text) service base URL
    #[serde(default)]
    pub stt_endpoint: Option<String>,

    /// Synthesis (text-to-speech) service base URL
    #[serde(default)]
    pub tts_endpoint: Option<String>,

    /// Request timeout for both services in seconds
    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u64,
}

fn default_speech_timeout() -> u64 {
    60
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            stt_endpoint: None,
            tts_endpoint: None,
            timeout_seconds: default_speech_timeout(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (MINDCARE__ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::with_name("config/default").required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("MINDCARE")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.screening_config_path, "config/screening.yaml");
        assert!(!settings.environment.is_production());

        // Speech engines are opt-in
        assert!(settings.speech.stt_endpoint.is_none());
        assert!(settings.speech.tts_endpoint.is_none());
        assert_eq!(settings.speech.timeout_seconds, 60);
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();

        settings.server.port = 0;
        assert!(settings.validate().is_err());
        settings.server.port = 8080;

        settings.server.timeout_seconds = 0;
        assert!(settings.validate().is_err());
        settings.server.timeout_seconds = 30;

        settings.server.max_audio_bytes = 0;
        assert!(settings.validate().is_err());
        settings.server.max_audio_bytes = 1024;

        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_log_level_validation() {
        let mut settings = Settings::default();

        settings.observability.log_level = "verbose".to_string();
        assert!(settings.validate().is_err());

        settings.observability.log_level = "debug".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_speech_validation() {
        let mut settings = Settings::default();

        settings.speech.timeout_seconds = 0;
        assert!(settings.validate().is_err());
        settings.speech.timeout_seconds = 60;

        settings.speech.stt_endpoint = Some("  ".to_string());
        assert!(settings.validate().is_err());

        settings.speech.stt_endpoint = Some("http://127.0.0.1:8091".to_string());
        settings.speech.tts_endpoint = Some("http://127.0.0.1:8092".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_from_yaml() {
        let yaml = r#"
environment: production
server:
  port: 9090
  cors_origins: ["https://app.example.com"]
observability:
  log_json: true
speech:
  stt_endpoint: "http://stt.internal:8091"
screening_config_path: "/etc/mindcare/screening.yaml"
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.environment.is_production());
        assert_eq!(settings.server.port, 9090);
        assert!(settings.observability.log_json);
        assert_eq!(
            settings.speech.stt_endpoint.as_deref(),
            Some("http://stt.internal:8091")
        );
        assert!(settings.speech.tts_endpoint.is_none());
        assert_eq!(settings.screening_config_path, "/etc/mindcare/screening.yaml");
    }
}
