//! Configuration types for the response engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Response template source.
    pub templates: TemplatesConfig,
    /// Crisis phrase detection.
    pub crisis: CrisisConfig,
    /// Emotion classifier and sentiment signal backends.
    pub classifier: ClassifierConfig,
}

/// Where response templates come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// JSON template document. `None` (or a path that does not exist) means
    /// the built-in defaults.
    pub path: Option<PathBuf>,
}

/// How crisis phrases are matched against an utterance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisMatchMode {
    /// Case-insensitive substring match on the whole utterance.
    #[default]
    Substring,
    /// Case-insensitive match on whole-word token sequences.
    Token,
}

/// Crisis phrase detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrisisConfig {
    /// High-risk phrases. Any match routes the turn to the crisis path.
    pub keywords: Vec<String>,
    /// Matching granularity.
    pub match_mode: CrisisMatchMode,
    /// Human-reachable resource identifier (e.g. a hotline number) that every
    /// crisis response must mention.
    pub resource: String,
}

impl Default for CrisisConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "suicide",
                "suicidal",
                "kill myself",
                "end it all",
                "end my life",
                "want to die",
                "better off dead",
                "no reason to live",
                "hurt myself",
                "self harm",
                "self-harm",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            match_mode: CrisisMatchMode::Substring,
            resource: "988".to_owned(),
        }
    }
}

/// Which emotion/sentiment backend to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Offline keyword heuristics bundled with the crate.
    #[default]
    Heuristic,
    /// Hugging Face Inference style HTTP endpoints.
    Remote,
}

/// Classifier backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub backend: ClassifierBackend,
    /// Text-classification endpoint returning a label/score distribution.
    pub emotion_url: Option<String>,
    /// Sentiment-analysis endpoint returning POSITIVE/NEGATIVE.
    pub sentiment_url: Option<String>,
    /// Bearer token sent to both endpoints, if set.
    pub api_token: Option<String>,
    /// Connect/read timeout for remote calls.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::Heuristic,
            emotion_url: None,
            sentiment_url: None,
            api_token: None,
            timeout_secs: 20,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::EngineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/solace/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("solace").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("solace")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/solace-config/config.toml")
        }
    }

    /// Check cross-field invariants that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`](crate::error::EngineError::Config) naming
    /// the first offending field.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::EngineError;

        if self.crisis.keywords.is_empty() {
            return Err(EngineError::Config(
                "crisis.keywords must not be empty".to_owned(),
            ));
        }
        if self.crisis.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(EngineError::Config(
                "crisis.keywords contains a blank phrase".to_owned(),
            ));
        }
        if self.crisis.resource.trim().is_empty() {
            return Err(EngineError::Config(
                "crisis.resource must not be empty".to_owned(),
            ));
        }
        if self.classifier.timeout_secs == 0 {
            return Err(EngineError::Config(
                "classifier.timeout_secs must be positive".to_owned(),
            ));
        }
        if self.classifier.backend == ClassifierBackend::Remote
            && (self.classifier.emotion_url.is_none() || self.classifier.sentiment_url.is_none())
        {
            return Err(EngineError::Config(
                "remote classifier backend requires emotion_url and sentiment_url".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.crisis.keywords.is_empty());
        assert_eq!(config.crisis.resource, "988");
        assert_eq!(config.classifier.backend, ClassifierBackend::Heuristic);
        assert!(config.templates.path.is_none());
    }

    #[test]
    fn default_config_path_ends_with_config_toml() {
        let path = EngineConfig::default_config_path();
        let path_str = path.to_string_lossy();
        assert!(path_str.ends_with("config.toml"));
        assert!(path_str.contains("solace"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            [crisis]
            match_mode = "token"
            "#,
        )
        .unwrap();
        assert_eq!(config.crisis.match_mode, CrisisMatchMode::Token);
        assert_eq!(config.crisis.resource, "988");
        assert_eq!(config.classifier.timeout_secs, 20);
    }

    #[test]
    fn remote_backend_without_urls_is_rejected() {
        let mut config = EngineConfig::default();
        config.classifier.backend = ClassifierBackend::Remote;
        config.classifier.emotion_url = Some("http://localhost:9000/emotion".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sentiment_url"));
    }

    #[test]
    fn blank_crisis_keyword_is_rejected() {
        let mut config = EngineConfig::default();
        config.crisis.keywords.push("   ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_resource_is_rejected() {
        let mut config = EngineConfig::default();
        config.crisis.resource = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = EngineConfig::default();
        config.crisis.resource = "116 123".into();
        config.templates.path = Some(PathBuf::from("/etc/solace/responses.json"));
        config.save_to_file(&path).unwrap();

        let loaded = EngineConfig::from_file(&path).unwrap();
        assert_eq!(loaded.crisis.resource, "116 123");
        assert_eq!(
            loaded.templates.path.as_deref(),
            Some(std::path::Path::new("/etc/solace/responses.json"))
        );
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[crisis\nkeywords = 3").unwrap();
        match EngineConfig::from_file(&path) {
            Err(crate::error::EngineError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
