//! Integration tests for configuration files and template documents on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use solace::choice::FixedChoice;
use solace::config::{ClassifierBackend, CrisisMatchMode};
use solace::templates::default_templates;
use solace::{EngineConfig, EngineError, ResponseEngine, ResponseTemplates};

const CUSTOM_TEMPLATES: &str = r#"{
  "emotions": {
    "joy": ["Lovely to hear."],
    "sadness": ["That sounds heavy."]
  },
  "greetings": ["Hey, good to see you."],
  "crisis": ["Please reach out to Samaritans on 116 123, any time."],
  "coping_suggestions": {
    "sadness": ["A glass of water and a short walk can help."]
  }
}"#;

#[test]
fn config_file_points_engine_at_template_document() {
    let dir = tempfile::tempdir().unwrap();
    let templates_path = dir.path().join("responses.json");
    std::fs::write(&templates_path, CUSTOM_TEMPLATES).unwrap();

    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[templates]
path = "{}"

[crisis]
keywords = ["can't go on"]
match_mode = "token"
resource = "116 123"
"#,
            templates_path.display()
        ),
    )
    .unwrap();

    let config = EngineConfig::from_file(&config_path).unwrap();
    assert_eq!(config.crisis.match_mode, CrisisMatchMode::Token);
    assert_eq!(config.classifier.backend, ClassifierBackend::Heuristic);

    let engine = ResponseEngine::builder()
        .config(config)
        .chooser(FixedChoice(0))
        .build()
        .unwrap();
    assert_eq!(engine.greeting().unwrap(), "Hey, good to see you.");

    let reply = engine.generate_response("I just can't go on").unwrap();
    assert!(reply.is_crisis);
    assert!(reply.response.contains("116 123"));

    let reply = engine.generate_response("I'm so sad and lonely").unwrap();
    assert_eq!(
        reply.response,
        "That sounds heavy.\n\nA glass of water and a short walk can help."
    );
}

#[test]
fn missing_template_document_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = EngineConfig::default();
    config.templates.path = Some(dir.path().join("does-not-exist.json"));

    let engine = ResponseEngine::from_config(config).unwrap();
    assert_eq!(*engine.templates().unwrap(), default_templates());
}

#[test]
fn malformed_template_document_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("responses.json");
    std::fs::write(&path, r#"{"emotions": {"joy": "not a list"}}"#).unwrap();

    let mut config = EngineConfig::default();
    config.templates.path = Some(path);
    match ResponseEngine::from_config(config) {
        Err(EngineError::Config(_)) => {}
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn template_document_without_resource_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("responses.json");
    std::fs::write(&path, CUSTOM_TEMPLATES).unwrap();

    // Default resource is 988, which the custom crisis lines do not mention.
    let mut config = EngineConfig::default();
    config.templates.path = Some(path);
    assert!(ResponseEngine::from_config(config).is_err());
}

#[test]
fn exported_history_is_valid_json() {
    let engine = ResponseEngine::builder()
        .templates(ResponseTemplates::from_json(CUSTOM_TEMPLATES).unwrap())
        .config({
            let mut c = EngineConfig::default();
            c.crisis.resource = "116 123".into();
            c
        })
        .build()
        .unwrap();
    engine.generate_response("hello").unwrap();
    engine.generate_response("I want to end it all").unwrap();

    let json = engine.history_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let turns = value.as_array().unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1]["is_crisis"], serde_json::Value::Bool(true));
    assert!(turns[0]["timestamp"].is_string());
}
