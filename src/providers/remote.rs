//! Hugging Face Inference style HTTP backends.
//!
//! Both endpoints take `{"inputs": "<text>"}` and answer with a list of
//! `{label, score}` objects, either flat or nested one level deep (one inner
//! list per input). Every transport, status or decoding failure is surfaced
//! as a collaborator error; nothing is retried.

use super::{EmotionClassifier, SentimentScorer};
use crate::emotion::EmotionScore;
use crate::error::{EngineError, Result};
use crate::mood::SentimentSignal;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
struct LabelScoreWire {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceWire {
    Nested(Vec<Vec<LabelScoreWire>>),
    Flat(Vec<LabelScoreWire>),
}

/// Decode an inference response body into its label/score list.
fn parse_inference_body(body: &str) -> std::result::Result<Vec<LabelScoreWire>, String> {
    let wire: InferenceWire =
        serde_json::from_str(body).map_err(|e| format!("unexpected response body: {e}"))?;
    let scores = match wire {
        InferenceWire::Nested(mut outer) => {
            if outer.is_empty() {
                return Err("empty response".to_owned());
            }
            outer.swap_remove(0)
        }
        InferenceWire::Flat(scores) => scores,
    };
    if scores.is_empty() {
        return Err("response carried no labels".to_owned());
    }
    Ok(scores)
}

struct InferenceEndpoint {
    url: String,
    api_token: Option<String>,
    agent: ureq::Agent,
}

impl InferenceEndpoint {
    fn new(url: String, api_token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            url,
            api_token,
            agent,
        }
    }

    fn infer(&self, text: &str) -> std::result::Result<Vec<LabelScoreWire>, String> {
        let body = serde_json::json!({ "inputs": text }).to_string();
        let mut request = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .set("User-Agent", concat!("solace/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.api_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let resp = request.send_string(&body).map_err(|e| e.to_string())?;
        let body = resp.into_string().map_err(|e| e.to_string())?;
        parse_inference_body(&body)
    }
}

/// Remote text-classification endpoint returning all emotion scores.
pub struct RemoteEmotionClassifier {
    endpoint: InferenceEndpoint,
}

impl RemoteEmotionClassifier {
    pub fn new(url: String, api_token: Option<String>, timeout: Duration) -> Self {
        Self {
            endpoint: InferenceEndpoint::new(url, api_token, timeout),
        }
    }
}

impl EmotionClassifier for RemoteEmotionClassifier {
    fn classify(&self, text: &str) -> Result<Vec<EmotionScore>> {
        let scores = self.endpoint.infer(text).map_err(|e| {
            tracing::warn!(url = %self.endpoint.url, error = %e, "emotion classifier call failed");
            EngineError::Classifier(e)
        })?;
        Ok(scores
            .into_iter()
            .map(|w| EmotionScore::new(w.label.to_lowercase(), w.score))
            .collect())
    }
}

/// Remote sentiment-analysis endpoint.
pub struct RemoteSentimentScorer {
    endpoint: InferenceEndpoint,
}

impl RemoteSentimentScorer {
    pub fn new(url: String, api_token: Option<String>, timeout: Duration) -> Self {
        Self {
            endpoint: InferenceEndpoint::new(url, api_token, timeout),
        }
    }
}

impl SentimentScorer for RemoteSentimentScorer {
    fn score(&self, text: &str) -> Result<SentimentSignal> {
        let scores = self.endpoint.infer(text).map_err(|e| {
            tracing::warn!(url = %self.endpoint.url, error = %e, "sentiment call failed");
            EngineError::Sentiment(e)
        })?;
        top_label(scores)
            .map(|w| SentimentSignal::new(w.label, w.score))
            .ok_or_else(|| EngineError::Sentiment("response carried no labels".to_owned()))
    }
}

fn top_label(scores: Vec<LabelScoreWire>) -> Option<LabelScoreWire> {
    let mut best: Option<LabelScoreWire> = None;
    for s in scores {
        if best.as_ref().is_none_or(|b| s.score > b.score) {
            best = Some(s);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_nested_body() {
        let body = r#"[[{"label":"joy","score":0.9},{"label":"sadness","score":0.05}]]"#;
        let scores = parse_inference_body(body).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].label, "joy");
    }

    #[test]
    fn parses_flat_body() {
        let body = r#"[{"label":"POSITIVE","score":0.98}]"#;
        let scores = parse_inference_body(body).unwrap();
        assert_eq!(scores[0].label, "POSITIVE");
    }

    #[test]
    fn rejects_error_object_and_empty_lists() {
        assert!(parse_inference_body(r#"{"error":"model loading"}"#).is_err());
        assert!(parse_inference_body("[]").is_err());
        assert!(parse_inference_body("[[]]").is_err());
    }

    #[test]
    fn top_label_prefers_first_on_tie() {
        let scores = vec![
            LabelScoreWire {
                label: "NEGATIVE".into(),
                score: 0.5,
            },
            LabelScoreWire {
                label: "POSITIVE".into(),
                score: 0.5,
            },
        ];
        assert_eq!(top_label(scores).unwrap().label, "NEGATIVE");
    }

    #[test]
    fn unreachable_endpoint_is_collaborator_failure() {
        let classifier = RemoteEmotionClassifier::new(
            "http://127.0.0.1:1/emotion".into(),
            None,
            Duration::from_millis(200),
        );
        let err = classifier.classify("hello").unwrap_err();
        assert!(err.is_collaborator_failure());
        assert!(matches!(err, EngineError::Classifier(_)));
    }
}
