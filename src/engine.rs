//! The response engine: one instance owns templates, history and profile.
//!
//! A turn runs four blocking collaborator calls (classifier, tokenizer,
//! sentiment, crisis scan), then the in-process selection policy, then one
//! history append. All methods take `&self`, so an engine can sit behind an
//! `Arc` and serve concurrent callers: template reads are snapshots and
//! history appends are serialised by a mutex.

use crate::choice::{ChoiceSource, ThreadRngChoice};
use crate::config::EngineConfig;
use crate::crisis::CrisisDetector;
use crate::emotion::{EmotionAnalysis, EmotionRecognizer};
use crate::error::{EngineError, Result};
use crate::history::{ConversationHistory, ConversationTurn};
use crate::mood::{MoodAnalysis, MoodAnalyzer};
use crate::profile::UserProfile;
use crate::providers::{
    EmotionClassifier, PunctuationTokenizer, SentimentScorer, WordTokenizer, build_collaborators,
};
use crate::selector::{ResponsePath, select_response};
use crate::templates::{ResponseTemplates, TemplateStore, TemplateUpdate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, RwLock};

/// Result of one `generate_response` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub emotion_analysis: EmotionAnalysis,
    pub mood_analysis: MoodAnalysis,
    pub is_crisis: bool,
}

/// Emotion-aware response engine.
pub struct ResponseEngine {
    templates: TemplateStore,
    recognizer: EmotionRecognizer,
    mood: MoodAnalyzer,
    crisis: CrisisDetector,
    chooser: Box<dyn ChoiceSource>,
    history: Mutex<ConversationHistory>,
    profile: RwLock<UserProfile>,
}

impl std::fmt::Debug for ResponseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseEngine")
            .field("templates", &self.templates)
            .field("crisis", &self.crisis)
            .finish_non_exhaustive()
    }
}

impl ResponseEngine {
    #[must_use]
    pub fn builder() -> ResponseEngineBuilder {
        ResponseEngineBuilder::default()
    }

    /// Build an engine entirely from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for invalid configuration or a
    /// malformed template document.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Analyse one utterance, pick a reply and record the turn.
    ///
    /// Nothing is recorded when any step fails.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmptyInput`] for empty or whitespace-only input.
    /// - Classifier, sentiment and tokenizer failures, unchanged.
    /// - [`EngineError::EmptyCategory`] when the policy resolves to an empty
    ///   template list.
    pub fn generate_response(&self, user_input: &str) -> Result<ChatResponse> {
        if user_input.trim().is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let emotion_analysis = self.recognizer.analyze(user_input)?;
        let mood_analysis = self.mood.analyze(user_input)?;
        let matched = self.crisis.matched_phrase(user_input);
        let is_crisis = matched.is_some();
        if let Some(phrase) = matched {
            tracing::warn!(phrase, "crisis phrase detected, using crisis responses");
        }

        let templates = self.templates.snapshot()?;
        let selection = select_response(
            &emotion_analysis,
            &mood_analysis,
            is_crisis,
            &templates,
            self.chooser.as_ref(),
        )
        .inspect_err(|e| tracing::error!(error = %e, "response selection failed"))?;

        match &selection.path {
            ResponsePath::Crisis => {}
            ResponsePath::Emotion {
                emotion,
                with_coping,
            } => tracing::debug!(%emotion, with_coping, "emotion response selected"),
            ResponsePath::SentimentFallback { sentiment } => {
                tracing::debug!(%sentiment, "sentiment fallback response selected")
            }
        }
        tracing::trace!(user_input, "turn input");

        let turn = ConversationTurn::new(
            user_input,
            emotion_analysis.clone(),
            mood_analysis,
            selection.text.clone(),
            is_crisis,
        );
        self.history
            .lock()
            .map_err(|_| EngineError::Lock("conversation history lock poisoned".into()))?
            .push(turn);

        Ok(ChatResponse {
            response: selection.text,
            emotion_analysis,
            mood_analysis,
            is_crisis,
        })
    }

    /// Replace the template categories present in `update`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the resulting library is invalid; the
    /// store is left unchanged in that case.
    pub fn update_responses(&self, update: TemplateUpdate) -> Result<()> {
        self.templates.merge_update(update)
    }

    /// Parse a partial JSON template document and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for malformed or invalid documents.
    pub fn update_responses_json(&self, json: &str) -> Result<()> {
        self.update_responses(TemplateUpdate::from_json(json)?)
    }

    /// Snapshot of every recorded turn, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Lock`] if the history lock is poisoned.
    pub fn history(&self) -> Result<Vec<ConversationTurn>> {
        let history = self
            .history
            .lock()
            .map_err(|_| EngineError::Lock("conversation history lock poisoned".into()))?;
        Ok(history.turns().to_vec())
    }

    /// The whole history as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Lock`] for a poisoned lock or
    /// [`EngineError::Config`] if encoding fails.
    pub fn history_json(&self) -> Result<String> {
        let history = self
            .history
            .lock()
            .map_err(|_| EngineError::Lock("conversation history lock poisoned".into()))?;
        history
            .to_json()
            .map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Current template library.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Lock`] if the store lock is poisoned.
    pub fn templates(&self) -> Result<Arc<ResponseTemplates>> {
        self.templates.snapshot()
    }

    /// Opening line for a new conversation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCategory`] if no greetings are configured.
    pub fn greeting(&self) -> Result<String> {
        self.templates.greeting(self.chooser.as_ref())
    }

    /// The crisis resource every crisis response mentions.
    pub fn crisis_resource(&self) -> &str {
        self.templates.crisis_resource()
    }

    /// Copy of the current user profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Lock`] if the profile lock is poisoned.
    pub fn profile(&self) -> Result<UserProfile> {
        self.profile
            .read()
            .map(|p| p.clone())
            .map_err(|_| EngineError::Lock("user profile lock poisoned".into()))
    }

    /// Mutate the user profile in place.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Lock`] if the profile lock is poisoned.
    pub fn update_profile<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self
            .profile
            .write()
            .map_err(|_| EngineError::Lock("user profile lock poisoned".into()))?;
        f(&mut profile);
        Ok(())
    }
}

/// Builder for [`ResponseEngine`]. Anything not set explicitly comes from the
/// configuration (or its defaults).
#[derive(Default)]
pub struct ResponseEngineBuilder {
    config: EngineConfig,
    templates: Option<ResponseTemplates>,
    classifier: Option<Box<dyn EmotionClassifier>>,
    sentiment: Option<Box<dyn SentimentScorer>>,
    tokenizer: Option<Box<dyn WordTokenizer>>,
    chooser: Option<Box<dyn ChoiceSource>>,
    profile: UserProfile,
}

impl ResponseEngineBuilder {
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this library instead of loading `config.templates.path`.
    #[must_use]
    pub fn templates(mut self, templates: ResponseTemplates) -> Self {
        self.templates = Some(templates);
        self
    }

    #[must_use]
    pub fn classifier(mut self, classifier: impl EmotionClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    #[must_use]
    pub fn sentiment(mut self, sentiment: impl SentimentScorer + 'static) -> Self {
        self.sentiment = Some(Box::new(sentiment));
        self
    }

    #[must_use]
    pub fn tokenizer(mut self, tokenizer: impl WordTokenizer + 'static) -> Self {
        self.tokenizer = Some(Box::new(tokenizer));
        self
    }

    #[must_use]
    pub fn chooser(mut self, chooser: impl ChoiceSource + 'static) -> Self {
        self.chooser = Some(Box::new(chooser));
        self
    }

    #[must_use]
    pub fn profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for invalid configuration, a malformed
    /// template document, or templates whose crisis responses omit the
    /// configured crisis resource.
    pub fn build(self) -> Result<ResponseEngine> {
        let config = self.config;
        config.validate()?;

        let templates = match self.templates {
            Some(templates) => TemplateStore::new(templates, config.crisis.resource.clone())?,
            None => TemplateStore::load(
                config.templates.path.as_deref(),
                config.crisis.resource.clone(),
            )?,
        };

        let (classifier, sentiment) = match (self.classifier, self.sentiment) {
            (Some(c), Some(s)) => (c, s),
            (classifier, sentiment) => {
                let built = build_collaborators(&config.classifier)?;
                (
                    classifier.unwrap_or(built.classifier),
                    sentiment.unwrap_or(built.sentiment),
                )
            }
        };
        let tokenizer = self
            .tokenizer
            .unwrap_or_else(|| Box::new(PunctuationTokenizer::new()));
        let chooser = self.chooser.unwrap_or_else(|| Box::new(ThreadRngChoice));

        tracing::info!(
            backend = ?config.classifier.backend,
            crisis_phrases = config.crisis.keywords.len(),
            match_mode = ?config.crisis.match_mode,
            "response engine ready"
        );

        Ok(ResponseEngine {
            templates,
            recognizer: EmotionRecognizer::new(classifier, tokenizer),
            mood: MoodAnalyzer::new(sentiment),
            crisis: CrisisDetector::from_config(&config.crisis),
            chooser,
            history: Mutex::new(ConversationHistory::new()),
            profile: RwLock::new(self.profile),
        })
    }
}
