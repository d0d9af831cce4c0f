//! Response template library.
//!
//! Four fixed categories, stored as a JSON document:
//!
//! ```json
//! {
//!   "emotions": { "joy": ["..."], "sadness": ["..."] },
//!   "greetings": ["..."],
//!   "crisis": ["... 988 ..."],
//!   "coping_suggestions": { "sadness": ["..."] }
//! }
//! ```
//!
//! Updates replace whole categories. `{"emotions": {"joy": ["X"]}}` swaps the
//! entire `emotions` map for one holding only `joy`; categories absent from
//! the update are kept as they were.

mod defaults;

pub use defaults::default_templates;

use crate::choice::ChoiceSource;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Complete template library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseTemplates {
    /// Emotion label → candidate responses.
    #[serde(default)]
    pub emotions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub greetings: Vec<String>,
    /// Crisis responses. Each must name the configured crisis resource.
    #[serde(default)]
    pub crisis: Vec<String>,
    /// Emotion label → coping suggestions. Only negative emotions are read.
    #[serde(default)]
    pub coping_suggestions: BTreeMap<String, Vec<String>>,
}

/// Partial template document. Every present category replaces the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotions: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greetings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coping_suggestions: Option<BTreeMap<String, Vec<String>>>,
}

impl TemplateUpdate {
    /// Parse a partial document. Unknown categories and mistyped values are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] on malformed JSON or structure.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::Config(format!("invalid template update: {e}")))
    }

    /// Names of the categories this update replaces.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(4);
        if self.emotions.is_some() {
            names.push("emotions");
        }
        if self.greetings.is_some() {
            names.push("greetings");
        }
        if self.crisis.is_some() {
            names.push("crisis");
        }
        if self.coping_suggestions.is_some() {
            names.push("coping_suggestions");
        }
        names
    }
}

impl ResponseTemplates {
    /// Parse a full template document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] on malformed JSON or structure.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::Config(format!("invalid template document: {e}")))
    }

    /// A copy of `self` with every category present in `update` replaced.
    #[must_use]
    pub fn merged(&self, update: TemplateUpdate) -> Self {
        let mut next = self.clone();
        if let Some(emotions) = update.emotions {
            next.emotions = emotions;
        }
        if let Some(greetings) = update.greetings {
            next.greetings = greetings;
        }
        if let Some(crisis) = update.crisis {
            next.crisis = crisis;
        }
        if let Some(coping) = update.coping_suggestions {
            next.coping_suggestions = coping;
        }
        next
    }

    /// Check the library can always answer a crisis turn.
    ///
    /// Other categories may be sparse; gaps there surface as
    /// [`EngineError::EmptyCategory`] when a turn needs them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `crisis` is empty, a crisis entry
    /// omits `crisis_resource`, or any candidate is blank.
    pub fn validate(&self, crisis_resource: &str) -> Result<()> {
        if self.crisis.is_empty() {
            return Err(EngineError::Config(
                "template category `crisis` must not be empty".to_owned(),
            ));
        }
        if let Some(entry) = self.crisis.iter().find(|c| !c.contains(crisis_resource)) {
            return Err(EngineError::Config(format!(
                "crisis response does not mention `{crisis_resource}`: {entry:?}"
            )));
        }

        let mut lists: Vec<(String, &Vec<String>)> = vec![
            ("greetings".to_owned(), &self.greetings),
            ("crisis".to_owned(), &self.crisis),
        ];
        lists.extend(self.emotions.iter().map(|(k, v)| (format!("emotions.{k}"), v)));
        lists.extend(
            self.coping_suggestions
                .iter()
                .map(|(k, v)| (format!("coping_suggestions.{k}"), v)),
        );
        for (path, candidates) in lists {
            if candidates.iter().any(|c| c.trim().is_empty()) {
                return Err(EngineError::Config(format!(
                    "template category `{path}` contains a blank response"
                )));
            }
        }
        Ok(())
    }
}

/// Pick one candidate uniformly from `candidates`.
///
/// # Errors
///
/// Returns [`EngineError::EmptyCategory`] naming `path` when the list is
/// missing or empty.
pub fn choose<'a>(
    candidates: Option<&'a [String]>,
    path: &str,
    chooser: &dyn ChoiceSource,
) -> Result<&'a str> {
    match candidates {
        Some(list) if !list.is_empty() => {
            let idx = chooser.pick(list.len()).min(list.len() - 1);
            Ok(list[idx].as_str())
        }
        _ => Err(EngineError::EmptyCategory(path.to_owned())),
    }
}

/// Process-wide template store with snapshot reads and category-level updates.
///
/// Readers clone an `Arc` of the current library, so a selection never sees
/// a category mid-replacement. Writers build the next library off to the
/// side, validate it, then swap it in.
#[derive(Debug)]
pub struct TemplateStore {
    current: RwLock<Arc<ResponseTemplates>>,
    crisis_resource: String,
}

impl TemplateStore {
    /// Wrap an explicit library.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the library fails validation.
    pub fn new(templates: ResponseTemplates, crisis_resource: impl Into<String>) -> Result<Self> {
        let crisis_resource = crisis_resource.into();
        templates.validate(&crisis_resource)?;
        Ok(Self {
            current: RwLock::new(Arc::new(templates)),
            crisis_resource,
        })
    }

    /// Store holding [`default_templates`].
    ///
    /// # Errors
    ///
    /// Fails only if `crisis_resource` is not mentioned by the default crisis
    /// responses.
    pub fn with_defaults(crisis_resource: impl Into<String>) -> Result<Self> {
        Self::new(default_templates(), crisis_resource)
    }

    /// Load from a JSON document, falling back to the defaults when no path is
    /// given or the file cannot be read.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the file exists but is malformed or
    /// fails validation.
    pub fn load(path: Option<&Path>, crisis_resource: impl Into<String>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no template document configured, using built-in templates");
            return Self::with_defaults(crisis_resource);
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let templates = ResponseTemplates::from_json(&content)?;
                tracing::info!(
                    path = %path.display(),
                    emotions = templates.emotions.len(),
                    "loaded response templates"
                );
                Self::new(templates, crisis_resource)
            }
            Err(e) => {
                tracing::info!(
                    path = %path.display(),
                    error = %e,
                    "template document unavailable, using built-in templates"
                );
                Self::with_defaults(crisis_resource)
            }
        }
    }

    /// Consistent view of the current library.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Lock`] if the store lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<ResponseTemplates>> {
        let guard = self
            .current
            .read()
            .map_err(|_| EngineError::Lock("template store lock poisoned".into()))?;
        Ok(Arc::clone(&guard))
    }

    /// Replace every category present in `update`. A rejected update leaves
    /// the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the merged library fails validation,
    /// or [`EngineError::Lock`] if the store lock is poisoned.
    pub fn merge_update(&self, update: TemplateUpdate) -> Result<()> {
        let categories = update.categories();
        let mut guard = self
            .current
            .write()
            .map_err(|_| EngineError::Lock("template store lock poisoned".into()))?;
        let next = guard.merged(update);
        next.validate(&self.crisis_resource)?;
        *guard = Arc::new(next);
        tracing::info!(?categories, "response templates updated");
        Ok(())
    }

    /// Pick a greeting for the start of a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyCategory`] if no greetings are configured.
    pub fn greeting(&self, chooser: &dyn ChoiceSource) -> Result<String> {
        let templates = self.snapshot()?;
        choose(Some(templates.greetings.as_slice()), "greetings", chooser).map(str::to_owned)
    }

    /// Render the current library as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if serialization fails.
    pub fn export_json(&self) -> Result<String> {
        let templates = self.snapshot()?;
        serde_json::to_string_pretty(templates.as_ref())
            .map_err(|e| EngineError::Config(e.to_string()))
    }

    /// The resource identifier every crisis response must mention.
    pub fn crisis_resource(&self) -> &str {
        &self.crisis_resource
    }
}
