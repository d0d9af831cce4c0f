//! User profile carried alongside the conversation.
//!
//! The engine stores and exposes the profile; filling it in is up to the
//! embedding application.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub preferred_topics: Vec<String>,
    pub triggers: Vec<String>,
    pub coping_strategies: Vec<String>,
}
