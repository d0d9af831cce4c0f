//! Solace: emotion-aware supportive response engine.
//!
//! Turns a single user utterance into an emotionally contextualised reply by
//! fusing three signals:
//!
//! - **Emotion**: an external classifier's full distribution plus lexical
//!   indicator counts ([`emotion`]).
//! - **Mood**: an external POSITIVE/NEGATIVE sentiment signal ([`mood`]).
//! - **Crisis**: configured high-risk phrases ([`crisis`]).
//!
//! The verdict drives a fixed priority policy ([`selector`]) over a
//! hot-swappable template library ([`templates`]). Every turn is appended to
//! an in-memory conversation log ([`history`]).
//!
//! # Example
//!
//! ```no_run
//! use solace::{EngineConfig, ResponseEngine};
//!
//! let engine = ResponseEngine::from_config(EngineConfig::default())?;
//! let reply = engine.generate_response("I feel so happy today!")?;
//! println!("{}", reply.response);
//! # Ok::<(), solace::EngineError>(())
//! ```

pub mod choice;
pub mod config;
pub mod crisis;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod history;
pub mod mood;
pub mod profile;
pub mod providers;
pub mod selector;
pub mod templates;

pub use config::EngineConfig;
pub use engine::{ChatResponse, ResponseEngine, ResponseEngineBuilder};
pub use error::{EngineError, Result};
pub use history::ConversationTurn;
pub use templates::{ResponseTemplates, TemplateUpdate};
