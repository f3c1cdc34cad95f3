//! Core domain types, error definitions, and the model backend trait.
//!
//! This crate defines the types shared across the law bot: conversation turns,
//! classification labels, expert kinds, agent profiles, reply fragments, and
//! the single "generate" capability consumed from a language-model backend.

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Author tag the host uses for end-user turns.
pub const USER_AUTHOR: &str = "user";

/// Author tag for canned replies that involve no model call.
pub const SYSTEM_AUTHOR: &str = "system";

/// Errors that can occur while serving a query.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM request failed: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A single message in a conversation, tagged with its author.
///
/// Turns are recorded by the host session store and are read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub author: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl Turn {
    /// Creates a turn with the given author and optional text.
    pub fn new(author: impl Into<String>, text: Option<String>) -> Self {
        Self { author: author.into(), text }
    }

    /// Creates an end-user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(USER_AUTHOR, Some(text.into()))
    }

    /// Returns true if the end user authored this turn.
    pub fn is_user(&self) -> bool {
        self.author == USER_AUTHOR
    }
}

/// Legal-domain experts a query can be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertKind {
    Constitution,
    Criminal,
    Civil,
    Traffic,
}

impl ExpertKind {
    /// All experts, in lookup-table order.
    pub const ALL: [ExpertKind; 4] = [
        ExpertKind::Constitution,
        ExpertKind::Criminal,
        ExpertKind::Civil,
        ExpertKind::Traffic,
    ];

    /// Position of this expert in a profile lookup table.
    pub fn index(self) -> usize {
        match self {
            ExpertKind::Constitution => 0,
            ExpertKind::Criminal => 1,
            ExpertKind::Civil => 2,
            ExpertKind::Traffic => 3,
        }
    }
}

/// Coarse category assigned to a query. Derived per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassificationLabel {
    Greeting,
    Constitution,
    Criminal,
    Civil,
    Traffic,
    Unknown,
}

impl ClassificationLabel {
    /// Labels the classifier is allowed to emit.
    pub const KNOWN: [ClassificationLabel; 5] = [
        ClassificationLabel::Greeting,
        ClassificationLabel::Constitution,
        ClassificationLabel::Criminal,
        ClassificationLabel::Civil,
        ClassificationLabel::Traffic,
    ];

    /// Returns the upper-case token for this label.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationLabel::Greeting => "GREETING",
            ClassificationLabel::Constitution => "CONSTITUTION",
            ClassificationLabel::Criminal => "CRIMINAL",
            ClassificationLabel::Civil => "CIVIL",
            ClassificationLabel::Traffic => "TRAFFIC",
            ClassificationLabel::Unknown => "UNKNOWN",
        }
    }

    /// Returns the expert that handles this label, if any.
    pub fn expert(self) -> Option<ExpertKind> {
        match self {
            ClassificationLabel::Constitution => Some(ExpertKind::Constitution),
            ClassificationLabel::Criminal => Some(ExpertKind::Criminal),
            ClassificationLabel::Civil => Some(ExpertKind::Civil),
            ClassificationLabel::Traffic => Some(ExpertKind::Traffic),
            ClassificationLabel::Greeting | ClassificationLabel::Unknown => None,
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassificationLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_uppercase();
        Self::KNOWN
            .into_iter()
            .find(|label| label.as_str() == token)
            .ok_or(())
    }
}

/// Static configuration for one model-backed agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub system_prompt: String,
    pub model: String,
}

/// One piece of reply text yielded back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyFragment {
    pub author: String,
    pub text: String,
}

impl ReplyFragment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self { author: author.into(), text: text.into() }
    }

    /// A canned reply that did not come from a model.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(SYSTEM_AUTHOR, text)
    }
}

/// A chunk from a streaming model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    Content(String),
    Usage { input_tokens: u32, output_tokens: u32 },
}

/// A stream of model response chunks.
pub type LlmStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, AgentError>> + Send>>;

/// The language-model capability consumed from the host.
///
/// A backend runs `profile.system_prompt` against `context` on `profile.model`
/// and streams the generated text back. Failures are returned unmodified.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(
        &self,
        profile: &AgentProfile,
        context: &[Turn],
    ) -> Result<LlmStream, AgentError>;
}
