//! Runs the classification call for a single query.

use std::sync::Arc;

use futures::StreamExt;
use lawbot_core::{AgentError, AgentProfile, ModelBackend, StreamChunk, Turn};
use tracing::{debug, info};

/// Builds the per-call instruction that embeds the query and the allowed labels.
pub fn classification_instruction(query: &str) -> String {
    format!(
        r#"Classify the following User Query into exactly one of these categories:

User Query: "{query}"

Categories:
- GREETING
- CONSTITUTION
- CRIMINAL
- CIVIL
- TRAFFIC

Output ONLY the category word."#
    )
}

/// Stateless classifier: the query travels with each call, the profile never changes.
pub struct Classifier {
    backend: Arc<dyn ModelBackend>,
    profile: AgentProfile,
}

impl Classifier {
    pub fn new(backend: Arc<dyn ModelBackend>, profile: AgentProfile) -> Self {
        Self { backend, profile }
    }

    /// Calls the backend once and returns the trimmed, upper-cased response text.
    ///
    /// Empty or malformed output is returned as-is for label resolution to judge.
    pub async fn classify(&self, query: &str) -> Result<String, AgentError> {
        info!("CLASSIFIER: Running {}", self.profile.name);

        let context = [Turn::user(classification_instruction(query))];
        let mut stream = self.backend.generate(&self.profile, &context).await?;

        let mut accumulated = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk? {
                StreamChunk::Content(text) => accumulated.push_str(&text),
                StreamChunk::Usage { input_tokens, output_tokens } => {
                    debug!("CLASSIFIER: tokens {}/{} (in/out)", input_tokens, output_tokens);
                }
            }
        }

        let raw = accumulated.trim().to_uppercase();
        info!("CLASSIFIER: Raw output '{}'", raw);
        Ok(raw)
    }
}
