//! The law bot orchestrator: extract, classify, resolve, dispatch.

use std::pin::Pin;
use std::sync::Arc;

use futures::{stream, Stream, StreamExt};
use lawbot_config::ProfileTable;
use lawbot_core::{AgentError, ModelBackend, ReplyFragment, StreamChunk, Turn};
use tracing::info;

use crate::classifier::Classifier;
use crate::extractor::latest_user_query;
use crate::label::resolve_label;
use crate::router::Decision;

/// A stream of reply fragments for the host to deliver.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<ReplyFragment, AgentError>> + Send>>;

/// Routes each query to one expert profile, or answers it with a canned reply.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
pub struct LawBot {
    backend: Arc<dyn ModelBackend>,
    profiles: Arc<ProfileTable>,
    classifier: Classifier,
}

impl LawBot {
    pub fn new(backend: Arc<dyn ModelBackend>, profiles: Arc<ProfileTable>) -> Self {
        let classifier = Classifier::new(Arc::clone(&backend), profiles.classifier().clone());
        Self { backend, profiles, classifier }
    }

    /// Decides how to answer a conversation without calling an expert.
    ///
    /// Makes zero model calls when there is no user turn, and exactly one otherwise.
    pub async fn decide(&self, turns: &[Turn]) -> Result<Decision, AgentError> {
        let Some(query) = latest_user_query(turns) else {
            info!("LAWBOT: No user query, sending welcome");
            return Ok(Decision::Welcome);
        };

        let raw = self.classifier.classify(query).await?;
        let decision = Decision::from_label(resolve_label(&raw), &raw);
        info!("ROUTER: {:?}", decision);
        Ok(decision)
    }

    /// Answers a conversation, streaming the reply fragments.
    ///
    /// Expert calls receive the whole conversation, not just the extracted query.
    /// Backend failures propagate to the caller unchanged.
    pub async fn respond(&self, turns: &[Turn]) -> Result<ReplyStream, AgentError> {
        let decision = self.decide(turns).await?;
        self.dispatch(decision, turns).await
    }

    /// Executes a decision.
    pub async fn dispatch(
        &self,
        decision: Decision,
        turns: &[Turn],
    ) -> Result<ReplyStream, AgentError> {
        let kind = match decision {
            Decision::Expert(kind) => kind,
            other => {
                let text = other.canned_reply().unwrap_or_default();
                return Ok(Box::pin(stream::once(async move {
                    Ok::<_, AgentError>(ReplyFragment::system(text))
                })));
            }
        };

        let profile = self.profiles.expert(kind);
        info!("ROUTER: Routing to {} ({} turns)", profile.name, turns.len());

        let expert_stream = self.backend.generate(profile, turns).await?;
        let author = profile.name.clone();

        let fragments = expert_stream.filter_map(move |chunk| {
            let author = author.clone();
            async move {
                match chunk {
                    Ok(StreamChunk::Content(text)) => Some(Ok(ReplyFragment::new(author, text))),
                    Ok(StreamChunk::Usage { input_tokens, output_tokens }) => {
                        info!("LAWBOT: {} tokens {}/{} (in/out)", author, input_tokens, output_tokens);
                        None
                    }
                    Err(e) => Some(Err(e)),
                }
            }
        });

        Ok(Box::pin(fragments))
    }
}
