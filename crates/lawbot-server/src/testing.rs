//! Scripted backend for host tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;
use lawbot_config::ProfileTable;
use lawbot_core::{AgentError, AgentProfile, LlmStream, ModelBackend, StreamChunk, Turn};
use lawbot_engine::LawBot;

use crate::state::AppState;

/// Canned response for one backend call.
pub enum Script {
    Chunks(Vec<StreamChunk>),
    /// Yields the chunks, then a mid-stream error.
    Broken(Vec<StreamChunk>, String),
    Fail(String),
}

impl Script {
    pub fn text(parts: &[&str]) -> Self {
        Script::Chunks(parts.iter().map(|p| StreamChunk::Content(p.to_string())).collect())
    }
}

/// Replays scripts in call order.
pub struct ScriptedBackend {
    scripts: Mutex<VecDeque<Script>>,
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(
        &self,
        _profile: &AgentProfile,
        _context: &[Turn],
    ) -> Result<LlmStream, AgentError> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .expect("backend called more times than scripted");

        match script {
            Script::Chunks(chunks) => Ok(Box::pin(stream::iter(
                chunks.into_iter().map(Ok::<StreamChunk, AgentError>),
            ))),
            Script::Broken(chunks, msg) => {
                let items = chunks
                    .into_iter()
                    .map(Ok)
                    .chain(std::iter::once(Err(AgentError::LlmError(msg))));
                Ok(Box::pin(stream::iter(items)))
            }
            Script::Fail(msg) => Err(AgentError::LlmError(msg)),
        }
    }
}

pub fn state_with(scripts: Vec<Script>) -> AppState {
    let backend: Arc<dyn ModelBackend> = Arc::new(ScriptedBackend {
        scripts: Mutex::new(scripts.into()),
    });
    AppState::with_bot(LawBot::new(backend, Arc::new(ProfileTable::builtin("test-model"))))
}
