//! Scripted in-memory backend for routing tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;
use lawbot_config::ProfileTable;
use lawbot_core::{AgentError, AgentProfile, LlmStream, ModelBackend, StreamChunk, Turn};
use lawbot_engine::LawBot;

/// One call the bot made against the backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub profile: String,
    pub system_prompt: String,
    pub context: Vec<Turn>,
}

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

/// Replays scripts in order and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    scripts: Mutex<VecDeque<Script>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(
        &self,
        profile: &AgentProfile,
        context: &[Turn],
    ) -> Result<LlmStream, AgentError> {
        self.calls.lock().unwrap().push(RecordedCall {
            profile: profile.name.clone(),
            system_prompt: profile.system_prompt.clone(),
            context: context.to_vec(),
        });

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

pub fn bot_with(backend: &Arc<ScriptedBackend>) -> LawBot {
    let backend: Arc<dyn ModelBackend> = backend.clone();
    LawBot::new(backend, Arc::new(ProfileTable::builtin("test-model")))
}
