//! OpenAI-compatible streaming chat client.
//!
//! Works with the OpenAI API and any compatible endpoint, including Google's
//! OpenAI-compatible Gemini endpoint and Ollama's /v1 endpoint.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionStreamOptions, CreateChatCompletionRequestArgs,
        CreateChatCompletionStreamResponse,
    },
    Client,
};
use async_trait::async_trait;
use futures::StreamExt;
use lawbot_core::{AgentError, AgentProfile, LlmStream, ModelBackend, StreamChunk, Turn};
use tracing::{debug, info};

/// Converts any error into an AgentError::LlmError.
fn llm_err(e: impl ToString) -> AgentError {
    AgentError::LlmError(e.to_string())
}

/// Builds the message list: the system prompt followed by every turn that carries text.
///
/// End-user turns become user messages; turns from any other author become
/// assistant messages.
pub(crate) fn build_messages(
    system_prompt: &str,
    context: &[Turn],
) -> Result<Vec<ChatCompletionRequestMessage>, AgentError> {
    let mut messages = vec![ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(llm_err)?,
    )];

    for turn in context {
        let Some(text) = turn.text.as_deref().filter(|t| !t.trim().is_empty()) else {
            continue;
        };

        let message = match turn.is_user() {
            true => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()
                    .map_err(llm_err)?,
            ),
            false => ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(text)
                    .build()
                    .map_err(llm_err)?,
            ),
        };
        messages.push(message);
    }

    Ok(messages)
}

/// Splits one streamed response into its content chunk, then its usage chunk.
///
/// Some providers attach usage to a chunk that also carries text, so neither
/// may shadow the other.
pub(crate) fn response_chunks(response: CreateChatCompletionStreamResponse) -> Vec<StreamChunk> {
    let mut chunks = Vec::with_capacity(2);

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|text| !text.is_empty());
    if let Some(text) = content {
        debug!("LLM chunk: {} chars", text.len());
        chunks.push(StreamChunk::Content(text));
    }

    if let Some(usage) = response.usage {
        chunks.push(StreamChunk::Usage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        });
    }

    chunks
}

/// Client for OpenAI-compatible chat completion APIs.
pub struct LlmClient {
    client: Client<OpenAIConfig>,
}

impl LlmClient {
    /// Creates a client for an optional API base URL and key.
    ///
    /// Without overrides the `async-openai` defaults apply (api.openai.com and
    /// the `OPENAI_API_KEY` environment variable).
    pub fn new(api_base: Option<&str>, api_key: Option<&str>) -> Self {
        let mut config = OpenAIConfig::default();
        if let Some(base) = api_base {
            config = config.with_api_base(base.trim_end_matches('/'));
        }
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }

        Self {
            client: Client::with_config(config),
        }
    }

    /// Runs a profile against a conversation and returns a stream of chunks.
    pub async fn chat_stream(
        &self,
        profile: &AgentProfile,
        context: &[Turn],
    ) -> Result<LlmStream, AgentError> {
        let messages = build_messages(&profile.system_prompt, context)?;
        info!(
            "LLM: {} -> {} ({} messages)",
            profile.name,
            profile.model,
            messages.len()
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&profile.model)
            .stream_options(ChatCompletionStreamOptions { include_usage: true })
            .messages(messages)
            .build()
            .map_err(llm_err)?;

        let stream = self.client.chat().create_stream(request).await.map_err(llm_err)?;

        let mapped = stream.flat_map(|result| {
            let items: Vec<Result<StreamChunk, AgentError>> = match result {
                Ok(response) => response_chunks(response).into_iter().map(Ok).collect(),
                Err(e) => vec![Err(llm_err(e))],
            };
            futures::stream::iter(items)
        });

        Ok(Box::pin(mapped))
    }
}

#[async_trait]
impl ModelBackend for LlmClient {
    async fn generate(
        &self,
        profile: &AgentProfile,
        context: &[Turn],
    ) -> Result<LlmStream, AgentError> {
        self.chat_stream(profile, context).await
    }
}
