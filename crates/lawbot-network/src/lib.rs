//! Model backend client for OpenAI-compatible chat APIs.
//!
//! Provides the streaming `generate` capability the law bot consumes.

mod client;

pub use client::LlmClient;
