//! WebSocket handler: feeds session turns to the bot and streams fragments back.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{Sink, SinkExt, StreamExt};
use lawbot_core::{Turn, SYSTEM_AUTHOR};
use lawbot_engine::LawBot;
use serde::Serialize;
use tracing::{error, info};

use crate::protocol::{WsMetadata, WsPayload, WsResponse};
use crate::state::AppState;

const ERROR_REPLY: &str = "Sorry—there was an error generating the response.";

/// Outcome of streaming one reply to the client.
#[derive(Debug)]
struct ReplyResult {
    author: String,
    text: String,
    /// The reply ended with a backend error and only partial text reached the client.
    failed: bool,
    connected: bool,
}

/// Sends a JSON-serialized message over the WebSocket.
async fn send_json<S, T>(sender: &mut S, data: &T) -> bool
where
    S: Sink<Message> + Unpin,
    T: Serialize,
{
    let Ok(json) = serde_json::to_string(data) else {
        error!("JSON serialization failed");
        return false;
    };
    sender.send(Message::Text(json.into())).await.is_ok()
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut uuid = "anonymous".to_string();

    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else { continue };

        let payload: WsPayload = match serde_json::from_str(&text) {
            Ok(p) => p,
            Err(e) => {
                error!("JSON parse error: {}", e);
                continue;
            }
        };

        if payload.init {
            uuid = payload.uuid.unwrap_or_else(|| "anonymous".to_string());
            info!("Connection initialized: {}", uuid);
            continue;
        }

        let Some(message) = payload.message else { continue };

        if !handle_message(&mut sender, &state, &uuid, message).await {
            break;
        }
    }

    info!("Connection closed: {}", uuid);
}

/// Records the user turn, streams the bot's reply, records the reply turn and
/// sends the end frame. Returns false once the client is gone.
async fn handle_message<S>(sender: &mut S, state: &AppState, uuid: &str, message: String) -> bool
where
    S: Sink<Message> + Unpin,
{
    info!(
        "Message from {}: {}...",
        uuid,
        message.chars().take(50).collect::<String>()
    );

    state.add_turn(uuid, Turn::user(message)).await;
    let history = state.get_session(uuid).await;

    let start = Instant::now();
    let reply = stream_reply(sender, &state.bot, &history).await;

    // A truncated answer must not become context for the next expert call.
    if !reply.failed && !reply.text.is_empty() {
        state
            .add_turn(uuid, Turn::new(reply.author.clone(), Some(reply.text)))
            .await;
    }

    if !reply.connected {
        return false;
    }

    let metadata = WsMetadata {
        elapsed_ms: start.elapsed().as_millis() as u64,
        author: reply.author,
    };
    info!("Sending metadata: {:?}", metadata);
    send_json(sender, &WsResponse::end_with_metadata(metadata)).await
}

/// Runs the bot over the session and forwards each fragment to the client.
///
/// Any backend failure, before or during the stream, ends with one apology fragment.
async fn stream_reply<S>(sender: &mut S, bot: &LawBot, history: &[Turn]) -> ReplyResult
where
    S: Sink<Message> + Unpin,
{
    let mut result = ReplyResult {
        author: SYSTEM_AUTHOR.to_string(),
        text: String::new(),
        failed: false,
        connected: true,
    };

    let mut stream = match bot.respond(history).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Bot error: {}", e);
            result.failed = true;
            result.connected = send_json(sender, &WsResponse::stream(ERROR_REPLY)).await;
            return result;
        }
    };

    while let Some(fragment) = stream.next().await {
        match fragment {
            Ok(fragment) => {
                result.author = fragment.author;
                result.text.push_str(&fragment.text);
                if !send_json(sender, &WsResponse::stream(&fragment.text)).await {
                    result.connected = false;
                    break;
                }
            }
            Err(e) => {
                error!("Stream error: {}", e);
                result.failed = true;
                result.connected = send_json(sender, &WsResponse::stream(ERROR_REPLY)).await;
                break;
            }
        }
    }

    result
}
