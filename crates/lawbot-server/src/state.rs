use std::collections::HashMap;
use std::sync::Arc;

use lawbot_config::Settings;
use lawbot_core::{ModelBackend, Turn};
use lawbot_engine::LawBot;
use lawbot_network::LlmClient;
use tokio::sync::RwLock;

/// Oldest turns are dropped past this length so a long-lived session stays bounded.
pub const MAX_SESSION_TURNS: usize = 200;

/// Shared server state: one bot and the in-memory session store.
pub struct AppState {
    pub bot: LawBot,
    pub sessions: RwLock<HashMap<String, Vec<Turn>>>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let profiles = Arc::new(settings.profiles()?);
        let backend: Arc<dyn ModelBackend> = Arc::new(LlmClient::new(
            Some(&settings.api_base),
            Some(&settings.api_key),
        ));

        Ok(Self::with_bot(LawBot::new(backend, profiles)))
    }

    pub fn with_bot(bot: LawBot) -> Self {
        Self {
            bot,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a snapshot of the session's turns.
    pub async fn get_session(&self, uuid: &str) -> Vec<Turn> {
        self.sessions
            .read()
            .await
            .get(uuid)
            .cloned()
            .unwrap_or_default()
    }

    /// Appends a turn to the session, creating it if needed.
    pub async fn add_turn(&self, uuid: &str, turn: Turn) {
        let mut sessions = self.sessions.write().await;
        let turns = sessions.entry(uuid.to_string()).or_default();
        turns.push(turn);
        if turns.len() > MAX_SESSION_TURNS {
            let excess = turns.len() - MAX_SESSION_TURNS;
            turns.drain(..excess);
        }
    }
}
