//! Routing decisions and the canned replies that need no model call.

use lawbot_core::{ClassificationLabel, ExpertKind};

pub const WELCOME_REPLY: &str = "Namaste! I am the Indian Law Bot. How can I help you?";

pub const GREETING_REPLY: &str = "Namaste! I am here to help with Indian Legal issues. You can ask me about Constitution, Criminal cases, Civil disputes, or Traffic rules.";

/// Terminal action chosen for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// No user turn was found; nothing was classified.
    Welcome,
    Greeting,
    Expert(ExpertKind),
    /// The classifier output held no usable label.
    Unrecognized { raw: String },
}

impl Decision {
    /// Maps a resolved label to its action, keeping the raw output for diagnosis.
    pub fn from_label(label: ClassificationLabel, raw: &str) -> Self {
        match label {
            ClassificationLabel::Greeting => Decision::Greeting,
            ClassificationLabel::Unknown => Decision::Unrecognized { raw: raw.to_string() },
            other => match other.expert() {
                Some(kind) => Decision::Expert(kind),
                None => Decision::Unrecognized { raw: raw.to_string() },
            },
        }
    }

    /// Returns the canned reply for non-expert decisions.
    pub fn canned_reply(&self) -> Option<String> {
        match self {
            Decision::Welcome => Some(WELCOME_REPLY.to_string()),
            Decision::Greeting => Some(GREETING_REPLY.to_string()),
            Decision::Unrecognized { raw } => Some(unrecognized_reply(raw)),
            Decision::Expert(_) => None,
        }
    }
}

/// Fallback reply that echoes the classifier output verbatim.
pub fn unrecognized_reply(raw: &str) -> String {
    format!(
        "I'm having trouble classifying that (Detected: '{raw}'). I can help with Constitutional, Criminal, Civil, or Traffic law."
    )
}
