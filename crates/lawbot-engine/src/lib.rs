//! Query routing for the law bot.
//!
//! A request flows through four sequential steps: extract the latest user
//! query, run one classification call, resolve the label, and dispatch to an
//! expert profile or a canned reply. At most two model calls are made and the
//! second always waits for the first.

mod bot;
mod classifier;
mod extractor;
mod label;
mod router;

pub use bot::{LawBot, ReplyStream};
pub use classifier::{classification_instruction, Classifier};
pub use extractor::latest_user_query;
pub use label::resolve_label;
pub use router::{unrecognized_reply, Decision, GREETING_REPLY, WELCOME_REPLY};
