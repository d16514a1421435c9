// Conversation transcripts
//
// A transcript is the ordered record of one conversation run. It is built by
// the engine and never mutated afterwards; the HTTP layer returns it verbatim
// (group chat) or a single entry of it (single chat).

use serde::{Deserialize, Serialize};

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TurnRecord {
    /// Display name of the participant who produced this turn
    pub speaker: String,

    /// Message content
    pub content: String,
}

impl TurnRecord {
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
        }
    }
}

/// Ordered sequence of turns produced by one conversation run
pub type Transcript = Vec<TurnRecord>;
