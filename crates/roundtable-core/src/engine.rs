// ConversationEngine trait
//
// The multi-turn execution backend is pluggable: the HTTP layer only ever
// holds an `Arc<dyn ConversationEngine>`. Production uses the OpenAI-protocol
// engine from roundtable-engine; tests use scripted stubs honoring the same
// contract.

use crate::descriptor::AgentDescriptor;
use crate::error::Result;
use crate::transcript::Transcript;
use async_trait::async_trait;

/// Display name of the coordinating participant that seeds every session
pub const COORDINATOR_NAME: &str = "User Proxy";

/// Turn cap for a single-agent chat (seed + at most two replies)
pub const SINGLE_CHAT_MAX_ROUNDS: usize = 3;

/// Turn cap for a group chat
pub const GROUP_CHAT_MAX_ROUNDS: usize = 6;

/// How the engine picks the next speaker each turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Cycle through the agents in session order
    RoundRobin,
    /// Consult the speaker-selection rule table (see policy.rs)
    RuleTable,
}

/// Everything the engine needs to run one conversation
#[derive(Clone)]
pub struct SessionSpec {
    /// Name of the coordinating participant (seeds the conversation,
    /// enforces termination, never generated by the model)
    pub coordinator: String,

    /// Ordered agents taking part, excluding the coordinator
    pub agents: Vec<AgentDescriptor>,

    /// The message that opens the conversation
    pub seed_message: String,

    /// Maximum number of turns, counting the seed
    pub max_rounds: usize,

    /// Speaker selection strategy
    pub selection: SelectionMode,
}

impl SessionSpec {
    /// Session for one agent answering one message
    pub fn single(agent: AgentDescriptor, seed_message: impl Into<String>) -> Self {
        Self {
            coordinator: COORDINATOR_NAME.to_string(),
            agents: vec![agent],
            seed_message: seed_message.into(),
            max_rounds: SINGLE_CHAT_MAX_ROUNDS,
            selection: SelectionMode::RoundRobin,
        }
    }

    /// Round-table session across several agents
    pub fn group(agents: Vec<AgentDescriptor>, seed_message: impl Into<String>) -> Self {
        Self {
            coordinator: COORDINATOR_NAME.to_string(),
            agents,
            seed_message: seed_message.into(),
            max_rounds: GROUP_CHAT_MAX_ROUNDS,
            selection: SelectionMode::RuleTable,
        }
    }
}

/// Runs a turn-capped conversation and returns its transcript.
///
/// Both flows are synchronous from the caller's perspective: `run` resolves
/// only once the conversation has finished or failed. No partial transcripts
/// are surfaced on error.
#[async_trait]
pub trait ConversationEngine: Send + Sync {
    async fn run(&self, session: SessionSpec) -> Result<Transcript>;
}
