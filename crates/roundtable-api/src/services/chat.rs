// Chat service: builds conversation sessions and delegates to the engine

use roundtable_core::{AgentDescriptor, ConversationEngine, Result, SessionSpec, Transcript};
use std::sync::Arc;

pub struct ChatService {
    engine: Arc<dyn ConversationEngine>,
}

impl ChatService {
    pub fn new(engine: Arc<dyn ConversationEngine>) -> Self {
        Self { engine }
    }

    /// One coordinating participant plus the target agent, at most 3 turns.
    /// Blocks until the engine finishes; no partial results.
    pub async fn single_chat(
        &self,
        agent: AgentDescriptor,
        message: String,
    ) -> Result<Transcript> {
        self.engine.run(SessionSpec::single(agent, message)).await
    }

    /// One coordinating participant plus all requested agents, at most 6
    /// turns, with the rule-table speaker selection.
    pub async fn group_chat(
        &self,
        agents: Vec<AgentDescriptor>,
        message: String,
    ) -> Result<Transcript> {
        self.engine.run(SessionSpec::group(agents, message)).await
    }
}
