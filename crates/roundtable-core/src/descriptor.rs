// Agent descriptors
//
// An AgentDescriptor is one conversational persona: a display name, a
// capability description, a bound on consecutive automatic replies, and a
// shared reference to the model endpoint configuration.
//
// Predefined descriptors are constructed once at startup (see registry.rs)
// and never change. Custom descriptors are materialized on demand from store
// records, using the same shared model config and the default reply budget.

use crate::model_config::ModelConfig;
use std::sync::Arc;

/// Upper bound on consecutive automatic replies for any agent
pub const DEFAULT_MAX_AUTO_REPLIES: usize = 10;

/// A named conversational persona
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    /// Display identity, matched case-insensitively elsewhere
    pub name: String,

    /// Capability summary, also shown to the model as the persona prompt
    pub description: String,

    /// Maximum consecutive automatic turns before the engine moves on
    pub max_auto_replies: usize,

    /// Shared model endpoint configuration
    pub model_config: Arc<ModelConfig>,
}

impl AgentDescriptor {
    /// Build a descriptor with the default reply budget
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        model_config: Arc<ModelConfig>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            max_auto_replies: DEFAULT_MAX_AUTO_REPLIES,
            model_config,
        }
    }

    /// Override the consecutive-reply budget
    pub fn with_max_auto_replies(mut self, max_auto_replies: usize) -> Self {
        self.max_auto_replies = max_auto_replies;
        self
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
