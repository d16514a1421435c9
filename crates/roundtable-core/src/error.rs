// Error types for conversation execution

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while running a conversation
#[derive(Debug, Error)]
pub enum EngineError {
    /// Model provider rejected or failed a completion request
    #[error("model provider error: {0}")]
    Provider(String),

    /// Bad or missing configuration (endpoint list, config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// A session was started with no agents to speak
    #[error("session has no participants")]
    NoParticipants,

    /// The engine finished without producing a usable transcript
    #[error("conversation produced no usable transcript")]
    EmptyTranscript,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        EngineError::Provider(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        EngineError::Config(msg.into())
    }
}
