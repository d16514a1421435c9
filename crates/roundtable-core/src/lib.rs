// Roundtable core abstractions
//
// This crate is the engine- and transport-agnostic heart of the system:
// - Agent descriptors and the static registry of predefined personas
// - Model endpoint configuration (shared across all agents, fixed seed)
// - Conversation transcripts
// - The speaker-selection policy for group chats (a pure rule table)
// - The ConversationEngine trait the HTTP layer delegates to
//
// Key design decisions:
// - The registry is immutable after startup; custom agents are materialized
//   from store records at resolution time.
// - The policy only decides when to override the engine's built-in defaults
//   (round robin / random); it never runs a conversation itself.
// - No dependency on HTTP, file storage, or any model provider.

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod model_config;
pub mod policy;
pub mod registry;
pub mod transcript;

pub use descriptor::AgentDescriptor;
pub use engine::{ConversationEngine, SelectionMode, SessionSpec};
pub use error::{EngineError, Result};
pub use model_config::{ModelConfig, ModelEndpoint};
pub use policy::{select_next_speaker, SpeakerChoice};
pub use registry::AgentRegistry;
pub use transcript::{Transcript, TurnRecord};
