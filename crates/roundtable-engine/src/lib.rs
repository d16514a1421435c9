// OpenAI-protocol conversation engine
//
// Implements roundtable-core's ConversationEngine against any
// chat-completions-compatible endpoint. The engine owns the turn loop,
// the built-in round-robin/random speaker defaults, termination detection,
// and endpoint failover; everything else comes from the SessionSpec.

pub mod openai;
pub mod session;

pub use openai::ChatClient;
pub use session::ChatEngine;
