// Store row types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user-created model as persisted in the store file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAgentRecord {
    /// Display name
    pub name: String,

    /// Capability description
    pub description: String,

    /// Creation timestamp, ISO-8601 on disk; drives expiry
    pub created_at: DateTime<Utc>,
}

impl CustomAgentRecord {
    /// Create a record stamped with the current wall-clock time
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}
