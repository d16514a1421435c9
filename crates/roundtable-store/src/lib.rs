// Custom model persistence
//
// One JSON file holds every user-created model as an array of records.
// There is no in-memory cache: every operation reloads the file, so the
// store is always as fresh as the last writer. Read-modify-write sequences
// are serialized behind a single tokio Mutex; the file must be treated as a
// single-writer resource.

pub mod models;
pub mod store;
pub mod sweeper;

pub use models::CustomAgentRecord;
pub use store::{CustomAgentStore, StoreError};
pub use sweeper::{Sweeper, SweeperConfig};
