// Background expiry sweeper
//
// One long-lived tokio task, started at boot, independent of request
// handling: prune the store, sleep, repeat. A failed sweep is logged and the
// loop continues; a dead sweeper would silently stop expiring entries.

use crate::store::CustomAgentStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default retention for custom models. Matches the system this replaces;
/// almost certainly too short for production, so it is configurable.
pub const DEFAULT_RETENTION_SECS: u64 = 60;

/// Default pause between sweeps (3 hours)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3 * 60 * 60;

/// Sweeper timing; retention and cadence are independent knobs
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How old a custom model may get before it is expired
    pub retention: Duration,

    /// Pause between sweeps
    pub interval: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

/// Expires stale custom models on a fixed cadence
pub struct Sweeper;

impl Sweeper {
    /// Spawn the sweep loop. The task runs for the process lifetime; the
    /// handle is returned for callers that want to observe or abort it.
    pub fn spawn(store: Arc<CustomAgentStore>, config: SweeperConfig) -> JoinHandle<()> {
        tracing::info!(
            retention_secs = config.retention.as_secs(),
            interval_secs = config.interval.as_secs(),
            "custom model sweeper started"
        );
        tokio::spawn(async move {
            let retention = chrono::Duration::from_std(config.retention)
                .unwrap_or_else(|_| chrono::Duration::seconds(DEFAULT_RETENTION_SECS as i64));
            loop {
                match store.prune(Utc::now(), retention).await {
                    Ok(retained) => {
                        tracing::debug!(retained = retained.len(), "swept expired custom models");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "custom model sweep failed; retrying next cycle");
                    }
                }
                tokio::time::sleep(config.interval).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomAgentRecord;

    #[tokio::test]
    async fn sweeper_expires_stale_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(CustomAgentStore::new(dir.path().join("custom_models.json")));

        let stale = CustomAgentRecord {
            name: "Old".into(),
            description: "stale".into(),
            created_at: Utc::now() - chrono::Duration::minutes(5),
        };
        store
            .append(vec![stale, CustomAgentRecord::new("New", "fresh")])
            .await
            .unwrap();

        let handle = Sweeper::spawn(
            store.clone(),
            SweeperConfig {
                retention: Duration::from_secs(60),
                interval: Duration::from_secs(3600),
            },
        );

        // First sweep runs immediately; poll until it lands.
        let mut remaining = store.load().await;
        for _ in 0..50 {
            if remaining.len() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
            remaining = store.load().await;
        }
        handle.abort();

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "New");
    }
}
