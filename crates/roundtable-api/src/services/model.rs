// Model service: registry lookup, custom model creation and resolution

use anyhow::Result;
use roundtable_core::{AgentDescriptor, AgentRegistry, ModelConfig};
use roundtable_store::{CustomAgentRecord, CustomAgentStore};
use std::sync::Arc;

pub struct ModelService {
    registry: AgentRegistry,
    store: Arc<CustomAgentStore>,
    model_config: Arc<ModelConfig>,
}

impl ModelService {
    pub fn new(
        registry: AgentRegistry,
        store: Arc<CustomAgentStore>,
        model_config: Arc<ModelConfig>,
    ) -> Self {
        Self {
            registry,
            store,
            model_config,
        }
    }

    /// Predefined descriptors, in registration order
    pub fn predefined(&self) -> Vec<&AgentDescriptor> {
        self.registry.descriptors().collect()
    }

    /// Current custom model records
    pub async fn custom(&self) -> Vec<CustomAgentRecord> {
        self.store.load().await
    }

    /// Create a custom model and persist it.
    /// Name uniqueness and non-emptiness are deliberately not enforced.
    pub async fn create(&self, name: String, description: String) -> Result<CustomAgentRecord> {
        let record = CustomAgentRecord::new(name, description);
        self.store.append(vec![record.clone()]).await?;
        Ok(record)
    }

    /// Resolve a name against the registry first, then the custom store,
    /// case-insensitively. Custom models get the shared model config and the
    /// default reply budget.
    pub async fn resolve(&self, name: &str) -> Option<AgentDescriptor> {
        if let Some(agent) = self.registry.lookup(name) {
            return Some(agent.clone());
        }
        self.store
            .load()
            .await
            .into_iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
            .map(|record| {
                AgentDescriptor::new(record.name, record.description, self.model_config.clone())
            })
    }
}
