// Static registry of predefined agents
//
// Populated once at process start and read-only afterwards. Lookup is
// case-insensitive and accepts either the registry key ("wellness_consultant")
// or the display name ("Wellness Consultant").

use crate::descriptor::AgentDescriptor;
use crate::model_config::ModelConfig;
use std::sync::Arc;

/// Key, display name, description for each predefined persona
const PREDEFINED: &[(&str, &str, &str)] = &[
    (
        "wellness_consultant",
        "Wellness Consultant",
        "Analyze the given symptoms and health data to provide personalized wellness tips and recommendations.",
    ),
    (
        "investment_advisor",
        "Investment Advisor",
        "Evaluate the provided financial data to offer insightful investment advice and risk assessments",
    ),
    (
        "scientist",
        "Scientist",
        "Good at scientific research and analysis and providing scientifically proven solutions and strategies",
    ),
    (
        "personal_trainer",
        "Personal Trainer",
        "Create customized fitness routines and nutrition plans tailored to individual health goals and preferences.",
    ),
    (
        "event_coordinator",
        "Event Coordinator",
        "Organize and manage events, including logistics, coordination, and execution, to ensure a seamless and memorable experience.",
    ),
    (
        "writer",
        "Writer",
        "channels creativity and insight to craft compelling narratives and use words to evoke emotions and transport readers into new worlds.",
    ),
    (
        "travel_coordinator",
        "Travel Coordinator",
        "Plan and organize travel itineraries, including accommodations and activities,to create optimal travel experiences.",
    ),
    (
        "creative_content_strategists",
        "Creative Content Strategists",
        "Generate creative and innovative content ideas and strategies suitable for various media platforms.",
    ),
    (
        "news_editor",
        "News Editor",
        "Summarize and present the latest news stories in an engaging and informative manner.",
    ),
];

/// Fixed mapping from lowercase key to agent descriptor
pub struct AgentRegistry {
    entries: Vec<(String, AgentDescriptor)>,
}

impl AgentRegistry {
    /// Build the registry of predefined personas, all sharing one model config
    pub fn with_predefined(model_config: Arc<ModelConfig>) -> Self {
        let entries = PREDEFINED
            .iter()
            .map(|(key, name, description)| {
                (
                    key.to_string(),
                    AgentDescriptor::new(*name, *description, model_config.clone()),
                )
            })
            .collect();
        Self { entries }
    }

    /// Case-insensitive lookup by registry key or display name
    pub fn lookup(&self, name: &str) -> Option<&AgentDescriptor> {
        self.entries
            .iter()
            .find(|(key, agent)| key.eq_ignore_ascii_case(name) || agent.is_named(name))
            .map(|(_, agent)| agent)
    }

    /// All predefined descriptors, in registration order
    pub fn descriptors(&self) -> impl Iterator<Item = &AgentDescriptor> {
        self.entries.iter().map(|(_, agent)| agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AgentRegistry {
        AgentRegistry::with_predefined(Arc::new(ModelConfig::new(vec![])))
    }

    #[test]
    fn lookup_is_case_insensitive_on_key() {
        let registry = registry();
        assert!(registry.lookup("scientist").is_some());
        assert!(registry.lookup("SCIENTIST").is_some());
    }

    #[test]
    fn lookup_matches_display_name() {
        let registry = registry();
        let agent = registry.lookup("wellness consultant").unwrap();
        assert_eq!(agent.name, "Wellness Consultant");
    }

    #[test]
    fn lookup_misses_unknown_names() {
        assert!(registry().lookup("plumber").is_none());
    }

    #[test]
    fn registry_holds_all_predefined_personas() {
        assert_eq!(registry().descriptors().count(), 9);
    }
}
