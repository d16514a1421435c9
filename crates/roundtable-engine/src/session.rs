// Turn loop implementing ConversationEngine
//
// A run starts with the coordinator's seed turn, then repeats until the turn
// cap: pick the next speaker, flatten the transcript into that agent's view,
// ask the model, append the reply. A reply containing TERMINATE ends the run
// early. The coordinator itself never generates turns; it only seeds and
// terminates.

use crate::openai::{ChatClient, ChatMessage, ChatRole};
use async_trait::async_trait;
use rand::Rng;
use roundtable_core::policy::{select_next_speaker, SpeakerChoice};
use roundtable_core::{
    AgentDescriptor, ConversationEngine, EngineError, Result, SelectionMode, SessionSpec,
    Transcript, TurnRecord,
};

/// A reply containing this marker ends the conversation
pub const TERMINATION_MARKER: &str = "TERMINATE";

/// OpenAI-protocol conversation engine
#[derive(Default)]
pub struct ChatEngine {
    client: ChatClient,
}

impl ChatEngine {
    pub fn new() -> Self {
        Self {
            client: ChatClient::new(),
        }
    }

    /// Map a policy choice to an index into the session's agents.
    /// Round robin advances past the last speaker; random is uniform.
    fn resolve_choice(
        choice: SpeakerChoice,
        session: &SessionSpec,
        last_speaker: &str,
    ) -> usize {
        let n = session.agents.len();
        match choice {
            SpeakerChoice::Agent(name) => session
                .agents
                .iter()
                .position(|agent| agent.is_named(&name))
                .unwrap_or_else(|| Self::next_round_robin(session, last_speaker)),
            SpeakerChoice::RoundRobin => Self::next_round_robin(session, last_speaker),
            SpeakerChoice::Random => rand::thread_rng().gen_range(0..n),
        }
    }

    fn next_round_robin(session: &SessionSpec, last_speaker: &str) -> usize {
        match session
            .agents
            .iter()
            .position(|agent| agent.is_named(last_speaker))
        {
            Some(idx) => (idx + 1) % session.agents.len(),
            // The coordinator (or an unknown speaker) spoke last: start over.
            None => 0,
        }
    }

    /// Number of trailing transcript turns produced by `name`
    fn trailing_replies(transcript: &Transcript, name: &str) -> usize {
        transcript
            .iter()
            .rev()
            .take_while(|turn| turn.speaker.eq_ignore_ascii_case(name))
            .count()
    }

    /// Render the transcript from one agent's point of view: its own turns
    /// as assistant messages, everyone else's prefixed with the speaker name.
    fn messages_for(agent: &AgentDescriptor, transcript: &Transcript) -> Vec<ChatMessage> {
        let system = format!(
            "You are {}. {} Reply with {} when the request is fully addressed.",
            agent.name, agent.description, TERMINATION_MARKER
        );
        let mut messages = vec![ChatMessage::new(ChatRole::System, system)];
        for turn in transcript {
            if turn.speaker.eq_ignore_ascii_case(&agent.name) {
                messages.push(ChatMessage::new(ChatRole::Assistant, turn.content.clone()));
            } else {
                messages.push(ChatMessage::new(
                    ChatRole::User,
                    format!("{}: {}", turn.speaker, turn.content),
                ));
            }
        }
        messages
    }

    /// Ask the model for the agent's next turn, trying endpoints in order
    async fn generate_reply(
        &self,
        agent: &AgentDescriptor,
        transcript: &Transcript,
    ) -> Result<String> {
        let config = &agent.model_config;
        if config.endpoints.is_empty() {
            return Err(EngineError::config("model config has no endpoints"));
        }

        let messages = Self::messages_for(agent, transcript);
        let mut last_error = None;
        for endpoint in &config.endpoints {
            match self.client.complete(endpoint, config.seed, &messages).await {
                Ok(reply) => return Ok(reply),
                Err(e) => {
                    tracing::warn!(
                        model = %endpoint.model,
                        error = %e,
                        "model endpoint failed; trying next"
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| EngineError::provider("all model endpoints failed")))
    }
}

#[async_trait]
impl ConversationEngine for ChatEngine {
    async fn run(&self, session: SessionSpec) -> Result<Transcript> {
        if session.agents.is_empty() {
            return Err(EngineError::NoParticipants);
        }

        let selected: Vec<String> = session.agents.iter().map(|a| a.name.clone()).collect();
        let mut transcript: Transcript = vec![TurnRecord::new(
            session.coordinator.clone(),
            session.seed_message.clone(),
        )];
        let mut last_speaker = session.coordinator.clone();

        while transcript.len() < session.max_rounds {
            let choice = match session.selection {
                SelectionMode::RoundRobin => SpeakerChoice::RoundRobin,
                SelectionMode::RuleTable => select_next_speaker(
                    &last_speaker,
                    &transcript,
                    &selected,
                    &session.coordinator,
                ),
            };
            let mut idx = Self::resolve_choice(choice, &session, &last_speaker);

            // An agent out of consecutive-reply budget yields the floor.
            if Self::trailing_replies(&transcript, &session.agents[idx].name)
                >= session.agents[idx].max_auto_replies
            {
                idx = (idx + 1) % session.agents.len();
            }

            let agent = &session.agents[idx];
            let reply = self.generate_reply(agent, &transcript).await?;
            tracing::debug!(speaker = %agent.name, round = transcript.len(), "turn completed");

            let terminated = reply.contains(TERMINATION_MARKER);
            transcript.push(TurnRecord::new(agent.name.clone(), reply));
            last_speaker = agent.name.clone();
            if terminated {
                break;
            }
        }

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_core::model_config::{ModelConfig, ModelEndpoint};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    fn agent_for(server_uri: &str, name: &str) -> AgentDescriptor {
        let config = ModelConfig::new(vec![ModelEndpoint {
            model: "test-model".into(),
            api_key: "sk-test".into(),
            base_url: Some(format!("{}/v1", server_uri)),
        }]);
        AgentDescriptor::new(name, "Answers questions.", Arc::new(config))
    }

    #[tokio::test]
    async fn single_session_runs_to_turn_cap() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("An answer.")))
            .mount(&server)
            .await;

        let engine = ChatEngine::new();
        let session = SessionSpec::single(agent_for(&server.uri(), "Scientist"), "Why is the sky blue?");
        let transcript = engine.run(session).await.unwrap();

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].speaker, "User Proxy");
        assert_eq!(transcript[1].speaker, "Scientist");
        assert_eq!(transcript[1].content, "An answer.");
    }

    #[tokio::test]
    async fn termination_marker_stops_the_run_early() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("Done here. TERMINATE")),
            )
            .mount(&server)
            .await;

        let engine = ChatEngine::new();
        let session = SessionSpec::group(
            vec![
                agent_for(&server.uri(), "Scientist"),
                agent_for(&server.uri(), "Writer"),
            ],
            "Settle this quickly.",
        );
        let transcript = engine.run(session).await.unwrap();

        // Seed plus the one terminating reply.
        assert_eq!(transcript.len(), 2);
        assert!(transcript[1].content.contains("TERMINATE"));
    }

    #[tokio::test]
    async fn failing_endpoint_fails_over_to_the_next() {
        let dead = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("provider down"))
            .mount(&dead)
            .await;

        let live = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("TERMINATE")))
            .mount(&live)
            .await;

        let config = ModelConfig::new(vec![
            ModelEndpoint {
                model: "dead-model".into(),
                api_key: "sk-test".into(),
                base_url: Some(format!("{}/v1", dead.uri())),
            },
            ModelEndpoint {
                model: "live-model".into(),
                api_key: "sk-test".into(),
                base_url: Some(format!("{}/v1", live.uri())),
            },
        ]);
        let agent = AgentDescriptor::new("Scientist", "Answers questions.", Arc::new(config));

        let engine = ChatEngine::new();
        let transcript = engine
            .run(SessionSpec::single(agent, "Hello"))
            .await
            .unwrap();
        assert_eq!(transcript.len(), 2);
    }

    #[tokio::test]
    async fn provider_error_surfaces_when_all_endpoints_fail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("provider down"))
            .mount(&server)
            .await;

        let engine = ChatEngine::new();
        let session = SessionSpec::single(agent_for(&server.uri(), "Scientist"), "Hello");
        let err = engine.run(session).await.unwrap_err();
        assert!(matches!(err, EngineError::Provider(_)));
    }
}
