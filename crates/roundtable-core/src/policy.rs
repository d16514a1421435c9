// Speaker selection for group chats
//
// Invoked by the conversation engine once per turn. The policy only decides
// when to override the engine's built-in defaults with a specific agent;
// round robin and random stay engine concerns.
//
// The coordinator hands off with a structured directive line
// (`NEXT_SPEAKER: <name>`). Scanning the coordinator's message for an agent
// name as a plain substring is kept as a compatibility fallback.

use crate::transcript::TurnRecord;

/// Directive prefix the coordinator uses to hand the floor to a specific agent
pub const NEXT_SPEAKER_TAG: &str = "NEXT_SPEAKER:";

/// Marker for a fenced code block in a message
const CODE_FENCE_MARKER: &str = "```";

/// Marker a code-execution step leaves behind on failure
const EXEC_FAILURE_MARKER: &str = "exitcode: 1";

/// Outcome of one selection decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerChoice {
    /// Override the default: this agent speaks next
    Agent(String),
    /// Defer to the engine's round-robin default
    RoundRobin,
    /// Defer to the engine's random default
    Random,
}

/// Decide which agent speaks next in a group chat.
///
/// `selected` is the ordered list of agent names the caller picked for this
/// session, excluding the coordinator. Rules, in order:
/// 1. Fewer than two turns so far: open with the first selected agent.
/// 2. The coordinator spoke last: honor its `NEXT_SPEAKER:` directive, then
///    the substring fallback, then round robin.
/// 3. A selected agent spoke last: code fence -> round robin, execution
///    failure -> same agent again, otherwise round robin.
/// 4. Anyone else: random.
pub fn select_next_speaker(
    last_speaker: &str,
    transcript: &[TurnRecord],
    selected: &[String],
    coordinator: &str,
) -> SpeakerChoice {
    if selected.is_empty() {
        return SpeakerChoice::RoundRobin;
    }

    if transcript.len() < 2 {
        return SpeakerChoice::Agent(selected[0].clone());
    }

    if last_speaker.eq_ignore_ascii_case(coordinator) {
        // The handoff to inspect is the second-to-last message.
        let handoff = &transcript[transcript.len() - 2].content;
        if let Some(name) = parse_next_speaker(handoff, selected) {
            return SpeakerChoice::Agent(name);
        }
        return match selected.iter().find(|name| handoff.contains(name.as_str())) {
            Some(name) => SpeakerChoice::Agent(name.clone()),
            None => SpeakerChoice::RoundRobin,
        };
    }

    if selected
        .iter()
        .any(|name| name.eq_ignore_ascii_case(last_speaker))
    {
        let latest = &transcript[transcript.len() - 1].content;
        if latest.contains(CODE_FENCE_MARKER) {
            return SpeakerChoice::RoundRobin;
        }
        if latest.contains(EXEC_FAILURE_MARKER) {
            // Give the same agent another attempt at the failed step.
            return SpeakerChoice::Agent(last_speaker.to_string());
        }
        return SpeakerChoice::RoundRobin;
    }

    SpeakerChoice::Random
}

/// Extract a `NEXT_SPEAKER: <name>` directive and resolve it against the
/// selected agents, case-insensitively. Returns the canonical agent name.
fn parse_next_speaker(content: &str, selected: &[String]) -> Option<String> {
    content.lines().find_map(|line| {
        let candidate = line.trim().strip_prefix(NEXT_SPEAKER_TAG)?.trim();
        selected
            .iter()
            .find(|name| name.eq_ignore_ascii_case(candidate))
            .cloned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COORDINATOR: &str = "User Proxy";

    fn selected() -> Vec<String> {
        vec!["Scientist".to_string(), "Writer".to_string()]
    }

    fn turn(speaker: &str, content: &str) -> TurnRecord {
        TurnRecord::new(speaker, content)
    }

    #[test]
    fn opening_turn_goes_to_first_selected_agent() {
        let transcript = vec![turn(COORDINATOR, "Explain photosynthesis")];
        let choice = select_next_speaker(COORDINATOR, &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::Agent("Scientist".to_string()));

        let choice = select_next_speaker(COORDINATOR, &[], &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::Agent("Scientist".to_string()));
    }

    #[test]
    fn coordinator_directive_picks_named_agent() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Scientist", "Here are the facts.\nNEXT_SPEAKER: writer"),
            turn(COORDINATOR, "Continue"),
        ];
        let choice = select_next_speaker(COORDINATOR, &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::Agent("Writer".to_string()));
    }

    #[test]
    fn coordinator_falls_back_to_substring_match() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Scientist", "The Writer should phrase this better."),
            turn(COORDINATOR, "Go on"),
        ];
        let choice = select_next_speaker(COORDINATOR, &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::Agent("Writer".to_string()));
    }

    #[test]
    fn coordinator_without_mention_defers_to_round_robin() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Scientist", "No handoff here."),
            turn(COORDINATOR, "Go on"),
        ];
        let choice = select_next_speaker(COORDINATOR, &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::RoundRobin);
    }

    #[test]
    fn code_fence_defers_to_round_robin() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Scientist", "Run this:\n```python\nprint(1)\n```"),
        ];
        let choice = select_next_speaker("Scientist", &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::RoundRobin);
    }

    #[test]
    fn execution_failure_retries_same_speaker() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Scientist", "exitcode: 1 (execution failed)"),
        ];
        let choice = select_next_speaker("Scientist", &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::Agent("Scientist".to_string()));
    }

    #[test]
    fn plain_agent_reply_defers_to_round_robin() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Writer", "A plain prose answer."),
        ];
        let choice = select_next_speaker("Writer", &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::RoundRobin);
    }

    #[test]
    fn unexpected_speaker_defers_to_random() {
        let transcript = vec![
            turn(COORDINATOR, "Start"),
            turn("Interloper", "Surprise!"),
        ];
        let choice = select_next_speaker("Interloper", &transcript, &selected(), COORDINATOR);
        assert_eq!(choice, SpeakerChoice::Random);
    }

    #[test]
    fn empty_selection_defers_to_round_robin() {
        let choice = select_next_speaker(COORDINATOR, &[], &[], COORDINATOR);
        assert_eq!(choice, SpeakerChoice::RoundRobin);
    }
}
