//! Run Turn use case.
//!
//! One user message in, zero or more agent messages out. The turn is handled
//! by the session's current agent; its outcome decides who handles the next
//! turn.

use crate::ports::llm_gateway::LlmGateway;
use crate::ports::log_search::LogSearchPort;
use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use crate::use_cases::execute_agent::{AgentError, ExecuteAgentUseCase};
use thiserror::Error;
use tracing::{info, warn};
use troubleshoot_domain::{AgentRole, Message, SessionState, Tokenizer};

/// Errors that can occur during a turn
#[derive(Error, Debug)]
pub enum RunTurnError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// What a turn produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutput {
    /// Agent that received the user message
    pub handled_by: AgentRole,
    /// Agent that will receive the next user message
    pub next_agent: AgentRole,
    /// Messages appended after the user message, in order
    pub messages: Vec<Message>,
}

/// Use case for running one conversation turn
pub struct RunTurnUseCase<G, L, T>
where
    G: LlmGateway + 'static,
    L: LogSearchPort + 'static,
    T: Tokenizer + 'static,
{
    agents: ExecuteAgentUseCase<G, L, T>,
}

impl<G, L, T> RunTurnUseCase<G, L, T>
where
    G: LlmGateway + 'static,
    L: LogSearchPort + 'static,
    T: Tokenizer + 'static,
{
    pub fn new(agents: ExecuteAgentUseCase<G, L, T>) -> Self {
        Self { agents }
    }

    pub fn agents(&self) -> &ExecuteAgentUseCase<G, L, T> {
        &self.agents
    }

    pub async fn execute(
        &self,
        session: &mut SessionState,
        user_message: &str,
    ) -> Result<TurnOutput, RunTurnError> {
        self.execute_with_progress(session, user_message, &NoTurnProgress)
            .await
    }

    /// Append the user message and run the current agent.
    ///
    /// On error the user message stays in the conversation and the current
    /// agent is unchanged, so the user can simply try again.
    pub async fn execute_with_progress(
        &self,
        session: &mut SessionState,
        user_message: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<TurnOutput, RunTurnError> {
        if user_message.trim().is_empty() {
            return Err(RunTurnError::EmptyMessage);
        }

        let handled_by = session.current_agent();
        session.push_user_message(user_message);
        info!(agent = %handled_by, "Running turn");

        let outcome = match self
            .agents
            .execute_with_progress(handled_by, session.conversation().clone(), progress)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(agent = %handled_by, "Turn failed: {}", e);
                progress.on_turn_failed(e.agent());
                return Err(e.into());
            }
        };

        let next_agent = outcome.next_agent;
        let messages = session.apply(outcome).to_vec();
        progress.on_turn_complete(next_agent);
        info!(
            agent = %handled_by,
            next_agent = %next_agent,
            messages = messages.len(),
            "Turn complete"
        );

        Ok(TurnOutput {
            handled_by,
            next_agent,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::ports::log_search::{LogQuery, LogSearchResult};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use troubleshoot_domain::{AgentConfig, AgentReplies, AgentRoster, DomainError, Role};

    struct ScriptedGateway {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedGateway {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn complete_json(
            &self,
            _agent: &AgentConfig,
            _messages: &[Message],
        ) -> Result<String, GatewayError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(GatewayError::EmptyResponse)
        }
    }

    struct StaticLogSearch;

    #[async_trait]
    impl LogSearchPort for StaticLogSearch {
        async fn search(&self, _query: &LogQuery) -> LogSearchResult {
            LogSearchResult::Records(vec![serde_json::json!({"level": "ERROR"})])
        }
    }

    struct CharTokenizer;

    impl Tokenizer for CharTokenizer {
        fn encode(&self, text: &str) -> Vec<u32> {
            text.chars().map(u32::from).collect()
        }

        fn decode(&self, tokens: &[u32]) -> Result<String, DomainError> {
            tokens
                .iter()
                .map(|&t| char::from_u32(t).ok_or_else(|| DomainError::Tokenizer(t.to_string())))
                .collect()
        }
    }

    fn run_turn(
        replies: &[&str],
    ) -> RunTurnUseCase<ScriptedGateway, StaticLogSearch, CharTokenizer> {
        RunTurnUseCase::new(ExecuteAgentUseCase::new(
            Arc::new(ScriptedGateway::new(replies)),
            Arc::new(StaticLogSearch),
            Arc::new(CharTokenizer),
            AgentRoster::default(),
        ))
    }

    const FINDING: &str = r#"{"score": 90, "rca": "Downstream timeout", "analysis": "503 from SCV"}"#;

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let use_case = run_turn(&[]);
        let mut session = SessionState::default();
        let before = session.conversation().len();

        let err = use_case.execute(&mut session, "   ").await.unwrap_err();

        assert!(matches!(err, RunTurnError::EmptyMessage));
        assert_eq!(session.conversation().len(), before);
    }

    #[tokio::test]
    async fn test_identifiers_then_valid_logs() {
        let use_case = run_turn(&[
            r#"{"service_name": "X", "transaction_id": "TX123", "timestamp": ""}"#,
            r#"{"search": false, "score": 80, "reason": "matches"}"#,
            FINDING,
        ]);
        let mut session = SessionState::default();

        let first = use_case
            .execute(&mut session, "service is X, transaction id TX123")
            .await
            .unwrap();
        assert_eq!(first.handled_by, AgentRole::Triage);
        assert_eq!(first.next_agent, AgentRole::LogQualityCheck);
        assert_eq!(first.messages.len(), 2);
        assert_eq!(session.current_agent(), AgentRole::LogQualityCheck);

        let second = use_case
            .execute(&mut session, "ExceptionInfo.transactionId=TX123 ...")
            .await
            .unwrap();
        assert_eq!(second.handled_by, AgentRole::LogQualityCheck);
        assert_eq!(second.next_agent, AgentRole::Analysis);
        assert_eq!(second.messages[0].content, AgentReplies::LOGS_ACCEPTED);
        assert!(second.messages[1].content.contains("Downstream timeout"));
        assert_eq!(session.current_agent(), AgentRole::Analysis);

        // greeting + user + 2 + user + 2
        assert_eq!(session.conversation().len(), 7);
    }

    #[tokio::test]
    async fn test_no_logs_triggers_search() {
        let use_case = run_turn(&[
            r#"{"service_name": "rbt", "transaction_id": ""}"#,
            r#"{"search": true, "score": 0, "reason": "user has no logs"}"#,
            FINDING,
        ]);
        let mut session = SessionState::default();

        use_case.execute(&mut session, "rbt is down").await.unwrap();
        let output = use_case
            .execute(&mut session, "I don't have any logs")
            .await
            .unwrap();

        assert_eq!(output.next_agent, AgentRole::LogRetrieval);
        assert_eq!(output.messages.len(), 3);
        assert_eq!(output.messages[0].content, AgentReplies::SEARCHING_LOGS);
        assert_eq!(output.messages[1].role, Role::User);
        assert_eq!(output.messages[1].content, r#"[{"level":"ERROR"}]"#);
        assert_eq!(output.messages[2].role, Role::Assistant);
        assert_eq!(session.current_agent(), AgentRole::LogRetrieval);
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_message_and_agent() {
        let use_case = run_turn(&["not json at all"]);
        let mut session = SessionState::default();
        let before = session.conversation().len();

        let err = use_case.execute(&mut session, "hello").await.unwrap_err();

        assert!(matches!(
            err,
            RunTurnError::Agent(AgentError::InvalidReply {
                agent: AgentRole::Triage,
                ..
            })
        ));
        assert_eq!(session.current_agent(), AgentRole::Triage);
        assert_eq!(session.conversation().len(), before + 1);
        assert_eq!(
            session.conversation().last(),
            Some(&Message::user("hello"))
        );
    }
}
