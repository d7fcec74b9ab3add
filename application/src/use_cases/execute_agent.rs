//! Execute Agent use case
//!
//! Runs one agent over a conversation and, where its decision table says so,
//! delegates to the next agent in the same turn.
//!
//! # Handoff rules
//!
//! | Agent | Outcome | Next agent |
//! |-------|---------|------------|
//! | Triage | no service name, no transaction id | Triage |
//! | Triage | service name and/or transaction id | Log Quality Check |
//! | Log Quality Check | `search` | Log Retrieval (delegates now) |
//! | Log Quality Check | score 1-64 | Triage |
//! | Log Quality Check | score ≥ 65 | Analysis (delegates now) |
//! | Log Quality Check | score 0 | Log Quality Check |
//! | Log Retrieval | always | Analysis (delegates now) |
//! | Analysis | always | Analysis |
//!
//! Dispatch is a `match` over [`AgentRole`]; delegation is a direct awaited
//! call, so a turn runs at most three agents one after another.

use crate::config::RetrievalParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::log_search::LogSearchPort;
use crate::ports::progress::{NoTurnProgress, TurnProgressNotifier};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use troubleshoot_domain::util::preview;
use troubleshoot_domain::{
    AgentConfig, AgentInstructions, AgentReplies, AgentRole, AgentRoster, Conversation,
    DomainError, ExecutionOutcome, LogQualityDecision, LogQualityVerdict, Message,
    RootCauseFinding, Tokenizer, TriageExtraction,
};

/// Errors that end a turn
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("{agent} could not get a reply from the model: {source}")]
    Gateway {
        agent: AgentRole,
        #[source]
        source: GatewayError,
    },

    #[error("{agent} could not use the model reply: {source}")]
    InvalidReply {
        agent: AgentRole,
        #[source]
        source: DomainError,
    },
}

impl AgentError {
    /// The agent that was running when the turn failed
    pub fn agent(&self) -> AgentRole {
        match self {
            AgentError::Gateway { agent, .. } | AgentError::InvalidReply { agent, .. } => *agent,
        }
    }
}

/// Use case for executing an agent (and whatever it delegates to)
pub struct ExecuteAgentUseCase<G, L, T>
where
    G: LlmGateway + 'static,
    L: LogSearchPort + 'static,
    T: Tokenizer + 'static,
{
    gateway: Arc<G>,
    log_search: Arc<L>,
    tokenizer: Arc<T>,
    roster: AgentRoster,
    retrieval: RetrievalParams,
}

impl<G, L, T> ExecuteAgentUseCase<G, L, T>
where
    G: LlmGateway + 'static,
    L: LogSearchPort + 'static,
    T: Tokenizer + 'static,
{
    pub fn new(gateway: Arc<G>, log_search: Arc<L>, tokenizer: Arc<T>, roster: AgentRoster) -> Self {
        Self {
            gateway,
            log_search,
            tokenizer,
            roster,
            retrieval: RetrievalParams::default(),
        }
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalParams) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Execute `role` with default (no-op) progress
    pub async fn execute(
        &self,
        role: AgentRole,
        conversation: Conversation,
    ) -> Result<ExecutionOutcome, AgentError> {
        self.execute_with_progress(role, conversation, &NoTurnProgress)
            .await
    }

    /// Execute `role` over `conversation` with progress callbacks
    pub async fn execute_with_progress(
        &self,
        role: AgentRole,
        conversation: Conversation,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<ExecutionOutcome, AgentError> {
        match role {
            AgentRole::Triage => self.triage(conversation, progress).await,
            AgentRole::LogQualityCheck => self.log_quality_check(conversation, progress).await,
            AgentRole::LogRetrieval => self.log_retrieval(conversation, progress).await,
            AgentRole::Analysis => self.analysis(conversation, progress).await,
        }
    }

    /// Triage: extract identifiers and ask for what is missing.
    ///
    /// The rules are additive: a reply with a transaction id gets both the
    /// summary and the request for logs.
    async fn triage(
        &self,
        conversation: Conversation,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<ExecutionOutcome, AgentError> {
        let role = AgentRole::Triage;
        progress.on_agent_start(role);

        let config = self.roster.get(role);
        let raw = self
            .ask_model(config, conversation.with_system_prompt(config.instructions()))
            .await?;
        let extraction = TriageExtraction::parse(&raw).map_err(invalid_reply(role))?;

        info!(
            service_name = %extraction.service_name,
            transaction_id = %extraction.transaction_id,
            timestamp = %extraction.timestamp,
            "Triage extraction"
        );

        let has_service = extraction.has_service_name();
        let has_transaction = extraction.has_transaction_id();
        let mut next_agent = role;
        let mut messages = Vec::new();

        if has_service || has_transaction {
            messages.push(Message::assistant(AgentReplies::extraction_summary(
                &extraction.summary_table(),
            )));
        }

        if has_service && !has_transaction {
            messages.push(Message::assistant(AgentReplies::request_transaction_id(
                &extraction.service_name,
            )));
            next_agent = AgentRole::LogQualityCheck;
        }

        if !has_service && !has_transaction {
            messages.push(Message::assistant(AgentReplies::MISSING_IDENTIFIERS));
        }

        if has_transaction {
            messages.push(Message::assistant(AgentReplies::request_logs(
                &extraction.transaction_id,
            )));
            next_agent = AgentRole::LogQualityCheck;
        }

        Ok(self.finish(role, ExecutionOutcome::new(next_agent, messages)))
    }

    /// Log quality check: only the latest message is shown to the model.
    async fn log_quality_check(
        &self,
        conversation: Conversation,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<ExecutionOutcome, AgentError> {
        let role = AgentRole::LogQualityCheck;
        progress.on_agent_start(role);

        let config = self.roster.get(role);
        let latest = conversation
            .last()
            .map(|message| message.content.as_str())
            .unwrap_or_default();
        let prompt = AgentInstructions::log_quality_check_prompt(config.instructions(), latest);
        let raw = self.ask_model(config, vec![Message::system(prompt)]).await?;
        let verdict = LogQualityVerdict::parse(&raw).map_err(invalid_reply(role))?;

        info!(
            search = verdict.search,
            score = verdict.score,
            reason = %verdict.reason,
            "Log quality verdict"
        );

        let outcome = match verdict.decision() {
            LogQualityDecision::Search => {
                let own = vec![Message::assistant(AgentReplies::SEARCHING_LOGS)];
                self.hand_off(role, AgentRole::LogRetrieval, progress);
                let delegated = self.log_retrieval(conversation, progress).await?;
                ExecutionOutcome::delegated(AgentRole::LogRetrieval, own, delegated)
            }
            LogQualityDecision::Reject => ExecutionOutcome::new(
                AgentRole::Triage,
                vec![Message::assistant(AgentReplies::INVALID_LOGS)],
            ),
            LogQualityDecision::Accept => {
                let own = vec![Message::assistant(AgentReplies::LOGS_ACCEPTED)];
                self.hand_off(role, AgentRole::Analysis, progress);
                let delegated = self.analysis(conversation, progress).await?;
                ExecutionOutcome::delegated(AgentRole::Analysis, own, delegated)
            }
            LogQualityDecision::Undecided => {
                debug!("No search requested and no score; staying in log quality check");
                ExecutionOutcome::new(role, Vec::new())
            }
        };

        Ok(self.finish(role, outcome))
    }

    /// Log retrieval: fetch, cut to the token budget, hand to analysis.
    async fn log_retrieval(
        &self,
        conversation: Conversation,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<ExecutionOutcome, AgentError> {
        let role = AgentRole::LogRetrieval;
        progress.on_agent_start(role);

        let query = &self.retrieval.query;
        progress.on_log_search(query);
        let result = self.log_search.search(query).await;
        if result.is_failure() {
            warn!(
                search_term = %query.search_term,
                index = %query.index,
                "Log search failed; passing the error text on to analysis"
            );
        }

        let payload = result.to_payload();
        let logs = self
            .retrieval
            .budget
            .truncate(self.tokenizer.as_ref(), &payload);
        info!(
            payload_bytes = payload.len(),
            kept_bytes = logs.len(),
            max_tokens = self.retrieval.budget.max_tokens(),
            "Retrieved logs"
        );

        let logs = Message::user(logs);
        self.hand_off(role, AgentRole::Analysis, progress);
        let delegated = self
            .analysis(conversation.with_message(logs.clone()), progress)
            .await?;

        let outcome = ExecutionOutcome::delegated(AgentRole::Analysis, vec![logs], delegated);
        Ok(self.finish(role, outcome))
    }

    /// Analysis: always the last agent of a turn.
    async fn analysis(
        &self,
        conversation: Conversation,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<ExecutionOutcome, AgentError> {
        let role = AgentRole::Analysis;
        progress.on_agent_start(role);

        let config = self.roster.get(role);
        let raw = self
            .ask_model(config, conversation.with_system_prompt(config.instructions()))
            .await?;
        let finding = RootCauseFinding::parse(&raw).map_err(invalid_reply(role))?;

        info!(score = finding.score, rca = %finding.rca, "Root cause analysis");

        let outcome = ExecutionOutcome::new(role, vec![Message::assistant(finding.to_markdown())]);
        Ok(self.finish(role, outcome))
    }

    async fn ask_model(
        &self,
        config: &AgentConfig,
        messages: Vec<Message>,
    ) -> Result<String, AgentError> {
        debug!(
            agent = config.name(),
            model = %config.model(),
            messages = messages.len(),
            "Querying model"
        );

        let raw = self
            .gateway
            .complete_json(config, &messages)
            .await
            .map_err(|source| AgentError::Gateway {
                agent: config.role(),
                source,
            })?;

        debug!(agent = config.name(), "Model reply: {}", preview(&raw, 300));
        Ok(raw)
    }

    fn hand_off(&self, from: AgentRole, to: AgentRole, progress: &dyn TurnProgressNotifier) {
        info!("Handing off from {} to {}", from, to);
        progress.on_handoff(from, to);
    }

    fn finish(&self, role: AgentRole, outcome: ExecutionOutcome) -> ExecutionOutcome {
        debug_assert!(
            role.can_hand_off_to(outcome.next_agent),
            "{} cannot hand off to {}",
            role,
            outcome.next_agent
        );
        debug!(
            agent = %role,
            next_agent = %outcome.next_agent,
            messages = outcome.messages.len(),
            "Agent finished"
        );
        outcome
    }
}

fn invalid_reply(agent: AgentRole) -> impl FnOnce(DomainError) -> AgentError {
    move |source| {
        warn!("{} received an unusable reply: {}", agent, source);
        AgentError::InvalidReply { agent, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::log_search::{LogQuery, LogSearchResult};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use troubleshoot_domain::Role;

    // ==================== Test Mocks ====================

    /// Replies in order and records what each agent sent
    struct MockGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: Mutex<Vec<(AgentRole, Vec<Message>)>>,
    }

    impl MockGateway {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: GatewayError) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from([Err(error)])),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(AgentRole, Vec<Message>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn complete_json(
            &self,
            agent: &AgentConfig,
            messages: &[Message],
        ) -> Result<String, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((agent.role(), messages.to_vec()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
        }
    }

    struct MockLogSearch {
        result: LogSearchResult,
        queries: Mutex<Vec<LogQuery>>,
    }

    impl MockLogSearch {
        fn new(result: LogSearchResult) -> Self {
            Self {
                result,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LogSearchPort for MockLogSearch {
        async fn search(&self, query: &LogQuery) -> LogSearchResult {
            self.queries.lock().unwrap().push(query.clone());
            self.result.clone()
        }
    }

    /// One token per character
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

    #[derive(Default)]
    struct RecordingProgress {
        handoffs: Mutex<Vec<(AgentRole, AgentRole)>>,
        started: Mutex<Vec<AgentRole>>,
    }

    impl TurnProgressNotifier for RecordingProgress {
        fn on_agent_start(&self, role: AgentRole) {
            self.started.lock().unwrap().push(role);
        }

        fn on_handoff(&self, from: AgentRole, to: AgentRole) {
            self.handoffs.lock().unwrap().push((from, to));
        }

        fn on_turn_complete(&self, _next: AgentRole) {}
    }

    const FINDING: &str = r#"{"score": 85, "rca": "ESB timeout to SCV", "analysis": "SCV returned 503"}"#;

    fn use_case(
        gateway: MockGateway,
        search: LogSearchResult,
    ) -> (
        ExecuteAgentUseCase<MockGateway, MockLogSearch, CharTokenizer>,
        Arc<MockGateway>,
        Arc<MockLogSearch>,
    ) {
        let gateway = Arc::new(gateway);
        let log_search = Arc::new(MockLogSearch::new(search));
        let use_case = ExecuteAgentUseCase::new(
            Arc::clone(&gateway),
            Arc::clone(&log_search),
            Arc::new(CharTokenizer),
            AgentRoster::default(),
        );
        (use_case, gateway, log_search)
    }

    fn no_logs() -> LogSearchResult {
        LogSearchResult::Records(vec![])
    }

    fn conversation(user: &str) -> Conversation {
        Conversation::from_messages(vec![Message::user(user)])
    }

    // ==================== Triage ====================

    #[tokio::test]
    async fn test_triage_with_service_and_transaction_id() {
        let (use_case, gateway, _) = use_case(
            MockGateway::new(&[r#"{"service_name": "X", "transaction_id": "TX123", "timestamp": ""}"#]),
            no_logs(),
        );

        let outcome = use_case
            .execute(AgentRole::Triage, conversation("service is X, transaction id TX123"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::LogQualityCheck);
        assert_eq!(outcome.messages.len(), 2);
        assert!(outcome.messages.iter().all(|m| m.role == Role::Assistant));
        assert!(outcome.messages[0].content.starts_with("Thank you for the information."));
        assert!(outcome.messages[0].content.contains("<table>"));
        assert_eq!(outcome.messages[1].content, AgentReplies::request_logs("TX123"));

        // System instructions first, then the history
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1[0].role, Role::System);
        assert_eq!(calls[0].1[1], Message::user("service is X, transaction id TX123"));
    }

    #[tokio::test]
    async fn test_triage_with_service_name_only() {
        let (use_case, _, _) = use_case(
            MockGateway::new(&[r#"{"service_name": "rbt-service", "transaction_id": ""}"#]),
            no_logs(),
        );

        let outcome = use_case
            .execute(AgentRole::Triage, conversation("rbt-service is failing"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::LogQualityCheck);
        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(
            outcome.messages[1].content,
            AgentReplies::request_transaction_id("rbt-service")
        );
    }

    #[tokio::test]
    async fn test_triage_with_transaction_id_only() {
        let (use_case, _, _) = use_case(
            MockGateway::new(&[r#"{"service_name": "", "transaction_id": "TX9"}"#]),
            no_logs(),
        );

        let outcome = use_case
            .execute(AgentRole::Triage, conversation("TX9 failed"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::LogQualityCheck);
        assert_eq!(outcome.messages.len(), 2);
        assert!(outcome.messages[1].content.contains("TX9"));
    }

    #[tokio::test]
    async fn test_triage_without_identifiers_stays() {
        let (use_case, _, _) = use_case(
            MockGateway::new(&[r#"{"service_name": "", "transaction_id": "", "timestamp": ""}"#]),
            no_logs(),
        );

        let outcome = use_case
            .execute(AgentRole::Triage, conversation("something is broken"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::Triage);
        assert_eq!(
            outcome.messages,
            vec![Message::assistant(AgentReplies::MISSING_IDENTIFIERS)]
        );
    }

    #[tokio::test]
    async fn test_triage_missing_fields_treated_as_empty() {
        let (use_case, _, _) = use_case(MockGateway::new(&["{}"]), no_logs());

        let outcome = use_case
            .execute(AgentRole::Triage, conversation("hi"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::Triage);
        assert_eq!(outcome.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_triage_invalid_json_is_an_error() {
        let (use_case, _, _) = use_case(MockGateway::new(&["I cannot help"]), no_logs());

        let err = use_case
            .execute(AgentRole::Triage, conversation("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::InvalidReply { agent: AgentRole::Triage, .. }));
    }

    // ==================== Log Quality Check ====================

    #[tokio::test]
    async fn test_log_check_sends_only_latest_message() {
        let (use_case, gateway, _) = use_case(
            MockGateway::new(&[r#"{"search": false, "score": 20, "reason": "no schema"}"#]),
            no_logs(),
        );
        let history = Conversation::from_messages(vec![
            Message::user("service is X"),
            Message::assistant("Please provide logs"),
            Message::user("ExceptionInfo.transactionId=TX1"),
        ]);

        use_case
            .execute(AgentRole::LogQualityCheck, history)
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[0].1.len(), 1);
        assert_eq!(calls[0].1[0].role, Role::System);
        assert!(calls[0].1[0].content.ends_with("Input Log:\n\nExceptionInfo.transactionId=TX1"));
        assert!(!calls[0].1[0].content.contains("service is X"));
    }

    #[tokio::test]
    async fn test_log_check_low_score_returns_to_triage() {
        for score in [1, 30, 64] {
            let reply = format!(r#"{{"search": false, "score": {}, "reason": "r"}}"#, score);
            let (use_case, gateway, _) = use_case(MockGateway::new(&[&reply]), no_logs());

            let outcome = use_case
                .execute(AgentRole::LogQualityCheck, conversation("random text"))
                .await
                .unwrap();

            assert_eq!(outcome.next_agent, AgentRole::Triage);
            assert_eq!(
                outcome.messages,
                vec![Message::assistant(AgentReplies::INVALID_LOGS)]
            );
            assert_eq!(gateway.calls().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_log_check_good_score_delegates_to_analysis() {
        let (use_case, gateway, log_search) = use_case(
            MockGateway::new(&[r#"{"search": false, "score": 80, "reason": "ok"}"#, FINDING]),
            no_logs(),
        );
        let history = conversation("ExceptionInfo.transactionId=TX1 k8s_container_name=esb");

        let outcome = use_case
            .execute(AgentRole::LogQualityCheck, history.clone())
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::Analysis);
        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(outcome.messages[0].content, AgentReplies::LOGS_ACCEPTED);
        assert!(outcome.messages[1].content.contains("| **Score** |"));
        assert!(outcome.messages[1].content.contains("| **Rca** |"));
        assert!(outcome.messages[1].content.contains("| **Analysis** |"));

        // Analysis sees the full original conversation
        let calls = gateway.calls();
        assert_eq!(calls[1].0, AgentRole::Analysis);
        assert_eq!(&calls[1].1[1..], history.messages());
        assert!(log_search.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_check_threshold_boundary() {
        let (use_case, _, _) = use_case(
            MockGateway::new(&[r#"{"search": false, "score": 65}"#, FINDING]),
            no_logs(),
        );
        let outcome = use_case
            .execute(AgentRole::LogQualityCheck, conversation("logs"))
            .await
            .unwrap();
        assert_eq!(outcome.next_agent, AgentRole::Analysis);
    }

    #[tokio::test]
    async fn test_log_check_zero_score_is_silent_no_op() {
        let (use_case, gateway, _) = use_case(
            MockGateway::new(&[r#"{"search": false, "score": 0, "reason": "nothing"}"#]),
            no_logs(),
        );

        let outcome = use_case
            .execute(AgentRole::LogQualityCheck, conversation("hello?"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::LogQualityCheck);
        assert!(outcome.messages.is_empty());
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_log_check_search_delegates_to_retrieval() {
        let records = vec![serde_json::json!({"ExceptionInfo.transactionId": "DGPS1"})];
        let (use_case, gateway, log_search) = use_case(
            MockGateway::new(&[r#"{"search": true, "score": 0, "reason": "no logs"}"#, FINDING]),
            LogSearchResult::Records(records),
        );
        let history = Conversation::from_messages(vec![
            Message::user("service is X"),
            Message::user("I don't have any logs"),
        ]);

        let outcome = use_case
            .execute(AgentRole::LogQualityCheck, history.clone())
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::LogRetrieval);
        assert_eq!(outcome.messages.len(), 3);
        assert_eq!(outcome.messages[0], Message::assistant(AgentReplies::SEARCHING_LOGS));
        assert_eq!(
            outcome.messages[1],
            Message::user(r#"[{"ExceptionInfo.transactionId":"DGPS1"}]"#)
        );
        assert!(outcome.messages[2].content.starts_with("| **Score** |"));

        // Retrieval received the whole original conversation, then added the logs
        let calls = gateway.calls();
        let analysis_messages = &calls[1].1;
        assert_eq!(&analysis_messages[1..3], history.messages());
        assert_eq!(analysis_messages[3], outcome.messages[1]);
        assert_eq!(log_search.queries.lock().unwrap().len(), 1);
    }

    // ==================== Log Retrieval ====================

    #[tokio::test]
    async fn test_retrieval_uses_configured_query_and_budget() {
        let long_record = serde_json::json!("x".repeat(200));
        let (use_case, gateway, log_search) = use_case(
            MockGateway::new(&[FINDING]),
            LogSearchResult::Records(vec![long_record]),
        );
        let use_case = use_case.with_retrieval(
            RetrievalParams::default()
                .with_query(LogQuery::new("TX42", "prod_index"))
                .with_max_tokens(50),
        );

        let outcome = use_case
            .execute(AgentRole::LogRetrieval, conversation("find it"))
            .await
            .unwrap();

        assert_eq!(
            log_search.queries.lock().unwrap()[0],
            LogQuery::new("TX42", "prod_index")
        );
        assert_eq!(outcome.next_agent, AgentRole::Analysis);
        assert_eq!(outcome.messages[0].role, Role::User);
        assert_eq!(outcome.messages[0].content.chars().count(), 50);
        assert!(outcome.messages[0].content.starts_with("[\"xxx"));
        assert_eq!(gateway.calls()[0].1.last().unwrap(), &outcome.messages[0]);
    }

    #[tokio::test]
    async fn test_retrieval_failure_flows_to_analysis_as_text() {
        let (use_case, gateway, _) = use_case(
            MockGateway::new(&[FINDING]),
            LogSearchResult::Failure("Error: 503, Service Unavailable".to_string()),
        );

        let outcome = use_case
            .execute(AgentRole::LogRetrieval, conversation("find it"))
            .await
            .unwrap();

        assert_eq!(
            outcome.messages[0],
            Message::user(r#""Error: 503, Service Unavailable""#)
        );
        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(gateway.calls().len(), 1);
    }

    // ==================== Analysis ====================

    #[tokio::test]
    async fn test_analysis_is_terminal() {
        let (use_case, _, _) = use_case(MockGateway::new(&[FINDING]), no_logs());

        let outcome = use_case
            .execute(AgentRole::Analysis, conversation("why did it fail?"))
            .await
            .unwrap();

        assert_eq!(outcome.next_agent, AgentRole::Analysis);
        assert_eq!(outcome.messages.len(), 1);
        assert_eq!(
            outcome.messages[0].content,
            "| **Score** |\n| ----- |\n| 85 |\n| **Rca** |\n| ESB timeout to SCV |\n| **Analysis** |\n| SCV returned 503 |\n"
        );
    }

    #[tokio::test]
    async fn test_analysis_invalid_json_propagates() {
        let (use_case, _, _) = use_case(
            MockGateway::new(&[r#"{"score": 85, "rca": "unterminated"#]),
            no_logs(),
        );

        let err = use_case
            .execute(AgentRole::Analysis, conversation("why?"))
            .await
            .unwrap_err();

        assert_eq!(err.agent(), AgentRole::Analysis);
        assert!(matches!(err, AgentError::InvalidReply { .. }));
    }

    #[tokio::test]
    async fn test_gateway_error_propagates_with_agent() {
        let (use_case, _, _) = use_case(MockGateway::failing(GatewayError::Timeout), no_logs());

        let err = use_case
            .execute(AgentRole::Triage, conversation("hi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AgentError::Gateway {
                agent: AgentRole::Triage,
                source: GatewayError::Timeout
            }
        ));
    }

    #[tokio::test]
    async fn test_progress_sees_delegation_chain() {
        let (use_case, _, _) = use_case(
            MockGateway::new(&[r#"{"search": true}"#, FINDING]),
            no_logs(),
        );
        let progress = RecordingProgress::default();

        use_case
            .execute_with_progress(AgentRole::LogQualityCheck, conversation("no logs"), &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.started.lock().unwrap(),
            vec![
                AgentRole::LogQualityCheck,
                AgentRole::LogRetrieval,
                AgentRole::Analysis
            ]
        );
        let handoffs = progress.handoffs.lock().unwrap();
        assert_eq!(handoffs[0], (AgentRole::LogQualityCheck, AgentRole::LogRetrieval));
        assert_eq!(handoffs[1], (AgentRole::LogRetrieval, AgentRole::Analysis));
    }
}
