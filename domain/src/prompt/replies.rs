//! Fixed reply texts the agents send back to the user.

/// Reply texts used by the agent decision tables
pub struct AgentReplies;

impl AgentReplies {
    /// Log quality check decided to search the log store
    pub const SEARCHING_LOGS: &'static str = "I will try to find the log from Splunk.";

    /// Log quality score below the threshold
    pub const INVALID_LOGS: &'static str =
        "I'm sorry, in order for me to investigate, please provide valid ESB transaction logs.";

    /// Log quality score at or above the threshold
    pub const LOGS_ACCEPTED: &'static str =
        "Thank you for providing the logs. I will route to the Analysis Agent to perform the analysis.";

    /// Triage found neither a service name nor a transaction id
    pub const MISSING_IDENTIFIERS: &'static str = "I'm sorry, in order for me to investigate, please provide the exact service name or sample transaction id.";

    /// Triage summary of what was extracted
    pub fn extraction_summary(table: &str) -> String {
        format!(
            "Thank you for the information. Here is what I understand: \n{}",
            table
        )
    }

    /// Triage found a service name but no transaction id
    pub fn request_transaction_id(service_name: &str) -> String {
        format!(
            "Please provide sample transaction id and all related logs for me to investigate the issue with: {}",
            service_name
        )
    }

    /// Triage found a transaction id
    pub fn request_logs(transaction_id: &str) -> String {
        format!(
            "Please provide logs for all related services for this transaction id: {}",
            transaction_id
        )
    }
}
