//! Typed results, one per agent that prompts a model.

use crate::core::error::DomainError;
use crate::structured::parser::StructuredObject;
use crate::structured::table::{cell_text, html_table, markdown_key_value_table};
use serde_json::Value;

/// Minimum log quality score that sends logs on to analysis
pub const LOG_QUALITY_THRESHOLD: i64 = 65;

/// Fields extracted by the triage agent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriageExtraction {
    pub service_name: String,
    pub transaction_id: String,
    pub timestamp: String,
    /// Anything else the model returned, shown in the summary table
    pub extra: Vec<(String, Value)>,
}

impl TriageExtraction {
    const FIELDS: [&'static str; 3] = ["service_name", "transaction_id", "timestamp"];

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Ok(Self::from_object(&StructuredObject::parse(raw)?))
    }

    pub fn from_object(object: &StructuredObject) -> Self {
        Self {
            service_name: object.text("service_name"),
            transaction_id: object.text("transaction_id"),
            timestamp: object.text("timestamp"),
            extra: object.extra_fields(&Self::FIELDS),
        }
    }

    pub fn has_service_name(&self) -> bool {
        !self.service_name.is_empty()
    }

    pub fn has_transaction_id(&self) -> bool {
        !self.transaction_id.is_empty()
    }

    /// HTML table of the extracted fields
    pub fn summary_table(&self) -> String {
        let mut rows = vec![
            ("service_name".to_string(), self.service_name.clone()),
            ("transaction_id".to_string(), self.transaction_id.clone()),
            ("timestamp".to_string(), self.timestamp.clone()),
        ];
        rows.extend(self.extra.iter().map(|(k, v)| (k.clone(), cell_text(v))));
        html_table(&rows)
    }
}

/// Verdict of the log quality check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQualityVerdict {
    /// The user asked us to search, or has no logs
    pub search: bool,
    /// 0-100 match against the expected log schema; 0 also means "absent"
    pub score: i64,
    pub reason: String,
}

impl LogQualityVerdict {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Ok(Self::from_object(&StructuredObject::parse(raw)?))
    }

    pub fn from_object(object: &StructuredObject) -> Self {
        Self {
            search: object.flag("search"),
            score: object.integer("score"),
            reason: object.text("reason"),
        }
    }

    pub fn decision(&self) -> LogQualityDecision {
        if self.search {
            LogQualityDecision::Search
        } else if self.score != 0 {
            if self.score < LOG_QUALITY_THRESHOLD {
                LogQualityDecision::Reject
            } else {
                LogQualityDecision::Accept
            }
        } else {
            // A score of exactly 0 is indistinguishable from a missing one
            LogQualityDecision::Undecided
        }
    }
}

/// Branch taken by the log quality check, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogQualityDecision {
    /// Fetch logs from the log store
    Search,
    /// Score below the threshold: ask for valid logs again
    Reject,
    /// Score at or above the threshold: analyse
    Accept,
    /// No search and a zero score: nothing happens this turn
    Undecided,
}

/// Root-cause analysis result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootCauseFinding {
    pub score: i64,
    pub rca: String,
    pub analysis: String,
    pub extra: Vec<(String, Value)>,
}

impl RootCauseFinding {
    const FIELDS: [&'static str; 3] = ["score", "rca", "analysis"];

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Ok(Self::from_object(&StructuredObject::parse(raw)?))
    }

    pub fn from_object(object: &StructuredObject) -> Self {
        Self {
            score: object.integer("score"),
            rca: object.text("rca"),
            analysis: object.text("analysis"),
            extra: object.extra_fields(&Self::FIELDS),
        }
    }

    /// Markdown key/value table: score, rca, analysis, then extra fields
    pub fn to_markdown(&self) -> String {
        let mut rows = vec![
            ("score".to_string(), self.score.to_string()),
            ("rca".to_string(), self.rca.clone()),
            ("analysis".to_string(), self.analysis.clone()),
        ];
        rows.extend(self.extra.iter().map(|(k, v)| (k.clone(), cell_text(v))));
        markdown_key_value_table(&rows)
    }
}
