//! HTTP log search adapter
//!
//! Posts `{"search_term": ..., "index": ...}` to a search service that
//! fronts the log store and answers with `{"results": [...]}`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use troubleshoot_application::ports::log_search::{LogQuery, LogSearchPort, LogSearchResult};

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    search_term: &'a str,
    index: &'a str,
}

/// Log search over HTTP
pub struct HttpLogSearch {
    client: reqwest::Client,
    endpoint: String,
    cookie: Option<String>,
}

impl HttpLogSearch {
    pub fn new(
        endpoint: impl Into<String>,
        cookie: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            cookie: cookie.filter(|c| !c.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogSearchPort for HttpLogSearch {
    async fn search(&self, query: &LogQuery) -> LogSearchResult {
        debug!(
            endpoint = %self.endpoint,
            search_term = %query.search_term,
            index = %query.index,
            "Searching logs"
        );

        let mut request = self.client.post(&self.endpoint).json(&SearchRequest {
            search_term: &query.search_term,
            index: &query.index,
        });
        if let Some(cookie) = &self.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Log search request failed: {}", e);
                return LogSearchResult::Failure(format!("Error: {}", e));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return LogSearchResult::Failure(format!("Error: {}, {}", status.as_u16(), e)),
        };

        if status != reqwest::StatusCode::OK {
            return LogSearchResult::Failure(format!("Error: {}, {}", status.as_u16(), body));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(mut json) => match json.get_mut("results").map(Value::take) {
                Some(Value::Array(records)) => LogSearchResult::Records(records),
                Some(other) => LogSearchResult::Records(vec![other]),
                None => LogSearchResult::Failure(format!(
                    "Error: {}, response has no results: {}",
                    status.as_u16(),
                    body
                )),
            },
            Err(e) => LogSearchResult::Failure(format!(
                "Error: {}, invalid JSON in response: {}",
                status.as_u16(),
                e
            )),
        }
    }
}
