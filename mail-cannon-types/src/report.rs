//! Per-row outcomes and the end-of-run results artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OrderError;

/// Final state of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// The order was created.
    Success,
    /// The API rejected the order or could not be reached.
    Failed,
}

/// Outcome of sending one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Row number (first kept data row is 2).
    pub row: u64,
    /// Trimmed recipient email.
    pub email: String,
    /// Success or failure.
    pub status: OrderStatus,
    /// Order id reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Status code of an HTTP-level rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Full success body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Error body (HTTP failures) or reason string (transport failures).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl RunResult {
    /// A created order. The id is taken from `id`, then `hc_id`, else `"unknown"`.
    #[must_use]
    pub fn success(row: u64, email: impl Into<String>, response: Value) -> Self {
        Self {
            row,
            email: email.into(),
            status: OrderStatus::Success,
            order_id: Some(order_id_of(&response)),
            http_status: None,
            response: Some(response),
            error: None,
        }
    }

    /// A rejected or unreachable order.
    #[must_use]
    pub fn failure(row: u64, email: impl Into<String>, err: &OrderError) -> Self {
        let (http_status, error) = match err {
            OrderError::Http { status, body } => (Some(*status), body.clone()),
            OrderError::Transport { reason } => (None, Value::String(reason.clone())),
        };
        Self {
            row,
            email: email.into(),
            status: OrderStatus::Failed,
            order_id: None,
            http_status,
            response: None,
            error: Some(error),
        }
    }

    /// Whether the order was created.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == OrderStatus::Success
    }
}

fn order_id_of(body: &Value) -> String {
    ["id", "hc_id"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Results artifact written once at the end of a sending run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// When the summary was produced.
    pub run_at: DateTime<Utc>,
    /// CSV path as given on the command line.
    #[serde(rename = "csv")]
    pub source: String,
    /// Rows attempted.
    pub total: usize,
    /// Rows whose order was created.
    pub succeeded: usize,
    /// Rows whose order failed.
    pub failed: usize,
    /// Per-row outcomes in file order.
    pub orders: Vec<RunResult>,
}

impl RunSummary {
    /// Tally `orders` into a summary stamped with `run_at`.
    #[must_use]
    pub fn new(run_at: DateTime<Utc>, source: impl Into<String>, orders: Vec<RunResult>) -> Self {
        let succeeded = orders.iter().filter(|r| r.is_success()).count();
        Self {
            run_at,
            source: source.into(),
            total: orders.len(),
            succeeded,
            failed: orders.len() - succeeded,
            orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_id_prefers_id_then_hc_id() {
        assert_eq!(order_id_of(&json!({"id": "ord_1", "hc_id": "hc_9"})), "ord_1");
        assert_eq!(order_id_of(&json!({"hc_id": "hc_9"})), "hc_9");
        assert_eq!(order_id_of(&json!({"id": "", "hc_id": "hc_9"})), "hc_9");
        assert_eq!(order_id_of(&json!({"id": 42})), "42");
        assert_eq!(order_id_of(&json!({})), "unknown");
    }

    #[test]
    fn failure_keeps_http_and_transport_apart() {
        let http = RunResult::failure(3, "a@b.c", &OrderError::http(422, json!({"error": "x"})));
        assert_eq!(http.http_status, Some(422));
        assert_eq!(http.error, Some(json!({"error": "x"})));

        let transport = RunResult::failure(4, "a@b.c", &OrderError::transport("connection refused"));
        assert_eq!(transport.http_status, None);
        assert_eq!(transport.error, Some(json!("connection refused")));
    }
}
