use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use mail_cannon_core::{OrderClient, OrderError, OrderPayload};
use serde_json::{Value, json};

type Responder = dyn Fn(&OrderPayload, usize) -> Result<Value, OrderError> + Send + Sync;

/// Order client that never touches the network.
///
/// The default responder succeeds with `{"id": "mock_<n>"}` (n counts from 1),
/// except for recipients whose email starts with `fail-http`, which get a 422,
/// and `fail-transport`, which get a transport error.
pub struct MockOrderClient {
    responder: Box<Responder>,
    calls: Mutex<Vec<OrderPayload>>,
}

impl Default for MockOrderClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrderClient {
    #[must_use]
    pub fn new() -> Self {
        Self::from_fn(|payload, n| {
            let email = payload.warehouse_order.recipient_email.as_str();
            if email.starts_with("fail-http") {
                Err(OrderError::http(422, json!({"error": "forced failure"})))
            } else if email.starts_with("fail-transport") {
                Err(OrderError::transport("connection refused (mock)"))
            } else {
                Ok(json!({ "id": format!("mock_{n}") }))
            }
        })
    }

    /// Build from a closure receiving the payload and the 1-based call number.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&OrderPayload, usize) -> Result<Value, OrderError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(f),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far, in call order.
    pub fn calls(&self) -> Vec<OrderPayload> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl OrderClient for MockOrderClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_order(&self, payload: &OrderPayload) -> Result<Value, OrderError> {
        let n = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(payload.clone());
            calls.len()
        };
        (self.responder)(payload, n)
    }
}
