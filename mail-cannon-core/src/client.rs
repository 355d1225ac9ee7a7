use async_trait::async_trait;
use mail_cannon_types::{OrderError, OrderPayload};
use serde_json::Value;

/// Creates warehouse orders on a remote API.
///
/// Implementations perform exactly one attempt per call; retries are not
/// part of the contract.
#[async_trait]
pub trait OrderClient: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Create one order from `payload`.
    ///
    /// Returns the decoded success body (an empty body decodes to `{}`).
    ///
    /// # Errors
    /// [`OrderError::Http`] when the API answers with an error status,
    /// [`OrderError::Transport`] when no response was received.
    async fn create_order(&self, payload: &OrderPayload) -> Result<Value, OrderError>;
}
