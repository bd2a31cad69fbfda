//! Terminal status notification.

use reqwest::Client;
use serde::Serialize;

use crate::error::RunError;

/// Terminal status of a run, serialized lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failed,
}

/// The single outcome a run produces. Serialized as-is into the webhook
/// body: `{"status": "success"|"failed", "message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub status: RunStatus,
    pub message: String,
}

impl Outcome {
    pub fn success() -> Self {
        Self {
            status: RunStatus::Success,
            message: "Notebook execution completed successfully".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Failed,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// Best-effort webhook notifier.
///
/// Delivery failures are logged and swallowed: a broken endpoint must never
/// mask or block the primary execution result.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: Client,
    url: Option<String>,
    secret: Option<String>,
}

impl Notifier {
    pub fn new(client: Client, url: Option<String>, secret: Option<String>) -> Self {
        Self {
            client,
            url,
            secret,
        }
    }

    /// Send the outcome if a webhook is configured. Never fails and never
    /// retries; this is the error boundary for [`RunError::Notify`].
    pub async fn notify(&self, outcome: &Outcome) {
        let Some(url) = self.url.as_deref() else {
            return;
        };

        match self.post(url, outcome).await {
            Ok(body) => tracing::info!("Webhook sent successfully: {body}"),
            Err(err) => tracing::warn!("{err}"),
        }
    }

    async fn post(&self, url: &str, outcome: &Outcome) -> Result<String, RunError> {
        let mut request = self.client.post(url).json(outcome);
        if let Some(secret) = self.secret.as_deref() {
            request = request.bearer_auth(secret);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RunError::Notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RunError::Notify(format!("HTTP status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| RunError::Notify(e.to_string()))
    }
}
