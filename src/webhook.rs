use std::fmt;

use serde::Serialize;

use crate::config::AppConfig;
use crate::summary::WebhookResult;

#[derive(Debug)]
pub enum WebhookError {
    /// The webhook answered with a non-2xx status.
    Status(u16),
    Transport(reqwest::Error),
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookError::Status(code) => write!(f, "Webhook request failed with status: {code}"),
            WebhookError::Transport(e) => write!(f, "Webhook request failed: {e}"),
        }
    }
}

impl std::error::Error for WebhookError {}

impl From<reqwest::Error> for WebhookError {
    fn from(e: reqwest::Error) -> Self {
        WebhookError::Transport(e)
    }
}

/// Body of the delete notification.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryDeletedPayload {
    pub name: String,
    pub email: String,
    pub summary: String,
    pub transcript: String,
}

/// Outbound calls to the summarization and delete-notification webhooks.
#[derive(Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    summarize_url: String,
    delete_url: Option<String>,
}

impl WebhookClient {
    pub fn new(
        summarize_url: impl Into<String>,
        delete_url: Option<String>,
        timeout: Option<std::time::Duration>,
    ) -> Result<Self, WebhookError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            summarize_url: summarize_url.into(),
            delete_url,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, WebhookError> {
        Self::new(
            config.summarize_webhook_url.clone(),
            config.delete_webhook_url.clone(),
            config.webhook_timeout,
        )
    }

    /// Send a transcript for summarization. Only a non-2xx status or a
    /// transport failure is an error; any 2xx body is interpreted.
    pub async fn summarize(&self, transcript: &str) -> Result<WebhookResult, WebhookError> {
        let response = self
            .http
            .post(&self.summarize_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(transcript.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let result = WebhookResult::from_response_body(&body);
        log::info!(
            "Summarization webhook answered {} ({} bytes, {})",
            status,
            body.len(),
            if result.is_structured() { "structured" } else { "plain text" }
        );
        Ok(result)
    }

    /// Tell the delete webhook a summary is going away. Never fails: errors
    /// are logged and dropped.
    pub async fn notify_summary_deleted(&self, payload: &SummaryDeletedPayload) {
        let Some(url) = &self.delete_url else {
            return;
        };
        match self.http.post(url).json(payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                log::debug!("Delete notification accepted ({})", resp.status());
            }
            Ok(resp) => log::warn!("Delete notification rejected with status {}", resp.status()),
            Err(e) => log::warn!("Failed to send delete summary webhook: {e}"),
        }
    }
}
