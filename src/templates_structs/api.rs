use serde::{Deserialize, Serialize};

use crate::models::reminder::Reminder;
use crate::models::summary::SummaryItem;
use crate::summary::WebhookResult;

/// POST /api/v1/summarize
#[derive(Deserialize, Debug)]
pub struct ApiSummarizeRequest {
    pub transcript: String,
}

#[derive(Serialize, Debug)]
pub struct ApiSummarizeResponse {
    /// Canonical summary text.
    pub summary: String,
    pub result: WebhookResult,
}

/// POST /api/v1/summaries. With `result`, reminders come from the structured
/// value and `summary` is ignored; without it, `summary` is re-parsed.
#[derive(Deserialize, Debug)]
pub struct ApiSaveSummaryRequest {
    pub transcript: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub result: Option<WebhookResult>,
}

#[derive(Serialize, Debug)]
pub struct ApiSaveSummaryResponse {
    pub summary: SummaryItem,
    pub reminders: Vec<Reminder>,
}

/// POST /api/v1/reminders
#[derive(Deserialize, Debug)]
pub struct ApiReminderRequest {
    pub text: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, optional.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub summary_id: Option<i64>,
}

/// API error response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    pub details: Option<String>,
}
