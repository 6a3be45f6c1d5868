use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One entry of the webhook's `action_items` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub task: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignee: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
}

/// One entry of the webhook's `follow_up_reminders` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowUpReminder {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reminder: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: String,
}

/// The structured shape a summarization webhook may answer with.
/// Only `summary` is mandatory; missing or `null` lists read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_items: Vec<ActionItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub decisions_made: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub follow_up_reminders: Vec<FollowUpReminder>,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// What the summarization webhook returned, after interpretation.
///
/// The tagged serde form is what the dashboard round-trips through its save
/// form, so the structured value reaches reminder derivation intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum WebhookResult {
    Text(String),
    Structured(StructuredSummary),
}

impl WebhookResult {
    /// Interpret a raw response body: structured JSON when it parses as such,
    /// otherwise the body verbatim as plain text.
    pub fn from_response_body(body: &str) -> Self {
        match serde_json::from_str::<StructuredSummary>(body) {
            Ok(structured) => WebhookResult::Structured(structured),
            Err(e) => {
                log::debug!("Webhook body is not a structured summary ({e}), using plain text");
                WebhookResult::Text(body.to_string())
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, WebhookResult::Structured(_))
    }
}

/// A reminder extracted from a summary, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderCandidate {
    pub text: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub remind_at: DateTime<Utc>,
    pub summary_id: i64,
}

/// `2025-03-01T00:00:00.000Z`
pub fn to_iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize_iso_millis<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_iso_millis(instant))
}
