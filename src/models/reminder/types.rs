use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::summary::serialize_iso_millis;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub remind_at: DateTime<Utc>,
    /// `None` for a standalone reminder.
    pub summary_id: Option<i64>,
    pub completed: bool,
}

impl Reminder {
    pub fn remind_at_label(&self) -> String {
        self.remind_at.format("%B %-d, %Y %-I:%M %p").to_string()
    }
}

/// A reminder typed in by the user.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub text: String,
    pub remind_at: DateTime<Utc>,
    pub summary_id: Option<i64>,
}
