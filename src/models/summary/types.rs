use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A saved summary. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SummaryItem {
    pub id: i64,
    pub user_id: i64,
    pub transcript: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl SummaryItem {
    /// e.g. "March 1, 2025 9:05 AM"
    pub fn created_label(&self) -> String {
        self.created_at.format("%B %-d, %Y %-I:%M %p").to_string()
    }

    pub fn created_date_label(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }
}
