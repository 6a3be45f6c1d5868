use askama::Template;

use super::PageContext;
use crate::models::reminder::Reminder;
use crate::models::summary::SummaryItem;

/// Which dashboard tab is showing. Carried in the `tab` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Summarizer,
    Saved,
    Reminders,
}

impl DashboardTab {
    /// Unknown or missing values fall back to the summarizer.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("saved") => DashboardTab::Saved,
            Some("reminders") => DashboardTab::Reminders,
            _ => DashboardTab::Summarizer,
        }
    }

    pub fn is_summarizer(&self) -> bool {
        *self == DashboardTab::Summarizer
    }

    pub fn is_saved(&self) -> bool {
        *self == DashboardTab::Saved
    }

    pub fn is_reminders(&self) -> bool {
        *self == DashboardTab::Reminders
    }
}

/// A freshly generated summary waiting for the user to save it.
pub struct PendingSummary {
    /// Canonical text shown to the user.
    pub text: String,
    /// Serialized `WebhookResult`, posted back by the save form.
    pub result_json: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub tab: DashboardTab,
    pub transcript: String,
    pub pending: Option<PendingSummary>,
    pub summaries: Vec<SummaryItem>,
    pub reminders: Vec<Reminder>,
}
