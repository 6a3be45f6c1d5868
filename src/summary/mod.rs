//! Summary response interpreter: turns webhook output into canonical summary
//! text and reminder candidates.

pub mod extract;
pub mod format;
pub mod types;

pub use extract::{extract_reminder_candidates, parse_due_date};
pub use format::format_response;
pub use types::{
    ActionItem, FollowUpReminder, ReminderCandidate, StructuredSummary, WebhookResult,
    serialize_iso_millis, to_iso_millis,
};
