use sqlx::PgPool;

use crate::auth::session::CurrentUser;
use crate::auth::validate;
use crate::models::reminder::NewReminder;
use crate::models::summary;
use crate::webhook::{SummaryDeletedPayload, WebhookClient};

pub const MAX_REMINDER_TEXT: usize = 500;

/// Build a manual reminder from form-style input. Date is required; a blank
/// or malformed time leaves the reminder at midnight UTC.
pub fn build_manual_reminder(
    text: &str,
    date: &str,
    time: Option<&str>,
    summary_id: Option<i64>,
) -> Result<NewReminder, String> {
    if text.trim().is_empty() || date.trim().is_empty() {
        return Err("Please provide both text and a date for the reminder.".to_string());
    }
    if let Some(err) = validate::validate_required(text, "Reminder text", MAX_REMINDER_TEXT) {
        return Err(err);
    }
    let date = validate::parse_form_date(date)
        .ok_or_else(|| "Reminder date must look like YYYY-MM-DD.".to_string())?;
    let time = time
        .and_then(validate::parse_form_time)
        .unwrap_or(chrono::NaiveTime::MIN);

    Ok(NewReminder {
        text: text.trim().to_string(),
        remind_at: date.and_time(time).and_utc(),
        summary_id,
    })
}

/// `""` from an unselected `<select>` means no link.
pub fn parse_optional_id(raw: &str) -> Result<Option<i64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| "Unknown summary selected.".to_string())
}

/// Send the delete notification in the background, then delete the summary
/// (and, by cascade, its reminders). Returns false when the summary does not
/// exist for this user.
pub async fn delete_summary(
    pool: &PgPool,
    webhook: &WebhookClient,
    user: &CurrentUser,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let Some(item) = summary::find_by_id(pool, user.id, id).await? else {
        return Ok(false);
    };

    let payload = SummaryDeletedPayload {
        name: user.full_name.clone(),
        email: user.email.clone(),
        summary: item.summary,
        transcript: item.transcript,
    };
    let notifier = webhook.clone();
    actix_web::rt::spawn(async move {
        notifier.notify_summary_deleted(&payload).await;
    });

    summary::delete(pool, user.id, id).await
}
