use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{require_user, set_flash};
use crate::errors::{AppError, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::helpers;
use crate::models::summary as summary_model;
use crate::summary::{WebhookResult, format_response};
use crate::webhook::WebhookClient;

#[derive(Deserialize)]
pub struct SaveSummaryForm {
    pub csrf_token: String,
    #[serde(default)]
    pub transcript: String,
    /// Serialized `WebhookResult` from the summarize step.
    #[serde(default)]
    pub result: String,
}

/// Persist the pending summary and the reminders derived from its
/// structured form.
pub async fn save(
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<SaveSummaryForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_user(&session)?;

    let result: WebhookResult = match serde_json::from_str(&form.result) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Rejected save with an unreadable summary payload: {e}");
            set_flash(&session, "Could not read the generated summary. Please summarize again.");
            return Ok(see_other("/dashboard"));
        }
    };

    let text = format_response(&result);
    if text.trim().is_empty() {
        set_flash(&session, "There is no summary to save.");
        return Ok(see_other("/dashboard"));
    }

    let saved = summary_model::create_with_reminders(&pool, user.id, &form.transcript, &text, |id| {
        result.reminder_candidates(id)
    })
    .await;

    match saved {
        Ok((_, reminders)) if reminders.is_empty() => {
            set_flash(&session, "Summary saved.");
            Ok(see_other("/dashboard?tab=saved"))
        }
        Ok(_) => {
            set_flash(
                &session,
                "Summary saved and reminders created for action items and follow-ups.",
            );
            Ok(see_other("/dashboard?tab=saved"))
        }
        Err(e) => {
            log::error!("Failed to save summary for user {}: {e}", user.id);
            set_flash(&session, &format!("Failed to save summary: {e}"));
            Ok(see_other("/dashboard"))
        }
    }
}

pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    webhook: web::Data<WebhookClient>,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_user(&session)?;
    let id = path.into_inner();

    match helpers::delete_summary(&pool, &webhook, &user, id).await {
        Ok(true) => set_flash(&session, "Summary and associated reminders deleted."),
        Ok(false) => set_flash(&session, "Summary not found."),
        Err(e) => {
            log::error!("Failed to delete summary {id}: {e}");
            set_flash(&session, &format!("Could not delete summary: {e}"));
        }
    }
    Ok(see_other("/dashboard?tab=saved"))
}
