use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{require_user, set_flash};
use crate::errors::{AppError, see_other};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::helpers;
use crate::models::reminder;

const REMINDERS_TAB: &str = "/dashboard?tab=reminders";

#[derive(Deserialize)]
pub struct ReminderForm {
    pub csrf_token: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub summary_id: String,
}

pub async fn create(
    pool: web::Data<PgPool>,
    session: Session,
    form: web::Form<ReminderForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_user(&session)?;

    let new = helpers::parse_optional_id(&form.summary_id).and_then(|summary_id| {
        helpers::build_manual_reminder(&form.text, &form.date, Some(&form.time), summary_id)
    });
    let new = match new {
        Ok(new) => new,
        Err(msg) => {
            set_flash(&session, &msg);
            return Ok(see_other(REMINDERS_TAB));
        }
    };

    match reminder::create(&pool, user.id, &new).await {
        Ok(Some(_)) => set_flash(&session, "Manual reminder added."),
        Ok(None) => set_flash(&session, "Failed to add reminder: linked summary not found."),
        Err(e) => {
            log::error!("Failed to add reminder for user {}: {e}", user.id);
            set_flash(&session, &format!("Failed to add reminder: {e}"));
        }
    }
    Ok(see_other(REMINDERS_TAB))
}

pub async fn toggle(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_user(&session)?;
    let id = path.into_inner();

    match reminder::toggle_completed(&pool, user.id, id).await {
        Ok(Some(_)) => {}
        Ok(None) => set_flash(&session, "Could not update reminder: not found."),
        Err(e) => {
            log::error!("Failed to toggle reminder {id}: {e}");
            set_flash(&session, &format!("Could not update reminder: {e}"));
        }
    }
    Ok(see_other(REMINDERS_TAB))
}

pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_user(&session)?;
    let id = path.into_inner();

    match reminder::delete(&pool, user.id, id).await {
        Ok(true) => set_flash(&session, "Reminder deleted."),
        Ok(false) => set_flash(&session, "Could not delete reminder: not found."),
        Err(e) => {
            log::error!("Failed to delete reminder {id}: {e}");
            set_flash(&session, &format!("Could not delete reminder: {e}"));
        }
    }
    Ok(see_other(REMINDERS_TAB))
}
