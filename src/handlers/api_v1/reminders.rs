use actix_session::Session;
use actix_web::{HttpResponse, http::StatusCode, web};
use sqlx::PgPool;

use super::api_error;
use crate::auth::session::require_user;
use crate::errors::AppError;
use crate::handlers::helpers;
use crate::models::reminder;
use crate::templates_structs::ApiReminderRequest;

/// GET /api/v1/reminders - Soonest first.
pub async fn list(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    let items = reminder::find_for_user(&pool, user.id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/v1/reminders - Manual reminder.
pub async fn create(
    pool: web::Data<PgPool>,
    session: Session,
    body: web::Json<ApiReminderRequest>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;

    let new = match helpers::build_manual_reminder(
        &body.text,
        &body.date,
        body.time.as_deref(),
        body.summary_id,
    ) {
        Ok(new) => new,
        Err(msg) => return Ok(api_error(StatusCode::BAD_REQUEST, "Validation failed", Some(msg))),
    };

    match reminder::create(&pool, user.id, &new).await? {
        Some(created) => Ok(HttpResponse::Created().json(created)),
        None => Ok(api_error(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            Some("Linked summary not found".to_string()),
        )),
    }
}

/// POST /api/v1/reminders/{id}/toggle - Flip completion.
pub async fn toggle(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    let updated = reminder::toggle_completed(&pool, user.id, path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/v1/reminders/{id}
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    if reminder::delete(&pool, user.id, path.into_inner()).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound)
    }
}
