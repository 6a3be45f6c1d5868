use actix_session::Session;
use actix_web::{HttpResponse, http::StatusCode, web};
use sqlx::PgPool;

use super::api_error;
use crate::auth::session::require_user;
use crate::errors::AppError;
use crate::handlers::helpers;
use crate::models::summary as summary_model;
use crate::summary::{extract_reminder_candidates, format_response};
use crate::templates_structs::{
    ApiSaveSummaryRequest, ApiSaveSummaryResponse, ApiSummarizeRequest, ApiSummarizeResponse,
};
use crate::webhook::WebhookClient;

/// POST /api/v1/summarize - Run the webhook and return the canonical text
/// plus the interpreted result. Nothing is stored.
pub async fn summarize(
    session: Session,
    webhook: web::Data<WebhookClient>,
    body: web::Json<ApiSummarizeRequest>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;

    if body.transcript.trim().is_empty() {
        return Ok(api_error(StatusCode::BAD_REQUEST, "Transcript cannot be empty.", None));
    }

    match webhook.summarize(&body.transcript).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiSummarizeResponse {
            summary: format_response(&result),
            result,
        })),
        Err(e) => {
            log::error!("Summarization failed for user {}: {e}", user.id);
            Ok(api_error(StatusCode::BAD_GATEWAY, "Summarization failed", Some(e.to_string())))
        }
    }
}

/// GET /api/v1/summaries - Newest first.
pub async fn list(
    pool: web::Data<PgPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    let items = summary_model::find_for_user(&pool, user.id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/v1/summaries - Save a summary and create its reminders.
pub async fn create(
    pool: web::Data<PgPool>,
    session: Session,
    body: web::Json<ApiSaveSummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    let req = body.into_inner();

    let text = match &req.result {
        Some(result) => format_response(result),
        None => req.summary.clone(),
    };
    if text.trim().is_empty() {
        return Ok(api_error(StatusCode::BAD_REQUEST, "Summary cannot be empty.", None));
    }

    let saved = summary_model::create_with_reminders(&pool, user.id, &req.transcript, &text, |id| {
        match &req.result {
            Some(result) => result.reminder_candidates(id),
            None => extract_reminder_candidates(&text, id),
        }
    })
    .await;

    match saved {
        Ok((summary, reminders)) => {
            Ok(HttpResponse::Created().json(ApiSaveSummaryResponse { summary, reminders }))
        }
        Err(e) => {
            log::error!("Failed to save summary for user {}: {e}", user.id);
            Ok(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save summary",
                Some(e.to_string()),
            ))
        }
    }
}

/// DELETE /api/v1/summaries/{id} - Also removes the summary's reminders.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    webhook: web::Data<WebhookClient>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    if helpers::delete_summary(&pool, &webhook, &user, path.into_inner()).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound)
    }
}
