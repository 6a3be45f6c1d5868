use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::{CurrentUser, require_user, set_flash};
use crate::errors::{AppError, render, see_other};
use crate::models::{reminder, summary as summary_model};
use crate::summary::format_response;
use crate::templates_structs::{DashboardTab, DashboardTemplate, PageContext, PendingSummary};
use crate::webhook::WebhookClient;

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

#[derive(Deserialize)]
pub struct SummarizeForm {
    pub csrf_token: String,
    #[serde(default)]
    pub transcript: String,
}

async fn dashboard_template(
    pool: &PgPool,
    ctx: PageContext,
    user: &CurrentUser,
    tab: DashboardTab,
    transcript: String,
    pending: Option<PendingSummary>,
) -> Result<DashboardTemplate, AppError> {
    let summaries = summary_model::find_for_user(pool, user.id).await?;
    let reminders = reminder::find_for_user(pool, user.id).await?;
    Ok(DashboardTemplate { ctx, tab, transcript, pending, summaries, reminders })
}

pub async fn index(
    pool: web::Data<PgPool>,
    session: Session,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let user = require_user(&session)?;
    let ctx = PageContext::build(&session, &user);
    let tab = DashboardTab::from_query(query.tab.as_deref());
    render(dashboard_template(&pool, ctx, &user, tab, String::new(), None).await?)
}

/// Send the transcript to the summarization webhook and show the result,
/// ready to be saved. Nothing is persisted here.
pub async fn summarize(
    pool: web::Data<PgPool>,
    session: Session,
    webhook: web::Data<WebhookClient>,
    form: web::Form<SummarizeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user = require_user(&session)?;

    if form.transcript.trim().is_empty() {
        set_flash(&session, "Transcript cannot be empty.");
        return Ok(see_other("/dashboard"));
    }

    let SummarizeForm { transcript, .. } = form.into_inner();
    let ctx = PageContext::build(&session, &user);

    match webhook.summarize(&transcript).await {
        Ok(result) => {
            let pending = PendingSummary {
                text: format_response(&result),
                result_json: serde_json::to_string(&result)?,
            };
            let tmpl = dashboard_template(
                &pool,
                ctx,
                &user,
                DashboardTab::Summarizer,
                transcript,
                Some(pending),
            )
            .await?;
            render(tmpl)
        }
        Err(e) => {
            log::error!("Summarization failed for user {}: {e}", user.id);
            let ctx = ctx.with_flash("Could not summarize the transcript. Please try again later.");
            let tmpl =
                dashboard_template(&pool, ctx, &user, DashboardTab::Summarizer, transcript, None)
                    .await?;
            render(tmpl)
        }
    }
}
