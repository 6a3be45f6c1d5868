use sqlx::PgPool;

use super::types::*;
use crate::models::reminder::{self, Reminder};
use crate::summary::ReminderCandidate;

const SUMMARY_COLUMNS: &str = "id, user_id, transcript, summary, created_at";

/// Save a summary and the reminders derived from it in one transaction.
///
/// `derive` receives the new summary id and returns the candidates to store;
/// if any insert fails nothing is kept.
pub async fn create_with_reminders<F>(
    pool: &PgPool,
    user_id: i64,
    transcript: &str,
    summary: &str,
    derive: F,
) -> Result<(SummaryItem, Vec<Reminder>), sqlx::Error>
where
    F: FnOnce(i64) -> Vec<ReminderCandidate>,
{
    let mut tx = pool.begin().await?;

    let item = sqlx::query_as::<_, SummaryItem>(&format!(
        "INSERT INTO summaries (user_id, transcript, summary) VALUES ($1, $2, $3) \
         RETURNING {SUMMARY_COLUMNS}"
    ))
    .bind(user_id)
    .bind(transcript)
    .bind(summary)
    .fetch_one(&mut *tx)
    .await?;

    let candidates = derive(item.id);
    let mut reminders = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        reminders.push(reminder::insert_candidate(&mut tx, user_id, candidate).await?);
    }

    tx.commit().await?;
    log::info!(
        "Saved summary {} for user {} with {} reminder(s)",
        item.id,
        user_id,
        reminders.len()
    );
    Ok((item, reminders))
}

/// All summaries of a user, newest first.
pub async fn find_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<SummaryItem>, sqlx::Error> {
    sqlx::query_as::<_, SummaryItem>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM summaries WHERE user_id = $1 \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// A summary owned by `user_id`; someone else's reads as `None`.
pub async fn find_by_id(
    pool: &PgPool,
    user_id: i64,
    id: i64,
) -> Result<Option<SummaryItem>, sqlx::Error> {
    sqlx::query_as::<_, SummaryItem>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM summaries WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Delete a summary; its reminders go with it through the foreign key
/// cascade. Returns false when nothing matched.
pub async fn delete(pool: &PgPool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM summaries WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
