use sqlx::{PgPool, Postgres, Transaction};

use super::types::*;
use crate::summary::ReminderCandidate;

const REMINDER_COLUMNS: &str = "id, user_id, text, remind_at, summary_id, completed";

/// Insert one derived reminder inside a summary's save transaction.
pub(crate) async fn insert_candidate(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    candidate: &ReminderCandidate,
) -> Result<Reminder, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(&format!(
        "INSERT INTO reminders (user_id, text, remind_at, summary_id) VALUES ($1, $2, $3, $4) \
         RETURNING {REMINDER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(&candidate.text)
    .bind(candidate.remind_at)
    .bind(candidate.summary_id)
    .fetch_one(&mut **tx)
    .await
}

/// Insert a manual reminder. A linked summary must belong to the same user;
/// otherwise nothing is written and `None` comes back.
pub async fn create(
    pool: &PgPool,
    user_id: i64,
    new: &NewReminder,
) -> Result<Option<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(&format!(
        "INSERT INTO reminders (user_id, text, remind_at, summary_id) \
         SELECT $1, $2, $3, $4::BIGINT \
         WHERE $4::BIGINT IS NULL \
            OR EXISTS (SELECT 1 FROM summaries WHERE id = $4::BIGINT AND user_id = $1) \
         RETURNING {REMINDER_COLUMNS}"
    ))
    .bind(user_id)
    .bind(new.text.trim())
    .bind(new.remind_at)
    .bind(new.summary_id)
    .fetch_optional(pool)
    .await
}

/// All reminders of a user, soonest first.
pub async fn find_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders WHERE user_id = $1 \
         ORDER BY remind_at ASC, id ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Flip `completed` and return the updated row.
pub async fn toggle_completed(
    pool: &PgPool,
    user_id: i64,
    id: i64,
) -> Result<Option<Reminder>, sqlx::Error> {
    sqlx::query_as::<_, Reminder>(&format!(
        "UPDATE reminders SET completed = NOT completed WHERE id = $1 AND user_id = $2 \
         RETURNING {REMINDER_COLUMNS}"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
