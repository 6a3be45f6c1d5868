/// Integration tests for the Postgres store: users, summaries and reminders.
///
/// `#[sqlx::test]` gives every test a fresh database with the migrations
/// applied; `DATABASE_URL` must point at a Postgres server.

use chrono::{TimeZone, Utc};
use sqlx::PgPool;

use recap::models::reminder::{self, NewReminder};
use recap::models::summary;
use recap::models::user::{self, NewUser};
use recap::summary::{ReminderCandidate, WebhookResult, format_response};

mod common;
use common::create_user;

fn candidate(text: &str, day: u32, summary_id: i64) -> ReminderCandidate {
    ReminderCandidate {
        text: text.to_string(),
        remind_at: Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap(),
        summary_id,
    }
}

#[sqlx::test]
async fn test_duplicate_email_is_a_unique_violation(pool: PgPool) {
    create_user(&pool, "Dup@Example.com").await;

    let err = user::create(
        &pool,
        &NewUser {
            email: "dup@example.com".to_string(),
            full_name: "Other".to_string(),
            password: "x".to_string(),
        },
    )
    .await
    .expect_err("second insert must fail");
    assert!(user::is_unique_violation(&err));

    let found = user::find_by_email(&pool, " DUP@example.com ")
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(found.email, "dup@example.com");
}

#[sqlx::test]
async fn test_save_summary_creates_linked_reminders(pool: PgPool) {
    let uid = create_user(&pool, "saver@example.com").await;
    let result = WebhookResult::from_response_body(
        r#"{"summary":"Sync.","action_items":[{"task":"Plan","assignee":"Al","due_date":"2025-03-05"}],
            "follow_up_reminders":[{"reminder":"Ping","due_date":"2025-03-02","context":"Vendors"}]}"#,
    );
    let text = format_response(&result);

    let (item, reminders) =
        summary::create_with_reminders(&pool, uid, "A: hi", &text, |id| result.reminder_candidates(id))
            .await
            .expect("save");
    assert_eq!(item.summary, text);
    assert_eq!(reminders.len(), 2);
    assert!(reminders.iter().all(|r| r.summary_id == Some(item.id) && !r.completed));

    // Listed soonest first.
    let listed = reminder::find_for_user(&pool, uid).await.expect("list");
    let texts: Vec<&str> = listed.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["Follow-up: Ping (Context: Vendors)", "Action: Plan (Assigned to: Al)"]);
}

#[sqlx::test]
async fn test_summaries_list_newest_first(pool: PgPool) {
    let uid = create_user(&pool, "lister@example.com").await;
    let (first, _) = summary::create_with_reminders(&pool, uid, "t1", "Summary:\nOne", |_| vec![])
        .await
        .expect("save first");
    let (second, _) = summary::create_with_reminders(&pool, uid, "t2", "Summary:\nTwo", |_| vec![])
        .await
        .expect("save second");

    let items = summary::find_for_user(&pool, uid).await.expect("list");
    let ids: Vec<i64> = items.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test]
async fn test_deleting_summary_cascades_to_its_reminders(pool: PgPool) {
    let uid = create_user(&pool, "cascade@example.com").await;
    let (item, _) = summary::create_with_reminders(&pool, uid, "t", "Summary:\nS", |id| {
        vec![candidate("Action: A (Assigned to: B)", 4, id)]
    })
    .await
    .expect("save");

    let standalone = reminder::create(
        &pool,
        uid,
        &NewReminder {
            text: "Buy milk".to_string(),
            remind_at: Utc.with_ymd_and_hms(2025, 3, 9, 8, 0, 0).unwrap(),
            summary_id: None,
        },
    )
    .await
    .expect("create")
    .expect("inserted");

    assert!(summary::delete(&pool, uid, item.id).await.expect("delete"));
    assert!(!summary::delete(&pool, uid, item.id).await.expect("second delete"));

    let left = reminder::find_for_user(&pool, uid).await.expect("list");
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, standalone.id);
}

#[sqlx::test]
async fn test_failed_reminder_insert_rolls_back_the_summary(pool: PgPool) {
    let uid = create_user(&pool, "rollback@example.com").await;

    // A summary id that does not exist breaks the reminder foreign key.
    let saved = summary::create_with_reminders(&pool, uid, "t", "Summary:\nS", |id| {
        vec![candidate("Action: A (Assigned to: B)", 4, id + 1000)]
    })
    .await;
    assert!(saved.is_err());

    let items = summary::find_for_user(&pool, uid).await.expect("list");
    assert!(items.is_empty());
}

#[sqlx::test]
async fn test_users_cannot_touch_each_others_rows(pool: PgPool) {
    let owner = create_user(&pool, "owner@example.com").await;
    let other = create_user(&pool, "other@example.com").await;
    let (item, reminders) = summary::create_with_reminders(&pool, owner, "t", "Summary:\nS", |id| {
        vec![candidate("Action: A (Assigned to: B)", 4, id)]
    })
    .await
    .expect("save");
    let rid = reminders[0].id;

    assert!(summary::find_by_id(&pool, other, item.id).await.expect("find").is_none());
    assert!(!summary::delete(&pool, other, item.id).await.expect("delete"));
    assert!(reminder::toggle_completed(&pool, other, rid).await.expect("toggle").is_none());
    assert!(!reminder::delete(&pool, other, rid).await.expect("delete"));
    assert!(summary::find_for_user(&pool, other).await.expect("list").is_empty());

    // Linking a manual reminder to someone else's summary writes nothing.
    let linked = reminder::create(
        &pool,
        other,
        &NewReminder {
            text: "Sneaky".to_string(),
            remind_at: Utc.with_ymd_and_hms(2025, 3, 9, 0, 0, 0).unwrap(),
            summary_id: Some(item.id),
        },
    )
    .await
    .expect("create");
    assert!(linked.is_none());
    assert!(reminder::find_for_user(&pool, other).await.expect("list").is_empty());
}

#[sqlx::test]
async fn test_toggle_flips_completed_both_ways(pool: PgPool) {
    let uid = create_user(&pool, "toggler@example.com").await;
    let r = reminder::create(
        &pool,
        uid,
        &NewReminder {
            text: "Stretch".to_string(),
            remind_at: Utc.with_ymd_and_hms(2025, 3, 9, 7, 30, 0).unwrap(),
            summary_id: None,
        },
    )
    .await
    .expect("create")
    .expect("inserted");
    assert!(!r.completed);

    let on = reminder::toggle_completed(&pool, uid, r.id).await.expect("toggle").expect("found");
    assert!(on.completed);
    let off = reminder::toggle_completed(&pool, uid, r.id).await.expect("toggle").expect("found");
    assert!(!off.completed);
}

#[sqlx::test]
async fn test_deleting_user_removes_everything(pool: PgPool) {
    let uid = create_user(&pool, "leaver@example.com").await;
    summary::create_with_reminders(&pool, uid, "t", "Summary:\nS", |id| {
        vec![candidate("Action: A (Assigned to: B)", 4, id)]
    })
    .await
    .expect("save");

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(uid)
        .execute(&pool)
        .await
        .expect("delete user");

    let (summaries,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM summaries")
        .fetch_one(&pool)
        .await
        .expect("count");
    let (reminders,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reminders")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!((summaries, reminders), (0, 0));
}
