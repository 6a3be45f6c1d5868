use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use super::format::{ACTION_ITEMS_HEADER, FOLLOW_UPS_HEADER};
use super::types::{ReminderCandidate, WebhookResult};

static ACTION_ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"  - (.*) \(Assignee: (.*), Due: (.*)\)").expect("Invalid action item regex")
});

static FOLLOW_UP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"  - (.*) \(Due: (.*), Context: (.*)\)").expect("Invalid follow-up regex")
});

/// A section ends at a blank line followed by a capitalised header.
static SECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n[A-Z]").expect("Invalid section boundary regex"));

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a due date written by the summarizer. Zone-less values are UTC.
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

pub(crate) fn action_text(task: &str, assignee: &str) -> String {
    format!("Action: {task} (Assigned to: {assignee})")
}

pub(crate) fn follow_up_text(reminder: &str, context: &str) -> String {
    format!("Follow-up: {reminder} (Context: {context})")
}

/// Body of the section introduced by `header`, up to the next section or the
/// end of the text.
fn section_body<'a>(text: &'a str, header: &str) -> Option<&'a str> {
    let marker = format!("{header}\n");
    let start = text.find(&marker)? + marker.len();
    let rest = &text[start..];
    let end = SECTION_BOUNDARY.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..end])
}

/// Re-parse canonical summary text into reminder candidates.
///
/// Lines must match the item layout exactly and carry a parseable due date;
/// anything else is skipped. Action items come before follow-ups.
pub fn extract_reminder_candidates(text: &str, summary_id: i64) -> Vec<ReminderCandidate> {
    let mut candidates = Vec::new();

    if let Some(body) = section_body(text, ACTION_ITEMS_HEADER) {
        for caps in ACTION_ITEM_LINE.captures_iter(body) {
            let (_, [task, assignee, due]) = caps.extract();
            match parse_due_date(due) {
                Some(remind_at) => candidates.push(ReminderCandidate {
                    text: action_text(task, assignee),
                    remind_at,
                    summary_id,
                }),
                None => log::debug!("Skipping action item '{task}': unparseable due date '{due}'"),
            }
        }
    }

    if let Some(body) = section_body(text, FOLLOW_UPS_HEADER) {
        for caps in FOLLOW_UP_LINE.captures_iter(body) {
            let (_, [reminder, due, context]) = caps.extract();
            match parse_due_date(due) {
                Some(remind_at) => candidates.push(ReminderCandidate {
                    text: follow_up_text(reminder, context),
                    remind_at,
                    summary_id,
                }),
                None => log::debug!("Skipping follow-up '{reminder}': unparseable due date '{due}'"),
            }
        }
    }

    candidates
}

impl WebhookResult {
    /// Derive reminder candidates straight from the interpreted result.
    /// Plain-text results never produce reminders.
    pub fn reminder_candidates(&self, summary_id: i64) -> Vec<ReminderCandidate> {
        let WebhookResult::Structured(s) = self else {
            return Vec::new();
        };

        let actions = s.action_items.iter().filter_map(|item| {
            parse_due_date(&item.due_date).map(|remind_at| ReminderCandidate {
                text: action_text(&item.task, &item.assignee),
                remind_at,
                summary_id,
            })
        });
        let follow_ups = s.follow_up_reminders.iter().filter_map(|item| {
            parse_due_date(&item.due_date).map(|remind_at| ReminderCandidate {
                text: follow_up_text(&item.reminder, &item.context),
                remind_at,
                summary_id,
            })
        });

        actions.chain(follow_ups).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::to_iso_millis;

    #[test]
    fn single_action_item() {
        let text = "Summary:\nFoo\n\nAction Items:\n  - Ship it (Assignee: Alice, Due: 2025-03-01)\n\n";
        let candidates = extract_reminder_candidates(text, 1);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Action: Ship it (Assigned to: Alice)");
        assert_eq!(to_iso_millis(&candidates[0].remind_at), "2025-03-01T00:00:00.000Z");
        assert_eq!(candidates[0].summary_id, 1);
    }

    #[test]
    fn no_headers_no_candidates() {
        let text = "Summary:\nNothing to do.\n\nDecisions Made:\n  - Nothing";
        assert!(extract_reminder_candidates(text, 1).is_empty());
    }

    #[test]
    fn missing_due_field_is_skipped() {
        let text = "Action Items:\n  - Ship it (Assignee: Alice)\n  - Test it (Assignee: Bob, Due: 2025-03-02)";
        let candidates = extract_reminder_candidates(text, 7);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Action: Test it (Assigned to: Bob)");
    }

    #[test]
    fn invalid_date_is_dropped() {
        let text = "Action Items:\n  - Ship it (Assignee: Alice, Due: TBD)";
        assert!(extract_reminder_candidates(text, 1).is_empty());
    }

    #[test]
    fn follow_ups_come_after_actions() {
        let text = "Summary:\nS\n\n\
                    Action Items:\n  - A (Assignee: X, Due: 2025-05-01)\n\n\
                    Decisions Made:\n  - D\n\n\
                    Follow-up Reminders:\n  - F (Due: 2025-01-01, Context: C)";
        let texts: Vec<_> = extract_reminder_candidates(text, 3)
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["Action: A (Assigned to: X)", "Follow-up: F (Context: C)"]);
    }

    #[test]
    fn action_section_stops_at_next_header() {
        // A follow-up shaped line under Decisions must not leak into actions.
        let text = "Action Items:\n  - A (Assignee: X, Due: 2025-05-01)\n\n\
                    Decisions Made:\n  - B (Assignee: Y, Due: 2025-05-02)";
        assert_eq!(extract_reminder_candidates(text, 1).len(), 1);
    }

    #[test]
    fn due_date_forms() {
        let cases = [
            ("2025-03-01", "2025-03-01T00:00:00.000Z"),
            ("2025-03-01T09:30:00Z", "2025-03-01T09:30:00.000Z"),
            ("2025-03-01T09:30:00+02:00", "2025-03-01T07:30:00.000Z"),
            ("2025-03-01 14:15", "2025-03-01T14:15:00.000Z"),
            ("03/15/2025", "2025-03-15T00:00:00.000Z"),
            ("March 1, 2025", "2025-03-01T00:00:00.000Z"),
            ("Mar 1, 2025", "2025-03-01T00:00:00.000Z"),
            ("1 March 2025", "2025-03-01T00:00:00.000Z"),
            ("2025/03/01", "2025-03-01T00:00:00.000Z"),
            ("March 1 2025", "2025-03-01T00:00:00.000Z"),
            ("Mar 15 2025", "2025-03-15T00:00:00.000Z"),
        ];
        for (raw, expected) in cases {
            let parsed = parse_due_date(raw).unwrap_or_else(|| panic!("failed to parse {raw}"));
            assert_eq!(to_iso_millis(&parsed), expected, "input {raw}");
        }
    }

    #[test]
    fn rejected_due_dates() {
        for raw in ["", "TBD", "next week", "2025-13-01", "2025-02-30"] {
            assert!(parse_due_date(raw).is_none(), "{raw} should not parse");
        }
    }

    #[test]
    fn plain_text_result_yields_nothing() {
        let body = "Action Items:\n  - Ship it (Assignee: Alice, Due: 2025-03-01)";
        assert!(WebhookResult::Text(body.into()).reminder_candidates(1).is_empty());
    }
}
