use super::types::{ActionItem, FollowUpReminder, StructuredSummary, WebhookResult};

pub const SUMMARY_HEADER: &str = "Summary:";
pub const ACTION_ITEMS_HEADER: &str = "Action Items:";
pub const DECISIONS_HEADER: &str = "Decisions Made:";
pub const FOLLOW_UPS_HEADER: &str = "Follow-up Reminders:";

/// Render a webhook result as the canonical summary text shown to users.
///
/// Plain text passes through untouched. Structured results get one block per
/// non-empty section, separated by blank lines, with trailing whitespace
/// trimmed.
pub fn format_response(result: &WebhookResult) -> String {
    match result {
        WebhookResult::Text(body) => body.clone(),
        WebhookResult::Structured(structured) => format_structured(structured),
    }
}

fn format_structured(s: &StructuredSummary) -> String {
    let mut out = format!("{SUMMARY_HEADER}\n{}\n\n", s.summary);

    if !s.action_items.is_empty() {
        push_block(&mut out, ACTION_ITEMS_HEADER, s.action_items.iter().map(action_item_line));
    }
    if !s.decisions_made.is_empty() {
        push_block(&mut out, DECISIONS_HEADER, s.decisions_made.iter().map(|d| format!("  - {d}")));
    }
    if !s.follow_up_reminders.is_empty() {
        push_block(&mut out, FOLLOW_UPS_HEADER, s.follow_up_reminders.iter().map(follow_up_line));
    }

    out.trim_end().to_string()
}

fn push_block(out: &mut String, header: &str, lines: impl Iterator<Item = String>) {
    out.push_str(header);
    out.push('\n');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');
}

pub(crate) fn action_item_line(item: &ActionItem) -> String {
    format!("  - {} (Assignee: {}, Due: {})", item.task, item.assignee, item.due_date)
}

pub(crate) fn follow_up_line(item: &FollowUpReminder) -> String {
    format!("  - {} (Due: {}, Context: {})", item.reminder, item.due_date, item.context)
}
