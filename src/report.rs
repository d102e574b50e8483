use crate::model::bucket::{Urgency, UrgencyBuckets};
use crate::model::issue::Issue;

pub const NO_ITEMS: &str = "No items";

/// Escape the three characters Slack treats as control sequences in message text.
pub fn escape_slack(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn issue_line(issue: &Issue) -> String {
    format!(
        "• <{}|{}> {} [{}]",
        issue.url,
        issue.key,
        escape_slack(&issue.summary),
        escape_slack(&issue.status.name)
    )
}

/// Render the reminder message. Depends only on its arguments.
pub fn render(buckets: &UrgencyBuckets, anchor_label: &str, mention: &str) -> String {
    let mut lines = vec![
        mention.to_string(),
        format!("*Due date reminder for {anchor_label}*"),
    ];

    for urgency in Urgency::ALL {
        lines.push(String::new());
        lines.push(format!("*{}*", urgency.title()));

        let issues = buckets.get(urgency);
        if issues.is_empty() {
            lines.push(NO_ITEMS.to_string());
        } else {
            lines.extend(issues.iter().map(issue_line));
        }
    }

    lines.join("\n")
}
