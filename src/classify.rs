use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::bucket::{Urgency, UrgencyBuckets};
use crate::model::issue::{Issue, StatusId};

/// Whole calendar days from `anchor` to `due`; negative when `due` is earlier.
pub fn day_diff(anchor: NaiveDate, due: NaiveDate) -> i64 {
    due.signed_duration_since(anchor).num_days()
}

/// Bucket open issues by how far their due date is from `anchor`.
///
/// Issues in a completed status or without a due date are dropped. Order
/// within each bucket follows the input order.
pub fn classify(
    issues: &[Issue],
    completed_status_ids: &HashSet<StatusId>,
    anchor: NaiveDate,
) -> UrgencyBuckets {
    let mut buckets = UrgencyBuckets::default();

    for issue in issues {
        if completed_status_ids.contains(&issue.status.id) {
            continue;
        }
        let Some(due) = issue.due_date else {
            continue;
        };
        if let Some(urgency) = Urgency::from_day_diff(day_diff(anchor, due)) {
            buckets.push(urgency, issue.clone());
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::issue::StatusRef;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn issue(key: &str, due: Option<NaiveDate>, status_id: u64) -> Issue {
        Issue {
            id: 0,
            key: key.into(),
            project_id: 1,
            summary: format!("Summary of {key}"),
            due_date: due,
            status: StatusRef {
                id: status_id,
                name: if status_id == 4 { "完了".into() } else { "処理中".into() },
            },
            assignee: None,
            url: format!("https://example.backlog.com/view/{key}"),
        }
    }

    fn keys(bucket: &[Issue]) -> Vec<&str> {
        bucket.iter().map(|i| i.key.as_str()).collect()
    }

    fn completed() -> HashSet<StatusId> {
        HashSet::from([4])
    }

    #[test]
    fn day_diff_is_calendar_based() {
        assert_eq!(day_diff(date(6, 10), date(6, 9)), -1);
        assert_eq!(day_diff(date(6, 10), date(6, 10)), 0);
        assert_eq!(day_diff(date(6, 10), date(6, 13)), 3);
        assert_eq!(day_diff(date(2, 28), date(3, 1)), 2); // 2024 is a leap year
        assert_eq!(day_diff(date(12, 31), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), 1);
    }

    #[test]
    fn end_to_end_scenario() {
        let issues = vec![
            issue("A-1", Some(date(6, 9)), 2),
            issue("A-2", Some(date(6, 10)), 2),
            issue("A-3", Some(date(6, 12)), 4),
            issue("A-4", Some(date(6, 13)), 2),
        ];

        let buckets = classify(&issues, &completed(), date(6, 10));

        assert_eq!(keys(&buckets.overdue), ["A-1"]);
        assert_eq!(keys(&buckets.today), ["A-2"]);
        assert!(buckets.in_two_days.is_empty());
        assert_eq!(keys(&buckets.in_three_days), ["A-4"]);
    }

    #[test]
    fn due_tomorrow_lands_nowhere() {
        let issues = vec![issue("A-1", Some(date(6, 11)), 2)];
        let buckets = classify(&issues, &completed(), date(6, 10));
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn beyond_three_days_lands_nowhere() {
        let issues = vec![issue("A-1", Some(date(6, 14)), 2)];
        let buckets = classify(&issues, &completed(), date(6, 10));
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn missing_due_date_is_never_bucketed() {
        let issues = vec![issue("A-1", None, 2), issue("A-2", None, 4)];
        let buckets = classify(&issues, &completed(), date(6, 10));
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn completed_status_excluded_even_when_due() {
        let issues = vec![
            issue("A-1", Some(date(6, 1)), 4),
            issue("A-2", Some(date(6, 10)), 4),
        ];
        let buckets = classify(&issues, &completed(), date(6, 10));
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn input_order_is_preserved_within_bucket() {
        let issues = vec![
            issue("A-3", Some(date(6, 1)), 2),
            issue("A-1", Some(date(6, 5)), 2),
            issue("A-2", Some(date(6, 9)), 2),
        ];
        let buckets = classify(&issues, &completed(), date(6, 10));
        assert_eq!(keys(&buckets.overdue), ["A-3", "A-1", "A-2"]);
    }

    #[test]
    fn month_boundary_uses_calendar_days() {
        let issues = vec![
            issue("A-1", Some(date(7, 2)), 2),
            issue("A-2", Some(date(7, 3)), 2),
        ];
        let buckets = classify(&issues, &completed(), date(6, 30));
        assert_eq!(keys(&buckets.in_two_days), ["A-1"]);
        assert_eq!(keys(&buckets.in_three_days), ["A-2"]);
    }
}
