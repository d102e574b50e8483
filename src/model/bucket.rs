use std::fmt;

use crate::model::issue::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Urgency {
    Overdue,
    Today,
    InTwoDays,
    InThreeDays,
}

impl Urgency {
    /// Report order.
    pub const ALL: [Urgency; 4] = [
        Urgency::Overdue,
        Urgency::Today,
        Urgency::InTwoDays,
        Urgency::InThreeDays,
    ];

    /// Map a whole-day distance `due - anchor` to its bucket.
    ///
    /// A distance of exactly one day (due tomorrow) falls into no bucket.
    pub fn from_day_diff(diff: i64) -> Option<Urgency> {
        match diff {
            d if d < 0 => Some(Urgency::Overdue),
            0 => Some(Urgency::Today),
            2 => Some(Urgency::InTwoDays),
            3 => Some(Urgency::InThreeDays),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Urgency::Overdue => "Overdue",
            Urgency::Today => "Due today",
            Urgency::InTwoDays => "Due in 2 days",
            Urgency::InThreeDays => "Due in 3 days",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Overdue => "overdue",
            Urgency::Today => "today",
            Urgency::InTwoDays => "in-2",
            Urgency::InThreeDays => "in-3",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrgencyBuckets {
    pub overdue: Vec<Issue>,
    pub today: Vec<Issue>,
    pub in_two_days: Vec<Issue>,
    pub in_three_days: Vec<Issue>,
}

impl UrgencyBuckets {
    pub fn get(&self, urgency: Urgency) -> &[Issue] {
        match urgency {
            Urgency::Overdue => &self.overdue,
            Urgency::Today => &self.today,
            Urgency::InTwoDays => &self.in_two_days,
            Urgency::InThreeDays => &self.in_three_days,
        }
    }

    pub fn push(&mut self, urgency: Urgency, issue: Issue) {
        match urgency {
            Urgency::Overdue => self.overdue.push(issue),
            Urgency::Today => self.today.push(issue),
            Urgency::InTwoDays => self.in_two_days.push(issue),
            Urgency::InThreeDays => self.in_three_days.push(issue),
        }
    }

    pub fn total(&self) -> usize {
        Urgency::ALL.iter().map(|u| self.get(*u).len()).sum()
    }
}
