use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Other => "other",
        }
    }
}

/// A single planner entry. Times are `"HH:MM"` strings and `date` is the
/// sole day-partition key; an event never spans dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub is_all_day: bool,
    pub is_completed: bool,
    pub category: Category,
    pub date: NaiveDate,
}

impl PlannerEvent {
    pub fn new(
        title: String,
        start_time: String,
        end_time: String,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: None,
            start_time,
            end_time,
            is_all_day: false,
            is_completed: false,
            category,
            date,
        }
    }

    pub fn time_display(&self) -> String {
        if self.is_all_day {
            "All day".to_string()
        } else {
            format!("{} - {}", self.start_time, self.end_time)
        }
    }

    /// Half-open interval overlap with another event. Touching endpoints
    /// (this ends exactly when the other starts) do not overlap.
    pub fn overlaps(&self, other: &PlannerEvent) -> bool {
        self.date == other.date
            && self.start_time < other.end_time
            && self.end_time > other.start_time
    }

    /// Whether `now` (an `"HH:MM"` string) falls inside this event.
    pub fn is_active_at(&self, now: &str) -> bool {
        !self.is_completed
            && !self.is_all_day
            && self.start_time.as_str() <= now
            && self.end_time.as_str() > now
    }
}

/// True if any other candidate on the same date overlaps `event` in time.
/// Call sites pass the events of a single hour bucket, so the linear scan
/// is bounded by events-per-hour.
pub fn has_conflict(event: &PlannerEvent, candidates: &[&PlannerEvent]) -> bool {
    candidates
        .iter()
        .any(|other| other.id != event.id && event.overlaps(other))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(start: &str, end: &str) -> PlannerEvent {
        PlannerEvent::new(
            "t".into(),
            start.into(),
            end.into(),
            Category::Other,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = ev("09:00", "10:30");
        let b = ev("10:00", "11:00");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_endpoints_never_conflict() {
        let a = ev("09:00", "10:00");
        let b = ev("10:00", "11:00");
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let outer = ev("08:00", "12:00");
        let inner = ev("09:00", "10:00");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn different_dates_never_overlap() {
        let a = ev("09:00", "10:00");
        let mut b = ev("09:00", "10:00");
        b.date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn conflict_ignores_self() {
        let a = ev("09:00", "10:00");
        assert!(!has_conflict(&a, &[&a]));

        let b = ev("09:30", "10:30");
        assert!(has_conflict(&a, &[&a, &b]));
    }

    #[test]
    fn active_task_window_is_half_open() {
        let a = ev("09:00", "10:00");
        assert!(a.is_active_at("09:00"));
        assert!(a.is_active_at("09:59"));
        assert!(!a.is_active_at("10:00"));
        assert!(!a.is_active_at("08:59"));

        let mut done = ev("09:00", "10:00");
        done.is_completed = true;
        assert!(!done.is_active_at("09:30"));
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let a = ev("09:00", "10:00");
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"startTime\":\"09:00\""));
        assert!(json.contains("\"isAllDay\":false"));
        assert!(json.contains("\"isCompleted\":false"));
    }
}
