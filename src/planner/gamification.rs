use chrono::NaiveDate;

/// Points awarded per completed task; uncompleting takes them back,
/// floored at zero.
pub const POINTS_PER_TASK: u32 = 10;

pub fn award_completion(points: u32) -> u32 {
    points + POINTS_PER_TASK
}

pub fn revoke_completion(points: u32) -> u32 {
    points.saturating_sub(POINTS_PER_TASK)
}

/// Streak transition at session start. The caller records today as the new
/// last-visit date regardless of the outcome.
pub fn advance_streak(current: u32, last_visit: Option<NaiveDate>, today: NaiveDate) -> u32 {
    match last_visit {
        None => 1,
        Some(last) => match (today - last).num_days() {
            0 => current,
            1 => current + 1,
            _ => 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn first_visit_starts_streak_at_one() {
        assert_eq!(advance_streak(0, None, d(10)), 1);
    }

    #[test]
    fn consecutive_days_increment() {
        assert_eq!(advance_streak(3, Some(d(9)), d(10)), 4);
        assert_eq!(advance_streak(4, Some(d(10)), d(11)), 5);
    }

    #[test]
    fn same_day_revisit_keeps_streak() {
        assert_eq!(advance_streak(7, Some(d(10)), d(10)), 7);
    }

    #[test]
    fn skipping_days_resets_to_one() {
        assert_eq!(advance_streak(7, Some(d(8)), d(10)), 1);
        assert_eq!(advance_streak(2, Some(d(1)), d(31)), 1);
    }

    #[test]
    fn points_round_trip_to_prior_value() {
        let before = 40;
        assert_eq!(revoke_completion(award_completion(before)), before);
    }

    #[test]
    fn points_never_go_negative() {
        assert_eq!(revoke_completion(0), 0);
        assert_eq!(revoke_completion(5), 0);
    }
}
