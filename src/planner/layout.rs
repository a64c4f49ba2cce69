use super::event::PlannerEvent;
use super::time::hour_fraction;

pub const HOURS: usize = 24;

/// One entry of an hour row: an index into the day's sorted timed events,
/// plus whether this row is where the event begins. Rows the event merely
/// spans through are continuations and render as linked fragments without
/// their own controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub event_index: usize,
    pub starts_here: bool,
}

/// The day view's 24 hour rows. Built fresh on every render from the
/// already-sorted timed events of the selected day.
#[derive(Debug)]
pub struct DayGrid {
    rows: [Vec<Segment>; HOURS],
}

impl DayGrid {
    /// `events` must be the day's timed events sorted by start time; the
    /// segment order within each row then follows start order for free.
    pub fn build(events: &[&PlannerEvent]) -> Self {
        let mut rows: [Vec<Segment>; HOURS] = std::array::from_fn(|_| Vec::new());

        for (event_index, event) in events.iter().enumerate() {
            let start = hour_fraction(&event.start_time);
            let end = hour_fraction(&event.end_time);
            let start_hour = start.floor() as usize;

            for (h, row) in rows.iter_mut().enumerate() {
                // Event overlaps hour h: starts before the slot ends and
                // ends after the slot begins.
                if start < (h + 1) as f32 && end > h as f32 {
                    row.push(Segment {
                        event_index,
                        starts_here: h == start_hour,
                    });
                }
            }
        }

        Self { rows }
    }

    pub fn row(&self, hour: usize) -> &[Segment] {
        &self.rows[hour]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::event::Category;
    use chrono::NaiveDate;

    fn ev(start: &str, end: &str) -> PlannerEvent {
        PlannerEvent::new(
            "t".into(),
            start.into(),
            end.into(),
            Category::Work,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn single_hour_event_occupies_one_row() {
        let a = ev("09:00", "10:00");
        let grid = DayGrid::build(&[&a]);

        assert_eq!(grid.row(9), &[Segment { event_index: 0, starts_here: true }]);
        assert!(grid.row(8).is_empty());
        assert!(grid.row(10).is_empty());
    }

    #[test]
    fn spanning_event_marks_continuations() {
        let a = ev("09:15", "11:30");
        let grid = DayGrid::build(&[&a]);

        assert_eq!(grid.row(9), &[Segment { event_index: 0, starts_here: true }]);
        assert_eq!(grid.row(10), &[Segment { event_index: 0, starts_here: false }]);
        assert_eq!(grid.row(11), &[Segment { event_index: 0, starts_here: false }]);
        assert!(grid.row(12).is_empty());
    }

    #[test]
    fn event_ending_on_the_hour_does_not_reach_that_row() {
        let a = ev("09:00", "11:00");
        let grid = DayGrid::build(&[&a]);

        assert_eq!(grid.row(10).len(), 1);
        assert!(grid.row(11).is_empty());
    }

    #[test]
    fn overlapping_events_share_a_row_in_start_order() {
        let a = ev("09:00", "10:00");
        let b = ev("09:30", "10:30");
        let grid = DayGrid::build(&[&a, &b]);

        let row = grid.row(9);
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].event_index, 0);
        assert_eq!(row[1].event_index, 1);
    }

    #[test]
    fn midnight_to_late_event_fills_early_rows() {
        let a = ev("00:00", "05:00");
        let grid = DayGrid::build(&[&a]);

        assert!(grid.row(0)[0].starts_here);
        for h in 1..5 {
            assert!(!grid.row(h)[0].starts_here);
        }
        assert!(grid.row(5).is_empty());
    }
}
