use std::time::{Duration, Instant};

use chrono::NaiveDate;

use super::event::{Category, PlannerEvent};

/// How long a deleted event stays recoverable.
pub const UNDO_GRACE: Duration = Duration::from_secs(4);

/// A deleted event held in memory until its grace window elapses.
#[derive(Debug)]
struct Tombstone {
    event: PlannerEvent,
    expires_at: Instant,
}

/// In-memory ordered event collection. All mutations are synchronous
/// replace-in-place scans over the whole Vec; cardinality is tens of
/// events, so derived views are recomputed on every read instead of
/// maintaining indexes.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<PlannerEvent>,
    tombstone: Option<Tombstone>,
}

impl EventStore {
    pub fn new(events: Vec<PlannerEvent>) -> Self {
        Self {
            events,
            tombstone: None,
        }
    }

    pub fn all(&self) -> &[PlannerEvent] {
        &self.events
    }

    pub fn replace_all(&mut self, events: Vec<PlannerEvent>) {
        self.events = events;
        self.tombstone = None;
    }

    pub fn add(&mut self, event: PlannerEvent) {
        self.events.push(event);
    }

    /// Replace the event with the same id. Returns false if absent.
    pub fn update(&mut self, event: PlannerEvent) -> bool {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        }
    }

    /// Remove by id, keeping the record as a tombstone so `undo` can
    /// re-insert it within the grace window. A second delete discards any
    /// previous tombstone permanently.
    pub fn remove(&mut self, id: &str, now: Instant) -> Option<&PlannerEvent> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        let event = self.events.remove(pos);
        self.tombstone = Some(Tombstone {
            event,
            expires_at: now + UNDO_GRACE,
        });
        self.tombstone.as_ref().map(|t| &t.event)
    }

    /// Restore the tombstoned event if its grace window is still open.
    pub fn undo_remove(&mut self, now: Instant) -> Option<&PlannerEvent> {
        let tombstone = self.tombstone.take()?;
        if now >= tombstone.expires_at {
            return None;
        }
        self.events.push(tombstone.event);
        self.events.last()
    }

    /// Drop an expired tombstone. Called from the app tick.
    pub fn expire_tombstone(&mut self, now: Instant) {
        if let Some(t) = &self.tombstone {
            if now >= t.expires_at {
                self.tombstone = None;
            }
        }
    }

    pub fn toggle_complete(&mut self, id: &str) -> Option<bool> {
        let event = self.events.iter_mut().find(|e| e.id == id)?;
        event.is_completed = !event.is_completed;
        Some(event.is_completed)
    }

    pub fn get(&self, id: &str) -> Option<&PlannerEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn events_for_date(&self, date: NaiveDate) -> Vec<&PlannerEvent> {
        self.events.iter().filter(|e| e.date == date).collect()
    }

    /// Replace one day's events wholesale (used by the default-routine
    /// action); other days are untouched.
    pub fn replace_date(&mut self, date: NaiveDate, events: Vec<PlannerEvent>) {
        self.events.retain(|e| e.date != date);
        self.events.extend(events);
    }
}

pub fn filter_by_category<'a>(
    events: &[&'a PlannerEvent],
    filter: Option<Category>,
) -> Vec<&'a PlannerEvent> {
    match filter {
        None => events.to_vec(),
        Some(cat) => events.iter().copied().filter(|e| e.category == cat).collect(),
    }
}

/// Timed events sorted by start time. The fixed-width format makes the
/// string compare stable and chronological.
pub fn timed_sorted<'a>(events: &[&'a PlannerEvent]) -> Vec<&'a PlannerEvent> {
    let mut timed: Vec<&PlannerEvent> =
        events.iter().copied().filter(|e| !e.is_all_day).collect();
    timed.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    timed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(title: &str, start: &str, end: &str) -> PlannerEvent {
        PlannerEvent::new(
            title.into(),
            start.into(),
            end.into(),
            Category::Work,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn add_update_and_views() {
        let mut store = EventStore::default();
        let mut a = ev("standup", "09:00", "09:15");
        let id = a.id.clone();
        store.add(a.clone());

        a.title = "standup (moved)".into();
        assert!(store.update(a));
        assert_eq!(store.get(&id).unwrap().title, "standup (moved)");

        let day = store.events_for_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(day.len(), 1);
        assert!(store
            .events_for_date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .is_empty());
    }

    #[test]
    fn update_of_unknown_id_is_a_noop() {
        let mut store = EventStore::default();
        assert!(!store.update(ev("ghost", "09:00", "10:00")));
    }

    #[test]
    fn delete_then_undo_restores_identical_record() {
        let mut store = EventStore::default();
        let a = ev("focus", "08:00", "10:00");
        let id = a.id.clone();
        store.add(a.clone());

        let t0 = Instant::now();
        assert!(store.remove(&id, t0).is_some());
        assert!(store.get(&id).is_none());

        let restored = store.undo_remove(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(*restored, a);
    }

    #[test]
    fn undo_after_grace_window_fails() {
        let mut store = EventStore::default();
        let a = ev("focus", "08:00", "10:00");
        let id = a.id.clone();
        store.add(a);

        let t0 = Instant::now();
        store.remove(&id, t0);
        assert!(store.undo_remove(t0 + UNDO_GRACE).is_none());
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn expire_tombstone_discards_it() {
        let mut store = EventStore::default();
        let a = ev("focus", "08:00", "10:00");
        let id = a.id.clone();
        store.add(a);

        let t0 = Instant::now();
        store.remove(&id, t0);
        store.expire_tombstone(t0 + UNDO_GRACE);
        assert!(store.undo_remove(t0 + UNDO_GRACE).is_none());
    }

    #[test]
    fn toggle_complete_flips_and_reports() {
        let mut store = EventStore::default();
        let a = ev("walk", "07:00", "07:30");
        let id = a.id.clone();
        store.add(a);

        assert_eq!(store.toggle_complete(&id), Some(true));
        assert_eq!(store.toggle_complete(&id), Some(false));
        assert_eq!(store.toggle_complete("nope"), None);
    }

    #[test]
    fn timed_sorted_orders_by_start_and_drops_all_day() {
        let late = ev("late", "20:00", "21:00");
        let early = ev("early", "06:00", "07:00");
        let mut all_day = ev("allday", "00:00", "23:59");
        all_day.is_all_day = true;

        let refs = vec![&late, &all_day, &early];
        let sorted = timed_sorted(&refs);
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].title, "early");
        assert_eq!(sorted[1].title, "late");
    }

    #[test]
    fn category_filter() {
        let mut a = ev("gym", "06:00", "07:00");
        a.category = Category::Health;
        let b = ev("report", "09:00", "10:00");

        let refs = vec![&a, &b];
        assert_eq!(filter_by_category(&refs, None).len(), 2);
        let health = filter_by_category(&refs, Some(Category::Health));
        assert_eq!(health.len(), 1);
        assert_eq!(health[0].title, "gym");
    }

    #[test]
    fn replace_date_only_touches_that_day() {
        let mut store = EventStore::default();
        let day1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        store.add(ev("keep", "09:00", "10:00"));
        let mut other = ev("other-day", "09:00", "10:00");
        other.date = day2;
        store.add(other);

        store.replace_date(day1, vec![ev("fresh", "08:00", "09:00")]);
        assert_eq!(store.events_for_date(day1).len(), 1);
        assert_eq!(store.events_for_date(day1)[0].title, "fresh");
        assert_eq!(store.events_for_date(day2).len(), 1);
    }
}
