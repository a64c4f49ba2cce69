use std::fs;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use color_eyre::Result;

use crate::components::event_form::EventFormState;
use crate::planner::event::{Category, PlannerEvent};
use crate::planner::gamification::{advance_streak, award_completion, revoke_completion};
use crate::planner::routine::default_routine;
use crate::planner::storage::{self, Storage};
use crate::planner::store::{filter_by_category, timed_sorted, EventStore};
use crate::planner::time::shift_preserving_duration;
use crate::theme::Theme;
use crate::toast::{self, Toast, ToastKind};

/// How long the completion celebration overlay stays up.
const CELEBRATION_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Form,
    Move,
    ImportPrompt,
    DatePrompt,
}

/// Whole application state. Every key handler mutates this synchronously
/// and mirrors the touched slice to storage before returning; there is no
/// other writer.
pub struct App {
    pub running: bool,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub now_hm: String,
    pub store: EventStore,
    pub points: u32,
    pub streak: u32,
    pub dark_mode: bool,
    pub theme: Theme,
    pub filter: Option<Category>,
    pub selection: usize,
    pub input_mode: InputMode,
    pub form_state: Option<EventFormState>,
    pub moving: Option<(String, u32)>,
    pub import_path: String,
    pub date_input: String,
    pub toasts: Vec<Toast>,
    pub show_help: bool,
    celebration_until: Option<Instant>,
    storage: Box<dyn Storage>,
}

impl App {
    pub fn new(mut storage: Box<dyn Storage>) -> Result<Self> {
        let local = Local::now();
        let today = local.date_naive();

        let state = storage::load(storage.as_ref(), today);
        let streak = advance_streak(state.streak, state.last_visit, today);
        storage::save_streak(storage.as_mut(), streak)?;
        storage::save_last_visit(storage.as_mut(), today)?;
        // First run seeds the default routine; persist it so the next
        // session sees the same ids.
        storage::save_events(storage.as_mut(), &state.events)?;

        Ok(Self {
            running: true,
            selected_date: today,
            today,
            now_hm: local.format("%H:%M").to_string(),
            store: EventStore::new(state.events),
            points: state.points,
            streak,
            dark_mode: state.dark_mode,
            theme: Theme::for_mode(state.dark_mode),
            filter: None,
            selection: 0,
            input_mode: InputMode::Normal,
            form_state: None,
            moving: None,
            import_path: String::new(),
            date_input: String::new(),
            toasts: Vec::new(),
            show_help: false,
            celebration_until: None,
            storage,
        })
    }

    // ── derived views ──

    /// The selected day's timed events after the category filter, sorted
    /// by start time. This is the selection space of the day grid.
    pub fn day_timed(&self) -> Vec<&PlannerEvent> {
        let day = self.store.events_for_date(self.selected_date);
        let filtered = filter_by_category(&day, self.filter);
        timed_sorted(&filtered)
    }

    pub fn day_all_day(&self) -> Vec<&PlannerEvent> {
        let day = self.store.events_for_date(self.selected_date);
        filter_by_category(&day, self.filter)
            .into_iter()
            .filter(|e| e.is_all_day)
            .collect()
    }

    /// Completion progress over the whole day, ignoring the filter.
    pub fn progress(&self) -> (usize, usize) {
        let day = self.store.events_for_date(self.selected_date);
        let completed = day.iter().filter(|e| e.is_completed).count();
        (completed, day.len())
    }

    /// The uncompleted timed event covering the current time, only when
    /// viewing today.
    pub fn active_task(&self) -> Option<&PlannerEvent> {
        if self.selected_date != self.today {
            return None;
        }
        self.day_timed()
            .into_iter()
            .find(|e| e.is_active_at(&self.now_hm))
    }

    pub fn celebrating(&self) -> bool {
        self.celebration_until.is_some()
    }

    fn selected_event_id(&self) -> Option<String> {
        self.day_timed().get(self.selection).map(|e| e.id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.day_timed().len();
        self.selection = self.selection.min(len.saturating_sub(1));
    }

    // ── navigation ──

    pub fn next_day(&mut self) {
        self.selected_date = self.selected_date.succ_opt().unwrap_or(self.selected_date);
        self.on_date_changed();
    }

    pub fn prev_day(&mut self) {
        self.selected_date = self.selected_date.pred_opt().unwrap_or(self.selected_date);
        self.on_date_changed();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.selected_date = self.today;
        self.on_date_changed();
    }

    fn on_date_changed(&mut self) {
        self.selection = 0;
        self.moving = None;
    }

    pub fn select_next(&mut self) {
        let len = self.day_timed().len();
        if len > 0 {
            self.selection = (self.selection + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    pub fn begin_goto_date(&mut self) {
        self.date_input.clear();
        self.input_mode = InputMode::DatePrompt;
    }

    pub fn cancel_goto_date(&mut self) {
        self.date_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Jump to a typed date. Anything `%Y-%m-%d` can't parse leaves the
    /// selected day alone.
    pub fn submit_goto_date(&mut self) {
        let raw = std::mem::take(&mut self.date_input);
        self.input_mode = InputMode::Normal;
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => {
                self.selected_date = date;
                self.on_date_changed();
            }
            Err(_) => self.push_toast("Dates are YYYY-MM-DD", ToastKind::Error),
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(Category::Work),
            Some(Category::Work) => Some(Category::Personal),
            Some(Category::Personal) => Some(Category::Health),
            Some(Category::Health) => Some(Category::Other),
            Some(Category::Other) => None,
        };
        self.clamp_selection();
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme = Theme::for_mode(self.dark_mode);
        let result = storage::save_theme(self.storage.as_mut(), self.dark_mode);
        self.report_save(result);
    }

    // ── event form ──

    pub fn open_new_form(&mut self, start_hour: Option<u32>) {
        self.form_state = Some(EventFormState::new(self.selected_date, start_hour));
        self.input_mode = InputMode::Form;
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_event_id() else {
            return;
        };
        if let Some(event) = self.store.get(&id) {
            self.form_state = Some(EventFormState::edit(event));
            self.input_mode = InputMode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form_state = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_form(&mut self) {
        let Some(form) = self.form_state.take() else {
            return;
        };
        if let Err(error) = form.validate() {
            let mut form = form;
            form.error = Some(error);
            self.form_state = Some(form);
            return;
        }

        let editing = form.editing.is_some();
        let event = form.into_event();
        if editing {
            self.store.update(event);
            self.push_toast("Event updated", ToastKind::Success);
        } else {
            self.store.add(event);
            self.push_toast("Event created", ToastKind::Success);
        }
        self.input_mode = InputMode::Normal;
        self.persist_events();
        self.clamp_selection();
    }

    // ── completion, points, celebration ──

    pub fn toggle_selected_complete(&mut self) {
        let Some(id) = self.selected_event_id() else {
            return;
        };
        self.toggle_complete_by_id(&id);
    }

    /// Complete the currently running task straight from the banner.
    pub fn complete_active_task(&mut self) {
        let Some(id) = self.active_task().map(|e| e.id.clone()) else {
            return;
        };
        self.toggle_complete_by_id(&id);
    }

    fn toggle_complete_by_id(&mut self, id: &str) {
        match self.store.toggle_complete(id) {
            Some(true) => {
                self.points = award_completion(self.points);
                // One celebration per burst: completing more tasks while
                // the overlay is up does not restart it.
                if self.celebration_until.is_none() {
                    self.celebration_until = Some(Instant::now() + CELEBRATION_DURATION);
                }
            }
            Some(false) => {
                self.points = revoke_completion(self.points);
            }
            None => return,
        }
        self.persist_events();
        let result = storage::save_points(self.storage.as_mut(), self.points);
        self.report_save(result);
    }

    // ── delete & undo ──

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_event_id() else {
            return;
        };
        let now = Instant::now();
        if self.store.remove(&id, now).is_some() {
            self.toasts.push(Toast::undoable("Event deleted", now));
            self.persist_events();
            self.clamp_selection();
        }
    }

    pub fn undo_delete(&mut self) {
        if self.store.undo_remove(Instant::now()).is_some() {
            self.toasts.retain(|t| !t.undoable);
            self.push_toast("Event restored", ToastKind::Success);
            self.persist_events();
        }
    }

    // ── reschedule (move mode) ──

    pub fn begin_move(&mut self) {
        let Some(id) = self.selected_event_id() else {
            return;
        };
        let start_hour = self
            .store
            .get(&id)
            .and_then(|e| e.start_time.get(..2))
            .and_then(|h| h.parse::<u32>().ok())
            .unwrap_or(0);
        self.moving = Some((id, start_hour));
        self.input_mode = InputMode::Move;
    }

    pub fn move_target_later(&mut self) {
        if let Some((_, hour)) = &mut self.moving {
            *hour = (*hour + 1) % 24;
        }
    }

    pub fn move_target_earlier(&mut self) {
        if let Some((_, hour)) = &mut self.moving {
            *hour = (*hour + 23) % 24;
        }
    }

    pub fn commit_move(&mut self) {
        let Some((id, target_hour)) = self.moving.take() else {
            return;
        };
        self.input_mode = InputMode::Normal;

        let Some(event) = self.store.get(&id).cloned() else {
            return;
        };
        let (start, end) =
            shift_preserving_duration(&event.start_time, &event.end_time, target_hour);
        let mut moved = event;
        moved.start_time = start;
        moved.end_time = end;
        self.store.update(moved);
        self.push_toast("Event rescheduled", ToastKind::Success);
        self.persist_events();
    }

    pub fn cancel_move(&mut self) {
        self.moving = None;
        self.input_mode = InputMode::Normal;
    }

    // ── tools: routine, backup, clipboard ──

    pub fn load_default_routine(&mut self) {
        self.store
            .replace_date(self.selected_date, default_routine(self.selected_date));
        self.push_toast("Default routine loaded", ToastKind::Success);
        self.persist_events();
        self.clamp_selection();
    }

    pub fn export_backup(&mut self) {
        let result = storage::export_all(
            self.store.all(),
            self.points,
            self.streak,
            self.dark_mode,
        )
        .and_then(|blob| {
            let filename = storage::backup_filename(self.today);
            fs::write(&filename, blob)?;
            Ok(filename)
        });
        match result {
            Ok(filename) => {
                self.push_toast(format!("Backup written to {filename}"), ToastKind::Success)
            }
            Err(e) => self.push_toast(format!("Export failed: {e}"), ToastKind::Error),
        }
    }

    pub fn begin_import(&mut self) {
        self.import_path.clear();
        self.input_mode = InputMode::ImportPrompt;
    }

    pub fn cancel_import(&mut self) {
        self.import_path.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Apply a backup file. A missing or shape-mismatched events array
    /// rejects the whole file; points/streak/theme apply best-effort.
    pub fn submit_import(&mut self) {
        let path = std::mem::take(&mut self.import_path);
        self.input_mode = InputMode::Normal;

        let imported = match fs::read_to_string(path.trim())
            .map_err(color_eyre::Report::from)
            .and_then(|blob| storage::import_all(&blob))
        {
            Ok(imported) => imported,
            Err(e) => {
                self.push_toast(format!("Import failed: {e}"), ToastKind::Error);
                return;
            }
        };

        self.store.replace_all(imported.events);
        if let Some(points) = imported.points {
            self.points = points;
        }
        if let Some(streak) = imported.streak {
            self.streak = streak;
        }
        if let Some(dark_mode) = imported.dark_mode {
            self.dark_mode = dark_mode;
            self.theme = Theme::for_mode(dark_mode);
        }

        self.persist_events();
        let points = storage::save_points(self.storage.as_mut(), self.points);
        self.report_save(points);
        let streak = storage::save_streak(self.storage.as_mut(), self.streak);
        self.report_save(streak);
        let theme = storage::save_theme(self.storage.as_mut(), self.dark_mode);
        self.report_save(theme);

        self.clamp_selection();
        self.push_toast("Backup restored", ToastKind::Success);
    }

    /// Plain-text day summary: one `✅/⬜ *HH:MM* - Title (category)` line
    /// per event, copied to the system clipboard.
    pub fn copy_summary(&mut self) {
        let mut day: Vec<&PlannerEvent> = self.store.events_for_date(self.selected_date);
        day.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        let header = format!(
            "📅 *Agenda - {}*\n\n",
            self.selected_date.format("%B %d, %Y")
        );
        let body = day
            .iter()
            .map(|e| {
                format!(
                    "{} *{}* - {} ({})",
                    if e.is_completed { "✅" } else { "⬜" },
                    e.start_time,
                    e.title,
                    e.category.label()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(header + &body)) {
            Ok(()) => self.push_toast("Summary copied to clipboard", ToastKind::Success),
            Err(e) => self.push_toast(format!("Clipboard error: {e}"), ToastKind::Error),
        }
    }

    // ── timers ──

    /// Runs every poll iteration: refreshes "now", expires toasts, the
    /// undo tombstone and the celebration overlay.
    pub fn tick(&mut self) {
        let now = Instant::now();
        toast::prune(&mut self.toasts, now);
        self.store.expire_tombstone(now);
        if let Some(deadline) = self.celebration_until {
            if now >= deadline {
                self.celebration_until = None;
            }
        }

        let local = Local::now();
        self.today = local.date_naive();
        self.now_hm = local.format("%H:%M").to_string();
    }

    // ── persistence plumbing ──

    fn persist_events(&mut self) {
        let result = storage::save_events(&mut *self.storage, self.store.all());
        self.report_save(result);
    }

    fn report_save(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.push_toast(format!("Save failed: {e}"), ToastKind::Error);
        }
    }

    fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toasts.push(Toast::new(message, kind, Instant::now()));
    }
}
