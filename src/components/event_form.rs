use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::planner::event::{Category, PlannerEvent};
use crate::planner::time::parse_hm;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    StartTime,
    EndTime,
    Category,
    Description,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Category,
            FormField::Category => FormField::Description,
            FormField::Description => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::StartTime => FormField::Title,
            FormField::EndTime => FormField::StartTime,
            FormField::Category => FormField::EndTime,
            FormField::Description => FormField::Category,
        }
    }
}

/// Edit-form state for creating or editing one event. `editing` carries
/// the id and completion flag of the event being edited so a save
/// replaces it in place; `None` means a new event gets a fresh id.
#[derive(Debug, Clone)]
pub struct EventFormState {
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub editing: Option<(String, bool)>,
    pub active_field: FormField,
    pub error: Option<&'static str>,
}

impl EventFormState {
    pub fn new(date: NaiveDate, start_hour: Option<u32>) -> Self {
        let (start_time, end_time) = match start_hour {
            Some(h) => (format!("{h:02}:00"), format!("{h:02}:30")),
            None => ("09:00".to_string(), "10:00".to_string()),
        };
        Self {
            title: String::new(),
            start_time,
            end_time,
            category: Category::Work,
            description: String::new(),
            date,
            editing: None,
            active_field: FormField::Title,
            error: None,
        }
    }

    pub fn edit(event: &PlannerEvent) -> Self {
        Self {
            title: event.title.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            category: event.category,
            description: event.description.clone().unwrap_or_default(),
            date: event.date,
            editing: Some((event.id.clone(), event.is_completed)),
            active_field: FormField::Title,
            error: None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.error = None;
        match self.active_field {
            FormField::Title => self.title.push(c),
            FormField::StartTime => self.start_time.push(c),
            FormField::EndTime => self.end_time.push(c),
            FormField::Description => self.description.push(c),
            FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.active_field {
            FormField::Title => {
                self.title.pop();
            }
            FormField::StartTime => {
                self.start_time.pop();
            }
            FormField::EndTime => {
                self.end_time.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Category => {}
        }
    }

    pub fn next_category(&mut self) {
        let pos = Category::ALL
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(0);
        self.category = Category::ALL[(pos + 1) % Category::ALL.len()];
    }

    /// Validation blocks save; the message renders inline in the form.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Title is required");
        }
        if parse_hm(&self.start_time).is_none() || parse_hm(&self.end_time).is_none() {
            return Err("Times must be HH:MM");
        }
        if self.start_time >= self.end_time {
            return Err("End time must be after start time");
        }
        Ok(())
    }

    /// Build the event to save. Callers must have validated first.
    pub fn into_event(self) -> PlannerEvent {
        let mut event = PlannerEvent::new(
            self.title.trim().to_string(),
            self.start_time,
            self.end_time,
            self.category,
            self.date,
        );
        let description = self.description.trim();
        if !description.is_empty() {
            event.description = Some(description.to_string());
        }
        if let Some((id, is_completed)) = self.editing {
            event.id = id;
            event.is_completed = is_completed;
        }
        event
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &EventFormState, theme: &Theme) {
        let form_w = area.width.min(52).max(30);
        let form_h = area.height.min(13).max(10);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h);

        frame.render_widget(Clear, form_area);

        let title = if state.editing.is_some() {
            " Edit Event "
        } else {
            " New Event "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // start
            Constraint::Length(1), // end
            Constraint::Length(1), // category
            Constraint::Length(1), // description
            Constraint::Length(1), // error
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(
            frame,
            rows[0],
            "Title:",
            &state.title,
            state.active_field == FormField::Title,
            theme,
        );
        render_field(
            frame,
            rows[1],
            "Start:",
            &state.start_time,
            state.active_field == FormField::StartTime,
            theme,
        );
        render_field(
            frame,
            rows[2],
            "End:",
            &state.end_time,
            state.active_field == FormField::EndTime,
            theme,
        );

        let category_value = format!("< {} >", state.category.label());
        render_field(
            frame,
            rows[3],
            "Cat:",
            &category_value,
            state.active_field == FormField::Category,
            theme,
        );
        render_field(
            frame,
            rows[4],
            "Notes:",
            &state.description,
            state.active_field == FormField::Description,
            theme,
        );

        if let Some(error) = state.error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("! {error}"), theme.conflict)),
                rows[5],
            );
        }

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", theme.dim),
            Span::styled("Space", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cycle cat ", theme.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[7]);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    theme: &Theme,
) {
    let cursor = if active { "_" } else { "" };
    let style = if active { theme.selected } else { Style::default() };

    let spans = vec![
        Span::styled(format!("{label:<7}"), theme.dim),
        Span::styled(format!("{value}{cursor}"), style),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_blocks_bad_times() {
        let mut form = EventFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), None);
        form.title = "review".into();
        assert!(form.validate().is_ok());

        form.start_time = "11:00".into();
        form.end_time = "10:00".into();
        assert!(form.validate().is_err());

        form.end_time = "11:00".into();
        assert!(form.validate().is_err(), "equal times are invalid");

        form.end_time = "25:00".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn validation_requires_title() {
        let mut form = EventFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), None);
        form.title = "   ".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn hour_slot_prefills_half_hour() {
        let form = EventFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Some(7));
        assert_eq!(form.start_time, "07:00");
        assert_eq!(form.end_time, "07:30");
    }

    #[test]
    fn editing_keeps_id_and_completion() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut original = PlannerEvent::new(
            "gym".into(),
            "06:00".into(),
            "07:00".into(),
            Category::Health,
            date,
        );
        original.is_completed = true;

        let mut form = EventFormState::edit(&original);
        form.title = "gym (early)".into();
        let saved = form.into_event();

        assert_eq!(saved.id, original.id);
        assert!(saved.is_completed);
        assert_eq!(saved.title, "gym (early)");
    }

    #[test]
    fn new_event_gets_fresh_id_and_trimmed_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut form = EventFormState::new(date, None);
        form.title = "  plan week  ".into();
        form.description = "   ".into();
        let event = form.into_event();
        assert_eq!(event.title, "plan week");
        assert!(event.description.is_none());
        assert!(!event.is_completed);
    }

    #[test]
    fn category_cycles_through_all() {
        let mut form = EventFormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), None);
        let start = form.category;
        for _ in 0..Category::ALL.len() {
            form.next_category();
        }
        assert_eq!(form.category, start);
    }
}
