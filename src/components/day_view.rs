use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::planner::event::{has_conflict, PlannerEvent};
use crate::planner::layout::{DayGrid, HOURS};
use crate::theme::Theme;

pub struct DayView;

impl DayView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", app.selected_date.format("%A, %B %d, %Y"))
        } else if w >= 18 {
            format!(" {} ", app.selected_date.format("%b %d, %Y"))
        } else {
            format!(" {} ", app.selected_date.format("%m/%d"))
        };

        let (completed, total) = app.progress();
        let count_str = if total > 0 {
            format!(" {completed}/{total} done ")
        } else {
            String::new()
        };

        let block = Block::default()
            .title(title)
            .title_style(app.theme.header)
            .title_bottom(Line::from(Span::styled(count_str, app.theme.dim)))
            .borders(Borders::ALL)
            .border_style(app.theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let timed = app.day_timed();
        let all_day = app.day_all_day();

        if timed.is_empty() && all_day.is_empty() {
            let msg = Paragraph::new("No events for this day").style(app.theme.dim);
            frame.render_widget(msg, inner);
            return;
        }

        let grid = DayGrid::build(&timed);
        let is_today = app.selected_date == app.today;
        let current_hour: usize = app.now_hm.get(..2).and_then(|h| h.parse().ok()).unwrap_or(0);
        let move_target = match (app.input_mode, &app.moving) {
            (InputMode::Move, Some((_, hour))) => Some(*hour as usize),
            _ => None,
        };

        let mut items: Vec<ListItem> = Vec::new();
        // The scroll window centers on the move target, else the
        // selection, else "now" when viewing today.
        let mut target_line: Option<usize> = None;
        let mut selected_line: Option<usize> = None;
        let mut now_line: Option<usize> = None;

        if !all_day.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "All Day",
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ))));
            for event in &all_day {
                items.push(all_day_item(event, &app.theme));
            }
            items.push(ListItem::new(Line::from("")));
        }

        for hour in 0..HOURS {
            let row = grid.row(hour);
            let bucket: Vec<&PlannerEvent> =
                row.iter().map(|s| timed[s.event_index]).collect();

            let is_current = is_today && hour == current_hour;
            let is_target = move_target == Some(hour);

            let label_style = if is_target {
                app.theme.highlight
            } else if is_current {
                app.theme.now_marker
            } else {
                app.theme.dim
            };
            let mut label_spans = vec![Span::styled(format!("{hour:02}:00 "), label_style)];
            if is_current {
                label_spans.push(Span::styled(format!("◀ {}", app.now_hm), app.theme.now_marker));
            }
            if is_target {
                label_spans.push(Span::styled("◀ move here", app.theme.highlight));
            }

            if is_target {
                target_line = Some(items.len());
            }
            if is_current {
                now_line = Some(items.len());
            }
            items.push(ListItem::new(Line::from(label_spans)));

            for segment in row {
                let event = timed[segment.event_index];
                let selected = app.selection == segment.event_index && segment.starts_here;
                if selected {
                    selected_line = Some(items.len());
                }
                let conflict = !event.is_completed && has_conflict(event, &bucket);
                items.push(event_item(
                    event,
                    segment.starts_here,
                    selected,
                    conflict,
                    &app.theme,
                ));
            }
        }

        // Center the focus line in the viewport.
        let focus_line = target_line.or(selected_line).or(now_line).unwrap_or(0);
        let viewport = inner.height as usize;
        let skip = focus_line.saturating_sub(viewport / 2).min(
            items.len().saturating_sub(viewport),
        );
        let visible: Vec<ListItem> = items.into_iter().skip(skip).collect();
        frame.render_widget(List::new(visible), inner);
    }
}

fn event_item(
    event: &PlannerEvent,
    starts_here: bool,
    selected: bool,
    conflict: bool,
    theme: &Theme,
) -> ListItem<'static> {
    let indicator = Span::styled(
        "  ▌",
        Style::default().fg(theme.category_color(event.category)),
    );

    let checkbox = if starts_here {
        if event.is_completed {
            "[x] "
        } else {
            "[ ] "
        }
    } else {
        "  ╎ "
    };

    let title_style = if selected {
        theme.selected
    } else if event.is_completed {
        theme.completed
    } else if !starts_here {
        theme.dim
    } else {
        Style::default()
    };

    let mut spans = vec![
        indicator,
        Span::styled(checkbox.to_string(), title_style),
        Span::styled(event.title.clone(), title_style),
    ];

    if starts_here {
        spans.push(Span::styled(
            format!("  {}", event.time_display()),
            theme.dim,
        ));
        if conflict {
            spans.push(Span::styled("  ⚠ conflict", theme.conflict));
        }
    } else {
        spans.push(Span::styled(" (cont.)".to_string(), theme.dim));
    }

    ListItem::new(Line::from(spans))
}

fn all_day_item(event: &PlannerEvent, theme: &Theme) -> ListItem<'static> {
    let indicator = Span::styled(
        "  ▌",
        Style::default().fg(theme.category_color(event.category)),
    );
    let style = if event.is_completed {
        theme.completed
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        indicator,
        Span::styled(
            format!("{} {}", if event.is_completed { "[x]" } else { "[ ]" }, event.title),
            style,
        ),
    ]))
}
