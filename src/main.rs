use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use smart_planner::app::{App, InputMode};
use smart_planner::planner::storage::FileStorage;
use smart_planner::{components, event, tui};

fn main() -> Result<()> {
    color_eyre::install()?;

    let storage = Box::new(FileStorage::new()?);
    let mut app = App::new(storage)?;

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            let banner_height = if app.active_task().is_some() { 1 } else { 0 };
            let layout = Layout::vertical([
                Constraint::Length(banner_height),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            if let Some(task) = app.active_task() {
                render_active_banner(frame, layout[0], app, &task.title.clone());
            }

            components::DayView::render(frame, layout[1], app);
            components::StatusBar::render(frame, layout[2], app);

            if let Some(ref form) = app.form_state {
                components::EventForm::render(frame, area, form, &app.theme);
            }

            match app.input_mode {
                InputMode::ImportPrompt => {
                    render_prompt(frame, area, app, " Import backup ", &app.import_path)
                }
                InputMode::DatePrompt => {
                    render_prompt(frame, area, app, " Go to date ", &app.date_input)
                }
                _ => {}
            }

            if app.show_help {
                render_help(frame, area, app);
            }

            components::Toasts::render(frame, area, &app.toasts, &app.theme);

            if app.celebrating() {
                render_celebration(frame, area);
            }
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            // Help overlay takes priority
            if app.show_help {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    app.show_help = false;
                }
                app.tick();
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Move => handle_move_input(app, key.code),
                InputMode::ImportPrompt => handle_import_input(app, key.code),
                InputMode::DatePrompt => handle_date_input(app, key.code),
            }
        }

        app.tick();
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.select_next(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.select_prev(),
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('g'), _) => app.begin_goto_date(),
        (KeyCode::Char(' '), _) => app.toggle_selected_complete(),
        (KeyCode::Char('c'), _) => app.complete_active_task(),
        (KeyCode::Char('n'), _) => {
            let hour = if app.selected_date == app.today {
                app.now_hm.get(..2).and_then(|h| h.parse().ok())
            } else {
                None
            };
            app.open_new_form(hour);
        }
        (KeyCode::Enter, _) | (KeyCode::Char('e'), _) => app.open_edit_form(),
        (KeyCode::Char('d'), _) | (KeyCode::Char('x'), _) => app.delete_selected(),
        (KeyCode::Char('u'), _) => app.undo_delete(),
        (KeyCode::Char('m'), _) => app.begin_move(),
        (KeyCode::Char('f'), _) => app.cycle_filter(),
        (KeyCode::Char('T'), _) => app.toggle_theme(),
        (KeyCode::Char('r'), _) => app.load_default_routine(),
        (KeyCode::Char('b'), _) => app.export_backup(),
        (KeyCode::Char('i'), _) => app.begin_import(),
        (KeyCode::Char('y'), _) => app.copy_summary(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => {
            if let Some(ref mut form) = app.form_state {
                form.active_field = form.active_field.next();
            }
        }
        KeyCode::BackTab => {
            if let Some(ref mut form) = app.form_state {
                form.active_field = form.active_field.prev();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.form_state {
                form.backspace();
            }
        }
        KeyCode::Char(' ') => {
            // Space cycles the category when that field is active
            if let Some(ref mut form) = app.form_state {
                if form.active_field == components::event_form::FormField::Category {
                    form.next_category();
                } else {
                    form.input_char(' ');
                }
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.form_state {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_move_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_move(),
        KeyCode::Enter => app.commit_move(),
        KeyCode::Down | KeyCode::Char('j') => app.move_target_later(),
        KeyCode::Up | KeyCode::Char('k') => app.move_target_earlier(),
        _ => {}
    }
}

fn handle_import_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_import(),
        KeyCode::Enter => app.submit_import(),
        KeyCode::Backspace => {
            app.import_path.pop();
        }
        KeyCode::Char(c) => app.import_path.push(c),
        _ => {}
    }
}

fn handle_date_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.cancel_goto_date(),
        KeyCode::Enter => app.submit_goto_date(),
        KeyCode::Backspace => {
            app.date_input.pop();
        }
        KeyCode::Char(c) => app.date_input.push(c),
        _ => {}
    }
}

fn render_active_banner(frame: &mut ratatui::Frame, area: Rect, app: &App, title: &str) {
    let line = Line::from(vec![
        Span::styled(" ▶ NOW ", app.theme.selected),
        Span::raw(" "),
        Span::styled(title.to_string(), app.theme.header),
        Span::styled("  c:complete", app.theme.dim),
    ]);
    frame.render_widget(Paragraph::new(line).style(app.theme.highlight), area);
}

fn render_prompt(frame: &mut ratatui::Frame, area: Rect, app: &App, title: &str, value: &str) {
    use ratatui::widgets::{Block, Borders, Clear};

    let popup_w = area.width.min(60).max(30);
    let popup_h = 3;
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(title.to_string())
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_style(app.theme.border);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let line = Line::from(vec![
        Span::styled("> ", app.theme.dim),
        Span::raw(value.to_string()),
        Span::raw("_"),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_celebration(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::widgets::Clear;

    let w = 14u16;
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + area.height / 3;
    let rect = Rect::new(x, y, w.min(area.width), 1);

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new("🎉  +10  🎉").centered(),
        rect,
    );
}

fn render_help(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::style::{Modifier, Style};
    use ratatui::widgets::{Block, Borders, Clear, Wrap};

    let popup_w = area.width.min(52).max(30);
    let popup_h = area.height.min(24).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_style(app.theme.border);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let bindings: &[(&str, &str)] = &[
        ("h/l or ←/→", "Previous/next day"),
        ("j/k or ↓/↑", "Select event"),
        ("t", "Jump to today"),
        ("g", "Go to a date (YYYY-MM-DD)"),
        ("", ""),
        ("Space", "Toggle completion (+10 pts)"),
        ("c", "Complete the running task"),
        ("n", "New event"),
        ("Enter / e", "Edit selected event"),
        ("d / x", "Delete (u to undo)"),
        ("m", "Move to another hour"),
        ("f", "Cycle category filter"),
        ("", ""),
        ("r", "Load default routine"),
        ("y", "Copy day summary"),
        ("b", "Export backup"),
        ("i", "Import backup"),
        ("T", "Toggle dark/light theme"),
        ("", ""),
        ("q / Esc", "Quit / close popup"),
    ];

    let mut lines = vec![Line::from(Span::styled("Keys", section_style))];
    for (key, desc) in bindings {
        if key.is_empty() {
            lines.push(Line::from(""));
        } else {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<12}"), key_style),
                Span::raw((*desc).to_string()),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
