use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let w = area.width as usize;

        let mode_str = match app.input_mode {
            InputMode::Normal => "",
            InputMode::Form => " [Event]",
            InputMode::Move => " [Move]",
            InputMode::ImportPrompt => " [Import]",
            InputMode::DatePrompt => " [Go to]",
        };

        let filter_str = match app.filter {
            None => String::new(),
            Some(cat) => format!(" filter:{}", cat.label()),
        };

        let (completed, total) = app.progress();
        let left = format!(
            " ★ {}  🔥 {}  {}/{}{}{} ",
            app.points, app.streak, completed, total, filter_str, mode_str
        );

        let right = match app.input_mode {
            InputMode::Move => " jk:Hour Enter:Drop Esc:Cancel".to_string(),
            InputMode::ImportPrompt => " type a backup path, Enter to load".to_string(),
            InputMode::DatePrompt => " type YYYY-MM-DD, Enter to jump".to_string(),
            _ if w >= 100 => {
                " hl:Day jk:Select t:Today Sp:Done n:New e:Edit d:Del u:Undo m:Move f:Filter ?:Help q:Quit"
                    .to_string()
            }
            _ if w >= 60 => " jk:Select Sp:Done n:New d:Del ?:Help q:Quit".to_string(),
            _ => " ?:Help q:Quit".to_string(),
        };

        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));
        let line = Line::from(vec![
            Span::styled(left, app.theme.status),
            Span::styled(padding, app.theme.status),
            Span::styled(right, app.theme.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(app.theme.status), area);
    }
}
