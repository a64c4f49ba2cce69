use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;
use crate::toast::{Toast, ToastKind};

/// At most this many toasts render at once; older ones wait underneath.
const MAX_VISIBLE: usize = 4;

pub struct Toasts;

impl Toasts {
    /// Stack toasts bottom-right, newest closest to the status bar.
    pub fn render(frame: &mut Frame, area: Rect, toasts: &[Toast], theme: &Theme) {
        let width = area.width.min(44);
        let x = area.x + area.width.saturating_sub(width);

        for (i, toast) in toasts.iter().rev().take(MAX_VISIBLE).enumerate() {
            let height = 3;
            let bottom_offset = 1 + (i as u16) * height;
            if bottom_offset + height > area.height {
                break;
            }
            let y = area.y + area.height - bottom_offset - height;
            let rect = Rect::new(x, y, width, height);

            let border_color = match toast.kind {
                ToastKind::Success => Color::Green,
                ToastKind::Error => Color::Red,
                ToastKind::Info => Color::Cyan,
            };

            let mut spans = vec![Span::raw(toast.message.clone())];
            if toast.undoable {
                spans.push(Span::styled("  u:undo", theme.highlight));
            }

            frame.render_widget(Clear, rect);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color));
            frame.render_widget(Paragraph::new(Line::from(spans)).block(block), rect);
        }
    }
}
