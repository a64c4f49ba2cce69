use std::path::PathBuf;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::planner::Category;

/// Color palette for one display mode. The active mode is part of the
/// persisted state and toggles at runtime, so the app owns a `Theme`
/// value instead of a process-wide static.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub selected: Style,
    pub highlight: Style,
    pub completed: Style,
    pub conflict: Style,
    pub now_marker: Style,
    pub work: Color,
    pub personal: Color,
    pub health: Color,
    pub other: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            completed: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            conflict: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            now_marker: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            work: Color::Blue,
            personal: Color::Magenta,
            health: Color::Green,
            other: Color::Gray,
        }
    }

    pub fn light() -> Self {
        Self {
            header: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Gray),
            border: Style::default().fg(Color::DarkGray),
            status: Style::default().fg(Color::Black).bg(Color::Gray),
            selected: Style::default().fg(Color::White).bg(Color::Blue),
            highlight: Style::default().bg(Color::Gray).add_modifier(Modifier::BOLD),
            completed: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::CROSSED_OUT),
            conflict: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            now_marker: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            work: Color::Blue,
            personal: Color::Magenta,
            health: Color::Green,
            other: Color::DarkGray,
        }
    }

    /// Preset for the persisted mode with any `theme.toml` overrides
    /// applied on top.
    pub fn for_mode(dark: bool) -> Self {
        let base = if dark { Self::dark() } else { Self::light() };
        match ThemeConfig::load() {
            Some(config) => config.apply(base),
            None => base,
        }
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Work => self.work,
            Category::Personal => self.personal,
            Category::Health => self.health,
            Category::Other => self.other,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("smart-planner").join("theme.toml"))
}

// ── TOML config overrides ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    work: Option<String>,
    personal: Option<String>,
    health: Option<String>,
    other: Option<String>,
}

impl ThemeConfig {
    fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        toml::from_str(&content).ok()
    }

    fn apply(self, mut theme: Theme) -> Theme {
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.selected_fg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.fg(c);
        }
        if let Some(c) = self.selected_bg.as_deref().and_then(parse_color) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = self.work.as_deref().and_then(parse_color) {
            theme.work = c;
        }
        if let Some(c) = self.personal.as_deref().and_then(parse_color) {
            theme.personal = c;
        }
        if let Some(c) = self.health.as_deref().and_then(parse_color) {
            theme.health = c;
        }
        if let Some(c) = self.other.as_deref().and_then(parse_color) {
            theme.other = c;
        }
        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8800"), Some(Color::Rgb(255, 136, 0)));
        assert_eq!(parse_color("cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("Grey"), Some(Color::Gray));
        assert_eq!(parse_color("#bad"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let config: ThemeConfig =
            toml::from_str("work = \"yellow\"\nheader_fg = \"#112233\"").unwrap();
        let theme = config.apply(Theme::dark());
        assert_eq!(theme.work, Color::Yellow);
        assert_eq!(theme.header.fg, Some(Color::Rgb(0x11, 0x22, 0x33)));
    }
}
