use ratatui::style::{Color, Modifier, Style};

/// Accent theme for the widget chrome; the host-facing style knob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Blue,
    Green,
    Magenta,
}

impl Theme {
    pub fn accent(&self) -> Color {
        match self {
            Theme::Blue => Color::Cyan,
            Theme::Green => Color::Green,
            Theme::Magenta => Color::Magenta,
        }
    }

    /// Parse a theme name, falling back to the default
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "green" => Theme::Green,
            "magenta" => Theme::Magenta,
            _ => Theme::Blue,
        }
    }
}

pub fn color_for_tag(tag: &str) -> Color {
    match tag {
        "ironbank" => Color::Yellow,
        "database" => Color::Green,
        "api" => Color::Cyan,
        "file" => Color::Magenta,
        "cache" => Color::LightRed,
        _ => Color::White,
    }
}

/// Style applied to matched query runs inside a result row
pub fn match_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
