use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const MONTH_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Content drawn over the selected day in color themes
pub(crate) const CURSOR_STYLE: Style = Style::new().fg(Color::Black).add_modifier(Modifier::BOLD);

/// Selected day in glyph themes
pub(crate) const CURSOR_GLYPH_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Outlined boundary placeholders in glyph themes
pub(crate) const BOUNDARY_GLYPH_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) mod popup {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
