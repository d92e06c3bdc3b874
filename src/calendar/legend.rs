use super::theme::{Level, ThemeLevels};
use super::widget::center;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

const LESS: &str = "Less";
const MORE: &str = "More";

/// The "Less ▢ ▢ ▢ ▢ ▢ More" strip showing each level's swatch, or each
/// level's glyph for icon themes.  Right-aligned within its area.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Legend<'a> {
    theme: &'a ThemeLevels,
    cell_width: u16,
    text_style: Style,
}

impl<'a> Legend<'a> {
    pub(crate) fn new(theme: &'a ThemeLevels, cell_width: u16) -> Self {
        Legend {
            theme,
            cell_width,
            text_style: Style::new(),
        }
    }

    pub(crate) fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    fn sample(&self, level: Level) -> Span<'static> {
        match self.theme.color(level) {
            Some(color) => Span::styled(
                " ".repeat(self.cell_width.into()),
                Style::new().bg(color),
            ),
            None => Span::raw(center(self.theme.visual(level), self.cell_width)),
        }
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = vec![Span::styled(LESS, self.text_style)];
        for lv in Level::ALL {
            spans.push(Span::raw(" "));
            spans.push(self.sample(lv));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(MORE, self.text_style));
        Line::from(spans).alignment(Alignment::Right)
    }

    /// Number of terminal columns the legend occupies
    pub(crate) fn width(&self) -> u16 {
        u16::try_from(self.to_line().width()).unwrap_or(u16::MAX)
    }
}

impl Widget for Legend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.to_line().render(area, buf);
    }
}
