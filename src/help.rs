use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT          Back one week\n",
    "l, RIGHT         Forward one week\n",
    "k, UP            Back one day\n",
    "j, DOWN          Forward one day\n",
    "0, HOME          Jump to the first day\n",
    "$, END           Jump to the last day\n",
    "ENTER, SPACE     Show the selected day\n",
    "?                Show this help\n",
    "q, ESC           Quit\n",
    "\n",
    "Press the Any Key to dismiss.\n",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::BASE_STYLE;
    use ratatui::buffer::Cell;

    #[test]
    fn test_help_is_centered() {
        let area = Rect::new(0, 0, 60, 19);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        let title_row = (0..area.width)
            .filter_map(|x| buffer.cell((x, 3)))
            .map(Cell::symbol)
            .collect::<String>();
        assert!(title_row.contains(" Commands "), "{title_row:?}");
        let hint_row = (0..area.width)
            .filter_map(|x| buffer.cell((x, 14)))
            .map(Cell::symbol)
            .collect::<String>();
        assert!(hint_row.contains("Press the Any Key to dismiss."), "{hint_row:?}");
    }

    #[test]
    fn test_help_fits_narrow_area() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        assert_eq!(buffer.area, area);
        let title_row = (0..area.width)
            .filter_map(|x| buffer.cell((x, 0)))
            .map(Cell::symbol)
            .collect::<String>();
        assert!(title_row.contains(" Commands "), "{title_row:?}");
    }
}
