use crate::calendar::CellDescriptor;
use crate::style::{
    popup::{HINT_STYLE, TITLE_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

const DISMISS: &str = "Press the Any Key to dismiss.";

/// Popup describing an activated day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Details {
    title: String,
    lines: Vec<String>,
}

impl Details {
    pub(crate) fn for_cell(cell: &CellDescriptor) -> Details {
        let mut lines = vec![format!("Level {}", cell.level)];
        match &cell.data {
            Some(data) => {
                let pretty =
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
                lines.extend(pretty.lines().map(String::from));
            }
            None if cell.level.get() == 0 => lines.push(String::from("No activity")),
            None => (),
        }
        Details {
            title: format!(" {} ", cell.tooltip),
            lines,
        }
    }

    fn to_text(&self) -> Text<'_> {
        let mut text = Text::from_iter(
            self.lines
                .iter()
                .map(|s| Line::styled(s.as_str(), BASE_STYLE)),
        );
        text.push_line(Line::raw(""));
        text.push_line(Line::styled(DISMISS, HINT_STYLE));
        text
    }
}

impl Widget for &Details {
    /*
     * .................................
     * .┌─ Thursday, June 15, 2023 ───┐.
     * .│Level 4                      │.
     * .│{                            │.
     * .│  "commits": 12              │.
     * .│}                            │.
     * .│                             │.
     * .│Press the Any Key to dismiss.│.
     * .└─────────────────────────────┘.
     * .................................
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.to_text();
        let title_width =
            u16::try_from(Line::raw(self.title.as_str()).width()).unwrap_or(u16::MAX);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .max(title_width)
            .saturating_add(2)
            .min(area.width);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let [block_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [block_area] = Layout::vertical([height]).flex(Flex::Center).areas(block_area);
        let outer_area = Rect {
            x: block_area.x.saturating_sub(1),
            y: block_area.y.saturating_sub(1),
            width: block_area.width.saturating_add(2),
            height: block_area.height.saturating_add(2),
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(Line::styled(self.title.as_str(), TITLE_STYLE))
                    .title_alignment(Alignment::Center),
            )
            .style(BASE_STYLE)
            .render(block_area, buf);
    }
}
