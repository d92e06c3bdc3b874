use super::cells::CellDescriptor;
use super::grid::{GridCoordinate, DAYS_IN_WEEK};
use super::legend::Legend;
use super::theme::{Level, ThemeLevels};
use super::view::CalendarView;
use crate::style::{BOUNDARY_GLYPH_STYLE, CURSOR_GLYPH_STYLE, CURSOR_STYLE, MONTH_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Span, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
};

/// Number of columns on the left side of the grid, used as the margin in
/// which the weekday names are written
const LABEL_WIDTH: u16 = 4;

/// Lines above the first row of cells, used for month names
const HEADER_LINES: u16 = 1;

/// Blank columns between adjacent week columns
const GAP: u16 = 1;

/// Lines between the last row of cells and the legend
const LEGEND_GAP: u16 = 1;

const CURSOR_MARK: &str = "[]";

const BOUNDARY_FILL: char = '░';

const BOUNDARY_GLYPH: &str = "·";

/// The heatmap: weekday labels, month labels, one cell per day, and the
/// "Less ... More" legend underneath
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ContributionCalendar {
    cell_width: u16,
    cell_height: u16,
    text_style: Style,
    include_boundary: bool,
}

impl ContributionCalendar {
    pub(crate) fn new() -> ContributionCalendar {
        ContributionCalendar {
            cell_width: 2,
            cell_height: 1,
            text_style: Style::new(),
            include_boundary: false,
        }
    }

    pub(crate) fn cell_size(mut self, width: u16, height: u16) -> Self {
        self.cell_width = width.max(1);
        self.cell_height = height.max(1);
        self
    }

    pub(crate) fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    pub(crate) fn include_boundary(mut self, flag: bool) -> Self {
        self.include_boundary = flag;
        self
    }

    fn stride(&self) -> u16 {
        self.cell_width.saturating_add(GAP)
    }

    fn columns_for_width(&self, width: u16) -> usize {
        (width.saturating_sub(LABEL_WIDTH) / self.stride()).into()
    }

    fn row_y(&self, row: usize) -> u16 {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        HEADER_LINES.saturating_add(row.saturating_mul(self.cell_height))
    }

    fn column_x(&self, i: u16) -> u16 {
        LABEL_WIDTH.saturating_add(i.saturating_mul(self.stride()))
    }
}

impl Default for ContributionCalendar {
    fn default() -> ContributionCalendar {
        ContributionCalendar::new()
    }
}

impl StatefulWidget for ContributionCalendar {
    type State = CalendarView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let columns = state.scroll_to_cursor(self.columns_for_width(area.width));
        let mut drawn = u16::try_from(columns.len()).unwrap_or(u16::MAX);
        if columns.start == state.grid().start().col {
            let padding = u16::try_from(state.grid().padding_columns()).unwrap_or_default();
            drawn = drawn.saturating_add(padding);
        }
        let grid_width = self.column_x(drawn).saturating_sub(GAP);
        let mut canvas = BufferCanvas::new(area, buf);
        for (row, wd) in state.grid().week_start().weekdays().into_iter().enumerate() {
            let name = wd.to_string().chars().take(3).collect::<String>();
            canvas.mvprint(self.row_y(row), 0, name, Some(self.text_style));
        }
        let cursor = state.cursor();
        // Placeholders only make sense when the whole range spans about a
        // week; longer ranges collapse them to blank space
        let show_boundary = self.include_boundary && state.grid().is_short_range();
        let mut label_free_x = LABEL_WIDTH;
        for (i, col) in std::iter::zip(0u16.., columns) {
            let x = self.column_x(i);
            if let Some(month) = month_label(state, col, i == 0) {
                if x >= label_free_x {
                    canvas.mvprint(0, x, &month, Some(self.text_style.patch(MONTH_STYLE)));
                    let width = u16::try_from(month.len()).unwrap_or(u16::MAX);
                    label_free_x = x.saturating_add(width).saturating_add(1);
                }
            }
            for row in 0..DAYS_IN_WEEK {
                let pos = GridCoordinate { row, col };
                let Some(cell) = state.cell(pos) else {
                    continue;
                };
                let y = self.row_y(row);
                if cell.in_range() {
                    self.draw_day(&mut canvas, y, x, cell, state.theme(), pos == cursor);
                } else if cell.boundary && show_boundary {
                    self.draw_boundary(&mut canvas, y, x, state.theme());
                }
            }
        }
        let legend_y = self.row_y(DAYS_IN_WEEK).saturating_add(LEGEND_GAP);
        let legend = Legend::new(state.theme(), self.cell_width).text_style(self.text_style);
        let legend_width = grid_width.max(legend.width());
        canvas.render_widget(legend_y, 0, legend_width, legend);
    }
}

impl ContributionCalendar {
    fn draw_day(
        &self,
        canvas: &mut BufferCanvas<'_>,
        y: u16,
        x: u16,
        cell: &CellDescriptor,
        theme: &ThemeLevels,
        selected: bool,
    ) {
        let middle = y.saturating_add(self.cell_height / 2);
        if let Some(color) = theme.color(cell.level) {
            let style = Style::new().bg(color);
            canvas.fill(y, x, self.cell_width, self.cell_height, ' ', style);
            if selected {
                canvas.mvprint(
                    middle,
                    x,
                    center(CURSOR_MARK, self.cell_width),
                    Some(style.patch(CURSOR_STYLE)),
                );
            }
        } else {
            let style = if selected {
                CURSOR_GLYPH_STYLE
            } else {
                Style::new()
            };
            canvas.mvprint(middle, x, center(&cell.visual, self.cell_width), Some(style));
        }
    }

    fn draw_boundary(&self, canvas: &mut BufferCanvas<'_>, y: u16, x: u16, theme: &ThemeLevels) {
        if let Some(color) = theme.color(Level::default()) {
            let style = Style::new().fg(color);
            canvas.fill(y, x, self.cell_width, self.cell_height, BOUNDARY_FILL, style);
        } else {
            let middle = y.saturating_add(self.cell_height / 2);
            canvas.mvprint(
                middle,
                x,
                center(BOUNDARY_GLYPH, self.cell_width),
                Some(BOUNDARY_GLYPH_STYLE),
            );
        }
    }
}

/// Name of the month to write above week column `col`: the month of the
/// first drawn column, or of any first-of-the-month the column contains
fn month_label(state: &CalendarView, col: usize, leftmost: bool) -> Option<String> {
    let days = (0..DAYS_IN_WEEK)
        .filter_map(|row| state.cell(GridCoordinate { row, col }))
        .filter(|cell| cell.in_range())
        .collect::<Vec<_>>();
    if let Some(cell) = days.iter().find(|cell| cell.date.day() == 1) {
        Some(month_abbrev(cell))
    } else if leftmost {
        days.first().copied().map(month_abbrev)
    } else {
        None
    }
}

fn month_abbrev(cell: &CellDescriptor) -> String {
    cell.date.date().month().to_string().chars().take(3).collect()
}

/// Pad `s` with spaces on both sides to `width` terminal columns
pub(super) fn center(s: &str, width: u16) -> String {
    let used = u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX);
    let left = usize::from(width.saturating_sub(used) / 2);
    let right = usize::from(width.saturating_sub(used)) - left;
    format!("{}{s}{}", " ".repeat(left), " ".repeat(right))
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn fill(&mut self, y: u16, x: u16, width: u16, height: u16, ch: char, style: Style) {
        let line = String::from(ch).repeat(width.into());
        for dy in 0..height {
            self.mvprint(y.saturating_add(dy), x, &line, Some(style));
        }
    }

    fn render_widget<W: Widget>(&mut self, y: u16, x: u16, width: u16, widget: W) {
        if y < self.area.height && x < self.area.width {
            widget.render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
