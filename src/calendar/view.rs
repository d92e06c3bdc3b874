use super::cells::{describe, CellDescriptor};
use super::data::ActivityIndex;
use super::grid::{Grid, GridCoordinate};
use super::theme::ThemeLevels;
use std::collections::HashMap;
use time::{Date, Duration};
use tracing::debug;

/// Cursor movements over the in-range days
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Motion {
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    First,
    Last,
}

/// Render state for [`ContributionCalendar`](super::ContributionCalendar):
/// the computed cells plus the cursor and horizontal scroll position
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CalendarView {
    grid: Grid,
    theme: ThemeLevels,
    cells: HashMap<GridCoordinate, CellDescriptor>,
    // Invariant: Always the coordinate of an in-range day
    cursor: GridCoordinate,
    /// Leftmost week column currently drawn
    scroll: usize,
}

impl CalendarView {
    pub(crate) fn new(grid: Grid, index: &ActivityIndex, theme: ThemeLevels) -> CalendarView {
        let cells = describe(&grid, index, &theme)
            .into_iter()
            .map(|cell| (cell.coordinate(), cell))
            .collect();
        let cursor = grid.end();
        let scroll = grid.start().col;
        CalendarView {
            grid,
            theme,
            cells,
            cursor,
            scroll,
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn theme(&self) -> &ThemeLevels {
        &self.theme
    }

    pub(crate) fn cell(&self, pos: GridCoordinate) -> Option<&CellDescriptor> {
        self.cells.get(&pos)
    }

    pub(crate) fn cursor(&self) -> GridCoordinate {
        self.cursor
    }

    pub(crate) fn selected(&self) -> Option<&CellDescriptor> {
        self.cell(self.cursor)
    }

    /// Move the cursor.  Returns `false` if the move would leave the range.
    pub(crate) fn move_cursor(&mut self, motion: Motion) -> bool {
        let target = match motion {
            Motion::First => Some(self.grid.start()),
            Motion::Last => Some(self.grid.end()),
            Motion::PrevDay => self.shifted(-1),
            Motion::NextDay => self.shifted(1),
            Motion::PrevWeek => self.shifted(-7),
            Motion::NextWeek => self.shifted(7),
        };
        match target {
            Some(pos) => {
                debug!(?motion, row = pos.row, col = pos.col, "moved cursor");
                self.cursor = pos;
                true
            }
            None => false,
        }
    }

    fn shifted(&self, days: i64) -> Option<GridCoordinate> {
        let date: Date = self.selected()?.date.date();
        let target = date.checked_add(Duration::days(days))?;
        self.grid.coordinate_of(target)
    }

    /// Adjust the scroll position so that the cursor lies within the `fit`
    /// columns that can be drawn, and return the columns to draw
    pub(crate) fn scroll_to_cursor(&mut self, fit: usize) -> std::ops::Range<usize> {
        let fit = fit.max(1);
        let visible = self.grid.visible_columns();
        let (first, last) = (*visible.start(), *visible.end());
        // Don't leave blank space on the right if the area has widened
        let max_scroll = (last + 1).saturating_sub(fit).max(first);
        self.scroll = self.scroll.clamp(first, max_scroll);
        if self.cursor.col < self.scroll {
            self.scroll = self.cursor.col;
        } else if self.cursor.col >= self.scroll + fit {
            self.scroll = self.cursor.col + 1 - fit;
        }
        self.scroll..(self.scroll + fit).min(last + 1)
    }
}
