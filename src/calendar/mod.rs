mod cells;
mod data;
mod date;
mod error;
mod grid;
mod legend;
mod theme;
mod tooltip;
mod view;
mod widget;
pub(crate) use self::cells::{describe, CellData, CellDescriptor};
pub(crate) use self::data::{load, ActivityIndex};
pub(crate) use self::date::ParsedDate;
#[cfg(test)]
pub(crate) use self::error::CalendarError;
pub(crate) use self::grid::{enumerate, Grid, GridCoordinate, WeekStart};
pub(crate) use self::theme::{Theme, ThemeDescriptor, ThemeLevels};
pub(crate) use self::view::{CalendarView, Motion};
pub(crate) use self::widget::ContributionCalendar;

/// What a cell was activated with
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ClickEvent {
    pub(crate) key: crossterm::event::KeyCode,
    pub(crate) coordinate: GridCoordinate,
}

/// Receives a snapshot of each activated day
pub(crate) trait ClickHandler {
    fn on_click(&mut self, event: &ClickEvent, cell: &CellData);
}
