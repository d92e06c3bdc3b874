use super::data::ActivityIndex;
use super::date::ParsedDate;
use super::grid::{CellKind, Grid, GridCoordinate};
use super::theme::{Level, ThemeLevels};
use super::tooltip::format_tooltip;
use serde::Serialize;
use serde_json::Value;
use time::Date;

/// Everything needed to draw one grid position
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CellDescriptor {
    pub(crate) date: ParsedDate,
    /// One-based ordinal of `date` within its year
    pub(crate) day_of_year: u16,
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) level: Level,
    /// The theme's color or glyph for `level`
    pub(crate) visual: String,
    pub(crate) tooltip: String,
    pub(crate) boundary: bool,
    pub(crate) out_of_range: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Value>,
}

impl CellDescriptor {
    pub(crate) fn coordinate(&self) -> GridCoordinate {
        GridCoordinate {
            row: self.row,
            col: self.col,
        }
    }

    pub(crate) fn in_range(&self) -> bool {
        !self.boundary && !self.out_of_range
    }

    /// Snapshot handed to click handlers
    pub(crate) fn cell_data(&self) -> CellData {
        CellData {
            date: self.date.date(),
            data: self.data.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CellData {
    pub(crate) date: Date,
    pub(crate) data: Option<Value>,
}

/// Join the grid with the activity data and theme.  Cells are returned in
/// row-major order; positions with no representable date are omitted.
pub(crate) fn describe(
    grid: &Grid,
    index: &ActivityIndex,
    theme: &ThemeLevels,
) -> Vec<CellDescriptor> {
    grid.cells()
        .filter_map(|(pos, cell)| {
            let date = cell.date?;
            let (level, point) = if cell.kind == CellKind::InRange {
                (index.level(date), index.get(date))
            } else {
                (Level::default(), None)
            };
            let parsed = ParsedDate::from(date);
            Some(CellDescriptor {
                date: parsed,
                day_of_year: parsed.day_of_year(),
                row: pos.row,
                col: pos.col,
                level,
                visual: theme.visual(level).to_owned(),
                tooltip: format_tooltip(date),
                boundary: cell.kind == CellKind::Boundary,
                out_of_range: cell.kind == CellKind::OutOfRange,
                data: point.and_then(|p| p.data.clone()),
            })
        })
        .collect()
}
