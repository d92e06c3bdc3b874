use super::date::{days_between, parse_date, DateRange, ParsedDate};
use super::error::CalendarError;
use std::ops::RangeInclusive;
use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Which weekday occupies the top row of the grid
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub(crate) fn from_starts_on_sunday(starts_on_sunday: bool) -> WeekStart {
        if starts_on_sunday {
            WeekStart::Sunday
        } else {
            WeekStart::Monday
        }
    }

    pub(crate) fn first_day(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sunday,
            WeekStart::Monday => Weekday::Monday,
        }
    }

    fn offset(self, wd: Weekday) -> u8 {
        match self {
            WeekStart::Sunday => wd.number_days_from_sunday(),
            WeekStart::Monday => wd.number_days_from_monday(),
        }
    }

    pub(crate) fn row_of(self, wd: Weekday) -> usize {
        usize::from(self.offset(wd))
    }

    /// The weekdays in row order
    pub(crate) fn weekdays(self) -> [Weekday; DAYS_IN_WEEK] {
        let first = self.first_day();
        std::array::from_fn(|i| (0..i).fold(first, |wd, _| wd.next()))
    }

    /// The first day of the week on or before January 1 of `year`
    fn grid_origin(self, year: i32) -> Result<Date, CalendarError> {
        let jan1 = Date::from_calendar_date(year, Month::January, 1)
            .map_err(|_| CalendarError::InvalidDateFormat(format!("{year:04}-01-01")))?;
        Ok(jan1.saturating_sub(Duration::days(i64::from(self.offset(jan1.weekday())))))
    }

    // `date` must not precede `origin`, which must itself fall on the first
    // day of the week
    fn coordinate(self, origin: Date, date: Date) -> GridCoordinate {
        GridCoordinate {
            row: self.row_of(date.weekday()),
            col: days_between(origin, date) / DAYS_IN_WEEK,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct GridCoordinate {
    /// Weekday index under the configured week start
    pub(crate) row: usize,
    /// Week index counted from the week containing January 1 of the
    /// reference year
    pub(crate) col: usize,
}

/// Find the cell for `date` in the grid laid out for `reference_year`
pub(crate) fn locate(
    reference_year: i32,
    date: &str,
    week_start: WeekStart,
) -> Result<GridCoordinate, CalendarError> {
    locate_date(reference_year, parse_date(date)?.date(), week_start)
}

fn locate_date(
    reference_year: i32,
    date: Date,
    week_start: WeekStart,
) -> Result<GridCoordinate, CalendarError> {
    let origin = week_start.grid_origin(reference_year)?;
    if date < origin {
        return Err(CalendarError::DateBeforeGrid {
            date: ParsedDate::from(date).to_string(),
            year: reference_year,
        });
    }
    Ok(week_start.coordinate(origin, date))
}

/// Lay out the grid for the inclusive range from `start` to `end`.  Both
/// corners are located in the grid of the start date's year.
pub(crate) fn enumerate(
    start: &str,
    end: &str,
    week_start: WeekStart,
) -> Result<Grid, CalendarError> {
    Grid::new(DateRange::parse(start, end)?, week_start)
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum CellKind {
    /// A day within the requested range
    InRange,
    /// A day in the first or last week column that falls outside the range;
    /// drawn as a placeholder to keep the grid rectangular
    Boundary,
    /// A position in a week column before the range; takes up no space
    OutOfRange,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridCell {
    /// `None` only for positions beyond the last representable date
    pub(crate) date: Option<Date>,
    pub(crate) kind: CellKind,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    range: DateRange,
    week_start: WeekStart,
    origin: Date,
    start: GridCoordinate,
    end: GridCoordinate,
    // Invariant: Every row has `end.col + 1` cells
    rows: [Vec<GridCell>; DAYS_IN_WEEK],
}

impl Grid {
    pub(crate) fn new(range: DateRange, week_start: WeekStart) -> Result<Grid, CalendarError> {
        let reference_year = range.start().year();
        let origin = week_start.grid_origin(reference_year)?;
        let start = locate_date(reference_year, range.start(), week_start)?;
        let end = locate_date(reference_year, range.end(), week_start)?;
        let rows = std::array::from_fn(|row| {
            (0..=end.col)
                .map(|col| {
                    let pos = GridCoordinate { row, col };
                    GridCell {
                        date: add_days(origin, col * DAYS_IN_WEEK + row),
                        kind: classify(pos, start, end),
                    }
                })
                .collect()
        });
        Ok(Grid {
            range,
            week_start,
            origin,
            start,
            end,
            rows,
        })
    }

    pub(crate) fn range(&self) -> DateRange {
        self.range
    }

    pub(crate) fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Coordinate of the first day of the range
    pub(crate) fn start(&self) -> GridCoordinate {
        self.start
    }

    /// Coordinate of the last day of the range
    pub(crate) fn end(&self) -> GridCoordinate {
        self.end
    }

    /// Total number of week columns, including out-of-range ones
    pub(crate) fn columns(&self) -> usize {
        self.end.col + 1
    }

    /// All positions in row-major order
    pub(crate) fn cells(&self) -> impl Iterator<Item = (GridCoordinate, GridCell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &cell)| (GridCoordinate { row, col }, cell))
        })
    }

    /// The week columns that take up space when drawn
    pub(crate) fn visible_columns(&self) -> RangeInclusive<usize> {
        self.start.col..=self.end.col
    }

    /// Whether the range fits in one week column or its ends lie no more
    /// than a week apart.  Only short ranges draw boundary placeholders;
    /// longer ones leave those positions blank.
    pub(crate) fn is_short_range(&self) -> bool {
        self.start.col == self.end.col
            || days_between(self.range.start(), self.range.end()) <= DAYS_IN_WEEK
    }

    /// Number of blank columns to append after the last visible column so
    /// that a single-column grid does not collapse to a sliver
    pub(crate) fn padding_columns(&self) -> usize {
        usize::from(self.start.col == self.end.col)
    }

    /// Coordinate of an in-range date
    pub(crate) fn coordinate_of(&self, date: Date) -> Option<GridCoordinate> {
        if !self.range.contains(date) {
            return None;
        }
        Some(self.week_start.coordinate(self.origin, date))
    }
}

fn classify(pos: GridCoordinate, start: GridCoordinate, end: GridCoordinate) -> CellKind {
    if pos.col < start.col || pos.col > end.col {
        CellKind::OutOfRange
    } else if (pos.col == start.col && pos.row < start.row)
        || (pos.col == end.col && pos.row > end.row)
    {
        CellKind::Boundary
    } else {
        CellKind::InRange
    }
}

fn add_days(date: Date, days: usize) -> Option<Date> {
    let days = i64::try_from(days).ok()?;
    date.checked_add(Duration::days(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn count(grid: &Grid, kind: CellKind) -> usize {
        grid.cells().filter(|(_, cell)| cell.kind == kind).count()
    }

    #[test]
    fn test_locate_sunday_start() {
        assert_eq!(
            locate(2023, "2023-01-01", WeekStart::Sunday),
            Ok(GridCoordinate { row: 0, col: 0 })
        );
        assert_eq!(
            locate(2023, "2023-06-15", WeekStart::Sunday),
            Ok(GridCoordinate { row: 4, col: 23 })
        );
        assert_eq!(
            locate(2023, "2024-01-01", WeekStart::Sunday),
            Ok(GridCoordinate { row: 1, col: 52 })
        );
    }

    #[test]
    fn test_locate_monday_start() {
        // 2023-01-01 is a Sunday, so its week began on 2022-12-26
        assert_eq!(
            locate(2023, "2023-01-01", WeekStart::Monday),
            Ok(GridCoordinate { row: 6, col: 0 })
        );
        assert_eq!(
            locate(2023, "2023-01-02", WeekStart::Monday),
            Ok(GridCoordinate { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_locate_before_grid() {
        // 2024-01-01 is a Monday, so the Sunday-start grid begins 2023-12-31
        assert_eq!(
            locate(2024, "2023-12-31", WeekStart::Sunday),
            Ok(GridCoordinate { row: 0, col: 0 })
        );
        assert_eq!(
            locate(2024, "2023-12-30", WeekStart::Sunday),
            Err(CalendarError::DateBeforeGrid {
                date: "2023-12-30".into(),
                year: 2024,
            })
        );
    }

    #[test]
    fn test_locate_bad_date() {
        assert_eq!(
            locate(2023, "2023-02-29", WeekStart::Sunday),
            Err(CalendarError::InvalidDateFormat("2023-02-29".into()))
        );
    }

    #[test]
    fn test_locate_is_deterministic() {
        for ws in [WeekStart::Sunday, WeekStart::Monday] {
            let first = locate(2023, "2023-09-27", ws);
            let second = locate(2023, "2023-09-27", ws);
            assert!(first.is_ok());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_week_start_rotates_rows() {
        let range = DateRange::new(date!(2023 - 01 - 01), date!(2024 - 12 - 31)).expect("valid");
        for day in range.days() {
            let s = ParsedDate::from(day).to_string();
            let sunday = locate(2023, &s, WeekStart::Sunday).expect("in grid");
            let monday = locate(2023, &s, WeekStart::Monday).expect("in grid");
            assert_eq!(monday.row, (sunday.row + 6) % DAYS_IN_WEEK, "{s}");
        }
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(
            WeekStart::Monday.weekdays(),
            [
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
                Weekday::Saturday,
                Weekday::Sunday,
            ]
        );
        assert_eq!(WeekStart::Sunday.weekdays()[0], Weekday::Sunday);
        assert_eq!(WeekStart::from_starts_on_sunday(false), WeekStart::Monday);
    }

    #[test]
    fn test_single_full_week() {
        let grid = enumerate("2023-01-01", "2023-01-07", WeekStart::Sunday).expect("valid");
        assert_eq!(grid.columns(), 1);
        assert!(grid.cells().all(|(pos, _)| pos.col == 0));
        assert_eq!(count(&grid, CellKind::InRange), 7);
        assert_eq!(count(&grid, CellKind::Boundary), 0);
        assert_eq!(count(&grid, CellKind::OutOfRange), 0);
        assert!(grid.is_short_range());
        assert_eq!(grid.padding_columns(), 1);
    }

    #[test]
    fn test_mid_week_start() {
        let grid = enumerate("2023-01-03", "2023-01-10", WeekStart::Sunday).expect("valid");
        assert_eq!(grid.start(), GridCoordinate { row: 2, col: 0 });
        assert_eq!(grid.end(), GridCoordinate { row: 2, col: 1 });
        assert_eq!(grid.columns(), 2);
        let leading = grid
            .cells()
            .filter(|(pos, cell)| pos.col == 0 && cell.kind == CellKind::Boundary)
            .map(|(_, cell)| cell.date)
            .collect::<Vec<_>>();
        assert_eq!(
            leading,
            [Some(date!(2023 - 01 - 01)), Some(date!(2023 - 01 - 02))]
        );
        assert_eq!(count(&grid, CellKind::Boundary), 6);
        assert_eq!(count(&grid, CellKind::InRange), 8);
        assert!(grid.is_short_range());
        assert_eq!(grid.padding_columns(), 0);
    }

    #[test]
    fn test_long_range_is_not_short() {
        let grid = enumerate("2023-01-01", "2023-03-31", WeekStart::Sunday).expect("valid");
        assert!(!grid.is_short_range());
        assert_eq!(grid.padding_columns(), 0);
    }

    #[test]
    fn test_short_range_cutoff() {
        // Ends exactly a week apart still count as short
        let grid = enumerate("2023-01-05", "2023-01-12", WeekStart::Sunday).expect("valid");
        assert_ne!(grid.start().col, grid.end().col);
        assert!(grid.is_short_range());
        let grid = enumerate("2023-01-05", "2023-01-13", WeekStart::Sunday).expect("valid");
        assert!(!grid.is_short_range());
    }

    #[test]
    fn test_range_corners_use_start_year() {
        let grid = enumerate("2023-12-30", "2024-01-02", WeekStart::Sunday).expect("valid");
        assert_eq!(
            Ok(grid.start()),
            locate(2023, "2023-12-30", WeekStart::Sunday)
        );
        assert_eq!(Ok(grid.end()), locate(2023, "2024-01-02", WeekStart::Sunday));
        assert_eq!(grid.end(), GridCoordinate { row: 2, col: 52 });
    }

    #[test]
    fn test_out_of_range_columns() {
        let grid = enumerate("2023-06-15", "2023-12-31", WeekStart::Sunday).expect("valid");
        assert_eq!(grid.visible_columns(), 23..=52);
        assert_eq!(count(&grid, CellKind::OutOfRange), 23 * DAYS_IN_WEEK);
    }

    #[test]
    fn test_in_range_count_matches_days() {
        for (start, end) in [
            ("2023-01-01", "2023-12-31"),
            ("2024-01-01", "2024-12-31"),
            ("2023-06-15", "2023-06-15"),
            ("2022-12-15", "2024-02-03"),
            ("2023-02-25", "2023-03-04"),
        ] {
            for ws in [WeekStart::Sunday, WeekStart::Monday] {
                let grid = enumerate(start, end, ws).expect("valid");
                assert_eq!(
                    count(&grid, CellKind::InRange),
                    grid.range().len(),
                    "{start}..{end} {ws:?}"
                );
            }
        }
    }

    #[test]
    fn test_kinds_are_exclusive() {
        for ws in [WeekStart::Sunday, WeekStart::Monday] {
            let grid = enumerate("2023-03-08", "2023-11-21", ws).expect("valid");
            let range = grid.range();
            for (pos, cell) in grid.cells() {
                let date = cell.date.expect("dates in 2023 are representable");
                match cell.kind {
                    CellKind::InRange => {
                        assert!(range.contains(date));
                        assert!(grid.visible_columns().contains(&pos.col));
                    }
                    CellKind::Boundary => {
                        assert!(!range.contains(date));
                        assert!(pos.col == grid.start().col || pos.col == grid.end().col);
                    }
                    CellKind::OutOfRange => {
                        assert!(!range.contains(date));
                        assert!(!grid.visible_columns().contains(&pos.col));
                    }
                }
            }
        }
    }

    #[test]
    fn test_cell_dates_follow_coordinates() {
        let grid = enumerate("2023-01-01", "2023-12-31", WeekStart::Monday).expect("valid");
        for day in grid.range().days() {
            let pos = grid.coordinate_of(day).expect("in range");
            let cell = grid.cells().find(|&(p, _)| p == pos).map(|(_, c)| c);
            assert_eq!(cell.and_then(|c| c.date), Some(day));
        }
        assert_eq!(grid.coordinate_of(date!(2024 - 01 - 01)), None);
    }

    #[test]
    fn test_end_of_time() {
        let grid = enumerate("9999-12-25", "9999-12-31", WeekStart::Sunday).expect("valid");
        assert_eq!(count(&grid, CellKind::InRange), 7);
        for (_, cell) in grid.cells() {
            if cell.date.is_none() {
                assert_eq!(cell.kind, CellKind::Boundary);
            }
        }
    }

    #[test]
    fn test_inverted_range() {
        assert!(matches!(
            enumerate("2023-01-10", "2023-01-03", WeekStart::Sunday),
            Err(CalendarError::InvalidRange { .. })
        ));
    }
}
