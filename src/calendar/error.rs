use thiserror::Error;

/// Input validation failures raised while parsing dates, laying out the grid,
/// or resolving a theme
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum CalendarError {
    #[error("invalid date {0:?}; expected a real calendar date in YYYY-MM-DD form")]
    InvalidDateFormat(String),
    #[error("invalid range: end date {end} precedes start date {start}")]
    InvalidRange { start: String, end: String },
    #[error("date {date} falls before the grid for {year}")]
    DateBeforeGrid { date: String, year: i32 },
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
    #[error("custom theme does not define level{level}")]
    IncompleteTheme { level: u8 },
    #[error("custom theme level{level} is not a color: {value:?}")]
    InvalidColor { level: u8, value: String },
}
