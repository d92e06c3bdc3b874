use super::error::CalendarError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::{format_description::FormatItem, macros::format_description, Date};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Byte offsets of the two hyphens in a `YYYY-MM-DD` string
const HYPHENS: [usize; 2] = [4, 7];

const YMD_LEN: usize = 10;

/// A calendar date parsed from a `YYYY-MM-DD` string
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct ParsedDate(Date);

impl ParsedDate {
    pub(crate) fn date(self) -> Date {
        self.0
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 through 12
    pub(crate) fn month(self) -> u8 {
        self.0.month().into()
    }

    pub(crate) fn day(self) -> u8 {
        self.0.day()
    }

    /// One-based ordinal of the date within its year
    pub(crate) fn day_of_year(self) -> u16 {
        self.0.ordinal()
    }
}

impl From<Date> for ParsedDate {
    fn from(date: Date) -> ParsedDate {
        ParsedDate(date)
    }
}

impl FromStr for ParsedDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<ParsedDate, CalendarError> {
        parse_date(s)
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = (self.year(), self.month(), self.day());
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

impl Serialize for ParsedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a strict `YYYY-MM-DD` string.  Anything other than four digits,
/// hyphen, two digits, hyphen, two digits is rejected before the calendar
/// check, so signs, whitespace, and short fields never slip through.
pub(crate) fn parse_date(s: &str) -> Result<ParsedDate, CalendarError> {
    let well_formed = s.len() == YMD_LEN
        && s.bytes().enumerate().all(|(i, b)| {
            if HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        });
    if !well_formed {
        return Err(CalendarError::InvalidDateFormat(s.to_owned()));
    }
    Date::parse(s, &YMD_FMT)
        .map(ParsedDate)
        .map_err(|_| CalendarError::InvalidDateFormat(s.to_owned()))
}

/// An inclusive span of days
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub(crate) fn new(start: Date, end: Date) -> Result<DateRange, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange {
                start: ParsedDate(start).to_string(),
                end: ParsedDate(end).to_string(),
            });
        }
        Ok(DateRange { start, end })
    }

    pub(crate) fn parse(start: &str, end: &str) -> Result<DateRange, CalendarError> {
        DateRange::new(parse_date(start)?.date(), parse_date(end)?.date())
    }

    pub(crate) fn start(&self) -> Date {
        self.start
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Number of days in the range, counting both ends
    pub(crate) fn len(&self) -> usize {
        days_between(self.start, self.end) + 1
    }

    #[cfg(test)]
    pub(crate) fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |&d| d.next_day().filter(|&d| d <= end))
    }
}

/// Whole days from `from` to `to`; `to` must not precede `from`
pub(super) fn days_between(from: Date, to: Date) -> usize {
    usize::try_from((to - from).whole_days()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_parse_fields() {
        let d = parse_date("2023-06-15").expect("valid date");
        assert_eq!(d.year(), 2023);
        assert_eq!(d.month(), 6);
        assert_eq!(d.day(), 15);
        assert_eq!(d.day_of_year(), 166);
        assert_eq!(d.to_string(), "2023-06-15");
    }

    #[test]
    fn test_leap_days() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2000-02-29").is_ok());
        assert_eq!(
            parse_date("2023-02-29"),
            Err(CalendarError::InvalidDateFormat("2023-02-29".into()))
        );
        assert!(parse_date("1900-02-29").is_err());
    }

    #[test]
    fn test_year_end_ordinals() {
        assert_eq!(parse_date("2023-12-31").map(ParsedDate::day_of_year), Ok(365));
        assert_eq!(parse_date("2024-12-31").map(ParsedDate::day_of_year), Ok(366));
        assert_eq!(parse_date("2024-03-01").map(ParsedDate::day_of_year), Ok(61));
        assert_eq!(parse_date("2023-03-01").map(ParsedDate::day_of_year), Ok(60));
    }

    #[test]
    fn test_ordinals_match_reference_calendar() {
        for year in [1900, 2000, 2023, 2024] {
            let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
            let month_lengths = [
                31,
                if leap { 29 } else { 28 },
                31,
                30,
                31,
                30,
                31,
                31,
                30,
                31,
                30,
                31,
            ];
            let mut ordinal = 0;
            for (month, &length) in std::iter::zip(1.., &month_lengths) {
                for day in 1..=length {
                    ordinal += 1;
                    let s = format!("{year:04}-{month:02}-{day:02}");
                    let parsed = parse_date(&s).expect("reference date should parse");
                    assert_eq!(parsed.day_of_year(), ordinal, "{s}");
                    assert_eq!(parsed.to_string(), s);
                }
            }
        }
    }

    #[test]
    fn test_malformed() {
        for s in [
            "",
            "2023-1-01",
            "2023-01-1",
            "2023/01/01",
            "23-01-01",
            "+2023-01-01",
            " 2023-01-01",
            "2023-01-01 ",
            "2023-13-01",
            "2023-00-10",
            "2023-04-31",
            "2023-04-00",
            "２０２３-01-01",
            "abcd-ef-gh",
        ] {
            assert_eq!(
                parse_date(s),
                Err(CalendarError::InvalidDateFormat(s.to_owned())),
                "{s:?}"
            );
        }
    }

    #[test]
    fn test_range() {
        let range = DateRange::parse("2023-01-03", "2023-01-10").expect("valid range");
        assert_eq!(range.start(), date!(2023 - 01 - 03));
        assert_eq!(range.end(), date!(2023 - 01 - 10));
        assert_eq!(range.len(), 8);
        assert_eq!(range.days().count(), 8);
        assert!(range.contains(date!(2023 - 01 - 10)));
        assert!(!range.contains(date!(2023 - 01 - 02)));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::parse("2024-02-29", "2024-02-29").expect("valid range");
        assert_eq!(range.len(), 1);
        assert_eq!(range.days().collect::<Vec<_>>(), [date!(2024 - 02 - 29)]);
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(
            DateRange::parse("2023-02-01", "2023-01-31"),
            Err(CalendarError::InvalidRange {
                start: "2023-02-01".into(),
                end: "2023-01-31".into(),
            })
        );
    }

    #[test]
    fn test_range_propagates_format_errors() {
        assert_eq!(
            DateRange::parse("2023-01-01", "2023-02-30"),
            Err(CalendarError::InvalidDateFormat("2023-02-30".into()))
        );
    }
}
