use time::Date;

/// Human-readable label for a day, e.g. "Thursday, June 15, 2023"
pub(crate) fn format_tooltip(date: Date) -> String {
    let (weekday, month, day, year) = (date.weekday(), date.month(), date.day(), date.year());
    format!("{weekday}, {month} {day}, {year}")
}
