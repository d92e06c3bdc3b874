use super::date::parse_date;
use super::error::CalendarError;
use super::theme::{Level, LevelError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use thiserror::Error;
use time::Date;
use tracing::{debug, warn};

/// One day's recorded activity
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct InputDataPoint {
    pub(crate) date: Date,
    pub(crate) level: Level,
    /// Arbitrary payload handed back to the click handler
    pub(crate) data: Option<Value>,
}

impl InputDataPoint {
    fn new(date: &str, entry: Entry) -> Result<InputDataPoint, PointError> {
        let date = parse_date(date)?.date();
        let level = match entry.level {
            Some(lv) => Level::try_from(lv)?,
            None => Level::default(),
        };
        Ok(InputDataPoint {
            date,
            level,
            data: entry.data,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    level: Option<u64>,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Error)]
pub(crate) enum PointError {
    #[error(transparent)]
    Date(#[from] CalendarError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("malformed entry: {0}")]
    Entry(#[from] serde_json::Error),
    #[error("\"date\" field is not a string")]
    DateNotString,
    #[error("data point is not a JSON object")]
    NotAnObject,
}

/// Parse one element of the data array.  An element is either
/// `{"date": "YYYY-MM-DD", "level": 2, "data": ...}` or an object keyed by
/// date, `{"YYYY-MM-DD": {"level": 2, "data": ...}, ...}`, in which case each
/// key yields its own point.
fn parse_element(element: Value) -> Vec<Result<InputDataPoint, PointError>> {
    match element {
        Value::Object(mut obj) if obj.contains_key("date") => {
            let point = match obj.remove("date") {
                Some(Value::String(date)) => parse_entry(&date, Value::Object(obj)),
                _ => Err(PointError::DateNotString),
            };
            vec![point]
        }
        Value::Object(obj) => obj
            .into_iter()
            .map(|(date, entry)| parse_entry(&date, entry))
            .collect(),
        _ => vec![Err(PointError::NotAnObject)],
    }
}

fn parse_entry(date: &str, entry: Value) -> Result<InputDataPoint, PointError> {
    let entry = serde_json::from_value::<Entry>(entry)?;
    InputDataPoint::new(date, entry)
}

/// Lookup from date to that day's data point.  Later points for the same
/// date replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ActivityIndex(HashMap<Date, InputDataPoint>);

impl ActivityIndex {
    /// Build an index from decoded JSON elements, skipping any point that
    /// cannot be parsed
    pub(crate) fn from_json(elements: Vec<Value>) -> ActivityIndex {
        let mut skipped = 0usize;
        let index = elements
            .into_iter()
            .enumerate()
            .flat_map(|(i, element)| {
                parse_element(element)
                    .into_iter()
                    .map(move |point| (i, point))
            })
            .filter_map(|(i, point)| match point {
                Ok(point) => Some(point),
                Err(e) => {
                    warn!(element = i, error = %e, "skipping malformed data point");
                    skipped += 1;
                    None
                }
            })
            .collect::<ActivityIndex>();
        debug!(days = index.len(), skipped, "indexed activity data");
        index
    }

    pub(crate) fn get(&self, date: Date) -> Option<&InputDataPoint> {
        self.0.get(&date)
    }

    /// Level recorded for `date`, or level 0 if there is no data point
    pub(crate) fn level(&self, date: Date) -> Level {
        self.get(date).map(|p| p.level).unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<InputDataPoint> for ActivityIndex {
    fn from_iter<I: IntoIterator<Item = InputDataPoint>>(iter: I) -> ActivityIndex {
        ActivityIndex(iter.into_iter().map(|p| (p.date, p)).collect())
    }
}

/// Read a JSON array of data points
pub(crate) fn load<R: Read>(reader: R) -> Result<ActivityIndex, serde_json::Error> {
    let elements: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(ActivityIndex::from_json(elements))
}
