//! Forecast normalization and time-bucketing
//!
//! Turns the index-aligned arrays of an Open-Meteo response into structured
//! views: an hourly sample series, day-part summaries, a bounded daily
//! summary and the hourly window of a selected day. Everything in here is
//! pure; the current time is always passed in.

pub mod align;
pub mod classify;
pub mod daily;
pub mod day_parts;
pub mod hourly;
pub mod selection;
pub mod snapshot;

pub use align::align;
pub use classify::{classify, Condition, IconCategory, UNKNOWN_DESCRIPTION};
pub use daily::{summarize, DailySummary, MAX_DAILY_ENTRIES};
pub use day_parts::{select_day_parts, DayPart, DayPartView};
pub use hourly::hours_for;
pub use selection::Selection;
pub use snapshot::{CurrentConditions, ForecastSnapshot};

use chrono::{DateTime, FixedOffset, NaiveDate};
use thiserror::Error;

/// The provider sent arrays or values that cannot be lined up into samples
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataShapeError {
    /// A parallel array does not have the length of its time axis
    #[error("{field} has {actual} entries but the time axis has {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A timestamp is not in `YYYY-MM-DDTHH:MM` form
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A date is not in `YYYY-MM-DD` form
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The UTC offset is out of range
    #[error("invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),
}

/// One hour of forecast
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    /// Start of the hour, in the location's time zone
    pub time: DateTime<FixedOffset>,
    /// Temperature in °C, rounded
    pub temperature: i32,
    /// WMO weather code
    pub weather_code: u8,
    /// Whether the hour is in daylight
    pub is_day: bool,
    /// Precipitation in mm, when reported
    pub precipitation: Option<f64>,
    /// Classification of `weather_code` for this hour
    pub condition: Condition,
}

impl WeatherSample {
    /// Calendar date of the sample in the location's time zone
    pub fn date(&self) -> NaiveDate {
        self.time.date_naive()
    }

    /// Precipitation label with one decimal (`"0.4 mm"`), `"-"` when unknown
    pub fn precipitation_label(&self) -> String {
        match self.precipitation {
            Some(mm) => format!("{:.1} mm", mm),
            None => "-".to_string(),
        }
    }
}

/// Ordered hourly samples sharing one UTC offset.
///
/// Timestamps are ascending and all samples of one calendar date are
/// contiguous. The provider guarantees both; they are not re-checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    offset: FixedOffset,
    samples: Vec<WeatherSample>,
}

impl HourlySeries {
    /// Wraps already-ordered samples
    pub fn new(offset: FixedOffset, samples: Vec<WeatherSample>) -> Self {
        Self { offset, samples }
    }

    /// UTC offset every sample is expressed in
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn samples(&self) -> &[WeatherSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl<'a> IntoIterator for &'a HourlySeries {
    type Item = &'a WeatherSample;
    type IntoIter = std::slice::Iter<'a, WeatherSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Rounds halves toward positive infinity, so 2.5 becomes 3 and -2.5 becomes -2.
///
/// Also keeps small negatives like -0.4 from showing up as "-0".
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Checks that a parallel array has the length of the time axis
pub(crate) fn check_len(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), DataShapeError> {
    if actual == expected {
        Ok(())
    } else {
        Err(DataShapeError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_check_len() {
        assert!(check_len("weather_code", 3, 3).is_ok());
        assert_eq!(
            check_len("weather_code", 3, 4),
            Err(DataShapeError::LengthMismatch {
                field: "weather_code",
                expected: 3,
                actual: 4,
            })
        );
    }

    #[test]
    fn test_sample_precipitation_label() {
        let mut sample = fixtures::series_from(fixtures::date(2024, 7, 15), 1).samples()[0].clone();
        sample.precipitation = Some(0.36);
        assert_eq!(sample.precipitation_label(), "0.4 mm");
        sample.precipitation = None;
        assert_eq!(sample.precipitation_label(), "-");
    }

    #[test]
    fn test_sample_date_is_local() {
        // Local midnight at UTC+2 is still the previous day in UTC
        let series = fixtures::series_from(fixtures::date(2024, 7, 15), 1);
        let sample = &series.samples()[0];
        assert_eq!(sample.date(), fixtures::date(2024, 7, 15));
        assert_eq!(sample.time.naive_utc().date(), fixtures::date(2024, 7, 14));
    }
}
