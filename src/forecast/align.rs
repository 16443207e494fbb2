//! Hourly series alignment
//!
//! Zips the parallel hourly arrays of a forecast response into one ordered
//! sequence of [`WeatherSample`]s. This happens exactly once per fetch, right
//! after decoding; every other view works on the aligned series.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use super::{check_len, classify, round_half_up, DataShapeError, HourlySeries, WeatherSample};
use crate::data::HourlyBlock;

/// Format of Open-Meteo's local timestamps (e.g. "2024-07-15T14:00")
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Aligns the hourly arrays into an [`HourlySeries`].
///
/// # Arguments
/// * `hourly` - Raw hourly arrays; `time` is the reference axis
/// * `offset` - UTC offset of the location, attached to every timestamp
///
/// # Returns
/// * `Ok(HourlySeries)` - One sample per timestamp, in input order
/// * `Err(DataShapeError)` - If an array length differs from `time` or a
///   timestamp cannot be parsed
pub fn align(hourly: &HourlyBlock, offset: FixedOffset) -> Result<HourlySeries, DataShapeError> {
    let len = hourly.time.len();

    check_len("temperature_2m", len, hourly.temperature_2m.len())?;
    check_len("weather_code", len, hourly.weather_code.len())?;
    check_len("is_day", len, hourly.is_day.len())?;
    if let Some(precipitation) = &hourly.precipitation {
        check_len("precipitation", len, precipitation.len())?;
    }

    let mut samples = Vec::with_capacity(len);

    for i in 0..len {
        let time = parse_local_time(&hourly.time[i], offset)?;
        let weather_code = hourly.weather_code[i];
        let is_day = hourly.is_day[i] != 0;
        let precipitation = hourly
            .precipitation
            .as_ref()
            .and_then(|values| values[i]);

        samples.push(WeatherSample {
            time,
            temperature: round_half_up(hourly.temperature_2m[i]),
            weather_code,
            is_day,
            precipitation,
            condition: classify(weather_code, is_day),
        });
    }

    Ok(HourlySeries::new(offset, samples))
}

/// Parses a local wall-clock timestamp and pins it to `offset`
pub(crate) fn parse_local_time(
    raw: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, DataShapeError> {
    let naive = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(|_| DataShapeError::InvalidTimestamp(raw.to_string()))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DataShapeError::InvalidTimestamp(raw.to_string()))
}
