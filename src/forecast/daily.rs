//! Daily summary
//!
//! Builds the 5-day overview from the daily arrays of a forecast response.

use chrono::NaiveDate;

use super::{check_len, classify, round_half_up, DataShapeError, IconCategory};
use crate::data::DailyBlock;

/// Maximum number of days in the overview
pub const MAX_DAILY_ENTRIES: usize = 5;

/// Format of Open-Meteo's daily dates (e.g. "2024-07-15")
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Summary of one forecast day
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Maximum temperature in °C, rounded
    pub high: i32,
    /// Minimum temperature in °C, rounded
    pub low: i32,
    /// Precipitation sum in mm as reported, 0.0 when missing
    pub precipitation: f64,
    pub description: &'static str,
    pub icon: IconCategory,
}

impl DailySummary {
    /// Long date label, e.g. "Monday 19 October"
    pub fn day_label(&self) -> String {
        self.date.format("%A %-d %B").to_string()
    }

    /// Precipitation with exactly one decimal, e.g. "1.3 mm"
    pub fn precipitation_label(&self) -> String {
        format!("{:.1} mm", self.precipitation)
    }
}

/// Summarizes at most the first [`MAX_DAILY_ENTRIES`] days.
///
/// Shorter input gives a shorter result. Daily summaries always use the
/// daytime classification of the day's weather code.
///
/// # Returns
/// * `Ok(Vec<DailySummary>)` - Up to five summaries, ordered like the input
/// * `Err(DataShapeError)` - If the arrays are not index-aligned with `time`
///   or a date cannot be parsed
pub fn summarize(daily: &DailyBlock) -> Result<Vec<DailySummary>, DataShapeError> {
    let len = daily.time.len();

    check_len("weather_code", len, daily.weather_code.len())?;
    check_len("temperature_2m_max", len, daily.temperature_2m_max.len())?;
    check_len("temperature_2m_min", len, daily.temperature_2m_min.len())?;
    check_len("precipitation_sum", len, daily.precipitation_sum.len())?;

    daily
        .time
        .iter()
        .take(MAX_DAILY_ENTRIES)
        .enumerate()
        .map(|(i, raw_date)| {
            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
                .map_err(|_| DataShapeError::InvalidDate(raw_date.clone()))?;
            let condition = classify(daily.weather_code[i], true);

            Ok(DailySummary {
                date,
                high: round_half_up(daily.temperature_2m_max[i]),
                low: round_half_up(daily.temperature_2m_min[i]),
                precipitation: daily.precipitation_sum[i].unwrap_or(0.0),
                description: condition.description,
                icon: condition.icon,
            })
        })
        .collect()
}
