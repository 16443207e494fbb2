//! Forecast snapshot
//!
//! A snapshot is everything the screen shows for one successful fetch:
//! current conditions, day parts, the daily overview and the hourly series
//! the drill-down is cut from. It is built all at once or not at all.

use chrono::{DateTime, FixedOffset};

use super::align::parse_local_time;
use super::{
    align, classify, round_half_up, select_day_parts, summarize, Condition, DailySummary,
    DataShapeError, DayPartView, HourlySeries,
};
use crate::data::geocode::short_name;
use crate::data::{CurrentBlock, ForecastResponse};

/// Conditions at the time of the fetch
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Time the provider's current values refer to, local to the location
    pub observed_at: DateTime<FixedOffset>,
    /// Temperature in °C, rounded
    pub temperature: i32,
    pub condition: Condition,
    /// Today's high in °C, if the daily block has entries
    pub high: Option<i32>,
    /// Today's low in °C, if the daily block has entries
    pub low: Option<i32>,
    /// Wind speed in km/h, rounded
    pub wind_speed: i32,
    /// Relative humidity in percent
    pub humidity: u8,
}

impl CurrentConditions {
    fn from_block(
        current: &CurrentBlock,
        offset: FixedOffset,
        today: Option<&DailySummary>,
    ) -> Result<Self, DataShapeError> {
        Ok(Self {
            observed_at: parse_local_time(&current.time, offset)?,
            temperature: round_half_up(current.temperature_2m),
            condition: classify(current.weather_code, current.is_day != 0),
            high: today.map(|d| d.high),
            low: today.map(|d| d.low),
            wind_speed: round_half_up(current.wind_speed_10m),
            humidity: current.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
        })
    }
}

/// All derived views of one forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    /// Short place name for headings (e.g. "Malmö")
    pub location: String,
    pub current: CurrentConditions,
    pub day_parts: Vec<DayPartView>,
    /// At most five days, ascending
    pub daily: Vec<DailySummary>,
    /// Full hourly series, source of the per-day drill-down
    pub hourly: HourlySeries,
}

impl ForecastSnapshot {
    /// Builds a snapshot from a decoded forecast response.
    ///
    /// # Arguments
    /// * `display_name` - Geocoder display name; its first comma-separated
    ///   part becomes the location heading
    /// * `response` - Decoded Open-Meteo payload
    ///
    /// # Returns
    /// * `Ok(ForecastSnapshot)` - All views built from the response
    /// * `Err(DataShapeError)` - If any part of the payload is malformed; no
    ///   partial snapshot is produced
    pub fn build(display_name: &str, response: &ForecastResponse) -> Result<Self, DataShapeError> {
        let offset = FixedOffset::east_opt(response.utc_offset_seconds)
            .ok_or(DataShapeError::InvalidOffset(response.utc_offset_seconds))?;

        let hourly = align(&response.hourly, offset)?;
        let daily = summarize(&response.daily)?;
        let current = CurrentConditions::from_block(&response.current, offset, daily.first())?;
        let day_parts = select_day_parts(&hourly);

        tracing::debug!(
            hours = hourly.len(),
            days = daily.len(),
            day_parts = day_parts.len(),
            "built forecast snapshot"
        );

        Ok(Self {
            location: short_name(display_name).to_string(),
            current,
            day_parts,
            daily,
            hourly,
        })
    }
}
