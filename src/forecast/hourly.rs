//! Hourly drill-down for a selected day

use chrono::{DateTime, NaiveDate, Utc};

use super::{HourlySeries, WeatherSample};

/// Returns the hourly samples of `selected`, dropping hours already past today.
///
/// The run starts at the first sample dated `selected` and ends at the first
/// sample with another date. Same-date samples are assumed contiguous; a
/// detached later run is ignored and only logged.
///
/// When `selected` is today (the date of `now` in the series' time zone),
/// samples before `now` are dropped. Other dates are returned whole.
///
/// # Arguments
/// * `series` - The aligned hourly series
/// * `selected` - Calendar date to extract, local to the series
/// * `now` - Current instant, supplied by the caller's clock
pub fn hours_for(
    series: &HourlySeries,
    selected: NaiveDate,
    now: DateTime<Utc>,
) -> Vec<WeatherSample> {
    let samples = series.samples();

    let Some(start) = samples.iter().position(|s| s.date() == selected) else {
        return Vec::new();
    };

    let run_len = samples[start..]
        .iter()
        .take_while(|s| s.date() == selected)
        .count();
    let end = start + run_len;

    if samples[end..].iter().any(|s| s.date() == selected) {
        tracing::warn!(
            %selected,
            "hourly samples for the selected date are not contiguous; showing the first run only"
        );
    }

    let run = &samples[start..end];
    let today = now.with_timezone(&series.offset()).date_naive();

    if selected == today {
        run.iter().filter(|s| s.time >= now).cloned().collect()
    } else {
        run.to_vec()
    }
}
