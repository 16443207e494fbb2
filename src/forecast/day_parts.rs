//! Day-part summaries
//!
//! Picks one representative hour for each of four fixed parts of the day.

use chrono::Timelike;

use super::{HourlySeries, IconCategory};

/// A fixed part of the day, represented by a single proxy hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPart {
    /// All day parts, in display order
    pub const ALL: [DayPart; 4] = [
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Night,
    ];

    /// Local hour of day that stands in for this part
    pub fn target_hour(&self) -> u32 {
        match self {
            DayPart::Morning => 9,
            DayPart::Afternoon => 15,
            DayPart::Evening => 21,
            DayPart::Night => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPart::Morning => "Morning",
            DayPart::Afternoon => "Afternoon",
            DayPart::Evening => "Evening",
            DayPart::Night => "Night",
        }
    }
}

/// Summary of one day part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPartView {
    pub part: DayPart,
    /// Temperature in °C at the proxy hour
    pub temperature: i32,
    pub icon: IconCategory,
}

/// Selects a view for each day part from the hourly series.
///
/// For every part, in [`DayPart::ALL`] order, the first sample whose local
/// hour equals the part's target hour is used. Parts without such a sample
/// are left out, so the result holds 0 to 4 views.
pub fn select_day_parts(series: &HourlySeries) -> Vec<DayPartView> {
    DayPart::ALL
        .iter()
        .filter_map(|&part| {
            series
                .iter()
                .find(|sample| sample.time.hour() == part.target_hour())
                .map(|sample| DayPartView {
                    part,
                    temperature: sample.temperature,
                    icon: sample.condition.icon,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::fixtures::{date, series_at_hours, series_from};

    fn parts(views: &[DayPartView]) -> Vec<DayPart> {
        views.iter().map(|v| v.part).collect()
    }

    #[test]
    fn test_all_four_parts_in_fixed_order() {
        let series = series_at_hours(date(2024, 7, 15), &[3, 9, 15, 21]);
        let views = select_day_parts(&series);

        assert_eq!(views.len(), 4);
        assert_eq!(parts(&views), DayPart::ALL.to_vec());
        // Fixture temperature equals the hour
        assert_eq!(views[0].temperature, 9);
        assert_eq!(views[3].temperature, 3);
    }

    #[test]
    fn test_missing_hour_is_omitted() {
        let series = series_at_hours(date(2024, 7, 15), &[3, 9, 15]);
        let views = select_day_parts(&series);

        assert_eq!(views.len(), 3);
        assert_eq!(
            parts(&views),
            vec![DayPart::Morning, DayPart::Afternoon, DayPart::Night]
        );
    }

    #[test]
    fn test_first_matching_sample_wins() {
        // Two days: the Night view comes from the first day's 03:00
        let series = series_from(date(2024, 7, 15), 48);
        let views = select_day_parts(&series);

        assert_eq!(views.len(), 4);
        let night = views.iter().find(|v| v.part == DayPart::Night).unwrap();
        assert_eq!(night.temperature, 13);
    }

    #[test]
    fn test_series_starting_mid_day() {
        // Only 16:00 onwards: Morning and Afternoon come from the next day
        let series = series_from(date(2024, 7, 15), 48);
        let tail = crate::forecast::HourlySeries::new(
            series.offset(),
            series.samples()[16..].to_vec(),
        );
        let views = select_day_parts(&tail);
        assert_eq!(parts(&views), DayPart::ALL.to_vec());
    }

    #[test]
    fn test_empty_series() {
        let series = series_at_hours(date(2024, 7, 15), &[]);
        assert!(select_day_parts(&series).is_empty());
    }

    #[test]
    fn test_icon_comes_from_sample_classification() {
        let series = series_at_hours(date(2024, 7, 15), &[9]);
        let views = select_day_parts(&series);
        assert_eq!(views[0].icon, IconCategory::Cloud);
    }

    #[test]
    fn test_labels() {
        assert_eq!(DayPart::Morning.label(), "Morning");
        assert_eq!(DayPart::Night.target_hour(), 3);
    }
}
