//! Weather code classification
//!
//! Maps WMO weather codes reported by Open-Meteo to a human-readable
//! description and a coarse icon category used by every forecast view.


/// Description used for any code missing from the description table
pub const UNKNOWN_DESCRIPTION: &str = "unknown condition";

/// Coarse visual classification of a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    Sun,
    Moon,
    Cloud,
    Fog,
    Rain,
    Snow,
    Storm,
}

impl IconCategory {
    /// Returns the terminal symbol drawn for this category
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Sun => "\u{2600}",    // ☀
            IconCategory::Moon => "\u{263E}",   // ☾
            IconCategory::Cloud => "\u{2601}",  // ☁
            IconCategory::Fog => "\u{1F32B}",   // 🌫
            IconCategory::Rain => "\u{1F327}",  // 🌧
            IconCategory::Snow => "\u{2744}",   // ❄
            IconCategory::Storm => "\u{26C8}",  // ⛈
        }
    }
}

/// Description and icon for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Human-readable description of the code
    pub description: &'static str,
    /// Icon category for the code
    pub icon: IconCategory,
}

/// Classifies a weather code into a description and icon category.
///
/// Never fails: codes outside the description table get
/// [`UNKNOWN_DESCRIPTION`], and codes outside every icon range fall back to
/// [`IconCategory::Sun`].
///
/// # Arguments
/// * `code` - WMO weather code
/// * `is_day` - Whether the sample falls in daylight; only affects clear skies
pub fn classify(code: u8, is_day: bool) -> Condition {
    Condition {
        description: describe(code),
        icon: icon_for(code, is_day),
    }
}

/// Looks up the description for an exact weather code
pub fn describe(code: u8) -> &'static str {
    match code {
        0 => "clear sky",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 => "fog",
        48 => "depositing rime fog",
        51 => "light drizzle",
        53 => "moderate drizzle",
        55 => "dense drizzle",
        61 => "slight rain",
        63 => "moderate rain",
        65 => "heavy rain",
        71 => "slight snowfall",
        73 => "moderate snowfall",
        75 => "heavy snowfall",
        80 => "slight rain showers",
        81 => "moderate rain showers",
        82 => "violent rain showers",
        85 => "slight snow showers",
        86 => "heavy snow showers",
        95 => "thunderstorm",
        96 => "thunderstorm with slight hail",
        99 => "thunderstorm with heavy hail",
        _ => UNKNOWN_DESCRIPTION,
    }
}

/// Derives the icon category from numeric code ranges.
///
/// Ranges are checked in this order, first match wins:
/// - 0-1: Sun by day, Moon by night
/// - 2-3: Cloud
/// - 4-48: Fog
/// - 49-67 and 80-82: Rain
/// - 68-77 and 85-86: Snow
/// - 95 and above: Storm
/// - anything else (78-79, 83-84, 87-94): Sun
fn icon_for(code: u8, is_day: bool) -> IconCategory {
    match code {
        0..=1 if is_day => IconCategory::Sun,
        0..=1 => IconCategory::Moon,
        2..=3 => IconCategory::Cloud,
        4..=48 => IconCategory::Fog,
        49..=67 | 80..=82 => IconCategory::Rain,
        68..=77 | 85..=86 => IconCategory::Snow,
        95.. => IconCategory::Storm,
        _ => IconCategory::Sun,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTIONS: [(u8, &str); 23] = [
        (0, "clear sky"),
        (1, "mainly clear"),
        (2, "partly cloudy"),
        (3, "overcast"),
        (45, "fog"),
        (48, "depositing rime fog"),
        (51, "light drizzle"),
        (53, "moderate drizzle"),
        (55, "dense drizzle"),
        (61, "slight rain"),
        (63, "moderate rain"),
        (65, "heavy rain"),
        (71, "slight snowfall"),
        (73, "moderate snowfall"),
        (75, "heavy snowfall"),
        (80, "slight rain showers"),
        (81, "moderate rain showers"),
        (82, "violent rain showers"),
        (85, "slight snow showers"),
        (86, "heavy snow showers"),
        (95, "thunderstorm"),
        (96, "thunderstorm with slight hail"),
        (99, "thunderstorm with heavy hail"),
    ];

    #[test]
    fn test_documented_codes_have_exact_descriptions() {
        for (code, expected) in DESCRIPTIONS {
            assert_eq!(classify(code, true).description, expected, "code {}", code);
            assert_eq!(classify(code, false).description, expected, "code {} at night", code);
            assert_eq!(describe(code), expected, "code {}", code);
        }
    }

    #[test]
    fn test_undocumented_codes_fall_back() {
        assert_eq!(classify(200, true).description, UNKNOWN_DESCRIPTION);
        assert_eq!(classify(4, true).description, UNKNOWN_DESCRIPTION);
        assert_eq!(classify(56, true).description, UNKNOWN_DESCRIPTION);
        assert_eq!(classify(77, true).description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn test_clear_sky_depends_on_daylight() {
        assert_eq!(classify(0, true).icon, IconCategory::Sun);
        assert_eq!(classify(0, false).icon, IconCategory::Moon);
        assert_eq!(classify(1, true).icon, IconCategory::Sun);
        assert_eq!(classify(1, false).icon, IconCategory::Moon);
    }

    #[test]
    fn test_icon_boundaries() {
        assert_eq!(classify(2, false).icon, IconCategory::Cloud);
        assert_eq!(classify(3, true).icon, IconCategory::Cloud);
        assert_eq!(classify(45, true).icon, IconCategory::Fog);
        assert_eq!(classify(48, true).icon, IconCategory::Fog);
        assert_eq!(classify(51, true).icon, IconCategory::Rain);
        assert_eq!(classify(57, true).icon, IconCategory::Rain);
        assert_eq!(classify(61, true).icon, IconCategory::Rain);
        assert_eq!(classify(67, true).icon, IconCategory::Rain);
        assert_eq!(classify(71, true).icon, IconCategory::Snow);
        assert_eq!(classify(77, true).icon, IconCategory::Snow);
        assert_eq!(classify(80, true).icon, IconCategory::Rain);
        assert_eq!(classify(82, false).icon, IconCategory::Rain);
        assert_eq!(classify(85, true).icon, IconCategory::Snow);
        assert_eq!(classify(86, true).icon, IconCategory::Snow);
        assert_eq!(classify(95, true).icon, IconCategory::Storm);
        assert_eq!(classify(99, false).icon, IconCategory::Storm);
    }

    #[test]
    fn test_gaps_default_to_sun() {
        for code in [78, 79, 83, 84, 87, 90, 94] {
            assert_eq!(classify(code, false).icon, IconCategory::Sun, "code {}", code);
        }
    }

    #[test]
    fn test_out_of_table_codes_still_get_range_icon() {
        assert_eq!(classify(200, true).icon, IconCategory::Storm);
        assert_eq!(classify(10, true).icon, IconCategory::Fog);
    }
}
