//! Display formatting helpers for weather values.

use chrono::{DateTime, Local};

const WIND_DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass direction for a wind bearing in degrees.
pub fn wind_direction(deg: f64) -> &'static str {
    let sector = (deg / 22.5).round() as usize % 16;
    WIND_DIRECTIONS[sector]
}

/// Hour label for forecast slots, e.g. "3 PM".
pub fn hour_label(time: DateTime<Local>) -> String {
    time.format("%-I %p").to_string()
}

/// Weekday label for forecast days, e.g. "Monday".
pub fn weekday_label(time: DateTime<Local>) -> String {
    time.format("%A").to_string()
}

/// Clock label for sunrise/sunset, e.g. "6:42 AM".
pub fn clock_label(time: DateTime<Local>) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Simplified comfort score in [0, 100] from temperature (°C) and relative
/// humidity (%).
pub fn comfort_level(temp: f64, humidity: f64) -> f64 {
    let comfort_score = (temp - 20.0) * 2.0 + (humidity - 50.0) / 2.0;
    (50.0 + comfort_score).clamp(0.0, 100.0)
}

/// Comfort band for the score of [`comfort_level`].
pub fn comfort_description(temp: f64, humidity: f64) -> &'static str {
    let score = comfort_level(temp, humidity);
    if score < 30.0 {
        "Cool"
    } else if score < 45.0 {
        "Comfortable"
    } else if score < 60.0 {
        "Warm"
    } else {
        "Hot"
    }
}

/// Warning band for a UV index value.
pub fn uv_warning(uv: f64) -> &'static str {
    if uv <= 2.0 {
        "Low"
    } else if uv <= 5.0 {
        "Moderate"
    } else if uv <= 7.0 {
        "High"
    } else if uv <= 10.0 {
        "Very High"
    } else {
        "Extreme"
    }
}

/// Name for a moon phase in [0, 1], where 0/1 is the new moon and 0.5 the
/// full moon.
pub fn moon_phase_name(phase: f64) -> &'static str {
    if phase == 0.0 || phase == 1.0 {
        "New Moon"
    } else if phase < 0.25 {
        "Waxing Crescent"
    } else if phase == 0.25 {
        "First Quarter"
    } else if phase < 0.5 {
        "Waxing Gibbous"
    } else if phase == 0.5 {
        "Full Moon"
    } else if phase < 0.75 {
        "Waning Gibbous"
    } else if phase == 0.75 {
        "Last Quarter"
    } else {
        "Waning Crescent"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wind_direction_cardinals() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(90.0), "E");
        assert_eq!(wind_direction(180.0), "S");
        assert_eq!(wind_direction(270.0), "W");
    }

    #[test]
    fn test_wind_direction_rounds_to_nearest_sector() {
        assert_eq!(wind_direction(10.0), "NNE");
        assert_eq!(wind_direction(350.0), "N");
        assert_eq!(wind_direction(359.9), "N");
    }

    #[test]
    fn test_hour_label() {
        let t = Local.with_ymd_and_hms(2026, 8, 5, 15, 0, 0).unwrap();
        assert_eq!(hour_label(t), "3 PM");
        let t = Local.with_ymd_and_hms(2026, 8, 5, 0, 30, 0).unwrap();
        assert_eq!(hour_label(t), "12 AM");
    }

    #[test]
    fn test_clock_label() {
        let t = Local.with_ymd_and_hms(2026, 8, 5, 6, 5, 0).unwrap();
        assert_eq!(clock_label(t), "6:05 AM");
    }

    #[test]
    fn test_weekday_label() {
        // 2026-08-05 is a Wednesday.
        let t = Local.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        assert_eq!(weekday_label(t), "Wednesday");
    }

    #[test]
    fn test_comfort_level_clamped() {
        assert_eq!(comfort_level(-40.0, 0.0), 0.0);
        assert_eq!(comfort_level(60.0, 100.0), 100.0);
    }

    #[test]
    fn test_comfort_description_bands() {
        assert_eq!(comfort_description(5.0, 40.0), "Cool");
        assert_eq!(comfort_description(17.0, 48.0), "Comfortable");
        assert_eq!(comfort_description(22.0, 55.0), "Warm");
        assert_eq!(comfort_description(35.0, 80.0), "Hot");
    }

    #[test]
    fn test_uv_warning_bands() {
        assert_eq!(uv_warning(1.0), "Low");
        assert_eq!(uv_warning(4.0), "Moderate");
        assert_eq!(uv_warning(6.5), "High");
        assert_eq!(uv_warning(9.0), "Very High");
        assert_eq!(uv_warning(11.0), "Extreme");
    }

    #[test]
    fn test_moon_phase_names() {
        assert_eq!(moon_phase_name(0.0), "New Moon");
        assert_eq!(moon_phase_name(0.1), "Waxing Crescent");
        assert_eq!(moon_phase_name(0.25), "First Quarter");
        assert_eq!(moon_phase_name(0.4), "Waxing Gibbous");
        assert_eq!(moon_phase_name(0.5), "Full Moon");
        assert_eq!(moon_phase_name(0.6), "Waning Gibbous");
        assert_eq!(moon_phase_name(0.75), "Last Quarter");
        assert_eq!(moon_phase_name(0.9), "Waning Crescent");
        assert_eq!(moon_phase_name(1.0), "New Moon");
    }
}
