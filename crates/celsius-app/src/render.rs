//! Weather data rendered into display strings.

use celsius_weather::format::{clock_label, comfort_description, wind_direction};
use celsius_weather::{AirQuality, BackgroundTheme, DailyEntry, HourlyEntry, WeatherBundle};
use chrono::{DateTime, Local, Utc};

/// Current-conditions card.
pub fn current_card(bundle: &WeatherBundle) -> String {
    let current = &bundle.current;
    let mut lines = Vec::new();

    lines.push(format!("{}, {}", current.city, current.country));
    lines.push(format!(
        "{}°C (feels like {}°C)  {}",
        current.temperature, current.feels_like, current.description
    ));
    lines.push(format!("H: {}°C  L: {}°C", current.temp_max, current.temp_min));
    lines.push(format!(
        "Wind: {} m/s {}  Humidity: {}%  Pressure: {} hPa",
        current.wind_speed,
        wind_direction(current.wind_deg),
        current.humidity,
        current.pressure
    ));
    lines.push(format!(
        "Visibility: {} km  Clouds: {}%  Comfort: {}",
        current.visibility_km,
        current.cloudiness,
        comfort_description(f64::from(current.temperature), f64::from(current.humidity))
    ));
    lines.push(format!(
        "Sunrise: {}  Sunset: {}",
        clock_label(local_time(current.sunrise)),
        clock_label(local_time(current.sunset))
    ));

    lines.join("\n")
}

/// Air quality block.
pub fn air_quality_block(aq: &AirQuality) -> String {
    format!(
        "Air quality: {} ({})  PM2.5: {}  PM10: {}  O3: {}",
        aq.level().description(),
        aq.index,
        aq.pollutants.pm25,
        aq.pollutants.pm10,
        aq.pollutants.o3
    )
}

/// Hourly strip for the next 24 hours.
pub fn hourly_strip(hourly: &[HourlyEntry]) -> String {
    hourly
        .iter()
        .map(|h| format!("{}: {}°C {}", h.time, h.temp, h.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 5-day forecast block.
pub fn forecast_block(days: &[DailyEntry]) -> String {
    days.iter()
        .map(|d| {
            format!(
                "{}: {}°C ({}°C / {}°C)  {}  wind {} m/s",
                d.date, d.temp, d.temp_min, d.temp_max, d.description, d.wind_speed
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Theme line: which background the styling layer would pick.
pub fn theme_line(bundle: &WeatherBundle) -> String {
    let current = &bundle.current;
    let theme = BackgroundTheme::for_icon(
        &current.icon,
        Utc::now().timestamp(),
        current.sunrise,
        current.sunset,
    );
    format!("Theme: {:?} ({})", theme.effect, theme.gradient)
}

/// Full report for a fetched bundle.
pub fn full_report(bundle: &WeatherBundle) -> String {
    format!(
        "{}\n{}\n\nNext 24 hours:\n{}\n\n5-day forecast:\n{}\n{}",
        current_card(bundle),
        air_quality_block(&bundle.air_quality),
        hourly_strip(&bundle.hourly),
        forecast_block(&bundle.forecast),
        theme_line(bundle)
    )
}

fn local_time(epoch: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}
