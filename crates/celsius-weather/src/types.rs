use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Air quality index bands reported by the provider (1-5 ordinal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    #[default]
    Unknown,
}

impl AqiLevel {
    /// Convert the provider's 1-5 ordinal to a band
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::VeryPoor,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Unknown => "Unknown",
        }
    }
}

/// Rounded pollutant concentrations (µg/m³)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pollutants {
    pub pm25: i64,
    pub pm10: i64,
    pub o3: i64,
}

/// Air quality snapshot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AirQuality {
    /// Provider ordinal, 1-5
    pub index: u8,
    pub pollutants: Pollutants,
}

impl AirQuality {
    pub fn level(&self) -> AqiLevel {
        AqiLevel::from_index(self.index)
    }
}

/// Current conditions at the resolved location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub pressure: u32,
    /// Epoch seconds, as reported by the provider
    pub sunrise: i64,
    pub sunset: i64,
    pub temp_min: i32,
    pub temp_max: i32,
    /// Kilometers, rounded
    pub visibility_km: i64,
    /// Percent cloud cover
    pub cloudiness: u8,
    pub lat: f64,
    pub lon: f64,
}

/// One 3-hour forecast slot (next 24 hours)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Local time label, e.g. "3 PM"
    pub time: String,
    pub temp: i32,
    pub icon: String,
    pub description: String,
}

/// One sampled day of the 5-day forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Weekday label, e.g. "Monday"
    pub date: String,
    pub temp: i32,
    pub temp_min: i32,
    pub temp_max: i32,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    /// m/s, rounded to 0.1
    pub wind_speed: f64,
}

/// Complete weather data bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub air_quality: AirQuality,
    pub hourly: Vec<HourlyEntry>,
    pub forecast: Vec<DailyEntry>,
    pub fetched_at: DateTime<Utc>,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// A required query parameter was missing or unusable
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The provider reported no match for the given place
    #[error("Location not found: {0}")]
    NotFound(String),

    /// Network-level failure talking to the provider
    #[error("Upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The provider answered with a payload we could not use
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// Upstream detail stays in the logs; only "not found" and validation
    /// problems get specific wording.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Validation(_) => "A city name or coordinates are required.",
            WeatherError::NotFound(_) => "Location not found. Check and try again.",
            WeatherError::Upstream(_) | WeatherError::Parse(_) => {
                "Weather service error. Please try again."
            }
        }
    }
}
