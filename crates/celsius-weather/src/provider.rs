//! OpenWeatherMap client.
//!
//! Resolves a place name (geocode-first) or a coordinate pair to a complete
//! [`WeatherBundle`]: current conditions, air quality and the 5-day/3-hour
//! forecast. Upstream failures are logged here at the boundary; callers see
//! typed [`WeatherError`] values.

use crate::format::{hour_label, weekday_label};
use crate::types::{
    AirQuality, CurrentConditions, DailyEntry, HourlyEntry, Pollutants, WeatherBundle,
    WeatherError,
};
use chrono::{DateTime, Local, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// 3-hour slots that cover the next 24 hours.
const HOURLY_SLOTS: usize = 8;
/// One sampled reading per day: every 8th 3-hour slot.
const SLOTS_PER_DAY: usize = 8;
const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    /// Create a provider for the given credential and base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetch weather for a city name.
    ///
    /// The name is geocoded first; an empty geocoder result is reported as
    /// [`WeatherError::NotFound`], distinct from transport failures.
    pub async fn fetch_by_city(&self, city: &str) -> Result<WeatherBundle, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::Validation("city parameter is required".into()));
        }

        let hits: Vec<GeoHit> = self
            .get_json(
                "/geo/1.0/direct",
                &[
                    ("q", city.to_string()),
                    ("limit", "1".to_string()),
                    ("appid", self.api_key.clone()),
                ],
            )
            .await?;

        let hit = match hits.into_iter().next() {
            Some(hit) => hit,
            None => return Err(WeatherError::NotFound(city.to_string())),
        };

        tracing::debug!("Geocoded '{}' to ({}, {})", city, hit.lat, hit.lon);
        self.fetch_by_coords(hit.lat, hit.lon).await
    }

    /// Fetch weather for a coordinate pair.
    pub async fn fetch_by_coords(&self, lat: f64, lon: f64) -> Result<WeatherBundle, WeatherError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(WeatherError::Validation(
                "latitude and longitude are required".into(),
            ));
        }

        let coords = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("appid", self.api_key.clone()),
        ];
        let metric = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "metric".to_string()),
            ("appid", self.api_key.clone()),
        ];

        let current: OwmCurrent = self.get_json("/data/2.5/weather", &metric).await?;
        let air: OwmAir = self.get_json("/data/2.5/air_pollution", &coords).await?;
        let forecast: OwmForecast = self.get_json("/data/2.5/forecast", &metric).await?;

        assemble_bundle(current, air, forecast)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Provider returned status {} for {}", status, path);
        }
        let response = response.error_for_status()?;

        response.json::<T>().await.map_err(|e| {
            tracing::warn!("Failed to decode provider response for {}: {}", path, e);
            WeatherError::Parse(e.to_string())
        })
    }
}

// Raw provider payloads. Only the consumed fields are modeled; everything
// numeric decodes as f64 because the upstream mixes integers and floats.

#[derive(Debug, Deserialize)]
struct GeoHit {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmDescription {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: Option<f64>,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OwmWind {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OwmClouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: String,
    weather: Vec<OwmDescription>,
    main: OwmMain,
    #[serde(default)]
    wind: OwmWind,
    #[serde(default)]
    clouds: OwmClouds,
    sys: OwmSys,
    visibility: Option<f64>,
    #[serde(default)]
    coord: OwmCoord,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmDescription>,
    #[serde(default)]
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwmAirComponents {
    pm2_5: f64,
    pm10: f64,
    o3: f64,
}

#[derive(Debug, Deserialize)]
struct OwmAirItem {
    main: OwmAirMain,
    components: OwmAirComponents,
}

#[derive(Debug, Deserialize)]
struct OwmAir {
    list: Vec<OwmAirItem>,
}

fn assemble_bundle(
    current: OwmCurrent,
    air: OwmAir,
    forecast: OwmForecast,
) -> Result<WeatherBundle, WeatherError> {
    let desc = primary(&current.weather)?;

    let air_item = air
        .list
        .first()
        .ok_or_else(|| WeatherError::Parse("empty air quality response".into()))?;
    let air_quality = AirQuality {
        index: air_item.main.aqi,
        pollutants: Pollutants {
            pm25: air_item.components.pm2_5.round() as i64,
            pm10: air_item.components.pm10.round() as i64,
            o3: air_item.components.o3.round() as i64,
        },
    };

    let hourly = forecast
        .list
        .iter()
        .take(HOURLY_SLOTS)
        .map(|item| {
            let desc = primary(&item.weather)?;
            Ok(HourlyEntry {
                time: hour_label(local_time(item.dt)),
                temp: round_deg(item.main.temp),
                icon: desc.icon.clone(),
                description: desc.description.clone(),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    let daily = forecast
        .list
        .iter()
        .step_by(SLOTS_PER_DAY)
        .take(FORECAST_DAYS)
        .map(|item| {
            let desc = primary(&item.weather)?;
            Ok(DailyEntry {
                date: weekday_label(local_time(item.dt)),
                temp: round_deg(item.main.temp),
                temp_min: round_deg(item.main.temp_min),
                temp_max: round_deg(item.main.temp_max),
                description: desc.description.clone(),
                icon: desc.icon.clone(),
                humidity: item.main.humidity.round() as u8,
                wind_speed: round_tenth(item.wind.speed),
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    let conditions = CurrentConditions {
        city: current.name,
        country: current.sys.country.unwrap_or_default(),
        description: desc.description.clone(),
        icon: desc.icon.clone(),
        temperature: round_deg(current.main.temp),
        feels_like: round_deg(current.main.feels_like.unwrap_or(current.main.temp)),
        humidity: current.main.humidity.round() as u8,
        wind_speed: round_tenth(current.wind.speed),
        wind_deg: current.wind.deg,
        pressure: current.main.pressure.round() as u32,
        sunrise: current.sys.sunrise,
        sunset: current.sys.sunset,
        temp_min: round_deg(current.main.temp_min),
        temp_max: round_deg(current.main.temp_max),
        visibility_km: (current.visibility.unwrap_or(0.0) / 1000.0).round() as i64,
        cloudiness: current.clouds.all.round() as u8,
        lat: current.coord.lat,
        lon: current.coord.lon,
    };

    Ok(WeatherBundle {
        current: conditions,
        air_quality,
        hourly,
        forecast: daily,
        fetched_at: Utc::now(),
    })
}

fn primary(weather: &[OwmDescription]) -> Result<&OwmDescription, WeatherError> {
    weather
        .first()
        .ok_or_else(|| WeatherError::Parse("missing weather description".into()))
}

fn round_deg(v: f64) -> i32 {
    v.round() as i32
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn local_time(epoch: i64) -> DateTime<Local> {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}
