//! Weather service for Celsius
//!
//! Provides current conditions, air quality and forecasts via the
//! OpenWeatherMap API, plus the display formatting helpers and the
//! icon-code-to-theme mapping used by the front end.

pub mod format;
pub mod provider;
pub mod theme;
pub mod types;

pub use provider::WeatherProvider;
pub use theme::{BackgroundTheme, WeatherEffect};
pub use types::*;
