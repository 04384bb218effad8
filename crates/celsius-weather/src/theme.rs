//! Icon-code-to-visual-theme mapping.
//!
//! The provider's icon codes share a two-character condition prefix
//! ("01" clear, "10" rain, ...). The mapping is a static lookup the UI layer
//! consumes as-is; unrecognized codes fall back to the sunrise default.

/// Animated effect the UI overlays on the background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEffect {
    Sunshine,
    Starry,
    Clouds,
    Rain,
    ThunderRain,
    Snow,
    Mist,
}

/// Background descriptor for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundTheme {
    /// Gradient stop classes consumed by the styling layer
    pub gradient: &'static str,
    pub effect: WeatherEffect,
}

const DEFAULT_THEME: BackgroundTheme = BackgroundTheme {
    gradient: "from-orange-400 via-amber-300 to-yellow-400",
    effect: WeatherEffect::Sunshine,
};

impl BackgroundTheme {
    /// Resolve the theme for an icon code.
    ///
    /// `now`, `sunrise` and `sunset` are epoch seconds; night styling
    /// applies outside the sunrise..sunset window. The comparison is done
    /// on epochs directly, so it reflects the current moment at the
    /// location rather than the viewer's wall clock.
    pub fn for_icon(icon: &str, now: i64, sunrise: i64, sunset: i64) -> Self {
        let is_night = now < sunrise || now > sunset;

        match icon.get(..2).unwrap_or("") {
            // clear sky
            "01" => Self {
                gradient: if is_night {
                    "from-blue-900 via-blue-800 to-blue-900"
                } else {
                    "from-blue-400 via-blue-300 to-blue-400"
                },
                effect: if is_night { WeatherEffect::Starry } else { WeatherEffect::Sunshine },
            },
            // few clouds
            "02" => Self {
                gradient: if is_night {
                    "from-slate-900 via-slate-800 to-slate-900"
                } else {
                    "from-blue-400 via-blue-300 to-blue-200"
                },
                effect: WeatherEffect::Clouds,
            },
            // scattered / broken clouds
            "03" | "04" => Self {
                gradient: if is_night {
                    "from-slate-900 via-slate-800 to-slate-900"
                } else {
                    "from-blue-500 via-blue-400 to-blue-300"
                },
                effect: WeatherEffect::Clouds,
            },
            // shower rain
            "09" => Self {
                gradient: "from-slate-700 via-slate-600 to-slate-700",
                effect: WeatherEffect::Rain,
            },
            // rain
            "10" => Self {
                gradient: "from-slate-600 via-slate-500 to-slate-600",
                effect: WeatherEffect::Rain,
            },
            // thunderstorm
            "11" => Self {
                gradient: "from-slate-900 via-slate-800 to-slate-900",
                effect: WeatherEffect::ThunderRain,
            },
            // snow
            "13" => Self {
                gradient: "from-slate-400 via-slate-300 to-slate-400",
                effect: WeatherEffect::Snow,
            },
            // mist
            "50" => Self {
                gradient: "from-gray-600 via-gray-500 to-gray-600",
                effect: WeatherEffect::Mist,
            },
            _ => DEFAULT_THEME,
        }
    }
}
