//! Radar animation for Celsius
//!
//! A fixed window of radar-frame timestamps with play/pause/scrub
//! semantics, the autoplay task that drives it, and the parameter boundary
//! toward the WMS tile layers.

pub mod layers;
pub mod player;
pub mod timeline;

pub use layers::{WmsLayer, CLOUD_LAYER, RAIN_LAYER};
pub use player::RadarPlayer;
pub use timeline::{PlayState, RadarError, RadarTimeline, FRAME_COUNT, FRAME_STEP_MINUTES};
