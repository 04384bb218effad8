//! WMS tile-layer boundary.
//!
//! The map library renders the layers; this module only describes them and
//! assembles the request parameters. The time parameter always comes from
//! the timeline controller.

/// WMS endpoint serving the radar products.
pub const WMS_BASE_URL: &str = "https://maps.dwd.de/geoserver/dwd/wms";

/// One time-aware overlay layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmsLayer {
    /// WMS `layers` parameter
    pub layers: &'static str,
    pub format: &'static str,
    pub transparent: bool,
    /// Render opacity applied by the map library
    pub opacity: f64,
}

/// Precipitation radar product.
pub const RAIN_LAYER: WmsLayer = WmsLayer {
    layers: "dwd:RX-Produkt",
    format: "image/png",
    transparent: true,
    opacity: 0.6,
};

/// Cloud cover product.
pub const CLOUD_LAYER: WmsLayer = WmsLayer {
    layers: "dwd:WN-Produkt",
    format: "image/png",
    transparent: true,
    opacity: 0.4,
};

impl WmsLayer {
    /// Request parameters for one frame, `time` taken verbatim from
    /// `RadarTimeline::time_param()`.
    pub fn request_params(&self, time: &str) -> Vec<(&'static str, String)> {
        vec![
            ("layers", self.layers.to_string()),
            ("format", self.format.to_string()),
            ("transparent", self.transparent.to_string()),
            ("time", time.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rain_and_cloud_products_differ() {
        assert_ne!(RAIN_LAYER.layers, CLOUD_LAYER.layers);
        assert!(RAIN_LAYER.opacity > CLOUD_LAYER.opacity);
    }

    #[test]
    fn request_params_carry_the_frame_time() {
        let params = RAIN_LAYER.request_params("2026-08-05T14:00:00Z");
        assert!(params.contains(&("time", "2026-08-05T14:00:00Z".to_string())));
        assert!(params.contains(&("layers", "dwd:RX-Produkt".to_string())));
        assert!(params.contains(&("transparent", "true".to_string())));
    }
}
