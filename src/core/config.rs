//! Configuration for overlay timing, positioning, routing and geocoding
//!
//! Every section has defaults matching the production web client, so a host
//! only needs to override what differs. Configurations can be loaded from
//! JSON and topped up from the environment.

use crate::core::constants::{
    messages, CLICK_WINDOW_MS, DEFAULT_CENTER, DEFAULT_ZOOM, ROUTE_FIT_PADDING,
    TOGGLE_DEBOUNCE_MS,
};
use crate::core::geo::LatLng;
use crate::routing::location::WatchOptions;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the reverse-geocoding key
pub const GEOCODER_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable overriding the route relay URL
pub const RELAY_URL_ENV: &str = "SAFEWALK_RELAY_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeWalkConfig {
    pub map: MapOptions,
    pub overlays: OverlayConfig,
    pub location: WatchOptions,
    pub route: RouteConfig,
    pub geocoder: GeocoderConfig,
}

impl SafeWalkConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Fills secrets and endpoints from the process environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(GEOCODER_KEY_ENV) {
            if !key.is_empty() {
                self.geocoder.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var(RELAY_URL_ENV) {
            if !url.is_empty() {
                self.route.relay_url = url;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.map.center.is_valid() {
            return Err(MapError::Config(format!(
                "map center {} is out of range",
                self.map.center
            )));
        }
        if self.overlays.click_window_ms == 0 {
            return Err(MapError::Config("click window must be positive".into()));
        }
        Ok(())
    }
}

/// Map construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Timing for the overlay input controllers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub toggle_debounce_ms: u64,
    pub click_window_ms: u64,
}

impl OverlayConfig {
    pub fn toggle_debounce(&self) -> Duration {
        Duration::from_millis(self.toggle_debounce_ms)
    }

    pub fn click_window(&self) -> Duration {
        Duration::from_millis(self.click_window_ms)
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            toggle_debounce_ms: TOGGLE_DEBOUNCE_MS,
            click_window_ms: CLICK_WINDOW_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Base URL of the direction relay
    pub relay_url: String,
    /// Inset in pixels applied on every side when fitting to a route
    pub fit_padding: u32,
    pub request_timeout_ms: u64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            relay_url: "http://localhost:5000/api/direction".to_string(),
            fit_padding: ROUTE_FIT_PADDING,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub language: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Leading text removed from every formatted address
    pub strip_prefix: String,
    pub request_timeout_ms: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            language: "ko".to_string(),
            api_key: None,
            strip_prefix: messages::COUNTRY_PREFIX.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}
