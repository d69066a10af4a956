//! Route fetching through the direction relay
//!
//! The relay answers `{success, data: {features, totalDistance, totalTime}}`
//! on success and `{success: false, error}` otherwise. `features` is the
//! pedestrian routing provider's GeoJSON feature list; only its LineString
//! geometries make up the drawn path.

use crate::routing::Route;
use crate::{MapError, Result};
use geo_types::{Coord, LineString};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<RouteData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_time: f64,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl RelayResponse {
    pub fn into_route(self) -> Result<Route> {
        if !self.success {
            return Err(MapError::Routing(
                self.error
                    .unwrap_or_else(|| "relay reported failure".to_string()),
            ));
        }
        let data = self
            .data
            .ok_or_else(|| MapError::Routing("relay response has no data".to_string()))?;

        let mut coords: Vec<Coord<f64>> = Vec::new();
        for geometry in data.features.into_iter().filter_map(|feature| feature.geometry) {
            if geometry.kind != "LineString" {
                continue;
            }
            let points: Vec<[f64; 2]> = serde_json::from_value(geometry.coordinates)?;
            for [x, y] in points {
                let coord = Coord { x, y };
                // Consecutive segments share their joint point
                if coords.last() != Some(&coord) {
                    coords.push(coord);
                }
            }
        }

        if coords.len() < 2 {
            return Err(MapError::Routing("route has no line geometry".to_string()));
        }

        Ok(Route {
            path: LineString::new(coords),
            distance_meters: data.total_distance,
            duration_seconds: data.total_time,
        })
    }
}

#[cfg(feature = "http")]
pub use http::RelayRouteClient;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::background::HTTP_CLIENT;
    use crate::core::config::RouteConfig;
    use crate::core::geo::LatLng;
    use crate::routing::orchestrator::RouteType;
    use crate::traits::RouteProvider;
    use async_trait::async_trait;
    use std::time::Duration;

    /// [`RouteProvider`] backed by the direction relay
    #[derive(Debug, Clone)]
    pub struct RelayRouteClient {
        relay_url: String,
        timeout: Duration,
    }

    impl RelayRouteClient {
        pub fn new(config: &RouteConfig) -> Self {
            Self {
                relay_url: config.relay_url.clone(),
                timeout: Duration::from_millis(config.request_timeout_ms),
            }
        }
    }

    #[async_trait]
    impl RouteProvider for RelayRouteClient {
        async fn fetch_route(
            &self,
            start: LatLng,
            goal: LatLng,
            route_type: RouteType,
        ) -> Result<Route> {
            // The relay serves one pedestrian profile; the type only changes styling.
            log::debug!("fetching {:?} route {} -> {}", route_type, start, goal);
            let response = HTTP_CLIENT
                .get(&self.relay_url)
                .query(&[("start", start.to_lon_lat()), ("goal", goal.to_lon_lat())])
                .timeout(self.timeout)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            match serde_json::from_str::<RelayResponse>(&body) {
                Ok(parsed) => parsed.into_route(),
                Err(_) if !status.is_success() => {
                    Err(MapError::Routing(format!("relay returned HTTP {}", status)))
                }
                Err(err) => Err(err.into()),
            }
        }
    }
}
