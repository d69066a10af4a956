//! Reverse geocoding for info-window addresses
//!
//! Lookups never fail toward the overlay code: [`resolve_address`] folds
//! every error into [`AddressState::Unavailable`].

use crate::core::geo::LatLng;
use crate::traits::ReverseGeocoder;
use crate::ui::popup::AddressState;
use crate::{MapError, Result};
use serde::Deserialize;

/// Geocoding API response body
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
}

impl GeocodeResponse {
    /// First formatted address with `prefix` stripped
    pub fn into_address(self, prefix: &str) -> Result<String> {
        if self.status != "OK" {
            return Err(MapError::Geocoding(format!("status {}", self.status)));
        }
        let first = self
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MapError::Geocoding("no results".to_string()))?;
        Ok(strip_prefix(&first.formatted_address, prefix))
    }
}

/// Removes the first occurrence of `prefix` (the country name) from `address`
pub fn strip_prefix(address: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return address.to_string();
    }
    address.replacen(prefix, "", 1)
}

/// Runs one lookup and maps the outcome to what the info-window shows
pub async fn resolve_address(geocoder: &dyn ReverseGeocoder, position: LatLng) -> AddressState {
    match geocoder.reverse_geocode(position).await {
        Ok(address) => AddressState::Resolved(address),
        Err(err) => {
            log::warn!("reverse geocode for {} failed: {}", position, err);
            AddressState::Unavailable
        }
    }
}

#[cfg(feature = "http")]
pub use http::GoogleGeocoder;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::background::HTTP_CLIENT;
    use crate::core::config::GeocoderConfig;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Client for the Google Geocoding JSON API
    #[derive(Debug, Clone)]
    pub struct GoogleGeocoder {
        config: GeocoderConfig,
    }

    impl GoogleGeocoder {
        pub fn new(config: GeocoderConfig) -> Self {
            Self { config }
        }
    }

    #[async_trait]
    impl ReverseGeocoder for GoogleGeocoder {
        async fn reverse_geocode(&self, position: LatLng) -> Result<String> {
            let key = self
                .config
                .api_key
                .as_deref()
                .ok_or_else(|| MapError::Geocoding("API key is not configured".to_string()))?;

            let latlng = format!("{},{}", position.lat, position.lng);
            let response = HTTP_CLIENT
                .get(&self.config.endpoint)
                .query(&[
                    ("latlng", latlng.as_str()),
                    ("language", self.config.language.as_str()),
                    ("key", key),
                ])
                .timeout(Duration::from_millis(self.config.request_timeout_ms))
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(MapError::Geocoding(format!(
                    "HTTP {} from geocoder",
                    response.status()
                )));
            }

            let body: GeocodeResponse = response.json().await?;
            body.into_address(&self.config.strip_prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(Option<&'static str>);

    #[async_trait]
    impl ReverseGeocoder for Fixed {
        async fn reverse_geocode(&self, _position: LatLng) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| MapError::Geocoding("offline".to_string()))
        }
    }

    #[test]
    fn test_response_strips_country() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{"status":"OK","results":[{"formatted_address":"대한민국 대구광역시 중구 공평로 88"},{"formatted_address":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_address("대한민국 ").unwrap(),
            "대구광역시 중구 공평로 88"
        );
    }

    #[test]
    fn test_response_errors() {
        let zero: GeocodeResponse =
            serde_json::from_str(r#"{"status":"ZERO_RESULTS","results":[]}"#).unwrap();
        assert!(zero.into_address("대한민국 ").is_err());

        let empty: GeocodeResponse = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert!(empty.into_address("대한민국 ").is_err());
    }

    #[test]
    fn test_strip_prefix_only_first() {
        assert_eq!(strip_prefix("서울 서울", "서울 "), "서울");
        assert_eq!(strip_prefix("대구광역시", ""), "대구광역시");
    }

    #[tokio::test]
    async fn test_resolve_address_degrades() {
        let position = LatLng::new(35.87, 128.6);
        assert_eq!(
            resolve_address(&Fixed(Some("대구광역시")), position).await,
            AddressState::Resolved("대구광역시".to_string())
        );
        assert_eq!(
            resolve_address(&Fixed(None), position).await,
            AddressState::Unavailable
        );
    }
}
