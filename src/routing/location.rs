//! Positioning types and the scoped watch handle

use crate::core::constants::{messages, WATCH_MAXIMUM_AGE_MS, WATCH_TIMEOUT_MS};
use crate::core::geo::LatLng;
use crate::traits::LocationProvider;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

/// Positioning failure, coded the way the W3C Geolocation API reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out")]
    Timeout,
    #[error("geolocation error code {0}")]
    Other(u16),
}

impl GeolocationError {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            other => GeolocationError::Other(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            GeolocationError::PermissionDenied => 1,
            GeolocationError::PositionUnavailable => 2,
            GeolocationError::Timeout => 3,
            GeolocationError::Other(code) => *code,
        }
    }

    /// Alert text shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::PermissionDenied => messages::LOCATION_PERMISSION_DENIED,
            GeolocationError::PositionUnavailable => messages::LOCATION_UNAVAILABLE,
            GeolocationError::Timeout => messages::LOCATION_TIMEOUT,
            GeolocationError::Other(_) => messages::LOCATION_UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    /// Oldest cached fix accepted; 0 forces a fresh one
    pub maximum_age_ms: u64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: WATCH_TIMEOUT_MS,
            maximum_age_ms: WATCH_MAXIMUM_AGE_MS,
        }
    }
}

/// Owns a running location watch; releasing it ends the subscription.
#[derive(Debug)]
pub struct WatchGuard {
    task: JoinHandle<()>,
}

impl WatchGuard {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn close(self) {
        drop(self);
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Fixed position for hosts without a positioning device
#[derive(Debug, Clone, Copy)]
pub struct StaticLocation {
    position: LatLng,
}

impl StaticLocation {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Ok(self.position)
    }

    fn watch_position(
        &self,
        _options: WatchOptions,
    ) -> BoxStream<'static, Result<LatLng, GeolocationError>> {
        stream::once(futures::future::ready(Ok(self.position))).boxed()
    }
}
