//! Boundary to the map rendering SDK
//!
//! The crate never draws anything itself. Every visual primitive goes
//! through [`MapSdk`], and the handles it hands back are opaque identity
//! keys. Implementations wrap a real SDK (web map, native widget) or, for
//! tests and headless runs, [`headless::HeadlessMap`].

pub mod headless;

use crate::core::geo::{LatLng, LatLngBounds};
use crate::layers::marker::MarkerOptions;
use crate::ui::popup::{InfoWindowContent, InfoWindowStyle};
use geo_types::LineString;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! handle_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

handle_id!(
    /// SDK handle of a marker
    MarkerId,
    "marker"
);
handle_id!(
    /// SDK handle of an info-window
    InfoWindowId,
    "info-window"
);
handle_id!(
    /// SDK handle of a polyline
    PolylineId,
    "polyline"
);

/// Inset in pixels kept around fitted bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Stroke style of a polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    pub stroke_color: String,
    pub stroke_weight: u32,
    pub stroke_opacity: f32,
}

/// Primitives the overlay and route components need from a map SDK.
///
/// Methods take `&self`: SDK objects are shared and mutate internally, the
/// same way a JS map instance does. Operations on handles that no longer
/// exist must be no-ops.
pub trait MapSdk: Send + Sync {
    fn set_center(&self, center: LatLng);

    /// Animated recenter
    fn pan_to(&self, center: LatLng);

    fn fit_bounds(&self, bounds: LatLngBounds, padding: Padding);

    fn add_marker(&self, options: MarkerOptions) -> MarkerId;

    fn set_marker_position(&self, marker: MarkerId, position: LatLng);

    fn remove_marker(&self, marker: MarkerId);

    /// Creates a closed info-window
    fn add_info_window(&self, content: &InfoWindowContent, style: &InfoWindowStyle)
        -> InfoWindowId;

    fn set_info_window_content(&self, window: InfoWindowId, content: &InfoWindowContent);

    /// Opens `window` anchored on `anchor`
    fn open_info_window(&self, window: InfoWindowId, anchor: MarkerId);

    fn close_info_window(&self, window: InfoWindowId);

    fn remove_info_window(&self, window: InfoWindowId);

    fn add_polyline(&self, path: &LineString<f64>, style: &PolylineStyle) -> PolylineId;

    fn remove_polyline(&self, polyline: PolylineId);
}
