//! Prelude module for common safewalk types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use safewalk::prelude::*;`

pub use crate::core::{
    category::{Category, Place},
    config::{GeocoderConfig, MapOptions, OverlayConfig, RouteConfig, SafeWalkConfig},
    geo::{GeoPoint, LatLng, LatLngBounds, Point},
};

pub use crate::layers::{
    manager::{OverlayManager, ToggleState},
    marker::{MarkerIcon, MarkerOptions},
    registry::{EnrichmentToken, OverlayRegistry},
};

pub use crate::ui::popup::{AddressState, InfoWindowContent, InfoWindowExclusivity, InfoWindowStyle};

pub use crate::routing::{
    format::{format_distance, format_time},
    location::{GeolocationError, StaticLocation, WatchOptions},
    orchestrator::{RouteInfo, RouteOrchestrator, RouteOutcome, RouteType},
    Route,
};

pub use crate::sdk::{
    headless::HeadlessMap, InfoWindowId, MapSdk, MarkerId, Padding, PolylineId, PolylineStyle,
};

pub use crate::traits::{LocationProvider, Notifier, ReverseGeocoder, RouteProvider};

pub use crate::runtime::DebounceSlots;

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::{Future, Stream};
