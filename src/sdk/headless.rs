//! In-memory map SDK
//!
//! Keeps every primitive in plain maps so hosts without a renderer (tests,
//! servers, the headless demo) can drive the overlay and route components
//! and inspect the result.

use super::{InfoWindowId, MapSdk, MarkerId, Padding, PolylineId, PolylineStyle};
use crate::core::config::MapOptions;
use crate::core::geo::{LatLng, LatLngBounds};
use crate::layers::marker::MarkerOptions;
use crate::prelude::HashMap;
use crate::ui::popup::{InfoWindowContent, InfoWindowStyle};
use geo_types::LineString;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
pub struct HeadlessInfoWindow {
    pub content: InfoWindowContent,
    pub style: InfoWindowStyle,
    /// Marker the window is open on, `None` while closed
    pub open_on: Option<MarkerId>,
}

#[derive(Debug, Clone)]
pub struct HeadlessPolyline {
    pub path: LineString<f64>,
    pub style: PolylineStyle,
}

/// Counters over the lifetime of the map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    pub markers_created: usize,
    pub markers_removed: usize,
    pub info_windows_created: usize,
    pub info_windows_removed: usize,
    pub content_updates: usize,
    pub polylines_created: usize,
    pub polylines_removed: usize,
    pub pans: usize,
    /// Highest number of simultaneously open info-windows ever observed
    pub max_open_info_windows: usize,
}

#[derive(Debug)]
struct HeadlessState {
    center: LatLng,
    zoom: f64,
    next_id: u64,
    markers: HashMap<MarkerId, MarkerOptions>,
    info_windows: HashMap<InfoWindowId, HeadlessInfoWindow>,
    polylines: HashMap<PolylineId, HeadlessPolyline>,
    last_fit: Option<(LatLngBounds, Padding)>,
    stats: HeadlessStats,
}

impl HeadlessState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn open_count(&self) -> usize {
        self.info_windows
            .values()
            .filter(|window| window.open_on.is_some())
            .count()
    }
}

#[derive(Debug)]
pub struct HeadlessMap {
    state: Mutex<HeadlessState>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::with_options(MapOptions::default())
    }

    pub fn with_options(options: MapOptions) -> Self {
        Self {
            state: Mutex::new(HeadlessState {
                center: options.center,
                zoom: options.zoom,
                next_id: 0,
                markers: HashMap::default(),
                info_windows: HashMap::default(),
                polylines: HashMap::default(),
                last_fit: None,
                stats: HeadlessStats::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn center(&self) -> LatLng {
        self.lock().center
    }

    pub fn zoom(&self) -> f64 {
        self.lock().zoom
    }

    pub fn stats(&self) -> HeadlessStats {
        self.lock().stats
    }

    pub fn marker_count(&self) -> usize {
        self.lock().markers.len()
    }

    pub fn marker(&self, marker: MarkerId) -> Option<MarkerOptions> {
        self.lock().markers.get(&marker).cloned()
    }

    pub fn info_window_count(&self) -> usize {
        self.lock().info_windows.len()
    }

    pub fn info_window(&self, window: InfoWindowId) -> Option<HeadlessInfoWindow> {
        self.lock().info_windows.get(&window).cloned()
    }

    pub fn is_info_window_open(&self, window: InfoWindowId) -> bool {
        self.lock()
            .info_windows
            .get(&window)
            .is_some_and(|window| window.open_on.is_some())
    }

    pub fn open_info_window_count(&self) -> usize {
        self.lock().open_count()
    }

    pub fn max_open_info_windows(&self) -> usize {
        self.lock().stats.max_open_info_windows
    }

    pub fn polylines(&self) -> Vec<HeadlessPolyline> {
        let state = self.lock();
        let mut ids: Vec<_> = state.polylines.keys().copied().collect();
        ids.sort();
        ids.iter()
            .filter_map(|id| state.polylines.get(id).cloned())
            .collect()
    }

    pub fn last_fit(&self) -> Option<(LatLngBounds, Padding)> {
        self.lock().last_fit
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSdk for HeadlessMap {
    fn set_center(&self, center: LatLng) {
        self.lock().center = center;
    }

    fn pan_to(&self, center: LatLng) {
        let mut state = self.lock();
        state.center = center;
        state.stats.pans += 1;
    }

    fn fit_bounds(&self, bounds: LatLngBounds, padding: Padding) {
        let mut state = self.lock();
        state.center = bounds.center();
        state.last_fit = Some((bounds, padding));
    }

    fn add_marker(&self, options: MarkerOptions) -> MarkerId {
        let mut state = self.lock();
        let id = MarkerId(state.next_id());
        state.markers.insert(id, options);
        state.stats.markers_created += 1;
        id
    }

    fn set_marker_position(&self, marker: MarkerId, position: LatLng) {
        if let Some(options) = self.lock().markers.get_mut(&marker) {
            options.position = position;
        }
    }

    fn remove_marker(&self, marker: MarkerId) {
        let mut state = self.lock();
        if state.markers.remove(&marker).is_some() {
            state.stats.markers_removed += 1;
        }
    }

    fn add_info_window(
        &self,
        content: &InfoWindowContent,
        style: &InfoWindowStyle,
    ) -> InfoWindowId {
        let mut state = self.lock();
        let id = InfoWindowId(state.next_id());
        state.info_windows.insert(
            id,
            HeadlessInfoWindow {
                content: content.clone(),
                style: style.clone(),
                open_on: None,
            },
        );
        state.stats.info_windows_created += 1;
        id
    }

    fn set_info_window_content(&self, window: InfoWindowId, content: &InfoWindowContent) {
        let mut state = self.lock();
        if let Some(entry) = state.info_windows.get_mut(&window) {
            entry.content = content.clone();
            state.stats.content_updates += 1;
        }
    }

    fn open_info_window(&self, window: InfoWindowId, anchor: MarkerId) {
        let mut state = self.lock();
        if !state.markers.contains_key(&anchor) {
            return;
        }
        if let Some(entry) = state.info_windows.get_mut(&window) {
            entry.open_on = Some(anchor);
        }
        let open = state.open_count();
        state.stats.max_open_info_windows = state.stats.max_open_info_windows.max(open);
    }

    fn close_info_window(&self, window: InfoWindowId) {
        if let Some(entry) = self.lock().info_windows.get_mut(&window) {
            entry.open_on = None;
        }
    }

    fn remove_info_window(&self, window: InfoWindowId) {
        let mut state = self.lock();
        if state.info_windows.remove(&window).is_some() {
            state.stats.info_windows_removed += 1;
        }
    }

    fn add_polyline(&self, path: &LineString<f64>, style: &PolylineStyle) -> PolylineId {
        let mut state = self.lock();
        let id = PolylineId(state.next_id());
        state.polylines.insert(
            id,
            HeadlessPolyline {
                path: path.clone(),
                style: style.clone(),
            },
        );
        state.stats.polylines_created += 1;
        id
    }

    fn remove_polyline(&self, polyline: PolylineId) {
        let mut state = self.lock();
        if state.polylines.remove(&polyline).is_some() {
            state.stats.polylines_removed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_default_center() {
        let map = HeadlessMap::new();
        assert_eq!(map.center(), MapOptions::default().center);
        assert_eq!(map.zoom(), 14.0);
    }

    #[test]
    fn test_handles_are_unique_and_removal_is_idempotent() {
        let map = HeadlessMap::new();
        let a = map.add_marker(MarkerOptions::new(LatLng::new(1.0, 2.0)));
        let b = map.add_marker(MarkerOptions::new(LatLng::new(1.0, 2.0)));
        assert_ne!(a, b);

        map.remove_marker(a);
        map.remove_marker(a);
        assert_eq!(map.marker_count(), 1);
        assert_eq!(map.stats().markers_removed, 1);
    }

    #[test]
    fn test_open_requires_live_anchor() {
        let map = HeadlessMap::new();
        let marker = map.add_marker(MarkerOptions::new(LatLng::new(1.0, 2.0)));
        let content = InfoWindowContent {
            title: "t".into(),
            address: crate::ui::popup::AddressState::Loading,
            supplemental: None,
        };
        let window = map.add_info_window(&content, &InfoWindowStyle::default());
        map.remove_marker(marker);
        map.open_info_window(window, marker);
        assert!(!map.is_info_window_open(window));
    }
}
