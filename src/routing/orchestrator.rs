//! Current location and walking route on the map
//!
//! [`RouteOrchestrator`] owns everything the route view draws: the
//! current-location marker fed by a one-shot fix and a continuous watch,
//! and one walking route (polyline plus endpoint markers) recomputed
//! whenever start, goal or route type change. Route fetches may overlap;
//! their results apply in trigger order, so a slow response for an older
//! request never overwrites a newer one.

use crate::core::config::SafeWalkConfig;
use crate::core::constants::messages;
use crate::core::geo::{LatLng, LatLngBounds};
use crate::layers::marker::MarkerOptions;
use crate::routing::format::{format_distance, format_time};
use crate::routing::location::{GeolocationError, WatchGuard, WatchOptions};
use crate::routing::Route;
use crate::sdk::{MapSdk, MarkerId, Padding, PolylineId, PolylineStyle};
use crate::traits::{LocationProvider, Notifier, RouteProvider};
use crate::Result;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    #[default]
    Normal,
    Safe,
}

impl RouteType {
    pub fn polyline_style(self) -> PolylineStyle {
        let stroke_color = match self {
            RouteType::Normal => "#2db400",
            RouteType::Safe => "#4CAF50",
        };
        PolylineStyle {
            stroke_color: stroke_color.to_string(),
            stroke_weight: 5,
            stroke_opacity: 0.8,
        }
    }
}

/// What the route panel shows: totals of the drawn route or a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteInfo {
    Summary {
        #[serde(rename = "distanceMeters")]
        distance_meters: f64,
        #[serde(rename = "durationSeconds")]
        duration_seconds: f64,
        #[serde(rename = "routeType")]
        route_type: RouteType,
    },
    Error {
        error: String,
    },
}

impl RouteInfo {
    pub fn is_error(&self) -> bool {
        matches!(self, RouteInfo::Error { .. })
    }

    pub fn formatted_distance(&self) -> Option<String> {
        match self {
            RouteInfo::Summary {
                distance_meters, ..
            } => Some(format_distance(*distance_meters)),
            RouteInfo::Error { .. } => None,
        }
    }

    pub fn formatted_duration(&self) -> Option<String> {
        match self {
            RouteInfo::Summary {
                duration_seconds, ..
            } => Some(format_time(*duration_seconds)),
            RouteInfo::Error { .. } => None,
        }
    }
}

/// How a route draw ended
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Applied(RouteInfo),
    /// A newer draw was triggered (or the route cleared) before this one finished
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePhase {
    Idle,
    Fetching,
    Drawn,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    Uninitialized,
    Locating,
    Located(LatLng),
    Failed(GeolocationError),
}

/// A triggered route fetch
#[derive(Debug)]
pub struct RouteDraw {
    seq: u64,
    handle: JoinHandle<RouteOutcome>,
}

impl RouteDraw {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub async fn finished(self) -> RouteOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("route draw #{} did not complete: {}", self.seq, err);
                RouteOutcome::Superseded
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DrawnRoute {
    polyline: PolylineId,
    start: MarkerId,
    goal: MarkerId,
}

struct RouteState {
    start: Option<LatLng>,
    goal: Option<LatLng>,
    route_type: RouteType,
    /// Sequence of the latest trigger; only its result may apply
    seq: u64,
    phase: RoutePhase,
    info: Option<RouteInfo>,
    drawn: Option<DrawnRoute>,
    location: LocationState,
    location_marker: Option<MarkerId>,
    watch: Option<WatchGuard>,
}

impl RouteState {
    fn erase(&mut self, map: &dyn MapSdk) {
        if let Some(drawn) = self.drawn.take() {
            map.remove_polyline(drawn.polyline);
            map.remove_marker(drawn.start);
            map.remove_marker(drawn.goal);
        }
    }

    fn place_location_marker(&mut self, map: &dyn MapSdk, position: LatLng) {
        match self.location_marker {
            Some(marker) => map.set_marker_position(marker, position),
            None => {
                self.location_marker = Some(map.add_marker(MarkerOptions::current_location(position)))
            }
        }
    }
}

struct Shared {
    map: Arc<dyn MapSdk>,
    routes: Arc<dyn RouteProvider>,
    locations: Arc<dyn LocationProvider>,
    notifier: Arc<dyn Notifier>,
    watch_options: WatchOptions,
    fit_padding: u32,
    state: Mutex<RouteState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RouteState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the location marker and the walking route consistent.
///
/// Cheap to clone. Dropping the last clone releases the location watch;
/// background tasks only hold weak references and stop touching the map
/// once the orchestrator is gone.
#[derive(Clone)]
pub struct RouteOrchestrator {
    shared: Arc<Shared>,
}

impl RouteOrchestrator {
    pub fn new(
        map: Arc<dyn MapSdk>,
        routes: Arc<dyn RouteProvider>,
        locations: Arc<dyn LocationProvider>,
        notifier: Arc<dyn Notifier>,
        config: &SafeWalkConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                map,
                routes,
                locations,
                notifier,
                watch_options: config.location.clone(),
                fit_padding: config.route.fit_padding,
                state: Mutex::new(RouteState {
                    start: None,
                    goal: None,
                    route_type: RouteType::default(),
                    seq: 0,
                    phase: RoutePhase::Idle,
                    info: None,
                    drawn: None,
                    location: LocationState::Uninitialized,
                    location_marker: None,
                    watch: None,
                }),
            }),
        }
    }

    /// Requests the initial fix and starts the continuous watch.
    /// A second call while mounted does nothing.
    pub fn mount(&self) {
        let mut state = self.shared.lock();
        if state.watch.is_some() {
            log::debug!("orchestrator already mounted");
            return;
        }
        state.location = LocationState::Locating;
        locate_initial(&self.shared);
        state.watch = Some(start_watch(&self.shared));
    }

    /// Releases the location watch
    pub fn teardown(&self) {
        let watch = self.shared.lock().watch.take();
        if let Some(watch) = watch {
            watch.close();
            log::info!("location watch released");
        }
    }

    pub fn is_watching(&self) -> bool {
        self.shared
            .lock()
            .watch
            .as_ref()
            .is_some_and(|watch| !watch.is_finished())
    }

    pub fn location_state(&self) -> LocationState {
        self.shared.lock().location
    }

    pub fn current_location_marker(&self) -> Option<MarkerId> {
        self.shared.lock().location_marker
    }

    pub fn set_start(&self, start: LatLng) -> Option<RouteDraw> {
        self.update(|state| state.start = Some(start))
    }

    pub fn set_goal(&self, goal: LatLng) -> Option<RouteDraw> {
        self.update(|state| state.goal = Some(goal))
    }

    pub fn set_endpoints(&self, start: LatLng, goal: LatLng) -> Option<RouteDraw> {
        self.update(|state| {
            state.start = Some(start);
            state.goal = Some(goal);
        })
    }

    pub fn set_route_type(&self, route_type: RouteType) -> Option<RouteDraw> {
        self.update(|state| state.route_type = route_type)
    }

    pub fn route_info(&self) -> Option<RouteInfo> {
        self.shared.lock().info.clone()
    }

    pub fn route_phase(&self) -> RoutePhase {
        self.shared.lock().phase
    }

    pub fn route_inputs(&self) -> (Option<LatLng>, Option<LatLng>, RouteType) {
        let state = self.shared.lock();
        (state.start, state.goal, state.route_type)
    }

    /// Removes the drawn route, its info and both endpoints. In-flight
    /// fetches are discarded when they land.
    pub fn clear_route(&self) {
        let mut state = self.shared.lock();
        state.erase(self.shared.map.as_ref());
        state.seq += 1;
        state.start = None;
        state.goal = None;
        state.info = None;
        state.phase = RoutePhase::Idle;
    }

    fn update(&self, change: impl FnOnce(&mut RouteState)) -> Option<RouteDraw> {
        let mut state = self.shared.lock();
        let before = (state.start, state.goal, state.route_type);
        change(&mut state);
        if (state.start, state.goal, state.route_type) == before {
            return None;
        }
        trigger(&self.shared, &mut state)
    }
}

/// Starts a fetch for the current inputs if both endpoints are known
fn trigger(shared: &Arc<Shared>, state: &mut RouteState) -> Option<RouteDraw> {
    let (start, goal) = (state.start?, state.goal?);
    let route_type = state.route_type;

    state.erase(shared.map.as_ref());
    state.seq += 1;
    state.phase = RoutePhase::Fetching;
    state.info = None;
    let seq = state.seq;
    log::debug!("route #{}: {:?} {} -> {}", seq, route_type, start, goal);

    let routes = Arc::clone(&shared.routes);
    let weak = Arc::downgrade(shared);
    let handle = tokio::spawn(async move {
        let result = routes.fetch_route(start, goal, route_type).await;
        match weak.upgrade() {
            Some(shared) => apply_route(&shared, seq, start, goal, route_type, result),
            None => RouteOutcome::Superseded,
        }
    });
    Some(RouteDraw { seq, handle })
}

fn apply_route(
    shared: &Shared,
    seq: u64,
    start: LatLng,
    goal: LatLng,
    route_type: RouteType,
    result: Result<Route>,
) -> RouteOutcome {
    let map = shared.map.as_ref();
    let mut state = shared.lock();
    if state.seq != seq {
        log::debug!("discarding route #{}, latest is #{}", seq, state.seq);
        return RouteOutcome::Superseded;
    }

    let info = match result {
        Ok(route) => {
            state.erase(map);
            let polyline = map.add_polyline(&route.path, &route_type.polyline_style());
            let start = map.add_marker(MarkerOptions::new(start).with_title(messages::ROUTE_START));
            let goal = map.add_marker(MarkerOptions::new(goal).with_title(messages::ROUTE_GOAL));
            state.drawn = Some(DrawnRoute {
                polyline,
                start,
                goal,
            });
            if let Some(bounds) = LatLngBounds::from_path(&route.path) {
                map.fit_bounds(bounds, Padding::uniform(shared.fit_padding));
            }
            state.phase = RoutePhase::Drawn;
            RouteInfo::Summary {
                distance_meters: route.distance_meters,
                duration_seconds: route.duration_seconds,
                route_type,
            }
        }
        Err(err) => {
            log::warn!("route #{} failed: {}", seq, err);
            state.phase = RoutePhase::Failed;
            RouteInfo::Error {
                error: messages::ROUTE_FAILED.to_string(),
            }
        }
    };
    state.info = Some(info.clone());
    RouteOutcome::Applied(info)
}

fn locate_initial(shared: &Arc<Shared>) {
    let locations = Arc::clone(&shared.locations);
    let weak = Arc::downgrade(shared);
    tokio::spawn(async move {
        let fix = locations.current_position().await;
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut state = shared.lock();
        match fix {
            Ok(position) => {
                if let LocationState::Located(current) = state.location {
                    log::debug!("dropping initial fix {}, watch already at {}", position, current);
                    return;
                }
                shared.map.set_center(position);
                state.place_location_marker(shared.map.as_ref(), position);
                state.location = LocationState::Located(position);
            }
            Err(err) => {
                log::warn!("initial location fix failed: {}", err);
                if state.location == LocationState::Locating {
                    state.location = LocationState::Failed(err);
                }
            }
        }
    });
}

fn start_watch(shared: &Arc<Shared>) -> WatchGuard {
    let mut updates = shared
        .locations
        .watch_position(shared.watch_options.clone());
    let weak: Weak<Shared> = Arc::downgrade(shared);
    let task = tokio::spawn(async move {
        while let Some(update) = updates.next().await {
            let Some(shared) = weak.upgrade() else {
                break;
            };
            match update {
                Ok(position) => on_position(&shared, position),
                Err(err) => on_watch_error(&shared, err),
            }
        }
        log::debug!("location watch ended");
    });
    WatchGuard::new(task)
}

fn on_position(shared: &Shared, position: LatLng) {
    let mut state = shared.lock();
    state.place_location_marker(shared.map.as_ref(), position);
    state.location = LocationState::Located(position);
    shared.map.pan_to(position);
}

fn on_watch_error(shared: &Shared, err: GeolocationError) {
    log::warn!("location watch error: {}", err);
    {
        let mut state = shared.lock();
        if state.location == LocationState::Locating {
            state.location = LocationState::Failed(err);
        }
    }
    shared.notifier.alert(err.user_message());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::headless::HeadlessMap;
    use crate::MapError;
    use async_trait::async_trait;
    use futures::channel::mpsc;
    use futures::stream::{self, BoxStream};
    use geo_types::LineString;
    use std::time::Duration;

    const A: LatLng = LatLng {
        lat: 35.87,
        lng: 128.60,
    };
    const B: LatLng = LatLng {
        lat: 35.88,
        lng: 128.61,
    };

    /// Answers after a per-type delay; `None` fails the fetch
    struct DelayedRoutes {
        normal_ms: Option<u64>,
        safe_ms: Option<u64>,
    }

    #[async_trait]
    impl RouteProvider for DelayedRoutes {
        async fn fetch_route(
            &self,
            start: LatLng,
            goal: LatLng,
            route_type: RouteType,
        ) -> Result<Route> {
            let delay = match route_type {
                RouteType::Normal => self.normal_ms,
                RouteType::Safe => self.safe_ms,
            };
            let Some(delay) = delay else {
                return Err(MapError::Routing("upstream 500".into()));
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(Route {
                path: LineString::from(vec![(start.lng, start.lat), (goal.lng, goal.lat)]),
                distance_meters: if route_type == RouteType::Safe { 1500.0 } else { 1200.0 },
                duration_seconds: 900.0,
            })
        }
    }

    struct FakeLocation {
        fix: std::result::Result<LatLng, GeolocationError>,
        fix_delay: Duration,
        updates: Mutex<Option<mpsc::UnboundedReceiver<std::result::Result<LatLng, GeolocationError>>>>,
    }

    #[async_trait]
    impl LocationProvider for FakeLocation {
        async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
            tokio::time::sleep(self.fix_delay).await;
            self.fix
        }

        fn watch_position(
            &self,
            _options: WatchOptions,
        ) -> BoxStream<'static, std::result::Result<LatLng, GeolocationError>> {
            match self.updates.lock().unwrap().take() {
                Some(receiver) => receiver.boxed(),
                None => stream::empty().boxed(),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    struct Harness {
        map: Arc<HeadlessMap>,
        notifier: Arc<RecordingNotifier>,
        watch: mpsc::UnboundedSender<std::result::Result<LatLng, GeolocationError>>,
        orchestrator: RouteOrchestrator,
    }

    fn harness(
        routes: DelayedRoutes,
        fix: std::result::Result<LatLng, GeolocationError>,
    ) -> Harness {
        harness_with_fix_delay(routes, fix, Duration::ZERO)
    }

    fn harness_with_fix_delay(
        routes: DelayedRoutes,
        fix: std::result::Result<LatLng, GeolocationError>,
        fix_delay: Duration,
    ) -> Harness {
        let (watch, receiver) = mpsc::unbounded();
        let map = Arc::new(HeadlessMap::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let orchestrator = RouteOrchestrator::new(
            map.clone(),
            Arc::new(routes),
            Arc::new(FakeLocation {
                fix,
                fix_delay,
                updates: Mutex::new(Some(receiver)),
            }),
            notifier.clone(),
            &SafeWalkConfig::default(),
        );
        Harness {
            map,
            notifier,
            watch,
            orchestrator,
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_trigger_wins_over_slow_response() {
        let h = harness(
            DelayedRoutes {
                normal_ms: Some(300),
                safe_ms: Some(50),
            },
            Ok(A),
        );
        let normal = h.orchestrator.set_endpoints(A, B).unwrap();
        let safe = h.orchestrator.set_route_type(RouteType::Safe).unwrap();
        assert!(safe.seq() > normal.seq());

        let (normal, safe) = futures::join!(normal.finished(), safe.finished());
        assert_eq!(normal, RouteOutcome::Superseded);
        assert!(matches!(
            safe,
            RouteOutcome::Applied(RouteInfo::Summary {
                route_type: RouteType::Safe,
                ..
            })
        ));

        let polylines = h.map.polylines();
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].style.stroke_color, "#4CAF50");
        assert_eq!(h.orchestrator.route_phase(), RoutePhase::Drawn);
        assert_eq!(
            h.orchestrator.route_info().unwrap().formatted_distance().as_deref(),
            Some("1.5km")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_route_draw_fits_bounds_and_marks_endpoints() {
        let h = harness(
            DelayedRoutes {
                normal_ms: Some(10),
                safe_ms: Some(10),
            },
            Ok(A),
        );
        assert!(h.orchestrator.set_start(A).is_none());
        let draw = h.orchestrator.set_goal(B).unwrap();
        draw.finished().await;

        let (bounds, padding) = h.map.last_fit().unwrap();
        assert_eq!(padding, Padding::uniform(50));
        assert!(bounds.contains(&A) && bounds.contains(&B));
        assert_eq!(h.map.marker_count(), 2);

        // Same inputs again draw nothing new
        assert!(h.orchestrator.set_goal(B).is_none());

        let redraw = h.orchestrator.set_route_type(RouteType::Safe).unwrap();
        assert!(h.map.polylines().is_empty());
        redraw.finished().await;
        assert_eq!(h.map.polylines().len(), 1);
        assert_eq!(h.map.marker_count(), 2);
        assert_eq!(h.map.stats().polylines_removed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_route_publishes_error_without_drawing() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(A),
        );
        let outcome = h.orchestrator.set_endpoints(A, B).unwrap().finished().await;
        let expected = RouteInfo::Error {
            error: "경로 검색에 실패했습니다.".to_string(),
        };
        assert_eq!(outcome, RouteOutcome::Applied(expected.clone()));
        assert_eq!(h.orchestrator.route_info(), Some(expected));
        assert_eq!(h.orchestrator.route_phase(), RoutePhase::Failed);
        assert!(h.map.polylines().is_empty());
        assert_eq!(h.map.marker_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_route_discards_in_flight_fetch() {
        let h = harness(
            DelayedRoutes {
                normal_ms: Some(100),
                safe_ms: Some(100),
            },
            Ok(A),
        );
        let draw = h.orchestrator.set_endpoints(A, B).unwrap();
        h.orchestrator.clear_route();

        assert_eq!(draw.finished().await, RouteOutcome::Superseded);
        assert_eq!(h.orchestrator.route_info(), None);
        assert_eq!(h.orchestrator.route_phase(), RoutePhase::Idle);
        assert_eq!(h.orchestrator.route_inputs(), (None, None, RouteType::Normal));
        assert!(h.map.polylines().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fix_centers_map() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(B),
        );
        h.orchestrator.mount();
        settle().await;

        assert_eq!(h.orchestrator.location_state(), LocationState::Located(B));
        assert_eq!(h.map.center(), B);
        let marker = h.orchestrator.current_location_marker().unwrap();
        assert_eq!(h.map.marker(marker).unwrap().z_index, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_initial_fix_does_not_undo_watch() {
        let h = harness_with_fix_delay(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(A),
            Duration::from_millis(300),
        );
        h.orchestrator.mount();

        tokio::time::sleep(Duration::from_millis(100)).await;
        h.watch.unbounded_send(Ok(B)).unwrap();
        settle().await;
        let marker = h.orchestrator.current_location_marker().unwrap();
        assert_eq!(h.orchestrator.location_state(), LocationState::Located(B));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(h.orchestrator.location_state(), LocationState::Located(B));
        assert_eq!(h.orchestrator.current_location_marker(), Some(marker));
        assert_eq!(h.map.marker(marker).unwrap().position, B);
        assert_eq!(h.map.center(), B);
        assert_eq!(h.map.stats().markers_created, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fix_failure_keeps_default_center() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Err(GeolocationError::PositionUnavailable),
        );
        let center = h.map.center();
        h.orchestrator.mount();
        settle().await;

        assert_eq!(
            h.orchestrator.location_state(),
            LocationState::Failed(GeolocationError::PositionUnavailable)
        );
        assert_eq!(h.map.center(), center);
        assert_eq!(h.orchestrator.current_location_marker(), None);
        // The one-shot fix never alerts
        assert!(h.notifier.alerts.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_moves_marker_and_pans() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(A),
        );
        h.orchestrator.mount();
        settle().await;
        let marker = h.orchestrator.current_location_marker().unwrap();

        h.watch.unbounded_send(Ok(B)).unwrap();
        settle().await;

        assert_eq!(h.orchestrator.current_location_marker(), Some(marker));
        assert_eq!(h.map.marker(marker).unwrap().position, B);
        assert_eq!(h.map.center(), B);
        assert_eq!(h.map.stats().pans, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_denied_alerts_and_keeps_marker() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(A),
        );
        h.orchestrator.mount();
        settle().await;
        let marker = h.orchestrator.current_location_marker().unwrap();

        h.watch
            .unbounded_send(Err(GeolocationError::PermissionDenied))
            .unwrap();
        settle().await;

        assert_eq!(
            *h.notifier.alerts.lock().unwrap(),
            vec!["위치 정보 접근 권한이 거부되었습니다.".to_string()]
        );
        assert_eq!(h.map.marker(marker).unwrap().position, A);
        assert_eq!(h.orchestrator.location_state(), LocationState::Located(A));
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_releases_watch() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(A),
        );
        h.orchestrator.mount();
        settle().await;
        assert!(h.orchestrator.is_watching());

        h.orchestrator.teardown();
        settle().await;
        assert!(!h.orchestrator.is_watching());
        assert!(h.watch.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_orchestrator_releases_watch() {
        let h = harness(
            DelayedRoutes {
                normal_ms: None,
                safe_ms: None,
            },
            Ok(A),
        );
        h.orchestrator.mount();
        settle().await;

        let Harness { watch, orchestrator, .. } = h;
        drop(orchestrator);
        settle().await;
        assert!(watch.is_closed());
    }
}
