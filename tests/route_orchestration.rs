use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use geo_types::LineString;
use safewalk::prelude::*;
use safewalk::routing::orchestrator::{LocationState, RoutePhase};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Each call takes longer than the one after it, so responses land in
/// reverse trigger order.
struct ReversingRoutes {
    calls: AtomicUsize,
}

#[async_trait]
impl RouteProvider for ReversingRoutes {
    async fn fetch_route(
        &self,
        start: LatLng,
        goal: LatLng,
        _route_type: RouteType,
    ) -> safewalk::Result<Route> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
        tokio::time::sleep(Duration::from_millis(500 - call * 100)).await;
        Ok(Route {
            path: LineString::from(vec![(start.lng, start.lat), (goal.lng, goal.lat)]),
            distance_meters: 800.0 + call as f64,
            duration_seconds: 4000.0,
        })
    }
}

/// Reports a fix, then fails the watch with the given code
struct DeniedAfterFix {
    position: LatLng,
    code: u16,
}

#[async_trait]
impl LocationProvider for DeniedAfterFix {
    async fn current_position(&self) -> std::result::Result<LatLng, GeolocationError> {
        Ok(self.position)
    }

    fn watch_position(
        &self,
        _options: WatchOptions,
    ) -> BoxStream<'static, std::result::Result<LatLng, GeolocationError>> {
        let code = self.code;
        stream::once(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Err(GeolocationError::from_code(code))
        })
        .boxed()
    }
}

#[derive(Default)]
struct Alerts(Mutex<Vec<String>>);

impl Notifier for Alerts {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

const HOME: LatLng = LatLng {
    lat: 35.8714354,
    lng: 128.601445,
};
const STATION: LatLng = LatLng {
    lat: 35.8688,
    lng: 128.5936,
};

fn orchestrator(code: u16) -> (Arc<HeadlessMap>, Arc<Alerts>, RouteOrchestrator) {
    let map = Arc::new(HeadlessMap::new());
    let alerts = Arc::new(Alerts::default());
    let orchestrator = RouteOrchestrator::new(
        map.clone(),
        Arc::new(ReversingRoutes {
            calls: AtomicUsize::new(0),
        }),
        Arc::new(DeniedAfterFix {
            position: HOME,
            code,
        }),
        alerts.clone(),
        &SafeWalkConfig::default(),
    );
    (map, alerts, orchestrator)
}

#[tokio::test(start_paused = true)]
async fn test_latest_route_input_wins() {
    let (map, _alerts, orchestrator) = orchestrator(1);

    let first = orchestrator.set_endpoints(HOME, STATION).unwrap();
    let second = orchestrator.set_route_type(RouteType::Safe).unwrap();
    let third = orchestrator.set_route_type(RouteType::Normal).unwrap();
    assert_eq!(orchestrator.route_phase(), RoutePhase::Fetching);

    let outcomes = futures::future::join_all([first.finished(), second.finished(), third.finished()]).await;
    assert_eq!(outcomes[0], RouteOutcome::Superseded);
    assert_eq!(outcomes[1], RouteOutcome::Superseded);

    let info = orchestrator.route_info().unwrap();
    assert_eq!(
        info,
        RouteInfo::Summary {
            distance_meters: 802.0,
            duration_seconds: 4000.0,
            route_type: RouteType::Normal,
        }
    );
    assert_eq!(info.formatted_distance().as_deref(), Some("802m"));
    assert_eq!(info.formatted_duration().as_deref(), Some("1시간 6분"));
    assert_eq!(map.polylines().len(), 1);
    assert_eq!(map.polylines()[0].style.stroke_color, "#2db400");
}

#[tokio::test(start_paused = true)]
async fn test_permission_denied_after_fix() {
    let (map, alerts, orchestrator) = orchestrator(1);
    orchestrator.mount();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(
        *alerts.0.lock().unwrap(),
        vec!["위치 정보 접근 권한이 거부되었습니다.".to_string()]
    );
    let marker = orchestrator.current_location_marker().unwrap();
    assert_eq!(map.marker(marker).unwrap().position, HOME);
    assert_eq!(orchestrator.location_state(), LocationState::Located(HOME));
    // The provider closed its stream after the error
    assert!(!orchestrator.is_watching());
}

#[tokio::test(start_paused = true)]
async fn test_unknown_watch_error_message() {
    let (_map, alerts, orchestrator) = orchestrator(7);
    orchestrator.mount();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(
        *alerts.0.lock().unwrap(),
        vec!["알 수 없는 오류가 발생했습니다.".to_string()]
    );
}

#[test]
fn test_route_info_wire_format() {
    let summary = RouteInfo::Summary {
        distance_meters: 1432.0,
        duration_seconds: 1020.0,
        route_type: RouteType::Safe,
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"distanceMeters": 1432.0, "durationSeconds": 1020.0, "routeType": "safe"})
    );

    let error: RouteInfo =
        serde_json::from_str(r#"{"error": "경로 검색에 실패했습니다."}"#).unwrap();
    assert!(error.is_error());
}
