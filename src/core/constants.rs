//! Core constants for the pedestrian map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Map center used until a location fix arrives (Daegu city hall area).
pub const DEFAULT_CENTER: (f64, f64) = (35.8714354, 128.601445);

/// Initial map zoom level.
pub const DEFAULT_ZOOM: f64 = 14.0;

/// Coalescing window for repeated category toggles.
pub const TOGGLE_DEBOUNCE_MS: u64 = 10;

/// Window in which repeated marker clicks collapse into one click.
pub const CLICK_WINDOW_MS: u64 = 200;

/// POI marker icon box in pixels.
pub const MARKER_ICON_SIZE: (u32, u32) = (30, 30);

/// Hot-spot inside the POI icon (its center).
pub const MARKER_ICON_ANCHOR: (u32, u32) = (15, 15);

/// Current-location dot and its anchor.
pub const LOCATION_ICON_SIZE: (u32, u32) = (20, 20);
pub const LOCATION_ICON_ANCHOR: (u32, u32) = (10, 10);

/// Current-location marker draws above POI markers.
pub const LOCATION_Z_INDEX: i32 = 100;

/// Inset kept around a route when fitting the viewport to it.
pub const ROUTE_FIT_PADDING: u32 = 50;

/// Watch options for continuous positioning.
pub const WATCH_TIMEOUT_MS: u64 = 5_000;
pub const WATCH_MAXIMUM_AGE_MS: u64 = 0;

/// Icon used for categories outside the known taxonomy.
pub const DEFAULT_MARKER_ICON: &str = "/images/default-marker.png";

/// User-facing strings.
pub mod messages {
    pub const ADDRESS_LOADING: &str = "주소 불러오는 중...";
    pub const ADDRESS_UNAVAILABLE: &str = "주소 정보를 불러올 수 없습니다.";
    pub const ADDRESS_LABEL: &str = "주소";
    pub const COUNTRY_PREFIX: &str = "대한민국 ";

    pub const CURRENT_LOCATION: &str = "현재 위치";

    pub const LOCATION_PERMISSION_DENIED: &str = "위치 정보 접근 권한이 거부되었습니다.";
    pub const LOCATION_UNAVAILABLE: &str = "위치 정보를 사용할 수 없습니다.";
    pub const LOCATION_TIMEOUT: &str = "위치 정보 요청 시간이 초과되었습니다.";
    pub const LOCATION_UNKNOWN: &str = "알 수 없는 오류가 발생했습니다.";

    pub const ROUTE_START: &str = "출발지";
    pub const ROUTE_GOAL: &str = "도착지";
    pub const ROUTE_FAILED: &str = "경로 검색에 실패했습니다.";
}
