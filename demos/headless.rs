use safewalk::{
    background::geocode::GoogleGeocoder,
    prelude::*,
    routing::client::RelayRouteClient,
    traits::LogNotifier,
};

/// Drives the overlay and route components against the in-memory map.
///
/// Set `GOOGLE_MAPS_API_KEY` for real addresses and `SAFEWALK_RELAY_URL`
/// to point at a running `safewalk-relay`.
#[tokio::main]
async fn main() -> safewalk::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🗺️ SafeWalk Headless Example");
    println!("============================");

    let config = SafeWalkConfig::default().with_env_overrides();
    config.validate()?;

    let map = Arc::new(HeadlessMap::with_options(config.map.clone()));
    let geocoder = Arc::new(GoogleGeocoder::new(config.geocoder.clone()));
    let overlays = OverlayManager::new(map.clone(), geocoder, &config.overlays);

    // Category toggles
    println!("\n📍 Toggling categories:");
    let stores = vec![
        Place::new("CU 반월당점", LatLng::new(35.8655, 128.5935), Category::ConvenienceStore),
        Place::new("GS25 동성로점", LatLng::new(35.8689, 128.5963), Category::ConvenienceStore),
    ];
    let bells = vec![Place::new(
        "중앙로 비상벨",
        LatLng::new(35.8702, 128.5941),
        Category::EmergencyBell,
    )];

    // Three quick presses collapse into one toggle
    let presses: Vec<_> = (0..3)
        .map(|_| overlays.request_toggle(Category::ConvenienceStore, stores.clone()))
        .collect();
    for state in futures::future::join_all(presses).await {
        println!("   편의점 -> {:?}", state?);
    }
    let state = overlays
        .request_toggle(Category::EmergencyBell, bells)
        .await?;
    println!("   안전비상벨 -> {:?}", state);
    println!("   Markers on map: {}", map.marker_count());

    // Marker clicks
    println!("\n💬 Clicking markers:");
    let store_markers = overlays.markers(&Category::ConvenienceStore);
    for marker in &store_markers {
        overlays.marker_clicked(*marker);
        tokio::time::sleep(config.overlays.click_window() * 2).await;
        println!(
            "   Clicked {} -> open windows: {}",
            marker,
            map.open_info_window_count()
        );
    }

    // Give address lookups a moment
    tokio::time::sleep(Duration::from_secs(2)).await;
    for marker in &store_markers {
        if let Some(content) = overlays.content(*marker) {
            println!("   {} · {}", content.title, content.address.text());
        }
    }

    // Route
    println!("\n🚶 Drawing a walking route:");
    let start = LatLng::new(35.8714354, 128.601445);
    let orchestrator = RouteOrchestrator::new(
        map.clone(),
        Arc::new(RelayRouteClient::new(&config.route)),
        Arc::new(StaticLocation::new(start)),
        Arc::new(LogNotifier),
        &config,
    );
    orchestrator.mount();

    if let Some(draw) = orchestrator.set_endpoints(start, LatLng::new(35.8688, 128.5936)) {
        match draw.finished().await {
            RouteOutcome::Applied(RouteInfo::Summary {
                distance_meters,
                duration_seconds,
                route_type,
            }) => println!(
                "   {:?} route: {} / {}",
                route_type,
                format_distance(distance_meters),
                format_time(duration_seconds)
            ),
            RouteOutcome::Applied(RouteInfo::Error { error }) => println!("   ❌ {}", error),
            RouteOutcome::Superseded => println!("   Route superseded"),
        }
    }
    println!("   Polylines on map: {}", map.polylines().len());

    // Teardown
    orchestrator.teardown();
    overlays.deactivate_all();
    println!("\n🧹 After teardown:");
    println!("   Markers: {}", map.marker_count());
    println!("   Info windows: {}", map.info_window_count());
    println!("   Stats: {:?}", map.stats());

    Ok(())
}
