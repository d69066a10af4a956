//! `GET /api/direction?start=lon,lat&goal=lon,lat`
//!
//! Validates both endpoints, asks the TMAP pedestrian API for a route and
//! returns its feature collection with the route totals lifted to the top.

use crate::error::RelayError;
use crate::RelayState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use safewalk::LatLng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

const COORD_TYPE: &str = "WGS84GEO";
const START_NAME: &str = "출발지";
const END_NAME: &str = "도착지";

#[derive(Debug, Deserialize)]
pub struct DirectionQuery {
    pub start: Option<String>,
    pub goal: Option<String>,
}

pub async fn get_direction(
    State(state): State<Arc<RelayState>>,
    Query(query): Query<DirectionQuery>,
) -> Response {
    match direction(&state, query).await {
        Ok(data) => Json(json!({ "success": true, "data": data })).into_response(),
        Err(err) => {
            if err.status().is_server_error() {
                error!("pedestrian route request failed: {:?}", err);
            } else {
                debug!("rejected direction request: {}", err);
            }
            err.respond(state.environment)
        }
    }
}

async fn direction(state: &RelayState, query: DirectionQuery) -> Result<Value, RelayError> {
    let (start, goal) = parse_endpoints(query)?;
    let api_key = state.api_key.as_deref().ok_or(RelayError::MissingApiKey)?;

    let response = state
        .http
        .post(&state.tmap_url)
        .header("appKey", api_key)
        .json(&json!({
            "startX": start.lng,
            "startY": start.lat,
            "endX": goal.lng,
            "endY": goal.lat,
            "reqCoordType": COORD_TYPE,
            "resCoordType": COORD_TYPE,
            "startName": START_NAME,
            "endName": END_NAME,
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!("TMAP error response: {}", body);
        return Err(RelayError::Upstream(status.to_string()));
    }

    let data: Value = response
        .json()
        .await
        .map_err(|_| RelayError::InvalidResponse)?;
    with_totals(data)
}

fn parse_endpoints(query: DirectionQuery) -> Result<(LatLng, LatLng), RelayError> {
    let present = |value: Option<String>| value.filter(|value| !value.is_empty());
    let (Some(start), Some(goal)) = (present(query.start), present(query.goal)) else {
        return Err(RelayError::MissingCoordinates);
    };
    let start = LatLng::parse_lon_lat(&start).ok_or(RelayError::InvalidCoordinates)?;
    let goal = LatLng::parse_lon_lat(&goal).ok_or(RelayError::InvalidCoordinates)?;
    Ok((start, goal))
}

/// Copies `totalDistance`/`totalTime` from the first feature's properties
/// onto the collection, defaulting to 0.
fn with_totals(mut data: Value) -> Result<Value, RelayError> {
    let features = data
        .get("features")
        .and_then(Value::as_array)
        .ok_or(RelayError::InvalidResponse)?;

    let total = |name: &str| {
        features
            .first()
            .and_then(|feature| feature.pointer(&format!("/properties/{name}")))
            .filter(|value| value.is_number())
            .cloned()
            .unwrap_or_else(|| json!(0))
    };
    let total_distance = total("totalDistance");
    let total_time = total("totalTime");

    let object = data.as_object_mut().ok_or(RelayError::InvalidResponse)?;
    object.insert("totalDistance".to_string(), total_distance);
    object.insert("totalTime".to_string(), total_time);
    Ok(data)
}
