//! Server-side relay for walking-route requests
//!
//! Browsers cannot call the TMAP pedestrian API directly without exposing
//! the application key, so the map client asks this relay instead.

pub mod config;
pub mod direction;
pub mod error;

use axum::routing::get;
use axum::Router;
use config::{Args, Environment};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::RelayError;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct RelayState {
    pub http: reqwest::Client,
    pub tmap_url: String,
    pub api_key: Option<String>,
    pub environment: Environment,
}

impl RelayState {
    pub fn from_args(args: &Args) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("safewalk-relay/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(args.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            tmap_url: args.tmap_url.clone(),
            api_key: args.tmap_api_key.clone().filter(|key| !key.is_empty()),
            environment: args.environment,
        })
    }
}

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/api/direction", get(direction::get_direction))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}
