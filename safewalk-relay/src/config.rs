use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

pub const DEFAULT_TMAP_URL: &str = "https://apis.openapi.sk.com/tmap/routes/pedestrian?version=1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Error responses carry internal details only in development
    pub fn exposes_details(self) -> bool {
        self == Environment::Development
    }
}

/// Walking-route relay in front of the TMAP pedestrian API
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "RELAY_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Pedestrian routing endpoint
    #[arg(long, env = "TMAP_URL", default_value = DEFAULT_TMAP_URL)]
    pub tmap_url: String,

    /// TMAP application key sent as the `appKey` header
    #[arg(long, env = "TMAP_API_KEY", hide_env_values = true)]
    pub tmap_api_key: Option<String>,

    #[arg(long, env = "NODE_ENV", value_enum, default_value_t = Environment::Production)]
    pub environment: Environment,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}
