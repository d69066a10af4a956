pub mod category;
pub mod config;
pub mod constants;
pub mod geo;
