//! Category overlays: marker construction, the registry that owns them and
//! the manager that serializes input against it.

pub mod manager;
pub mod marker;
pub mod registry;

pub use manager::OverlayManager;
pub use marker::{MarkerIcon, MarkerOptions};
pub use registry::{Activation, EnrichmentJob, EnrichmentToken, Overlay, OverlayRegistry, ToggleState};
