use crate::core::{
    category::{Category, Place},
    constants::{
        messages, LOCATION_ICON_ANCHOR, LOCATION_ICON_SIZE, LOCATION_Z_INDEX, MARKER_ICON_ANCHOR,
        MARKER_ICON_SIZE,
    },
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};

/// HTML icon content with its box and hot-spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    pub content: String,
    pub size: Point,
    pub anchor: Point,
}

impl MarkerIcon {
    /// Category icon rendered as a background image
    pub fn for_category(category: &Category) -> Self {
        let content = format!(
            r#"<div style="width: 32px; height: 32px; background: url({}) no-repeat center; background-size: contain;"></div>"#,
            category.icon_url()
        );
        Self {
            content,
            size: Point::new(MARKER_ICON_SIZE.0 as f64, MARKER_ICON_SIZE.1 as f64),
            anchor: Point::new(MARKER_ICON_ANCHOR.0 as f64, MARKER_ICON_ANCHOR.1 as f64),
        }
    }

    /// Blue dot with a white ring
    pub fn current_location() -> Self {
        let content = concat!(
            r#"<div style="position: relative;">"#,
            r#"<div style="width: 20px; height: 20px; background: #4A90E2; border: 3px solid white; border-radius: 50%; box-shadow: 0 2px 4px rgba(0,0,0,0.3);">"#,
            r#"<div style="width: 6px; height: 6px; background: white; border-radius: 50%; position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%);"></div>"#,
            r#"</div></div>"#
        );
        Self {
            content: content.to_string(),
            size: Point::new(LOCATION_ICON_SIZE.0 as f64, LOCATION_ICON_SIZE.1 as f64),
            anchor: Point::new(LOCATION_ICON_ANCHOR.0 as f64, LOCATION_ICON_ANCHOR.1 as f64),
        }
    }
}

/// Everything an SDK needs to place a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub title: Option<String>,
    /// `None` means the SDK's default pin
    pub icon: Option<MarkerIcon>,
    pub z_index: i32,
}

impl MarkerOptions {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            title: None,
            icon: None,
            z_index: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: MarkerIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn for_place(place: &Place) -> Self {
        Self::new(place.coords)
            .with_title(place.name.clone())
            .with_icon(MarkerIcon::for_category(&place.category))
    }

    pub fn current_location(position: LatLng) -> Self {
        Self::new(position)
            .with_title(messages::CURRENT_LOCATION)
            .with_icon(MarkerIcon::current_location())
            .with_z_index(LOCATION_Z_INDEX)
    }
}
