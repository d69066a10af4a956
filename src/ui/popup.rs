use crate::core::{category::Place, constants::messages, geo::Point};
use crate::sdk::{InfoWindowId, MapSdk, MarkerId};
use serde::{Deserialize, Serialize};

/// Address line of an info-window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressState {
    Loading,
    Resolved(String),
    Unavailable,
}

impl AddressState {
    pub fn text(&self) -> &str {
        match self {
            AddressState::Loading => messages::ADDRESS_LOADING,
            AddressState::Resolved(address) => address,
            AddressState::Unavailable => messages::ADDRESS_UNAVAILABLE,
        }
    }
}

/// Structured info-window body.
///
/// SDKs that want markup call [`InfoWindowContent::to_html`]; others can lay
/// the fields out themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoWindowContent {
    pub title: String,
    pub address: AddressState,
    pub supplemental: Option<String>,
}

impl InfoWindowContent {
    /// Initial content for a place, address still loading
    pub fn for_place(place: &Place) -> Self {
        Self {
            title: place.name.clone(),
            address: AddressState::Loading,
            supplemental: place.category.supplemental_info().map(str::to_string),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div style="padding: 15px; min-width: 200px;"><h3 style="margin: 0 0 10px 0; font-size: 16px;">{}</h3><p style="margin: 5px 0;">{}: <span class="address">{}</span></p>"#,
            escape_html(&self.title),
            messages::ADDRESS_LABEL,
            escape_html(self.address.text()),
        );
        if let Some(line) = &self.supplemental {
            html.push_str(&format!(
                r#"<p style="margin: 5px 0;">{}</p>"#,
                escape_html(line)
            ));
        }
        html.push_str("</div>");
        html
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoWindowStyle {
    pub background_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub disable_anchor: bool,
    pub pixel_offset: Point,
}

impl Default for InfoWindowStyle {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            border_color: "transparent".to_string(),
            border_width: 0,
            disable_anchor: true,
            pixel_offset: Point::new(0.0, -10.0),
        }
    }
}

/// The open info-window and the marker it hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveWindow {
    pub window: InfoWindowId,
    pub marker: MarkerId,
}

/// Outcome of a resolved click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTransition {
    Opened,
    Closed,
}

/// Keeps at most one info-window open across the whole map.
///
/// Starts with nothing open; [`InfoWindowExclusivity::force_close`] is the
/// teardown rule.
#[derive(Debug, Default)]
pub struct InfoWindowExclusivity {
    active: Option<ActiveWindow>,
}

impl InfoWindowExclusivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ActiveWindow> {
        self.active
    }

    /// Applies one logical click on `marker`, whose window is `window`
    pub fn resolve_click(
        &mut self,
        map: &dyn MapSdk,
        marker: MarkerId,
        window: InfoWindowId,
    ) -> WindowTransition {
        if let Some(active) = self.active.take() {
            // Close before opening so two windows never coexist.
            map.close_info_window(active.window);
            if active.window == window {
                return WindowTransition::Closed;
            }
        }
        map.open_info_window(window, marker);
        self.active = Some(ActiveWindow { window, marker });
        WindowTransition::Opened
    }

    /// Closes the active window if `belongs` says it is affected
    pub fn close_if(&mut self, map: &dyn MapSdk, belongs: impl FnOnce(&ActiveWindow) -> bool) {
        if let Some(active) = self.active {
            if belongs(&active) {
                map.close_info_window(active.window);
                self.active = None;
            }
        }
    }

    pub fn force_close(&mut self, map: &dyn MapSdk) {
        if let Some(active) = self.active.take() {
            map.close_info_window(active.window);
        }
    }
}
