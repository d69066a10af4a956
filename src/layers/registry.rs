use crate::core::{category::Category, category::Place, geo::LatLng};
use crate::layers::marker::MarkerOptions;
use crate::prelude::HashMap;
use crate::sdk::{InfoWindowId, MapSdk, MarkerId};
use crate::ui::popup::{AddressState, InfoWindowContent, InfoWindowExclusivity, InfoWindowStyle};

/// Whether a category's overlays are on the map after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Active,
    Inactive,
}

impl ToggleState {
    pub fn is_active(self) -> bool {
        self == ToggleState::Active
    }
}

/// Identifies one overlay instance for the lifetime of its registration.
///
/// SDK handles may be recycled after removal; tokens never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnrichmentToken(u64);

/// A marker plus its info-window
#[derive(Debug, Clone)]
pub struct Overlay {
    pub marker: MarkerId,
    pub info_window: InfoWindowId,
    pub place: Place,
    pub content: InfoWindowContent,
    token: EnrichmentToken,
}

impl Overlay {
    pub fn token(&self) -> EnrichmentToken {
        self.token
    }
}

/// Address lookup owed to a freshly created overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichmentJob {
    pub token: EnrichmentToken,
    pub marker: MarkerId,
    pub position: LatLng,
}

/// Result of [`OverlayRegistry::activate`]
#[derive(Debug)]
pub struct Activation {
    pub state: ToggleState,
    pub jobs: Vec<EnrichmentJob>,
}

/// Sole owner of the marker and info-window handles.
///
/// Invariants: every registered marker has exactly one info-window, every
/// marker listed under a category has an overlay entry, and nothing here
/// refers to a handle that was removed from the map.
pub struct OverlayRegistry {
    /// Markers per active category, in place order
    categories: HashMap<Category, Vec<MarkerId>>,
    overlays: HashMap<MarkerId, Overlay>,
    next_token: u64,
    style: InfoWindowStyle,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::with_style(InfoWindowStyle::default())
    }

    pub fn with_style(style: InfoWindowStyle) -> Self {
        Self {
            categories: HashMap::default(),
            overlays: HashMap::default(),
            next_token: 0,
            style,
        }
    }

    /// Symmetric toggle: tears the category down if it is active, otherwise
    /// creates one overlay per place.
    pub fn activate(
        &mut self,
        map: &dyn MapSdk,
        exclusivity: &mut InfoWindowExclusivity,
        category: Category,
        places: &[Place],
    ) -> Activation {
        if self.deactivate(map, exclusivity, &category) {
            return Activation {
                state: ToggleState::Inactive,
                jobs: Vec::new(),
            };
        }

        let mut markers = Vec::with_capacity(places.len());
        let mut jobs = Vec::with_capacity(places.len());
        for place in places {
            let place = Place {
                category: category.clone(),
                ..place.clone()
            };
            let marker = map.add_marker(MarkerOptions::for_place(&place));
            let content = InfoWindowContent::for_place(&place);
            let info_window = map.add_info_window(&content, &self.style);

            self.next_token += 1;
            let token = EnrichmentToken(self.next_token);
            jobs.push(EnrichmentJob {
                token,
                marker,
                position: place.coords,
            });
            self.overlays.insert(
                marker,
                Overlay {
                    marker,
                    info_window,
                    place,
                    content,
                    token,
                },
            );
            markers.push(marker);
        }

        log::debug!("activated {} with {} overlays", category, markers.len());
        self.categories.insert(category, markers);
        Activation {
            state: ToggleState::Active,
            jobs,
        }
    }

    /// Removes every overlay of `category`. Returns false if it was not active.
    pub fn deactivate(
        &mut self,
        map: &dyn MapSdk,
        exclusivity: &mut InfoWindowExclusivity,
        category: &Category,
    ) -> bool {
        let Some(markers) = self.categories.remove(category) else {
            return false;
        };

        exclusivity.close_if(map, |active| markers.contains(&active.marker));
        for marker in &markers {
            if let Some(overlay) = self.overlays.remove(marker) {
                map.remove_info_window(overlay.info_window);
            }
            map.remove_marker(*marker);
        }

        log::debug!("deactivated {} ({} overlays removed)", category, markers.len());
        true
    }

    pub fn deactivate_all(&mut self, map: &dyn MapSdk, exclusivity: &mut InfoWindowExclusivity) {
        exclusivity.force_close(map);
        let categories: Vec<Category> = self.categories.keys().cloned().collect();
        for category in &categories {
            self.deactivate(map, exclusivity, category);
        }
    }

    /// Patches the address line if `token` still names the overlay on `marker`
    pub fn apply_address(
        &mut self,
        map: &dyn MapSdk,
        token: EnrichmentToken,
        marker: MarkerId,
        address: AddressState,
    ) -> bool {
        match self.overlays.get_mut(&marker) {
            Some(overlay) if overlay.token == token => {
                overlay.content.address = address;
                map.set_info_window_content(overlay.info_window, &overlay.content);
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, category: &Category) -> bool {
        self.categories.contains_key(category)
    }

    pub fn active_categories(&self) -> Vec<Category> {
        self.categories.keys().cloned().collect()
    }

    pub fn markers(&self, category: &Category) -> &[MarkerId] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn overlay(&self, marker: MarkerId) -> Option<&Overlay> {
        self.overlays.get(&marker)
    }

    pub fn info_window(&self, marker: MarkerId) -> Option<InfoWindowId> {
        self.overlays.get(&marker).map(|overlay| overlay.info_window)
    }

    /// Number of live overlays across all categories
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl Default for OverlayRegistry {
    fn default() -> Self {
        Self::new()
    }
}
