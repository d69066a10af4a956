use crate::background::geocode::resolve_address;
use crate::core::category::{Category, Place};
use crate::core::config::OverlayConfig;
use crate::layers::registry::{EnrichmentJob, OverlayRegistry};
use crate::runtime::DebounceSlots;
use crate::sdk::{InfoWindowId, MapSdk, MarkerId};
use crate::traits::ReverseGeocoder;
use crate::ui::popup::{ActiveWindow, InfoWindowContent, InfoWindowExclusivity, WindowTransition};
use crate::{MapError, Result};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

pub use crate::layers::registry::ToggleState;

/// Toggle waiting out the debounce window
struct PendingToggle {
    places: Vec<Place>,
    /// Every caller coalesced into this toggle
    waiters: Vec<oneshot::Sender<ToggleState>>,
}

struct OverlayState {
    registry: OverlayRegistry,
    exclusivity: InfoWindowExclusivity,
    toggles: DebounceSlots<Category, PendingToggle>,
    /// Click count per marker within the current click window
    clicks: DebounceSlots<MarkerId, u32>,
}

struct Shared {
    map: Arc<dyn MapSdk>,
    geocoder: Arc<dyn ReverseGeocoder>,
    state: Mutex<OverlayState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Front door for category toggles and marker clicks.
///
/// Cheap to clone; all clones drive the same registry. Timers and address
/// lookups run as tokio tasks, so the manager must be used from inside a
/// tokio runtime.
#[derive(Clone)]
pub struct OverlayManager {
    shared: Arc<Shared>,
}

impl OverlayManager {
    pub fn new(
        map: Arc<dyn MapSdk>,
        geocoder: Arc<dyn ReverseGeocoder>,
        config: &OverlayConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                map,
                geocoder,
                state: Mutex::new(OverlayState {
                    registry: OverlayRegistry::new(),
                    exclusivity: InfoWindowExclusivity::new(),
                    toggles: DebounceSlots::new(config.toggle_debounce()),
                    clicks: DebounceSlots::new(config.click_window()),
                }),
            }),
        }
    }

    /// Debounced toggle of `category`.
    ///
    /// Only the last request inside the debounce window runs; every request
    /// it absorbed resolves with the same resulting state. Fails with
    /// [`MapError::Cancelled`] if [`OverlayManager::deactivate_all`] drops
    /// the request before it runs.
    pub fn request_toggle(
        &self,
        category: Category,
        places: Vec<Place>,
    ) -> impl Future<Output = Result<ToggleState>> + Send + 'static {
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.shared.lock();
            let mut waiters = state
                .toggles
                .cancel(&category)
                .map(|pending| pending.waiters)
                .unwrap_or_default();
            waiters.push(tx);

            let shared = Arc::clone(&self.shared);
            let key = category.clone();
            state.toggles.arm(
                category,
                PendingToggle { places, waiters },
                move |generation| async move { fire_toggle(&shared, key, generation) },
            );
        }

        async move {
            rx.await
                .map_err(|_| MapError::Cancelled("category toggle"))
        }
    }

    /// Toggles `category` right away, bypassing the debounce window.
    ///
    /// A debounced request still pending for `category` is dropped, and its
    /// callers resolve with [`MapError::Cancelled`].
    pub fn toggle_now(&self, category: Category, places: &[Place]) -> ToggleState {
        let (toggle, jobs) = {
            let mut guard = self.shared.lock();
            let state = &mut *guard;
            if let Some(pending) = state.toggles.cancel(&category) {
                log::debug!(
                    "immediate toggle of {} supersedes {} pending request(s)",
                    category,
                    pending.waiters.len()
                );
            }
            let activation = state.registry.activate(
                self.shared.map.as_ref(),
                &mut state.exclusivity,
                category,
                places,
            );
            (activation.state, activation.jobs)
        };
        spawn_enrichment(&self.shared, jobs);
        toggle
    }

    /// Raw click from the SDK. Clicks on the same marker inside the click
    /// window collapse into one.
    pub fn marker_clicked(&self, marker: MarkerId) {
        let mut state = self.shared.lock();
        if state.registry.info_window(marker).is_none() {
            log::debug!("ignoring click on unregistered {}", marker);
            return;
        }

        let count = state.clicks.cancel(&marker).unwrap_or(0) + 1;
        let shared = Arc::clone(&self.shared);
        state.clicks.arm(marker, count, move |generation| async move {
            fire_click(&shared, marker, generation)
        });
    }

    /// Applies one logical click immediately
    pub fn resolve_click(&self, marker: MarkerId) -> Option<WindowTransition> {
        let mut guard = self.shared.lock();
        resolve_click_locked(&mut guard, self.shared.map.as_ref(), marker)
    }

    /// Full teardown: drops pending toggles and clicks, closes the active
    /// window and removes every overlay.
    pub fn deactivate_all(&self) {
        let mut guard = self.shared.lock();
        let state = &mut *guard;
        state.toggles.cancel_all();
        state.clicks.cancel_all();
        state
            .registry
            .deactivate_all(self.shared.map.as_ref(), &mut state.exclusivity);
        log::info!("all overlays removed");
    }

    pub fn is_active(&self, category: &Category) -> bool {
        self.shared.lock().registry.is_active(category)
    }

    pub fn is_toggle_pending(&self, category: &Category) -> bool {
        self.shared.lock().toggles.is_pending(category)
    }

    pub fn active_categories(&self) -> Vec<Category> {
        self.shared.lock().registry.active_categories()
    }

    pub fn markers(&self, category: &Category) -> Vec<MarkerId> {
        self.shared.lock().registry.markers(category).to_vec()
    }

    pub fn info_window(&self, marker: MarkerId) -> Option<InfoWindowId> {
        self.shared.lock().registry.info_window(marker)
    }

    pub fn content(&self, marker: MarkerId) -> Option<InfoWindowContent> {
        self.shared
            .lock()
            .registry
            .overlay(marker)
            .map(|overlay| overlay.content.clone())
    }

    pub fn active_window(&self) -> Option<ActiveWindow> {
        self.shared.lock().exclusivity.active()
    }

    pub fn overlay_count(&self) -> usize {
        self.shared.lock().registry.len()
    }
}

fn fire_toggle(shared: &Arc<Shared>, category: Category, generation: u64) {
    let (toggle, waiters, jobs) = {
        let mut guard = shared.lock();
        let state = &mut *guard;
        let Some(pending) = state.toggles.take_if_current(&category, generation) else {
            return;
        };
        let activation = state.registry.activate(
            shared.map.as_ref(),
            &mut state.exclusivity,
            category,
            &pending.places,
        );
        (activation.state, pending.waiters, activation.jobs)
    };

    spawn_enrichment(shared, jobs);
    for waiter in waiters {
        // The caller may have stopped listening.
        let _ = waiter.send(toggle);
    }
}

fn fire_click(shared: &Arc<Shared>, marker: MarkerId, generation: u64) {
    let mut guard = shared.lock();
    let Some(count) = guard.clicks.take_if_current(&marker, generation) else {
        return;
    };
    if count > 1 {
        log::debug!("{} clicks on {} collapsed into one", count, marker);
    }
    resolve_click_locked(&mut guard, shared.map.as_ref(), marker);
}

fn resolve_click_locked(
    state: &mut OverlayState,
    map: &dyn MapSdk,
    marker: MarkerId,
) -> Option<WindowTransition> {
    let window = state.registry.info_window(marker)?;
    Some(state.exclusivity.resolve_click(map, marker, window))
}

fn spawn_enrichment(shared: &Arc<Shared>, jobs: Vec<EnrichmentJob>) {
    for job in jobs {
        let shared = Arc::clone(shared);
        tokio::spawn(async move {
            let address = resolve_address(shared.geocoder.as_ref(), job.position).await;
            let applied = shared.lock().registry.apply_address(
                shared.map.as_ref(),
                job.token,
                job.marker,
                address,
            );
            if !applied {
                log::debug!("dropping address for {}: overlay no longer exists", job.marker);
            }
        });
    }
}
