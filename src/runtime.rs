//! Timer-driven coalescing of bursty input
//!
//! [`DebounceSlots`] keeps one pending request per key. Arming a slot
//! replaces whatever was pending for that key and aborts its timer, so only
//! the last request in a burst fires. Timers are tokio tasks; a fired timer
//! still has to present the generation it was armed with before it may
//! consume the slot, which covers a timer that was already running when it
//! got superseded.

use crate::prelude::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;
use tokio::task::JoinHandle;

struct Pending<V> {
    generation: u64,
    value: V,
    timer: JoinHandle<()>,
}

/// Single-slot pending cells keyed by `K`
pub struct DebounceSlots<K, V> {
    delay: Duration,
    next_generation: u64,
    slots: HashMap<K, Pending<V>>,
}

impl<K, V> DebounceSlots<K, V>
where
    K: Eq + Hash,
{
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_generation: 0,
            slots: HashMap::default(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Removes the pending value for `key` and aborts its timer
    pub fn cancel(&mut self, key: &K) -> Option<V> {
        self.slots.remove(key).map(|pending| {
            pending.timer.abort();
            pending.value
        })
    }

    /// Stores `value` for `key` and schedules `fire(generation)` after the delay.
    ///
    /// Anything already pending for `key` is dropped along with its timer;
    /// call [`DebounceSlots::cancel`] first to carry it over.
    pub fn arm<F, Fut>(&mut self, key: K, value: V, fire: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.next_generation += 1;
        let generation = self.next_generation;
        let delay = self.delay;
        let task = fire(generation);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        if let Some(previous) = self.slots.insert(
            key,
            Pending {
                generation,
                value,
                timer,
            },
        ) {
            previous.timer.abort();
        }
        generation
    }

    /// Consumes the slot only if it still belongs to `generation`
    pub fn take_if_current(&mut self, key: &K, generation: u64) -> Option<V> {
        match self.slots.get(key) {
            Some(pending) if pending.generation == generation => {
                self.slots.remove(key).map(|pending| pending.value)
            }
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.slots.get_mut(key).map(|pending| &mut pending.value)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Aborts every timer and drops every pending value
    pub fn cancel_all(&mut self) {
        for (_, pending) in self.slots.drain() {
            pending.timer.abort();
        }
    }
}

impl<K, V> Drop for DebounceSlots<K, V> {
    fn drop(&mut self) {
        for pending in self.slots.values() {
            pending.timer.abort();
        }
    }
}
