//! Probability-weighted event selection.
//!
//! One threshold `R` is drawn per turn from `0..threshold_max` and shared
//! by every candidate. Each enabled definition in the catalog is instantiated for
//! the city with its own seed from the turn RNG, and fires if its
//! probability, rescaled from percent to `0..=threshold_max` and clamped,
//! is strictly greater than `R`. Any number of events may fire
//! in the same turn, and the result keeps catalog order.

use rand::{Rng, RngCore};
use tracing::{debug, info};

use citadel_types::EventKey;
use citadel_world::City;

use crate::catalog::Catalog;
use crate::event::{Event, Probability};

/// An event instance that cleared the turn threshold.
pub struct SelectedEvent {
    /// Definition the instance was built from.
    pub key: EventKey,
    /// Seed the instance's magnitudes were drawn from.
    pub roll_seed: u64,
    /// Clamped probability the instance reported.
    pub probability: Probability,
    /// The instance.
    pub event: Box<dyn Event>,
}

impl core::fmt::Debug for SelectedEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectedEvent")
            .field("key", &self.key)
            .field("title", &self.event.title())
            .field("roll_seed", &self.roll_seed)
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}

/// Result of one selection pass.
#[derive(Debug)]
pub struct Selection {
    /// The shared threshold of this turn.
    pub threshold: u32,
    /// Events that fired, in catalog order.
    pub events: Vec<SelectedEvent>,
}

impl Selection {
    /// Whether nothing fired.
    pub fn is_quiet(&self) -> bool {
        self.events.is_empty()
    }
}

/// Draw the shared threshold for one turn.
pub fn roll_threshold<R: Rng + ?Sized>(rng: &mut R, threshold_max: u32) -> u32 {
    rng.random_range(0..threshold_max.max(1))
}

/// Filter the catalog against a fixed threshold.
pub fn select_with_threshold<R: RngCore + ?Sized>(
    catalog: &Catalog,
    city: &City,
    threshold: u32,
    threshold_max: u32,
    rng: &mut R,
) -> Vec<SelectedEvent> {
    let mut selected = Vec::new();
    for definition in catalog.candidates() {
        let roll_seed = rng.next_u64();
        let event = definition.instantiate(city, roll_seed);
        let probability = event.probability().normalized(threshold_max);
        let fires = probability.clears(threshold);
        debug!(
            key = %definition.key,
            %probability,
            threshold,
            fires,
            "Event candidate evaluated"
        );
        if fires {
            selected.push(SelectedEvent {
                key: definition.key.clone(),
                roll_seed,
                probability,
                event,
            });
        }
    }
    selected
}

/// Roll the turn threshold and select every event that clears it.
pub fn select<R: Rng + ?Sized>(
    catalog: &Catalog,
    city: &City,
    threshold_max: u32,
    rng: &mut R,
) -> Selection {
    let threshold = roll_threshold(rng, threshold_max);
    let events = select_with_threshold(catalog, city, threshold, threshold_max, rng);
    info!(
        threshold,
        candidates = catalog.candidates().count(),
        selected = events.len(),
        "Events selected"
    );
    Selection { threshold, events }
}
