//! The registry of event definitions available to selection.
//!
//! Content crates expose their definitions through [`ContentModule`]s; the
//! engine asks each module for its definitions at startup and builds one
//! [`Catalog`]. Registration order is discovery order, which is also the
//! order selected events are processed in.
//!
//! A [`PendingChoice`](citadel_types::PendingChoice) stores only the
//! [`EventKey`] and a roll seed, so the catalog is also how a deferred event
//! is rebuilt after a restart. Disabling a key only keeps it out of
//! selection; its definition stays registered so decisions deferred before
//! it was disabled can still be shown and resolved.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use citadel_types::EventKey;
use citadel_world::City;

use crate::error::ConfigurationError;
use crate::event::Event;

/// Builds an event bound to one city. All magnitude randomness must be
/// drawn from the supplied RNG.
pub type EventConstructor = fn(&City, &mut StdRng) -> Box<dyn Event>;

/// One registered event definition.
#[derive(Debug, Clone)]
pub struct EventDefinition {
    /// Stable identifier stored with pending choices.
    pub key: EventKey,
    /// Constructor.
    pub construct: EventConstructor,
}

impl EventDefinition {
    /// Pair a key with its constructor.
    pub const fn new(key: EventKey, construct: EventConstructor) -> Self {
        Self { key, construct }
    }

    /// Build an instance whose randomness is fully determined by `seed`.
    pub fn instantiate(&self, city: &City, seed: u64) -> Box<dyn Event> {
        let mut rng = StdRng::seed_from_u64(seed);
        (self.construct)(city, &mut rng)
    }
}

/// A package of event definitions.
pub trait ContentModule {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Every definition this module provides.
    fn definitions(&self) -> Vec<EventDefinition>;
}

/// The discovered set of event definitions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<EventDefinition>,
    disabled: Vec<EventKey>,
}

impl Catalog {
    /// An empty catalog.
    pub const fn new() -> Self {
        Self {
            definitions: Vec::new(),
            disabled: Vec::new(),
        }
    }

    /// Collect the definitions of every module and disable the `disabled`
    /// keys.
    ///
    /// A key provided twice is a configuration error.
    pub fn discover(
        modules: &[&dyn ContentModule],
        disabled: &[String],
    ) -> Result<Self, ConfigurationError> {
        let mut catalog = Self::new();
        for module in modules {
            for definition in module.definitions() {
                if disabled.iter().any(|d| d == definition.key.as_str()) {
                    debug!(module = module.name(), key = %definition.key, "Event disabled");
                    catalog.disabled.push(definition.key.clone());
                }
                catalog.register(definition)?;
            }
        }
        info!(
            events = catalog.len(),
            disabled = catalog.disabled.len(),
            modules = modules.len(),
            "Event catalog discovered"
        );
        Ok(catalog)
    }

    /// Add one definition at the end of the catalog.
    pub fn register(&mut self, definition: EventDefinition) -> Result<(), ConfigurationError> {
        if self.get(&definition.key).is_some() {
            return Err(ConfigurationError::DuplicateEvent {
                key: definition.key,
            });
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Keep `key` out of selection. Its definition can still be
    /// instantiated.
    pub fn disable(&mut self, key: EventKey) {
        if !self.is_disabled(&key) {
            self.disabled.push(key);
        }
    }

    /// Whether `key` is kept out of selection.
    pub fn is_disabled(&self, key: &EventKey) -> bool {
        self.disabled.contains(key)
    }

    /// Definitions selection may draw from, in discovery order.
    pub fn candidates(&self) -> impl Iterator<Item = &EventDefinition> {
        self.definitions.iter().filter(move |d| !self.is_disabled(&d.key))
    }

    /// Look up a definition by key, disabled or not.
    pub fn get(&self, key: &EventKey) -> Option<&EventDefinition> {
        self.definitions.iter().find(|d| &d.key == key)
    }

    /// Rebuild an event from its key and roll seed.
    pub fn instantiate(
        &self,
        key: &EventKey,
        city: &City,
        seed: u64,
    ) -> Result<Box<dyn Event>, ConfigurationError> {
        self.get(key)
            .map(|d| d.instantiate(city, seed))
            .ok_or_else(|| ConfigurationError::UnknownEvent { key: key.clone() })
    }

    /// Definitions in discovery order.
    pub fn definitions(&self) -> &[EventDefinition] {
        &self.definitions
    }

    /// Keys in discovery order.
    pub fn keys(&self) -> impl Iterator<Item = &EventKey> {
        self.definitions.iter().map(|d| &d.key)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definition is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::Rng;

    use citadel_types::Savegame;
    use citadel_world::starting_city;

    use super::*;
    use crate::event::Probability;

    struct Rolled(u32);

    impl Event for Rolled {
        fn title(&self) -> &str {
            "Rolled"
        }

        fn probability(&self) -> Probability {
            Probability::from(self.0)
        }
    }

    fn rolled(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Rolled(rng.random_range(0..1000)))
    }

    struct Pack(&'static [&'static str]);

    impl ContentModule for Pack {
        fn name(&self) -> &str {
            "pack"
        }

        fn definitions(&self) -> Vec<EventDefinition> {
            self.0
                .iter()
                .map(|key| EventDefinition::new(EventKey::from_static(key), rolled))
                .collect()
        }
    }

    #[test]
    fn discovery_keeps_module_order() {
        let first = Pack(&["fire", "plague"]);
        let second = Pack(&["riot"]);
        let catalog = Catalog::discover(&[&first, &second], &[]).unwrap();
        let keys: Vec<&str> = catalog.keys().map(EventKey::as_str).collect();
        assert_eq!(keys, vec!["fire", "plague", "riot"]);
    }

    #[test]
    fn duplicate_keys_are_fatal() {
        let first = Pack(&["fire"]);
        let second = Pack(&["fire"]);
        let result = Catalog::discover(&[&first, &second], &[]);
        assert!(matches!(result, Err(ConfigurationError::DuplicateEvent { .. })));
    }

    #[test]
    fn disabled_keys_are_not_candidates() {
        let pack = Pack(&["fire", "plague", "riot"]);
        let catalog = Catalog::discover(&[&pack], &["plague".to_owned()]).unwrap();
        let candidates: Vec<&str> = catalog.candidates().map(|d| d.key.as_str()).collect();
        assert_eq!(candidates, vec!["fire", "riot"]);
        assert_eq!(catalog.len(), 3);

        let plague = EventKey::from_static("plague");
        assert!(catalog.is_disabled(&plague));
        let city = starting_city(Savegame::new("Rivenhold")).unwrap();
        assert!(catalog.instantiate(&plague, &city, 5).is_ok());
    }

    #[test]
    fn disabling_twice_is_harmless() {
        let pack = Pack(&["fire"]);
        let mut catalog = Catalog::discover(&[&pack], &[]).unwrap();
        catalog.disable(EventKey::from_static("fire"));
        catalog.disable(EventKey::from_static("fire"));
        assert_eq!(catalog.candidates().count(), 0);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn same_seed_rebuilds_same_instance() {
        let pack = Pack(&["fire"]);
        let catalog = Catalog::discover(&[&pack], &[]).unwrap();
        let city = starting_city(Savegame::new("Rivenhold")).unwrap();
        let key = EventKey::from_static("fire");

        let a = catalog.instantiate(&key, &city, 99).unwrap();
        let b = catalog.instantiate(&key, &city, 99).unwrap();
        assert_eq!(a.probability(), b.probability());
    }

    #[test]
    fn unknown_key_is_a_configuration_error() {
        let catalog = Catalog::new();
        let city = starting_city(Savegame::new("Rivenhold")).unwrap();
        let result = catalog.instantiate(&EventKey::from_static("comet"), &city, 1);
        assert!(matches!(result, Err(ConfigurationError::UnknownEvent { .. })));
    }
}
