//! Good fortune: events that calm the city or fill the treasury.
//!
//! The unrest-relief events share one shape, so they are described by a
//! static [`Relief`] table and instantiated through [`UnrestRelief`].

use rand::Rng;
use rand::rngs::StdRng;

use citadel_events::{
    ConfigurationError, ContentModule, Effect, Event, EventDefinition, Probability,
};
use citadel_types::{EventKey, Resource, Severity};
use citadel_world::City;

/// Relief and windfall events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fortune;

impl ContentModule for Fortune {
    fn name(&self) -> &str {
        "fortune"
    }

    fn definitions(&self) -> Vec<EventDefinition> {
        vec![
            EventDefinition::new(GOOD_HARVEST.key.clone(), |city, rng| {
                UnrestRelief::build(&GOOD_HARVEST, city, rng)
            }),
            EventDefinition::new(ALMS.key.clone(), |city, rng| UnrestRelief::build(&ALMS, city, rng)),
            EventDefinition::new(MENDICANT_MONK.key.clone(), |city, rng| {
                UnrestRelief::build(&MENDICANT_MONK, city, rng)
            }),
            EventDefinition::new(WANDERING_JUGGLERS.key.clone(), |city, rng| {
                UnrestRelief::build(&WANDERING_JUGGLERS, city, rng)
            }),
            EventDefinition::new(WantedCriminal::KEY, WantedCriminal::build),
        ]
    }
}

// ============================================================================
// Unrest relief
// ============================================================================

/// Static description of an unrest-relief event.
#[derive(Debug)]
pub struct Relief {
    /// Catalog key.
    pub key: EventKey,
    /// Headline.
    pub title: &'static str,
    /// Chance while the city has unrest and inhabitants.
    pub probability: u32,
    /// Smallest reduction in percentage points.
    pub min: u32,
    /// Largest reduction in percentage points.
    pub max: u32,
    /// Narrative placed before the reduction.
    pub narrative: &'static str,
}

/// A bountiful harvest.
pub static GOOD_HARVEST: Relief = Relief {
    key: EventKey::from_static("good_harvest"),
    title: "Good Harvest",
    probability: 13,
    min: 1,
    max: 10,
    narrative: "A good harvest reduces food prices, bringing relief to the population.",
};

/// Wealthy burghers hand out alms.
pub static ALMS: Relief = Relief {
    key: EventKey::from_static("alms"),
    title: "Alms",
    probability: 15,
    min: 3,
    max: 5,
    narrative: "Members of the city council decided to provide alms for the sick and poor.",
};

/// A travelling monk preaches patience.
pub static MENDICANT_MONK: Relief = Relief {
    key: EventKey::from_static("mendicant_monk"),
    title: "Mendicant Monk",
    probability: 12,
    min: 1,
    max: 10,
    narrative: "A mendicant monk arrived in the city and cares for the weak and sick.",
};

/// Entertainers lift the mood.
pub static WANDERING_JUGGLERS: Relief = Relief {
    key: EventKey::from_static("wandering_jugglers"),
    title: "Wandering Jugglers",
    probability: 10,
    min: 1,
    max: 10,
    narrative: "A group of wandering jugglers performs in town, entertaining the citizens.",
};

/// An instance of a [`Relief`] bound to one city.
#[derive(Debug)]
pub struct UnrestRelief {
    relief: &'static Relief,
    initial_unrest: i64,
    applicable: bool,
    reduction: u32,
}

impl UnrestRelief {
    /// Roll the reduction for `city`.
    pub fn build(relief: &'static Relief, city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            relief,
            initial_unrest: city.savegame.unrest,
            applicable: city.savegame.unrest > 0 && city.savegame.population > 0,
            reduction: rng.random_range(relief.min..=relief.max),
        })
    }
}

impl Event for UnrestRelief {
    fn title(&self) -> &str {
        self.relief.title
    }

    fn severity(&self) -> Severity {
        Severity::Success
    }

    fn probability(&self) -> Probability {
        if self.applicable {
            Probability::from(self.relief.probability)
        } else {
            Probability::IMPOSSIBLE
        }
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::decrease(Resource::Unrest, self.reduction)]
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "{} The unrest drops by {}%.",
            self.relief.narrative,
            self.initial_unrest.saturating_sub(city.savegame.unrest)
        ))
    }
}

// ============================================================================
// Wanted Criminal
// ============================================================================

/// The guard catches a wanted criminal and collects the bounty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantedCriminal {
    bounty: u32,
}

impl WantedCriminal {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("wanted_criminal");

    fn build(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            bounty: rng.random_range(100..=300),
        })
    }
}

impl Event for WantedCriminal {
    fn title(&self) -> &str {
        "Wanted Criminal"
    }

    fn severity(&self) -> Severity {
        Severity::Success
    }

    fn probability(&self) -> Probability {
        Probability::from(20)
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::increase(Resource::Coins, self.bounty)]
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "The magistrate caught a wanted criminal. The malefactor was handed over to the \
             King's guard, rewarding you with {} coins.",
            self.bounty
        ))
    }
}
