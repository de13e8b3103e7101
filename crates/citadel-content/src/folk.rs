//! Flavor anecdotes. They change nothing but give the year some colour.

use citadel_events::{ConfigurationError, ContentModule, Event, EventDefinition, Probability};
use citadel_types::EventKey;
use citadel_world::City;

/// Anecdotes without mechanical effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct Folk;

/// One anecdote.
#[derive(Debug)]
pub struct Anecdote {
    /// Catalog key.
    pub key: EventKey,
    /// Headline.
    pub title: &'static str,
    /// Chance while anybody lives in the city.
    pub probability: u32,
    /// The whole outcome text.
    pub text: &'static str,
}

/// A thief with a conscience.
pub static HONEST_THIEF: Anecdote = Anecdote {
    key: EventKey::from_static("honest_thief"),
    title: "The Honest Thief",
    probability: 1,
    text: "Someone left a note on a stolen purse reading: \"You dropped this. I took it.\"",
};

/// The baker flatters the mayor.
pub static BAKERS_BRAG: Anecdote = Anecdote {
    key: EventKey::from_static("bakers_brag"),
    title: "Baker's Brag",
    probability: 1,
    text: "The baker unveils a loaf shaped like the mayor's face. The mayor pretends to be \
           flattered but buys it anyway.",
};

/// Brewers quarrel over blessings.
pub static BARREL_ARGUMENT: Anecdote = Anecdote {
    key: EventKey::from_static("barrel_argument"),
    title: "The Barrel Argument",
    probability: 15,
    text: "Two brewers are loudly debating in the square about which barrel of ale is \
           \"properly blessed.\" The local priest looks deeply uncomfortable.",
};

/// Suspiciously generous scales.
pub static BROKEN_SCALES: Anecdote = Anecdote {
    key: EventKey::from_static("broken_scales"),
    title: "Broken Scales",
    probability: 1,
    text: "The fishmonger's scales are slightly off, in his customers' favor. Business booms \
           suspiciously.",
};

/// A holy loaf.
pub static MIRACLE_OR_MOLD: Anecdote = Anecdote {
    key: EventKey::from_static("miracle_or_mold"),
    title: "Miracle or Mold?",
    probability: 15,
    text: "A bread loaf in the shape of a saint is paraded through town before anyone realizes \
           it's just old and fuzzy.",
};

/// A traveller with a strange tale.
pub static MYSTERIOUS_VISITOR: Anecdote = Anecdote {
    key: EventKey::from_static("mysterious_visitor"),
    title: "Mysterious Visitor",
    probability: 15,
    text: "A traveler claims to have seen the sea \"stand still like glass.\" Locals debate \
           whether that's good or an omen.",
};

/// Every anecdote, in catalog order.
pub static ANECDOTES: [&Anecdote; 6] = [
    &HONEST_THIEF,
    &BAKERS_BRAG,
    &BARREL_ARGUMENT,
    &BROKEN_SCALES,
    &MIRACLE_OR_MOLD,
    &MYSTERIOUS_VISITOR,
];

impl ContentModule for Folk {
    fn name(&self) -> &str {
        "folk"
    }

    fn definitions(&self) -> Vec<EventDefinition> {
        vec![
            EventDefinition::new(HONEST_THIEF.key.clone(), |city, _| {
                Told::build(&HONEST_THIEF, city)
            }),
            EventDefinition::new(BAKERS_BRAG.key.clone(), |city, _| {
                Told::build(&BAKERS_BRAG, city)
            }),
            EventDefinition::new(BARREL_ARGUMENT.key.clone(), |city, _| {
                Told::build(&BARREL_ARGUMENT, city)
            }),
            EventDefinition::new(BROKEN_SCALES.key.clone(), |city, _| {
                Told::build(&BROKEN_SCALES, city)
            }),
            EventDefinition::new(MIRACLE_OR_MOLD.key.clone(), |city, _| {
                Told::build(&MIRACLE_OR_MOLD, city)
            }),
            EventDefinition::new(MYSTERIOUS_VISITOR.key.clone(), |city, _| {
                Told::build(&MYSTERIOUS_VISITOR, city)
            }),
        ]
    }
}

/// An [`Anecdote`] bound to one city.
#[derive(Debug)]
pub struct Told {
    anecdote: &'static Anecdote,
    has_audience: bool,
}

impl Told {
    /// Bind an anecdote to `city`. Nothing is rolled.
    pub fn build(anecdote: &'static Anecdote, city: &City) -> Box<dyn Event> {
        Box::new(Self {
            anecdote,
            has_audience: city.savegame.population > 0,
        })
    }
}

impl Event for Told {
    fn title(&self) -> &str {
        self.anecdote.title
    }

    fn probability(&self) -> Probability {
        if self.has_audience {
            Probability::from(self.anecdote.probability)
        } else {
            Probability::IMPOSSIBLE
        }
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok(self.anecdote.text.to_owned())
    }
}
