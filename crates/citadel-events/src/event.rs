//! The contract every event definition implements.
//!
//! An event instance is built fresh for one city by a catalog constructor,
//! which receives a dedicated RNG. All randomness that determines
//! magnitudes must be drawn there and stored on the instance; the trait
//! methods are pure with respect to the instance, so calling them twice
//! yields the same probability, effects, choices and text.
//!
//! Routing is decided by [`Event::has_choices`]: events with choices are
//! deferred as pending decisions, all others are applied immediately.

use citadel_types::Severity;
use citadel_world::City;

use crate::choice::Choice;
use crate::effect::Effect;
use crate::error::ConfigurationError;

/// Chance of an event occurring this turn, in percent.
///
/// Raw values may lie anywhere; [`Probability::normalized`] brings them into
/// `0..=max` before they are compared with the turn threshold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Probability(f64);

impl Probability {
    /// Structurally impossible this turn.
    pub const IMPOSSIBLE: Self = Self(0.0);

    /// Wrap a raw probability.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw value.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Scale of raw probabilities: content states chances in percent.
    pub const SCALE: u32 = 100;

    /// Re-express a percent chance on a `0..=max` scale, clamped.
    ///
    /// With `max` equal to [`Self::SCALE`] this is plain clamping.
    pub fn normalized(self, max: u32) -> Self {
        Self(self.0 * f64::from(max) / f64::from(Self::SCALE)).clamped(max)
    }

    /// Clamp into `0..=max`. NaN counts as impossible.
    pub fn clamped(self, max: u32) -> Self {
        if self.0.is_nan() {
            return Self::IMPOSSIBLE;
        }
        Self(self.0.clamp(0.0, f64::from(max)))
    }

    /// Whether the event clears a shared threshold.
    pub fn clears(self, threshold: u32) -> bool {
        self.0 > f64::from(threshold)
    }
}

impl From<u32> for Probability {
    fn from(value: u32) -> Self {
        Self(f64::from(value))
    }
}

impl core::fmt::Display for Probability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A pluggable unit of narrative plus mechanical change.
pub trait Event {
    /// Headline shown with the outcome.
    fn title(&self) -> &str;

    /// Display level of the outcome.
    fn severity(&self) -> Severity {
        Severity::Info
    }

    /// Chance to occur this turn. Zero means impossible.
    fn probability(&self) -> Probability;

    /// Mutations to apply when the event has no choices.
    ///
    /// May query `city` for world state, but magnitudes must come from the
    /// instance.
    fn effects(&self, city: &City) -> Vec<Effect> {
        let _ = city;
        Vec::new()
    }

    /// Mutually exclusive branches. Non-empty means the event must be
    /// deferred for the player.
    fn choices(&self) -> Vec<Choice> {
        Vec::new()
    }

    /// Whether the event offers any choice.
    fn has_choices(&self) -> bool {
        !self.choices().is_empty()
    }

    /// Outcome text. Evaluated after the effects ran, so `city` holds the
    /// post-effect state.
    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        let _ = city;
        Err(ConfigurationError::MissingVerboseText {
            event: self.title().to_owned(),
        })
    }
}
