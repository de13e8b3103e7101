//! Immediate application of choice-less events.

use tracing::info;

use citadel_types::{EventKey, Severity};
use citadel_world::City;

use crate::error::ConfigurationError;
use crate::event::Event;

/// What an auto-applied event did, ready to become a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Definition the event was built from.
    pub key: EventKey,
    /// Event title.
    pub title: String,
    /// Display level.
    pub severity: Severity,
    /// Outcome text, produced after the effects ran.
    pub message: String,
}

/// Apply every effect of `event` to `city` in declaration order, then
/// capture the outcome text.
///
/// Later effects see the state left by earlier ones.
pub fn auto_apply(
    key: &EventKey,
    event: &dyn Event,
    city: &mut City,
) -> Result<Outcome, ConfigurationError> {
    let effects = event.effects(city);
    for effect in &effects {
        effect.apply(city)?;
    }
    let message = event.verbose_text(city)?;

    info!(%key, effects = effects.len(), "Event applied");
    Ok(Outcome {
        key: key.clone(),
        title: event.title().to_owned(),
        severity: event.severity(),
        message,
    })
}
