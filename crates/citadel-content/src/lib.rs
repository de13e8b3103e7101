//! Concrete event definitions for the Citadel city simulation.
//!
//! Each module is a [`ContentModule`] the engine discovers at startup.
//! Every event is built for one explicit city and draws its magnitudes from
//! the RNG it is constructed with, so a deferred decision rebuilds with the
//! same numbers.
//!
//! # Modules
//!
//! - [`growth`] -- Population growth, yearly balance, homelessness
//! - [`fortune`] -- Unrest relief and windfalls
//! - [`hazards`] -- Raids, fire, plague and civil disorder
//! - [`folk`] -- Flavor anecdotes without mechanical effect
//! - [`decisions`] -- Events that ask the player to choose

use citadel_events::{Catalog, ConfigurationError, ContentModule};

pub mod decisions;
pub mod folk;
pub mod fortune;
pub mod growth;
pub mod hazards;
mod text;

pub use decisions::Decisions;
pub use folk::Folk;
pub use fortune::Fortune;
pub use growth::Growth;
pub use hazards::Hazards;

/// Every content module, in discovery order.
pub fn modules() -> [&'static dyn ContentModule; 5] {
    [&Growth, &Fortune, &Hazards, &Folk, &Decisions]
}

/// Build the catalog of all content, with `disabled` keys kept out of selection.
pub fn catalog(disabled: &[String]) -> Result<Catalog, ConfigurationError> {
    Catalog::discover(&modules(), disabled)
}
