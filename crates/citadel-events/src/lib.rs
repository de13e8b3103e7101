//! Procedural event engine for the Citadel city simulation.
//!
//! Each simulated year the engine draws one shared threshold, instantiates
//! every event definition in the catalog for the active city, and keeps the
//! ones whose probability clears the threshold. Events without choices are
//! applied at once and leave a notification the player must acknowledge;
//! events with choices are parked as pending decisions until the player
//! picks a branch.
//!
//! # Modules
//!
//! - [`effect`] -- Atomic resource mutations and the [`EffectTarget`] seam
//! - [`choice`] -- Player-selectable branches
//! - [`event`] -- The [`Event`] contract and [`Probability`]
//! - [`catalog`] -- Registry of event definitions, discovered from content
//!   modules
//! - [`selection`] -- Shared-threshold multi-select
//! - [`processing`] -- Immediate application of choice-less events
//! - [`choice_storage`] -- Deferral of choice-bearing events
//! - [`resolution`] -- Presenting and resolving pending choices
//! - [`notification`] -- Notifications and the acknowledgement gate
//! - [`turn`] -- The [`TurnEngine`] orchestrator
//! - [`config`] -- YAML engine configuration
//! - [`error`] -- Engine error classes

pub mod catalog;
pub mod choice;
pub mod choice_storage;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod notification;
pub mod processing;
pub mod resolution;
pub mod selection;
pub mod turn;

// Re-export primary types at crate root.
pub use catalog::{Catalog, ContentModule, EventConstructor, EventDefinition};
pub use choice::{Choice, ChoiceSummary};
pub use config::{ConfigError, EngineConfig, SelectionConfig, TurnConfig};
pub use effect::{Amount, Direction, Effect, EffectError, EffectTarget};
pub use error::{ConfigurationError, EngineError, NotFoundError, PreconditionError};
pub use event::{Event, Probability};
pub use notification::NotificationBoard;
pub use processing::Outcome;
pub use resolution::{PendingChoiceView, Resolution};
pub use selection::{SelectedEvent, Selection};
pub use turn::{TurnEngine, TurnReport};
