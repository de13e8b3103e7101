//! Player-selectable branches of a choice-bearing event.

use serde::Serialize;

use crate::effect::{Effect, EffectError, EffectTarget};

/// One mutually exclusive branch of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Button text, e.g. "Pay the ransom".
    pub label: String,
    /// What the branch does, including its pre-rolled magnitudes.
    pub description: String,
    /// Mutations applied, in order, when the branch is chosen.
    pub effects: Vec<Effect>,
}

impl Choice {
    /// Create a branch.
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        effects: Vec<Effect>,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            effects,
        }
    }

    /// Apply every effect of the branch in declaration order.
    pub fn apply<T: EffectTarget + ?Sized>(&self, target: &mut T) -> Result<(), EffectError> {
        self.effects.iter().try_for_each(|effect| effect.apply(target))
    }

    /// The presentable part of the branch.
    pub fn summary(&self) -> ChoiceSummary {
        ChoiceSummary {
            label: self.label.clone(),
            description: self.description.clone(),
        }
    }
}

/// Label and description of a branch, without its effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceSummary {
    /// Button text.
    pub label: String,
    /// Consequences shown to the player.
    pub description: String,
}
