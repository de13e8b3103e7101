//! Events that put a decision before the player.
//!
//! All magnitudes are rolled when the event is built and quoted in the
//! choice descriptions, so what the player reads is what gets applied.

use rand::Rng;
use rand::rngs::StdRng;

use citadel_events::{
    Choice, ConfigurationError, ContentModule, Effect, Event, EventDefinition, Probability,
};
use citadel_types::{EventKey, Resource, Severity};
use citadel_world::City;

/// Choice-bearing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decisions;

impl ContentModule for Decisions {
    fn name(&self) -> &str {
        "decisions"
    }

    fn definitions(&self) -> Vec<EventDefinition> {
        vec![
            EventDefinition::new(HarvestDispute::KEY, HarvestDispute::build),
            EventDefinition::new(WanderingPreacher::KEY, WanderingPreacher::build),
            EventDefinition::new(MineCollapse::KEY, MineCollapse::build),
        ]
    }
}

/// Chance shared by every decision event.
const PROBABILITY: u32 = 3;

// ============================================================================
// The Harvest Dispute
// ============================================================================

/// Two farmers accuse each other of stealing grain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestDispute {
    investigation_cost: u32,
    investigation_relief: u32,
    ruling_unrest: u32,
}

impl HarvestDispute {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("harvest_dispute");

    fn build(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            investigation_cost: rng.random_range(20..=40),
            investigation_relief: rng.random_range(3..=6),
            ruling_unrest: rng.random_range(5..=10),
        })
    }
}

impl Event for HarvestDispute {
    fn title(&self) -> &str {
        "The Harvest Dispute"
    }

    fn probability(&self) -> Probability {
        Probability::from(PROBABILITY)
    }

    fn choices(&self) -> Vec<Choice> {
        vec![
            Choice::new(
                "Conduct a thorough investigation",
                format!(
                    "Send officials to investigate the dispute fairly and gather evidence. This \
                     will cost {} coins for the investigation, but your commitment to justice \
                     will be appreciated by all farmers (-{} unrest).",
                    self.investigation_cost, self.investigation_relief
                ),
                vec![
                    Effect::decrease(Resource::Coins, self.investigation_cost),
                    Effect::decrease(Resource::Unrest, self.investigation_relief),
                ],
            ),
            Choice::new(
                "Make an arbitrary ruling",
                format!(
                    "Quickly rule in favor of one farmer without investigation to save time and \
                     resources. While this costs nothing, the losing farmer and his supporters \
                     will feel the judgment was unjust, causing resentment among the farming \
                     community (+{} unrest).",
                    self.ruling_unrest
                ),
                vec![Effect::increase(Resource::Unrest, self.ruling_unrest)],
            ),
        ]
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok("Two neighboring farmers accuse each other of stealing grain from a shared field. \
            The village court can't decide and turns to you for judgment."
            .to_owned())
    }
}

// ============================================================================
// The Wandering Preacher
// ============================================================================

/// A charismatic preacher draws crowds at the gates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WanderingPreacher {
    sermon_relief: u32,
    sermon_risk: u32,
    silence_unrest: u32,
}

impl WanderingPreacher {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("wandering_preacher");

    fn build(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            sermon_relief: rng.random_range(5..=10),
            sermon_risk: rng.random_range(3..=7),
            silence_unrest: rng.random_range(3..=5),
        })
    }
}

impl Event for WanderingPreacher {
    fn title(&self) -> &str {
        "The Wandering Preacher"
    }

    fn probability(&self) -> Probability {
        Probability::from(PROBABILITY)
    }

    fn choices(&self) -> Vec<Choice> {
        vec![
            Choice::new(
                "Grant him permission to speak",
                format!(
                    "The preacher's words inspire hope and calm tensions among the people \
                     (-{} unrest). However, his rhetoric may also sow seeds of discontent if \
                     his message turns against you (+{} unrest risk).",
                    self.sermon_relief, self.sermon_risk
                ),
                vec![
                    Effect::decrease(Resource::Unrest, self.sermon_relief),
                    Effect::increase(Resource::Unrest, self.sermon_risk),
                ],
            ),
            Choice::new(
                "Silence him quietly",
                format!(
                    "You prevent the preacher from speaking, maintaining order and your \
                     authority. However, word spreads of your heavy-handed approach, causing \
                     some discontent among the faithful (+{} unrest).",
                    self.silence_unrest
                ),
                vec![Effect::increase(Resource::Unrest, self.silence_unrest)],
            ),
        ]
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok("A charismatic preacher arrives at the city gates, drawing large crowds in the \
            marketplace. His sermons inspire hope, but also question your rule."
            .to_owned())
    }
}

// ============================================================================
// Collapse in the Mines
// ============================================================================

/// A mine collapse traps workers underground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineCollapse {
    rescue_cost: u32,
    rescue_relief: u32,
    seal_unrest: u32,
}

impl MineCollapse {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("collapse_in_mines");

    fn build(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            rescue_cost: rng.random_range(50..=100),
            rescue_relief: rng.random_range(5..=8),
            seal_unrest: rng.random_range(10..=15),
        })
    }
}

impl Event for MineCollapse {
    fn title(&self) -> &str {
        "Collapse in the Mines"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn probability(&self) -> Probability {
        Probability::from(PROBABILITY)
    }

    fn choices(&self) -> Vec<Choice> {
        vec![
            Choice::new(
                "Send rescuers immediately",
                format!(
                    "Mount an immediate rescue operation to save the trapped miners. This will \
                     cost {} coins and halt mining operations temporarily, but the people will \
                     appreciate your commitment to their safety (-{} unrest).",
                    self.rescue_cost, self.rescue_relief
                ),
                vec![
                    Effect::decrease(Resource::Coins, self.rescue_cost),
                    Effect::decrease(Resource::Unrest, self.rescue_relief),
                ],
            ),
            Choice::new(
                "Seal the tunnels",
                format!(
                    "Order the dangerous tunnels sealed to prevent further collapse. Mining can \
                     resume quickly and no rescue costs are incurred, but the workers and their \
                     families will be outraged by the abandoned miners (+{} unrest).",
                    self.seal_unrest
                ),
                vec![Effect::increase(Resource::Unrest, self.seal_unrest)],
            ),
        ]
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok("A section of your city's silver mine collapses, trapping workers inside. Rescue \
            efforts would be costly and slow, but leaving them might spark outrage."
            .to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use citadel_events::Amount;
    use citadel_types::Savegame;
    use citadel_world::starting_city;

    use super::*;

    fn city() -> City {
        starting_city(Savegame::new("Rivenhold")).unwrap()
    }

    #[test]
    fn every_decision_offers_two_branches() {
        let c = city();
        for definition in Decisions.definitions() {
            let event = definition.instantiate(&c, 17);
            assert!(event.has_choices(), "{}", event.title());
            assert_eq!(event.choices().len(), 2);
            assert!(event.effects(&c).is_empty());
            assert!(event.verbose_text(&c).is_ok());
        }
    }

    #[test]
    fn descriptions_quote_the_rolled_magnitudes() {
        let event = HarvestDispute::build(&city(), &mut StdRng::seed_from_u64(2));
        let choices = event.choices();
        let investigate = choices.first().unwrap();
        let Some(Effect::Adjust {
            amount: Amount::Absolute(cost),
            ..
        }) = investigate.effects.first()
        else {
            panic!("investigation must cost coins");
        };
        assert!(investigate.description.contains(&format!("cost {cost} coins")));
    }

    #[test]
    fn investigation_costs_and_calms() {
        let mut c = city();
        c.savegame.unrest = 20;
        let event = HarvestDispute::build(&c, &mut StdRng::seed_from_u64(2));
        event.choices().first().unwrap().apply(&mut c).unwrap();
        assert!((960..=980).contains(&c.savegame.coins));
        assert!((14..=17).contains(&c.savegame.unrest));
    }

    #[test]
    fn sealing_the_tunnels_angers_the_miners() {
        let mut c = city();
        let event = MineCollapse::build(&c, &mut StdRng::seed_from_u64(2));
        assert_eq!(event.severity(), Severity::Warning);
        event.choices().get(1).unwrap().apply(&mut c).unwrap();
        assert!((10..=15).contains(&c.savegame.unrest));
        assert_eq!(c.savegame.coins, 1000);
    }
}
