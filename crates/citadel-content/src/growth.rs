//! Yearly growth and upkeep: new inhabitants, the tax balance, and unrest
//! from overcrowding.

use rand::Rng;
use rand::rngs::StdRng;

use citadel_events::{
    ConfigurationError, ContentModule, Effect, Event, EventDefinition, Probability,
};
use citadel_types::{EventKey, MAX_UNREST, Resource, Severity};
use citadel_world::{Balance, City};

use crate::text::units;

/// Growth and upkeep events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Growth;

impl ContentModule for Growth {
    fn name(&self) -> &str {
        "growth"
    }

    fn definitions(&self) -> Vec<EventDefinition> {
        vec![
            EventDefinition::new(PopulationIncrease::KEY, PopulationIncrease::build),
            EventDefinition::new(EconomicBalance::KEY, EconomicBalance::build),
            EventDefinition::new(Homelessness::KEY, Homelessness::build),
        ]
    }
}

// ============================================================================
// Population Increase
// ============================================================================

/// Five percent yearly growth (at least one person) while housing lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationIncrease {
    initial_population: i64,
    has_room: bool,
    newcomers: u32,
}

impl PopulationIncrease {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("population_increase");

    /// Yearly growth in percent.
    pub const GROWTH_PERCENT: i64 = 5;

    fn build(city: &City, _: &mut StdRng) -> Box<dyn Event> {
        let population = city.savegame.population.max(0);
        // ceil(population * 5%)
        let newcomers = population
            .saturating_mul(Self::GROWTH_PERCENT)
            .saturating_add(99)
            .div_euclid(100)
            .max(1);
        Box::new(Self {
            initial_population: city.savegame.population,
            has_room: city.savegame.population < city.housing_capacity(),
            newcomers: units(newcomers),
        })
    }
}

impl Event for PopulationIncrease {
    fn title(&self) -> &str {
        "Population Increase"
    }

    fn probability(&self) -> Probability {
        if self.has_room {
            Probability::from(100)
        } else {
            Probability::IMPOSSIBLE
        }
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::increase(Resource::Population, self.newcomers)]
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "Your fertile city welcomes {} new inhabitants.",
            city.savegame.population.saturating_sub(self.initial_population)
        ))
    }
}

// ============================================================================
// Economic Balance
// ============================================================================

/// Taxes collected minus maintenance paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomicBalance {
    balance: Balance,
}

impl EconomicBalance {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("economic_balance");

    fn build(city: &City, _: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            balance: city.balance(),
        })
    }
}

impl Event for EconomicBalance {
    fn title(&self) -> &str {
        "Economic Balance"
    }

    fn probability(&self) -> Probability {
        if self.balance.balance == 0 {
            Probability::IMPOSSIBLE
        } else {
            Probability::from(100)
        }
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        let amount = units(self.balance.balance.saturating_abs());
        if self.balance.balance > 0 {
            vec![Effect::increase(Resource::Coins, amount)]
        } else {
            vec![Effect::decrease(Resource::Coins, amount)]
        }
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        let Balance {
            taxes,
            maintenance,
            balance,
        } = self.balance;
        let verdict = if balance > 0 {
            format!("The city treasury gained {balance} coins.")
        } else {
            format!("The city treasury lost {} coins.", balance.saturating_abs())
        };
        Ok(format!(
            "Tax collection brought in {taxes} coins while building maintenance cost \
             {maintenance} coins. {verdict}"
        ))
    }
}

// ============================================================================
// Homelessness
// ============================================================================

/// Overcrowding raises unrest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homelessness {
    initial_unrest: i64,
    overcrowded: bool,
    additional_unrest: u32,
}

impl Homelessness {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("homelessness");

    fn build(city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            initial_unrest: city.savegame.unrest,
            overcrowded: city.savegame.population > city.housing_capacity()
                && city.savegame.unrest < MAX_UNREST,
            additional_unrest: rng.random_range(5..=8),
        })
    }
}

impl Event for Homelessness {
    fn title(&self) -> &str {
        "Homelessness"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn probability(&self) -> Probability {
        if self.overcrowded {
            Probability::from(90)
        } else {
            Probability::IMPOSSIBLE
        }
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::increase(Resource::Unrest, self.additional_unrest)]
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "Beggars and homeless folk are crowding the streets. The situation grows tenser by \
             the day. The city's unrest increased by {}%.",
            city.savegame.unrest.saturating_sub(self.initial_unrest)
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use citadel_types::Savegame;
    use citadel_world::starting_city;

    use super::*;

    fn city() -> City {
        starting_city(Savegame::new("Rivenhold")).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    fn apply(event: &dyn Event, city: &mut City) {
        for effect in event.effects(city) {
            effect.apply(city).unwrap();
        }
    }

    #[test]
    fn growth_is_five_percent_rounded_up() {
        let mut c = city();
        c.savegame.population = 101;
        let event = PopulationIncrease::build(&c, &mut rng());
        assert_eq!(event.probability(), Probability::from(100));
        apply(event.as_ref(), &mut c);
        // ceil(5.05) = 6
        assert_eq!(c.savegame.population, 107);
        assert_eq!(
            event.verbose_text(&c).unwrap(),
            "Your fertile city welcomes 6 new inhabitants."
        );
    }

    #[test]
    fn empty_city_still_gains_one() {
        let mut c = city();
        c.savegame.population = 0;
        let event = PopulationIncrease::build(&c, &mut rng());
        apply(event.as_ref(), &mut c);
        assert_eq!(c.savegame.population, 1);
    }

    #[test]
    fn full_city_does_not_grow() {
        let mut c = city();
        c.savegame.population = c.housing_capacity();
        let event = PopulationIncrease::build(&c, &mut rng());
        assert_eq!(event.probability(), Probability::IMPOSSIBLE);
    }

    #[test]
    fn balance_moves_coins_by_the_difference() {
        let mut c = city();
        let expected = c.balance();
        let event = EconomicBalance::build(&c, &mut rng());
        apply(event.as_ref(), &mut c);
        assert_eq!(c.savegame.coins, 1000 + expected.balance);
        let text = event.verbose_text(&c).unwrap();
        assert!(text.contains(&format!("brought in {} coins", expected.taxes)));
    }

    #[test]
    fn overcrowding_raises_unrest() {
        let mut c = city();
        c.savegame.population = c.housing_capacity() + 10;
        c.savegame.unrest = 10;
        let event = Homelessness::build(&c, &mut rng());
        assert_eq!(event.probability(), Probability::from(90));
        apply(event.as_ref(), &mut c);
        assert!((15..=18).contains(&c.savegame.unrest));
    }

    #[test]
    fn homelessness_needs_overcrowding() {
        let c = city();
        let event = Homelessness::build(&c, &mut rng());
        assert_eq!(event.probability(), Probability::IMPOSSIBLE);
    }
}
