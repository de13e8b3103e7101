//! Disasters and disorder.
//!
//! ```text
//!   prestige > defense ──► Enemy Raid   (scales with the gap)
//!   no enclosing wall  ──► Pillage
//!   25 <= unrest < 75  ──► Protest      (scales with unrest)
//!   always possible    ──► Fire, Plague, Riot
//! ```
//!
//! Raids and pillage pick the buildings they destroy when the event is
//! built, so the same roll seed always hits the same tiles.

use rand::Rng;
use rand::rngs::StdRng;

use citadel_events::{
    ConfigurationError, ContentModule, Effect, Event, EventDefinition, Probability,
};
use citadel_types::{EventKey, MAX_UNREST, Resource, Severity};
use citadel_world::{City, TileCoord};

use crate::text::{buildings_destroyed, scaled_share, units};

/// Hazard events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hazards;

impl ContentModule for Hazards {
    fn name(&self) -> &str {
        "hazards"
    }

    fn definitions(&self) -> Vec<EventDefinition> {
        vec![
            EventDefinition::new(EnemyRaid::KEY, EnemyRaid::build),
            EventDefinition::new(Pillage::KEY, Pillage::build),
            EventDefinition::new(Fire::KEY, Fire::build),
            EventDefinition::new(Plague::KEY, Plague::build),
            EventDefinition::new(Riot::KEY, Riot::build),
            EventDefinition::new(Protest::KEY, Protest::build),
        ]
    }
}

/// Most buildings a single attack destroys.
const MAX_DESTROYED: i64 = 5;

/// Buildings an attack destroys: `percent` of the eligible ones scaled by
/// `tenths`, at least one while any are eligible and at most
/// [`MAX_DESTROYED`].
fn raid_casualties(eligible: usize, percent: u32, tenths: i64) -> usize {
    if eligible == 0 {
        return 0;
    }
    let eligible = i64::try_from(eligible).unwrap_or(i64::MAX);
    let count = scaled_share(eligible, percent, tenths).clamp(1, MAX_DESTROYED);
    usize::try_from(count).unwrap_or(1)
}

fn removals(tiles: &[TileCoord]) -> impl Iterator<Item = Effect> + '_ {
    tiles.iter().copied().map(Effect::remove_building)
}

// ============================================================================
// Enemy Raid
// ============================================================================

/// Raiders attack a city whose prestige outshines its defense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyRaid {
    prestige: i64,
    defense: i64,
    intensity: i64,
    initial_coins: i64,
    lost_coins: u32,
    lost_population: u32,
    increased_unrest: u32,
    targets: Vec<TileCoord>,
}

impl EnemyRaid {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("enemy_raid");

    /// Chance before the intensity bonus.
    pub const BASE_PROBABILITY: i64 = 5;

    /// Cap on the scaled chance.
    pub const MAX_PROBABILITY: i64 = 50;

    /// Cap on the unrest a raid adds.
    pub const MAX_UNREST_GAIN: i64 = 30;

    fn build(city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        let prestige = city.prestige();
        let defense = city.defense();
        let intensity = prestige.saturating_sub(defense).max(0);
        // 1 + intensity / 10, in tenths
        let tenths = intensity.saturating_add(10);

        let lost_coins = scaled_share(city.savegame.coins, rng.random_range(15..=35), tenths).max(100);
        let lost_population =
            scaled_share(city.savegame.population, rng.random_range(10..=20), tenths).max(10);
        let increased_unrest = rng
            .random_range(10_i64..=20)
            .saturating_mul(tenths)
            .div_euclid(10)
            .min(Self::MAX_UNREST_GAIN);

        let eligible = city.raid_targets().len();
        let count = raid_casualties(eligible, rng.random_range(15..=30), tenths);
        let targets = city.choose_raid_targets(count, rng);

        Box::new(Self {
            prestige,
            defense,
            intensity,
            initial_coins: city.savegame.coins,
            lost_coins: units(lost_coins),
            lost_population: units(lost_population),
            increased_unrest: units(increased_unrest),
            targets,
        })
    }
}

impl Event for EnemyRaid {
    fn title(&self) -> &str {
        "Enemy Raid"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn probability(&self) -> Probability {
        if self.prestige <= self.defense {
            return Probability::IMPOSSIBLE;
        }
        let scaled = Self::BASE_PROBABILITY
            .saturating_add(self.intensity)
            .min(Self::MAX_PROBABILITY);
        Probability::from(units(scaled))
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        let mut effects = vec![
            Effect::decrease(Resource::Coins, self.lost_coins),
            Effect::decrease(Resource::Population, self.lost_population),
            Effect::increase(Resource::Unrest, self.increased_unrest),
        ];
        effects.extend(removals(&self.targets));
        effects
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        let mut message = format!(
            "Your city's wealth and prestige ({}) attracted enemy forces! With only {} defense, \
             the raiders overwhelmed your guards. They stole {} coins and killed {} inhabitants. \
             Unrest increased by {}%.",
            self.prestige,
            self.defense,
            self.initial_coins.saturating_sub(city.savegame.coins),
            self.lost_population,
            self.increased_unrest,
        );
        if !self.targets.is_empty() {
            message.push(' ');
            message.push_str(&buildings_destroyed(self.targets.len()));
            message.push_str(" during the raid.");
        }
        Ok(message)
    }
}

// ============================================================================
// Pillage
// ============================================================================

/// Raiders plunder a city without an enclosing wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pillage {
    is_enclosed: bool,
    initial_coins: i64,
    lost_coins: u32,
    lost_population: u32,
    targets: Vec<TileCoord>,
}

impl Pillage {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("pillage");

    fn build(city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        let lost_coins = scaled_share(city.savegame.coins, rng.random_range(10..=30), 10).max(50);
        let lost_population =
            scaled_share(city.savegame.population, rng.random_range(5..=15), 10).max(5);

        let eligible = city.raid_targets().len();
        let count = raid_casualties(eligible, rng.random_range(10..=25), 10);
        let targets = city.choose_raid_targets(count, rng);

        Box::new(Self {
            is_enclosed: city.savegame.is_enclosed,
            initial_coins: city.savegame.coins,
            lost_coins: units(lost_coins),
            lost_population: units(lost_population),
            targets,
        })
    }
}

impl Event for Pillage {
    fn title(&self) -> &str {
        "Pillage"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn probability(&self) -> Probability {
        if self.is_enclosed {
            Probability::IMPOSSIBLE
        } else {
            Probability::from(30)
        }
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        let mut effects = vec![
            Effect::decrease(Resource::Coins, self.lost_coins),
            Effect::decrease(Resource::Population, self.lost_population),
        ];
        effects.extend(removals(&self.targets));
        effects
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        let mut message = format!(
            "Without a protective wall, raiders pillaged the city! They stole {} coins and \
             killed {} inhabitants.",
            self.initial_coins.saturating_sub(city.savegame.coins),
            self.lost_population,
        );
        if !self.targets.is_empty() {
            message.push(' ');
            message.push_str(&buildings_destroyed(self.targets.len()));
            message.push_str(" during the raid.");
        }
        Ok(message)
    }
}

// ============================================================================
// Fire
// ============================================================================

/// A fire starts in the first house and spreads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fire {
    lost_population: u32,
    origin: Option<(TileCoord, String)>,
}

impl Fire {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("fire");

    fn build(city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        let origin = city.first_house().map(|tile| {
            let name = city.building_name(tile).unwrap_or("house").to_owned();
            (tile, name)
        });
        Box::new(Self {
            lost_population: rng.random_range(10..=50),
            origin,
        })
    }
}

impl Event for Fire {
    fn title(&self) -> &str {
        "Fire"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn probability(&self) -> Probability {
        Probability::from(5)
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        let mut effects = vec![Effect::decrease(Resource::Population, self.lost_population)];
        if let Some((tile, _)) = &self.origin {
            effects.push(Effect::remove_building(*tile));
        }
        effects
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        let mut message = format!(
            "Due to general neglect, a fire raged throughout the city, killing {}.",
            self.lost_population
        );
        if let Some((tile, name)) = &self.origin {
            message.push_str(&format!(
                " The fire started in the {name} at {tile} and destroyed it completely."
            ));
        }
        Ok(message)
    }
}

// ============================================================================
// Plague
// ============================================================================

/// A plague kills a share of the population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plague {
    lost_percent: u32,
}

impl Plague {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("plague");

    fn build(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            lost_percent: rng.random_range(10..=25),
        })
    }
}

impl Event for Plague {
    fn title(&self) -> &str {
        "Plague"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn probability(&self) -> Probability {
        Probability::from(5)
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::decrease_relative(
            Resource::Population,
            self.lost_percent,
        )]
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "A horrific plague hit the city in its most vulnerable time. {}% of the population \
             died a tragic and slow death.",
            self.lost_percent
        ))
    }
}

// ============================================================================
// Riot
// ============================================================================

/// Street fights cost lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Riot {
    initial_population: i64,
    lost_population: u32,
}

impl Riot {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("riot");

    fn build(city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            initial_population: city.savegame.population,
            lost_population: rng.random_range(5..=10),
        })
    }
}

impl Event for Riot {
    fn title(&self) -> &str {
        "Riot"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn probability(&self) -> Probability {
        Probability::from(25)
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::decrease(Resource::Population, self.lost_population)]
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "The people have had enough! Outraged mobs started fights in the streets which led \
             to the loss of {} human lives.",
            self.initial_population.saturating_sub(city.savegame.population)
        ))
    }
}

// ============================================================================
// Protest
// ============================================================================

/// Citizens protest against the council. More likely the higher the unrest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protest {
    unrest: i64,
    has_population: bool,
    initial_population: i64,
    initial_coins: i64,
    lost_population: u32,
    lost_coins: u32,
}

impl Protest {
    /// Catalog key.
    pub const KEY: EventKey = EventKey::from_static("protest");

    /// Chance at the top of the unrest band.
    pub const PROBABILITY: f64 = 60.0;

    /// Unrest at which protests begin.
    pub const LOWER_UNREST: i64 = 25;

    /// Unrest at which protests give way to riots.
    pub const UPPER_UNREST: i64 = 75;

    fn build(city: &City, rng: &mut StdRng) -> Box<dyn Event> {
        Box::new(Self {
            unrest: city.savegame.unrest,
            has_population: city.savegame.population > 0,
            initial_population: city.savegame.population,
            initial_coins: city.savegame.coins,
            lost_population: rng.random_range(1..=5),
            lost_coins: rng.random_range(10..=30),
        })
    }
}

impl Event for Protest {
    fn title(&self) -> &str {
        "Protest"
    }

    fn probability(&self) -> Probability {
        if !self.has_population || !(Self::LOWER_UNREST..Self::UPPER_UNREST).contains(&self.unrest) {
            return Probability::IMPOSSIBLE;
        }
        let above = i32::try_from(self.unrest.saturating_sub(Self::LOWER_UNREST)).unwrap_or(0);
        let band = i32::try_from(MAX_UNREST.div_euclid(2)).unwrap_or(50);
        Probability::new(Self::PROBABILITY * f64::from(above) / f64::from(band))
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![
            Effect::decrease(Resource::Population, self.lost_population),
            Effect::decrease(Resource::Coins, self.lost_coins),
        ]
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        let casualties = self.initial_population.saturating_sub(city.savegame.population);
        let looted = self.initial_coins.saturating_sub(city.savegame.coins);
        let mut message = format!(
            "Citizens gathered in the streets to protest against the city council. The protest \
             turned violent, resulting in {casualties} casualties"
        );
        if looted > 0 {
            message.push_str(&format!(" and {looted} coins looted by the protesters"));
        }
        message.push('.');
        Ok(message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use citadel_types::Savegame;
    use citadel_world::starting_city;
    use citadel_world::starting_city::{town_hall, wall};

    use super::*;

    fn city() -> City {
        starting_city(Savegame::new("Rivenhold")).unwrap()
    }

    fn apply(event: &dyn Event, city: &mut City) {
        for effect in event.effects(city) {
            effect.apply(city).unwrap();
        }
    }

    #[test]
    fn casualties_are_bounded() {
        assert_eq!(raid_casualties(0, 30, 40), 0);
        assert_eq!(raid_casualties(2, 15, 10), 1);
        assert_eq!(raid_casualties(100, 30, 40), 5);
        // 20 * 25% = 5
        assert_eq!(raid_casualties(20, 25, 10), 5);
        assert_eq!(raid_casualties(12, 25, 10), 3);
    }

    #[test]
    fn raid_scales_with_the_prestige_gap() {
        let c = city();
        // Unwalled: prestige 14, defense 0.
        assert_eq!(c.prestige(), 14);
        assert_eq!(c.defense(), 0);
        let event = EnemyRaid::build(&c, &mut StdRng::seed_from_u64(1));
        assert_eq!(event.probability(), Probability::from(19));
    }

    #[test]
    fn raid_probability_is_capped() {
        let mut c = city();
        for x in 1..=7 {
            c.map
                .place(TileCoord::new(x, 8), town_hall())
                .unwrap();
        }
        let event = EnemyRaid::build(&c, &mut StdRng::seed_from_u64(1));
        assert_eq!(event.probability(), Probability::from(50));
    }

    #[test]
    fn raid_destroys_and_reports() {
        let mut c = city();
        let before = c.raid_targets().len();
        let event = EnemyRaid::build(&c, &mut StdRng::seed_from_u64(11));
        apply(event.as_ref(), &mut c);

        let destroyed = before - c.raid_targets().len();
        assert!((1..=5).contains(&destroyed));
        assert!(c.savegame.coins < 1000);
        assert!(c.savegame.unrest > 0 && c.savegame.unrest <= 30);

        let text = event.verbose_text(&c).unwrap();
        assert!(text.starts_with("Your city's wealth and prestige (14)"));
        assert!(text.contains(&format!("stole {} coins", 1000 - c.savegame.coins)));
        assert!(text.ends_with("during the raid."));
    }

    #[test]
    fn same_seed_hits_the_same_tiles() {
        let c = city();
        let first = EnemyRaid::build(&c, &mut StdRng::seed_from_u64(4));
        let second = EnemyRaid::build(&c, &mut StdRng::seed_from_u64(4));
        assert_eq!(first.effects(&c), second.effects(&c));
    }

    #[test]
    fn walls_stop_pillage() {
        let mut c = city();
        let open = Pillage::build(&c, &mut StdRng::seed_from_u64(2));
        assert_eq!(open.probability(), Probability::from(30));

        c.savegame.is_enclosed = true;
        let walled = Pillage::build(&c, &mut StdRng::seed_from_u64(2));
        assert_eq!(walled.probability(), Probability::IMPOSSIBLE);
    }

    #[test]
    fn pillage_takes_at_least_the_minimum() {
        let mut c = city();
        c.savegame.coins = 10;
        c.savegame.population = 10;
        let event = Pillage::build(&c, &mut StdRng::seed_from_u64(2));
        apply(event.as_ref(), &mut c);
        assert_eq!(c.savegame.coins, -40);
        assert_eq!(c.savegame.population, 5);
    }

    #[test]
    fn fire_burns_the_first_house() {
        let mut c = city();
        let origin = c.first_house().unwrap();
        let event = Fire::build(&c, &mut StdRng::seed_from_u64(8));
        apply(event.as_ref(), &mut c);
        assert_eq!(c.building_name(origin), Some("Ruins"));
        assert!(event.verbose_text(&c).unwrap().contains("Small House"));
    }

    #[test]
    fn fire_without_houses_only_kills() {
        let mut c = city();
        while let Some(tile) = c.first_house() {
            c.map.place(tile, wall()).unwrap();
        }
        let event = Fire::build(&c, &mut StdRng::seed_from_u64(8));
        assert_eq!(event.effects(&c).len(), 1);
        assert!(!event.verbose_text(&c).unwrap().contains("started in"));
    }

    #[test]
    fn plague_is_a_percentage() {
        let mut c = city();
        c.savegame.population = 200;
        let event = Plague::build(&c, &mut StdRng::seed_from_u64(6));
        apply(event.as_ref(), &mut c);
        assert!((150..=180).contains(&c.savegame.population));
        let lost = 200 - c.savegame.population;
        assert!(event.verbose_text(&c).unwrap().contains(&format!("{}%", lost / 2)));
    }

    #[test]
    fn riot_reports_actual_losses() {
        let mut c = city();
        c.savegame.population = 3;
        let event = Riot::build(&c, &mut StdRng::seed_from_u64(6));
        apply(event.as_ref(), &mut c);
        assert_eq!(c.savegame.population, 0);
        assert!(event.verbose_text(&c).unwrap().contains("loss of 3 human lives"));
    }

    #[test]
    fn protest_band() {
        let mut c = city();
        let mut rng = StdRng::seed_from_u64(3);

        c.savegame.unrest = 24;
        assert_eq!(Protest::build(&c, &mut rng).probability(), Probability::IMPOSSIBLE);
        c.savegame.unrest = 25;
        assert_eq!(Protest::build(&c, &mut rng).probability(), Probability::IMPOSSIBLE);
        c.savegame.unrest = 50;
        assert_eq!(Protest::build(&c, &mut rng).probability(), Probability::new(30.0));
        c.savegame.unrest = 75;
        assert_eq!(Protest::build(&c, &mut rng).probability(), Probability::IMPOSSIBLE);
    }

    #[test]
    fn protest_mentions_looting() {
        let mut c = city();
        c.savegame.unrest = 60;
        let event = Protest::build(&c, &mut StdRng::seed_from_u64(3));
        apply(event.as_ref(), &mut c);
        let text = event.verbose_text(&c).unwrap();
        assert!(text.contains("coins looted by the protesters."));
    }
}
