//! End-to-end turn flows against an in-memory store.
//!
//! Scripted events with fixed probabilities make selection deterministic:
//! a probability of 100 clears every threshold in `0..100`, a probability
//! of 0 clears none.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use citadel_db::{GameStore, MemoryStore};
use citadel_events::{
    Catalog, Choice, ConfigurationError, Effect, EngineConfig, EngineError, Event,
    EventConstructor, EventDefinition, NotFoundError, PreconditionError, Probability, TurnEngine,
};
use citadel_types::{
    AcknowledgeDirective, ChoiceDirective, EventKey, Resource, Savegame, SavegameId, Severity,
    TurnDirective,
};
use citadel_world::{City, starting_city};

// ============================================================================
// Scripted events
// ============================================================================

/// Harvest-style relief with a pre-rolled reduction of 8.
struct Relief {
    initial_unrest: i64,
    active: bool,
}

impl Event for Relief {
    fn title(&self) -> &str {
        "Good Harvest"
    }

    fn severity(&self) -> Severity {
        Severity::Success
    }

    fn probability(&self) -> Probability {
        if self.active {
            Probability::from(100)
        } else {
            Probability::IMPOSSIBLE
        }
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::decrease(Resource::Unrest, 8)]
    }

    fn verbose_text(&self, city: &City) -> Result<String, ConfigurationError> {
        Ok(format!(
            "A good harvest reduces food prices. The unrest drops by {}%.",
            self.initial_unrest - city.savegame.unrest
        ))
    }
}

fn relief(city: &City, _: &mut StdRng) -> Box<dyn Event> {
    Box::new(Relief {
        initial_unrest: city.savegame.unrest,
        active: city.savegame.unrest > 0 && city.savegame.population > 0,
    })
}

/// Two-branch decision with rolled magnitudes.
#[derive(Debug, PartialEq, Eq)]
struct Dispute {
    cost: u32,
    relief: u32,
    resentment: u32,
}

impl Event for Dispute {
    fn title(&self) -> &str {
        "The Harvest Dispute"
    }

    fn probability(&self) -> Probability {
        Probability::from(100)
    }

    fn choices(&self) -> Vec<Choice> {
        vec![
            Choice::new(
                "Investigate",
                format!("Costs {} coins (-{} unrest).", self.cost, self.relief),
                vec![
                    Effect::decrease(Resource::Coins, self.cost),
                    Effect::decrease(Resource::Unrest, self.relief),
                ],
            ),
            Choice::new(
                "Rule arbitrarily",
                format!("+{} unrest.", self.resentment),
                vec![Effect::increase(Resource::Unrest, self.resentment)],
            ),
        ]
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok("Two farmers accuse each other of stealing grain.".to_owned())
    }
}

fn dispute(_: &City, rng: &mut StdRng) -> Box<dyn Event> {
    Box::new(Dispute {
        cost: rng.random_range(20..=40),
        relief: rng.random_range(3..=6),
        resentment: rng.random_range(5..=10),
    })
}

struct Dud;

impl Event for Dud {
    fn title(&self) -> &str {
        "Dud"
    }

    fn probability(&self) -> Probability {
        Probability::IMPOSSIBLE
    }

    fn verbose_text(&self, _: &City) -> Result<String, ConfigurationError> {
        Ok(String::new())
    }
}

fn dud(_: &City, _: &mut StdRng) -> Box<dyn Event> {
    Box::new(Dud)
}

/// Fires but forgot to implement its text.
struct Broken;

impl Event for Broken {
    fn title(&self) -> &str {
        "Broken"
    }

    fn probability(&self) -> Probability {
        Probability::from(100)
    }

    fn effects(&self, _: &City) -> Vec<Effect> {
        vec![Effect::decrease(Resource::Coins, 500)]
    }
}

fn broken(_: &City, _: &mut StdRng) -> Box<dyn Event> {
    Box::new(Broken)
}

// ============================================================================
// Harness
// ============================================================================

fn def(key: &'static str, construct: EventConstructor) -> EventDefinition {
    EventDefinition::new(EventKey::from_static(key), construct)
}

fn engine(definitions: Vec<EventDefinition>) -> TurnEngine {
    let mut catalog = Catalog::new();
    for definition in definitions {
        catalog.register(definition).unwrap();
    }
    TurnEngine::new(catalog, EngineConfig::default()).with_rng(StdRng::seed_from_u64(7))
}

fn world(population: i64, unrest: i64) -> (MemoryStore, SavegameId) {
    let mut store = MemoryStore::new();
    let mut city = starting_city(Savegame::new("Rivenhold")).unwrap();
    city.savegame.population = population;
    city.savegame.unrest = unrest;
    let id = city.id();
    store.insert_city(city).unwrap();
    store.activate(id).unwrap();
    (store, id)
}

fn city(store: &MemoryStore, id: SavegameId) -> City {
    store.city(id).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn harvest_reduces_unrest_and_notifies() {
    let (mut store, id) = world(100, 30);
    let mut engine = engine(vec![def("relief", relief)]);

    let report = engine.finish_turn(&mut store).unwrap();

    assert_eq!(report.directive, TurnDirective::ShowNotifications);
    assert_eq!(city(&store, id).savegame.unrest, 22);
    let notification = report.notifications.first().unwrap();
    assert!(notification.message.contains("drops by 8%"));
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.year, report.year);
    assert_eq!(store.unacknowledged_notifications(id).len(), 1);
    assert!(report.message.is_none());
}

#[test]
fn choice_event_is_deferred_not_applied() {
    let (mut store, id) = world(100, 30);
    let before = city(&store, id);
    let mut engine = engine(vec![def("dispute", dispute)]);

    let report = engine.finish_turn(&mut store).unwrap();

    assert_eq!(report.directive, TurnDirective::ShowPendingChoice);
    assert_eq!(report.pending_choices.len(), 1);
    assert!(report.notifications.is_empty());
    assert!(store.notifications(id).is_empty());

    let after = city(&store, id);
    assert_eq!(after.savegame.coins, before.savegame.coins);
    assert_eq!(after.savegame.unrest, before.savegame.unrest);
}

#[test]
fn resolving_applies_the_shown_branch_once() {
    let (mut store, id) = world(100, 30);
    let mut engine = engine(vec![def("dispute", dispute)]);
    let report = engine.finish_turn(&mut store).unwrap();
    let pending = report.pending_choices.first().unwrap().clone();

    // Expected state: the stored branch applied directly.
    let before = city(&store, id);
    let shown = engine
        .catalog()
        .instantiate(&pending.event_key, &before, pending.roll_seed)
        .unwrap();
    let branch = shown.choices().into_iter().next().unwrap();
    let mut expected = before.clone();
    branch.apply(&mut expected).unwrap();

    // The presentation carries the same magnitudes.
    let view = engine.describe_pending_choice(&store, pending.id).unwrap();
    assert_eq!(view.choices.first().unwrap().description, branch.description);
    assert_eq!(view.choices.len(), 2);

    // Out-of-range index: rejected, row intact.
    let invalid = engine.resolve_pending_choice(&mut store, pending.id, 99);
    assert!(matches!(
        invalid,
        Err(EngineError::Precondition(PreconditionError::InvalidChoiceIndex {
            index: 99,
            available: 2
        }))
    ));
    assert!(store.pending_choice(pending.id, id).is_some());
    assert_eq!(city(&store, id), before);

    let resolution = engine
        .resolve_pending_choice(&mut store, pending.id, 0)
        .unwrap();
    assert_eq!(resolution.directive, ChoiceDirective::Done);
    assert!(resolution.message.ends_with("\n\nYou chose: Investigate"));

    let after = city(&store, id);
    assert_eq!(after.savegame.coins, expected.savegame.coins);
    assert_eq!(after.savegame.unrest, expected.savegame.unrest);
    assert!(after.savegame.coins < before.savegame.coins);
    assert!(store.pending_choices(id).is_empty());

    // The row is gone: a second resolution can't double-apply.
    let again = engine.resolve_pending_choice(&mut store, pending.id, 0);
    assert!(matches!(
        again,
        Err(EngineError::NotFound(NotFoundError::PendingChoice { .. }))
    ));
    assert_eq!(city(&store, id).savegame.coins, expected.savegame.coins);
}

#[test]
fn decision_deferred_before_its_key_was_disabled_still_resolves() {
    let (mut store, id) = world(100, 30);
    let mut engine = engine(vec![def("dispute", dispute)]);
    let pending = engine
        .finish_turn(&mut store)
        .unwrap()
        .pending_choices
        .first()
        .unwrap()
        .clone();
    let coins = city(&store, id).savegame.coins;

    let mut catalog = engine.catalog().clone();
    catalog.disable(EventKey::from_static("dispute"));
    let mut restarted =
        TurnEngine::new(catalog, EngineConfig::default()).with_rng(StdRng::seed_from_u64(8));

    let view = restarted.describe_pending_choice(&store, pending.id).unwrap();
    assert_eq!(view.title, "The Harvest Dispute");
    let resolution = restarted
        .resolve_pending_choice(&mut store, pending.id, 0)
        .unwrap();
    assert_eq!(resolution.directive, ChoiceDirective::Done);
    assert!(store.pending_choices(id).is_empty());
    assert!(city(&store, id).savegame.coins < coins);

    let report = restarted.finish_turn(&mut store).unwrap();
    assert!(report.pending_choices.is_empty());
}

#[test]
fn quiet_year_still_advances() {
    let (mut store, id) = world(100, 30);
    let year = city(&store, id).savegame.current_year;
    let mut engine = engine(vec![def("dud", dud)]);

    let report = engine.finish_turn(&mut store).unwrap();

    assert_eq!(report.directive, TurnDirective::None);
    assert_eq!(
        report.message.as_deref(),
        Some("It was a quiet year. Nothing happened out of the ordinary.")
    );
    assert_eq!(report.year, year + 1);
    assert_eq!(city(&store, id).savegame.current_year, year + 1);
    assert!(store.notifications(id).is_empty());
    assert!(store.pending_choices(id).is_empty());
}

// ============================================================================
// Gate and preconditions
// ============================================================================

#[test]
fn unacknowledged_notification_blocks_the_next_turn() {
    let (mut store, id) = world(100, 30);
    let mut engine = engine(vec![def("relief", relief)]);
    let report = engine.finish_turn(&mut store).unwrap();
    let year = city(&store, id).savegame.current_year;

    let blocked = engine.finish_turn(&mut store);
    assert!(matches!(
        blocked,
        Err(EngineError::Precondition(
            PreconditionError::UnacknowledgedNotifications { count: 1 }
        ))
    ));
    assert_eq!(city(&store, id).savegame.current_year, year);
    assert_eq!(store.notifications(id).len(), 1);

    let board = engine.notification_board(&store).unwrap();
    assert_eq!(board.unacknowledged, 1);
    let current = board.current.unwrap();
    assert_eq!(current.id, report.notifications.first().unwrap().id);

    let directive = engine
        .acknowledge_notification(&mut store, current.id)
        .unwrap();
    assert_eq!(directive, AcknowledgeDirective::Done);

    let next = engine.finish_turn(&mut store).unwrap();
    assert_eq!(next.year, year + 1);
}

#[test]
fn notifications_are_acknowledged_oldest_first() {
    let (mut store, _) = world(100, 30);
    let mut engine = engine(vec![def("first", relief), def("second", relief)]);
    engine.finish_turn(&mut store).unwrap();

    let first = engine.notification_board(&store).unwrap();
    assert_eq!(first.unacknowledged, 2);
    let directive = engine
        .acknowledge_notification(&mut store, first.current.unwrap().id)
        .unwrap();
    assert_eq!(directive, AcknowledgeDirective::MoreUnacknowledged);

    let second = engine.notification_board(&store).unwrap();
    assert_eq!(second.unacknowledged, 1);
    let directive = engine
        .acknowledge_notification(&mut store, second.current.unwrap().id)
        .unwrap();
    assert_eq!(directive, AcknowledgeDirective::Done);
}

#[test]
fn no_active_save_is_a_precondition_failure() {
    let mut store = MemoryStore::new();
    let mut engine = engine(vec![def("relief", relief)]);
    let result = engine.finish_turn(&mut store);
    assert!(matches!(
        result,
        Err(EngineError::Precondition(PreconditionError::NoActiveSave))
    ));
    assert_eq!(result.unwrap_err().status_code(), 400);
}

#[test]
fn mixed_turn_routes_each_event() {
    let (mut store, id) = world(100, 30);
    let mut engine = engine(vec![def("dispute", dispute), def("relief", relief)]);

    let report = engine.finish_turn(&mut store).unwrap();

    assert_eq!(report.directive, TurnDirective::ShowNotifications);
    assert_eq!(report.notifications.len(), 1);
    assert_eq!(report.pending_choices.len(), 1);
    assert_eq!(engine.pending_choices(&store).unwrap().len(), 1);
    assert_eq!(city(&store, id).savegame.unrest, 22);
}

#[test]
fn several_pending_choices_resolve_in_any_order() {
    let (mut store, id) = world(100, 30);
    let mut engine = engine(vec![def("dispute_a", dispute), def("dispute_b", dispute)]);
    let report = engine.finish_turn(&mut store).unwrap();
    assert_eq!(report.pending_choices.len(), 2);

    let newest = report.pending_choices.last().unwrap().id;
    let oldest = report.pending_choices.first().unwrap().id;

    let first = engine.resolve_pending_choice(&mut store, newest, 1).unwrap();
    assert_eq!(first.directive, ChoiceDirective::MorePending);
    let second = engine.resolve_pending_choice(&mut store, oldest, 1).unwrap();
    assert_eq!(second.directive, ChoiceDirective::Done);
    assert!(store.pending_choices(id).is_empty());
}

#[test]
fn pending_choice_of_another_save_is_not_found() {
    let (mut store, _) = world(100, 30);
    let mut engine = engine(vec![def("dispute", dispute)]);
    let report = engine.finish_turn(&mut store).unwrap();
    let pending = report.pending_choices.first().unwrap().id;

    let other = starting_city(Savegame::new("Elsewhere")).unwrap();
    let other_id = other.id();
    store.insert_city(other).unwrap();
    store.activate(other_id).unwrap();

    let result = engine.resolve_pending_choice(&mut store, pending, 0);
    assert!(matches!(result, Err(EngineError::NotFound(_))));
    assert_eq!(result.unwrap_err().status_code(), 404);
    assert!(engine.describe_pending_choice(&store, pending).is_err());
}

#[test]
fn broken_content_fails_loudly_and_rolls_back() {
    let (mut store, id) = world(100, 30);
    let before = city(&store, id);
    let mut engine = engine(vec![def("broken", broken)]);

    let result = engine.finish_turn(&mut store);

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration(ConfigurationError::MissingVerboseText { .. })
    ));
    assert!(err.is_fatal());
    assert_eq!(city(&store, id), before);
    assert!(store.notifications(id).is_empty());
}

// ============================================================================
// Instance stability
// ============================================================================

#[test]
fn repeated_calls_on_an_instance_never_reroll() {
    let (store, id) = world(100, 30);
    let city = city(&store, id);
    let mut rng = StdRng::seed_from_u64(99);
    let event = dispute(&city, &mut rng);

    assert_eq!(event.probability(), event.probability());
    assert_eq!(event.choices(), event.choices());
    assert_eq!(
        event.verbose_text(&city).unwrap(),
        event.verbose_text(&city).unwrap()
    );
}

#[test]
fn same_seed_reproduces_the_same_magnitudes() {
    let (store, id) = world(100, 30);
    let city = city(&store, id);
    let a = dispute(&city, &mut StdRng::seed_from_u64(1234));
    let b = dispute(&city, &mut StdRng::seed_from_u64(1234));
    assert_eq!(a.choices(), b.choices());
}
