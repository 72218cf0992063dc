use std::time::Duration;

use blob_arena_core::{BlobId, BlobKind, Command, ContactPair, Event, Tuning};
use blob_arena_system_consumption::Consumption;
use blob_arena_world::{self as world, query, World};
use glam::Vec2;

const TICK: Duration = Duration::from_millis(16);

struct Arena {
    world: World,
    consumption: Consumption,
}

impl Arena {
    fn new() -> Self {
        let tuning = Tuning {
            minimum_food_value: -50,
            max_food_value: 100,
            step_size: 5,
            growth_factor: 3.0,
            ..Tuning::default()
        };
        Self {
            world: World::with_tuning(tuning).expect("valid tuning"),
            consumption: Consumption::new(),
        }
    }

    fn submit(&mut self, command: Command) -> Vec<Event> {
        let mut produced = Vec::new();
        let mut pending = vec![command];

        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }

            let consumables = query::consumable_view(&self.world);
            let mut commands = Vec::new();
            self.consumption.handle(&events, &consumables, &mut commands);

            produced.extend(events);
            pending = commands;
        }

        produced
    }

    fn spawn_player(&mut self) -> BlobId {
        let events = self.submit(Command::SpawnPlayer {
            position: Vec2::ZERO,
        });
        match events.as_slice() {
            [Event::PlayerSpawned { player, .. }] => *player,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    fn spawn(&mut self, kind: BlobKind, food_value: i32) -> BlobId {
        let events = self.submit(Command::SpawnConsumable {
            kind,
            food_value,
            position: Vec2::new(1.0, 0.0),
        });
        match events.as_slice() {
            [Event::ConsumableSpawned { consumable, .. }] => *consumable,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    fn begin(&mut self, pair: ContactPair) -> Vec<Event> {
        self.submit(Command::BeginContact {
            first: pair.player(),
            second: pair.consumable(),
        })
    }

    fn end(&mut self, pair: ContactPair) -> Vec<Event> {
        self.submit(Command::EndContact {
            first: pair.consumable(),
            second: pair.player(),
        })
    }

    fn tick(&mut self) -> Vec<Event> {
        self.submit(Command::Tick { dt: TICK })
    }

    fn food_value(&self, player: BlobId) -> i32 {
        query::player(&self.world, player)
            .expect("player exists")
            .food_value
    }

    fn size(&self, player: BlobId) -> Vec2 {
        query::player(&self.world, player).expect("player exists").size
    }
}

fn steps(events: &[Event]) -> Vec<i32> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::GrowthStepped { delta, .. } => Some(*delta),
            _ => None,
        })
        .collect()
}

fn feed_to_completion(arena: &mut Arena, player: BlobId, food_value: i32) {
    let food = arena.spawn(BlobKind::Food, food_value);
    let pair = ContactPair::new(player, food);
    let _ = arena.begin(pair);
    while query::growth(&arena.world, pair).is_some() {
        let _ = arena.tick();
    }
    let _ = arena.submit(Command::DespawnConsumable { consumable: food });
}

#[test]
fn food_transfers_over_bounded_ticks() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    let food = arena.spawn(BlobKind::Food, 30);
    let pair = ContactPair::new(player, food);

    let began = arena.begin(pair);
    assert!(began.contains(&Event::GrowthStarted { pair, total: 30 }));
    assert_eq!(arena.food_value(player), 0, "begin never applies a step");

    let start_size = arena.size(player);
    let mut completed_at = None;
    for tick in 1..=6 {
        let before = arena.size(player);
        let events = arena.tick();
        assert_eq!(steps(&events), vec![5]);
        let increment = arena.size(player).x - before.x;
        assert!((increment - 5.0 / 300.0).abs() < 1e-5, "tick {tick}");
        if events.contains(&Event::GrowthCompleted { pair }) {
            completed_at = Some(tick);
        }
    }

    assert_eq!(completed_at, Some(6));
    assert_eq!(arena.food_value(player), 30);
    let total = arena.size(player) - start_size;
    assert!((total.x - 0.1).abs() < 1e-5);
    assert!((total.y - 0.1).abs() < 1e-5);

    assert!(steps(&arena.tick()).is_empty(), "no steps after completion");
}

#[test]
fn releasing_food_keeps_partial_growth() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    let food = arena.spawn(BlobKind::Food, 30);
    let pair = ContactPair::new(player, food);

    let _ = arena.begin(pair);
    let _ = arena.tick();
    let _ = arena.tick();

    let ended = arena.end(pair);
    assert!(ended.contains(&Event::GrowthCancelled {
        pair,
        remaining: 20
    }));
    assert_eq!(arena.food_value(player), 10);

    let size = arena.size(player);
    for _ in 0..10 {
        assert!(steps(&arena.tick()).is_empty());
    }
    assert_eq!(arena.food_value(player), 10);
    assert_eq!(arena.size(player), size);
    assert!(query::growth(&arena.world, pair).is_none());
}

#[test]
fn lethal_power_up_is_refused() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    feed_to_completion(&mut arena, player, 20);
    assert_eq!(arena.food_value(player), 20);

    let power_up = arena.spawn(BlobKind::PowerUp, -80);
    let pair = ContactPair::new(player, power_up);
    let size = arena.size(player);

    let events = arena.begin(pair);
    assert!(events.contains(&Event::GrowthRefused {
        pair,
        prospective: -60
    }));
    assert!(query::growth(&arena.world, pair).is_none());

    let _ = arena.tick();
    assert_eq!(arena.food_value(player), 20);
    assert_eq!(arena.size(player), size);
}

#[test]
fn overlapping_drains_cannot_breach_the_floor() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    let first = ContactPair::new(player, arena.spawn(BlobKind::PowerUp, -40));
    let second = ContactPair::new(player, arena.spawn(BlobKind::PowerUp, -40));

    let began = arena.begin(first);
    assert!(began.contains(&Event::GrowthStarted {
        pair: first,
        total: -40
    }));

    let _ = arena.tick();
    let refused = arena.begin(second);
    assert!(refused.contains(&Event::GrowthRefused {
        pair: second,
        prospective: -80
    }));
    assert!(query::growth(&arena.world, second).is_none());

    for _ in 0..20 {
        let _ = arena.tick();
    }
    assert_eq!(arena.food_value(player), -40);
}

#[test]
fn repeated_contact_does_not_duplicate_growth() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    let food = arena.spawn(BlobKind::Food, 12);
    let pair = ContactPair::new(player, food);

    let _ = arena.begin(pair);
    let second = arena.begin(pair);
    assert!(!second
        .iter()
        .any(|event| matches!(event, Event::GrowthStarted { .. })));
    assert_eq!(query::active_growths(&arena.world).len(), 1);

    assert_eq!(steps(&arena.tick()), vec![5]);
    assert_eq!(steps(&arena.tick()), vec![5]);
    assert_eq!(steps(&arena.tick()), vec![2]);
    assert_eq!(arena.food_value(player), 12);
}

#[test]
fn power_ups_finish_after_release() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    let power_up = arena.spawn(BlobKind::PowerUp, 10);
    let pair = ContactPair::new(player, power_up);

    let _ = arena.begin(pair);
    let _ = arena.tick();
    let ended = arena.end(pair);
    assert!(!ended
        .iter()
        .any(|event| matches!(event, Event::GrowthCancelled { .. })));

    let events = arena.tick();
    assert!(events.contains(&Event::GrowthCompleted { pair }));
    assert_eq!(arena.food_value(player), 10);
}

#[test]
fn draining_power_up_shrinks_the_player() {
    let mut arena = Arena::new();
    let player = arena.spawn_player();
    let power_up = arena.spawn(BlobKind::PowerUp, -30);
    let pair = ContactPair::new(player, power_up);
    let start = arena.size(player);

    let _ = arena.begin(pair);
    let mut deltas = Vec::new();
    while query::growth(&arena.world, pair).is_some() {
        deltas.extend(steps(&arena.tick()));
    }

    assert_eq!(deltas, vec![-5; 6]);
    assert_eq!(arena.food_value(player), -30);
    assert!(((start.x - arena.size(player).x) - 0.1).abs() < 1e-5);
}

#[test]
fn player_to_player_contact_has_no_effect() {
    let mut arena = Arena::new();
    let first = arena.spawn_player();
    let second = arena.spawn_player();

    let events = arena.submit(Command::BeginContact { first, second });
    assert!(events.is_empty());
}

#[test]
fn replay_is_deterministic() {
    fn run() -> Vec<Event> {
        let mut arena = Arena::new();
        let mut log = Vec::new();
        let player = arena.spawn_player();
        let food = arena.spawn(BlobKind::Food, 23);
        let power_up = arena.spawn(BlobKind::PowerUp, -15);
        let food_pair = ContactPair::new(player, food);
        let power_pair = ContactPair::new(player, power_up);

        log.extend(arena.begin(food_pair));
        log.extend(arena.begin(power_pair));
        for tick in 0..8 {
            log.extend(arena.tick());
            if tick == 2 {
                log.extend(arena.end(food_pair));
            }
        }
        log
    }

    let first = run();
    let second = run();
    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.contains(&Event::GrowthCancelled {
        pair: ContactPair::new(BlobId::new(0), BlobId::new(1)),
        remaining: 8,
    }));
}
