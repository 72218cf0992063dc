#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the blob arena.

mod blobs;
mod growth;

use blob_arena_core::{
    Command, ConsumableAction, ContactPair, Event, GrowthAnimation, Tuning, TuningError,
};

use crate::{blobs::BlobRegistry, growth::GrowthTable};

/// Represents the authoritative arena state.
#[derive(Debug)]
pub struct World {
    tuning: Tuning,
    blobs: BlobRegistry,
    growths: GrowthTable,
    tick_index: u64,
}

impl World {
    /// Creates an empty arena using the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_tuning(Tuning::default())
    }

    /// Creates an empty arena after validating the provided tuning.
    pub fn with_tuning(tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::from_valid_tuning(tuning))
    }

    fn from_valid_tuning(tuning: Tuning) -> Self {
        Self {
            tuning,
            blobs: BlobRegistry::new(),
            growths: GrowthTable::default(),
            tick_index: 0,
        }
    }

    fn start_growth(&mut self, pair: ContactPair, out_events: &mut Vec<Event>) {
        if self.growths.is_running(pair) {
            tracing::trace!(?pair, "growth already running");
            return;
        }

        let Some(player) = self.blobs.player(pair.player()) else {
            return;
        };
        let Some(consumable) = self.blobs.consumable(pair.consumable()) else {
            return;
        };

        let total = consumable.action.food_value();
        // Running gains may still be cancelled, so only running losses count
        // toward the floor.
        let (gains, losses) = self.growths.pending(pair.player());
        let prospective = i64::from(player.food_value)
            + i64::from(total)
            + if total < 0 { losses } else { gains };
        if !self.tuning.admits(prospective) {
            tracing::debug!(?pair, prospective, "consumption refused by food value bounds");
            out_events.push(Event::GrowthRefused { pair, prospective });
            return;
        }

        let animation = GrowthAnimation::start(total, self.tuning.step_size);
        tracing::debug!(?pair, total, steps = animation.steps_left(), "growth started");
        out_events.push(Event::GrowthStarted { pair, total });

        if animation.is_running() {
            self.growths.insert(pair, animation);
        } else {
            out_events.push(Event::GrowthCompleted { pair });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SpawnPlayer { position } => {
            let player = world.blobs.spawn_player(position, &world.tuning);
            out_events.push(Event::PlayerSpawned { player, position });
        }
        Command::SpawnConsumable {
            kind,
            food_value,
            position,
        } => match ConsumableAction::for_kind(kind, food_value) {
            Ok(action) => {
                let consumable = world
                    .blobs
                    .spawn_consumable(action, position, &world.tuning);
                out_events.push(Event::ConsumableSpawned {
                    consumable: consumable.id,
                    kind: consumable.action.kind(),
                    food_value: consumable.action.food_value(),
                    size: consumable.size,
                });
            }
            Err(reason) => {
                tracing::warn!(%reason, "consumable spawn rejected");
                out_events.push(Event::ConsumableRejected { kind, reason });
            }
        },
        Command::DespawnConsumable { consumable } => {
            if world.blobs.remove_consumable(consumable).is_none() {
                return;
            }
            for (pair, remaining) in world.growths.cancel_involving(consumable) {
                tracing::debug!(?pair, remaining, "growth cancelled by despawn");
                out_events.push(Event::GrowthCancelled { pair, remaining });
            }
            out_events.push(Event::ConsumableDespawned { consumable });
        }
        Command::BeginContact { first, second } => {
            if let Some((pair, kind)) = world.blobs.resolve_contact(first, second) {
                out_events.push(Event::ContactBegan { pair, kind });
            }
        }
        Command::EndContact { first, second } => {
            if let Some((pair, kind)) = world.blobs.resolve_contact(first, second) {
                out_events.push(Event::ContactEnded { pair, kind });
            }
        }
        Command::StartGrowth { pair } => world.start_growth(pair, out_events),
        Command::CancelGrowth { pair } => {
            if let Some(remaining) = world.growths.cancel(pair) {
                tracing::debug!(?pair, remaining, "growth cancelled");
                out_events.push(Event::GrowthCancelled { pair, remaining });
            }
        }
        Command::SetPlayerVelocity { player, velocity } => {
            if let Some(state) = world.blobs.player_mut(player) {
                state.velocity = velocity;
            }
        }
        Command::MovePlayer { player, position } => {
            if let Some(state) = world.blobs.player_mut(player) {
                let from = state.position;
                if from != position {
                    state.position = position;
                    out_events.push(Event::PlayerMoved {
                        player,
                        from,
                        to: position,
                    });
                }
            }
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            world
                .growths
                .advance(&mut world.blobs, &world.tuning, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use blob_arena_core::{
        BlobId, ConsumableSnapshot, ConsumableView, ContactPair, GrowthSnapshot, PlayerSnapshot,
        PlayerView, Tuning,
    };

    use super::World;

    /// Provides read-only access to the balancing parameters.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the state of a single player.
    #[must_use]
    pub fn player(world: &World, id: BlobId) -> Option<PlayerSnapshot> {
        world.blobs.player(id).map(|player| player.snapshot())
    }

    /// Captures a read-only view of every player.
    #[must_use]
    pub fn player_view(world: &World) -> PlayerView {
        PlayerView::from_snapshots(world.blobs.players().map(|player| player.snapshot()).collect())
    }

    /// Captures the state of a single consumable.
    #[must_use]
    pub fn consumable(world: &World, id: BlobId) -> Option<ConsumableSnapshot> {
        world
            .blobs
            .consumable(id)
            .map(|consumable| consumable.snapshot())
    }

    /// Captures a read-only view of every consumable.
    #[must_use]
    pub fn consumable_view(world: &World) -> ConsumableView {
        ConsumableView::from_snapshots(
            world
                .blobs
                .consumables()
                .map(|consumable| consumable.snapshot())
                .collect(),
        )
    }

    /// Reports the running growth animation for a contact pair, if any.
    #[must_use]
    pub fn growth(world: &World, pair: ContactPair) -> Option<GrowthSnapshot> {
        world.growths.get(pair)
    }

    /// Lists running growth animations in deterministic order.
    #[must_use]
    pub fn active_growths(world: &World) -> Vec<GrowthSnapshot> {
        world.growths.snapshots()
    }
}
