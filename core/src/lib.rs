#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the blob arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations (spawns, contact notifications, clock ticks),
//! the world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values for systems to react to deterministically.
//! Systems consume event streams, query immutable snapshots, and respond
//! exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub mod action;
pub mod growth;
pub mod size;
pub mod tuning;

pub use action::{ConsumableAction, UnsupportedKindError};
pub use growth::{GrowthAnimation, GrowthState, GrowthStep, InvalidTransitionError};
pub use tuning::{Tuning, TuningError};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Places a new player blob into the arena.
    SpawnPlayer {
        /// World position the player starts at and later recovers toward.
        position: Vec2,
    },
    /// Places a new consumable blob into the arena.
    SpawnConsumable {
        /// Kind of blob to create. Only consumable kinds are accepted.
        kind: BlobKind,
        /// Signed food value the consumable imparts when eaten.
        food_value: i32,
        /// World position of the consumable.
        position: Vec2,
    },
    /// Removes a consumable from the arena.
    DespawnConsumable {
        /// Identifier of the consumable to remove.
        consumable: BlobId,
    },
    /// Reports that two blobs started overlapping.
    BeginContact {
        /// One participant of the contact.
        first: BlobId,
        /// The other participant of the contact.
        second: BlobId,
    },
    /// Reports that two blobs stopped overlapping.
    EndContact {
        /// One participant of the contact.
        first: BlobId,
        /// The other participant of the contact.
        second: BlobId,
    },
    /// Requests that a growth animation start for the contact pair.
    StartGrowth {
        /// Player and consumable involved in the consumption.
        pair: ContactPair,
    },
    /// Requests that the growth animation for the contact pair stop.
    CancelGrowth {
        /// Player and consumable involved in the consumption.
        pair: ContactPair,
    },
    /// Reports the velocity the physics collaborator measured for a player.
    SetPlayerVelocity {
        /// Identifier of the player.
        player: BlobId,
        /// Velocity measured during the last physics step.
        velocity: Vec2,
    },
    /// Moves a player to a new position.
    MovePlayer {
        /// Identifier of the player.
        player: BlobId,
        /// Destination position in world units.
        position: Vec2,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a player entered the arena.
    PlayerSpawned {
        /// Identifier assigned to the player.
        player: BlobId,
        /// Position the player was placed at.
        position: Vec2,
    },
    /// Confirms that a consumable entered the arena.
    ConsumableSpawned {
        /// Identifier assigned to the consumable.
        consumable: BlobId,
        /// Kind of the consumable.
        kind: BlobKind,
        /// Food value held by the consumable's action.
        food_value: i32,
        /// Size derived from the food value at spawn.
        size: Vec2,
    },
    /// Reports that a consumable could not be created.
    ConsumableRejected {
        /// Kind requested for the consumable.
        kind: BlobKind,
        /// Reason the request failed.
        reason: UnsupportedKindError,
    },
    /// Confirms that a consumable left the arena.
    ConsumableDespawned {
        /// Identifier of the removed consumable.
        consumable: BlobId,
    },
    /// Reports that a player touched a consumable.
    ContactBegan {
        /// Player and consumable in contact.
        pair: ContactPair,
        /// Kind of the consumable touched.
        kind: BlobKind,
    },
    /// Reports that a player stopped touching a consumable.
    ContactEnded {
        /// Player and consumable that separated.
        pair: ContactPair,
        /// Kind of the consumable released.
        kind: BlobKind,
    },
    /// Confirms that a growth animation is running for the pair.
    GrowthStarted {
        /// Player and consumable involved.
        pair: ContactPair,
        /// Total food value the animation will transfer.
        total: i32,
    },
    /// Reports that a consumption was refused because of the food value floor.
    GrowthRefused {
        /// Player and consumable involved.
        pair: ContactPair,
        /// Food value the player could end with once every running
        /// animation finishes.
        prospective: i64,
    },
    /// Reports a single bounded growth step applied to a player.
    GrowthStepped {
        /// Player and consumable involved.
        pair: ContactPair,
        /// Food value applied during the step.
        delta: i32,
        /// Player food value after the step.
        food_value: i32,
        /// Player size after the step.
        size: Vec2,
    },
    /// Reports that a growth animation transferred its full value.
    GrowthCompleted {
        /// Player and consumable involved.
        pair: ContactPair,
    },
    /// Reports that a growth animation stopped before completion.
    GrowthCancelled {
        /// Player and consumable involved.
        pair: ContactPair,
        /// Food value that was never transferred.
        remaining: i32,
    },
    /// Confirms that a player changed position.
    PlayerMoved {
        /// Identifier of the player.
        player: BlobId,
        /// Position before the move.
        from: Vec2,
        /// Position after the move.
        to: Vec2,
    },
}

/// Unique identifier assigned to a blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobId(u32);

impl BlobId {
    /// Creates a new blob identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of blobs that participate in consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlobKind {
    /// Blob steered by the player that grows by eating.
    Player,
    /// Ordinary consumable.
    Food,
    /// Consumable with a special effect.
    PowerUp,
}

impl BlobKind {
    /// Reports whether blobs of this kind can be eaten by a player.
    #[must_use]
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::Food | Self::PowerUp)
    }
}

/// Player and consumable taking part in a single consumption.
///
/// Ordering sorts by player first, which keeps per-pair tables iterating in a
/// deterministic order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactPair {
    player: BlobId,
    consumable: BlobId,
}

impl ContactPair {
    /// Creates a pair from its player and consumable participants.
    #[must_use]
    pub const fn new(player: BlobId, consumable: BlobId) -> Self {
        Self { player, consumable }
    }

    /// Player doing the eating.
    #[must_use]
    pub const fn player(&self) -> BlobId {
        self.player
    }

    /// Consumable being eaten.
    #[must_use]
    pub const fn consumable(&self) -> BlobId {
        self.consumable
    }

    /// Reports whether the blob takes part in the pair.
    #[must_use]
    pub fn involves(&self, blob: BlobId) -> bool {
        self.player == blob || self.consumable == blob
    }
}

/// Immutable representation of a single player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Unique identifier assigned to the player.
    pub id: BlobId,
    /// Accumulated food value.
    pub food_value: i32,
    /// Accumulated visual scale.
    pub size: Vec2,
    /// Current world position.
    pub position: Vec2,
    /// Position captured at spawn.
    pub start_position: Vec2,
    /// Velocity last reported by the physics collaborator.
    pub velocity: Vec2,
}

/// Immutable representation of a single consumable's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConsumableSnapshot {
    /// Unique identifier assigned to the consumable.
    pub id: BlobId,
    /// Strategy describing the consumable's effect; also carries its kind.
    pub action: ConsumableAction,
    /// Visual scale derived at spawn.
    pub size: Vec2,
    /// World position of the consumable.
    pub position: Vec2,
}

/// Read-only snapshot describing all consumables within the arena.
#[derive(Clone, Debug, Default)]
pub struct ConsumableView {
    snapshots: Vec<ConsumableSnapshot>,
}

impl ConsumableView {
    /// Creates a new consumable view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ConsumableSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Looks up the snapshot of a consumable.
    #[must_use]
    pub fn get(&self, id: BlobId) -> Option<&ConsumableSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ConsumableSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ConsumableSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all players within the arena.
#[derive(Clone, Debug, Default)]
pub struct PlayerView {
    snapshots: Vec<PlayerSnapshot>,
}

impl PlayerView {
    /// Creates a new player view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlayerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Looks up the snapshot of a player.
    #[must_use]
    pub fn get(&self, id: BlobId) -> Option<&PlayerSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlayerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a running growth animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthSnapshot {
    /// Player and consumable involved.
    pub pair: ContactPair,
    /// Food value still to be transferred.
    pub remaining: i32,
}

/// Moves `current` toward `target` by at most `max_distance`, never overshooting.
#[must_use]
pub fn move_towards(current: Vec2, target: Vec2, max_distance: f32) -> Vec2 {
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_distance || distance == 0.0 {
        return target;
    }
    current + offset / distance * max_distance
}
