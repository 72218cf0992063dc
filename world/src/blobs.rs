//! Authoritative blob state and identifier allocation.

use std::collections::BTreeMap;

use blob_arena_core::{
    size, BlobId, BlobKind, ConsumableAction, ConsumableSnapshot, ContactPair, PlayerSnapshot,
    Tuning,
};
use glam::Vec2;

/// Player blob stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct PlayerState {
    /// Identifier allocated to the player.
    pub(crate) id: BlobId,
    /// Food value accumulated through growth steps.
    pub(crate) food_value: i32,
    /// Running accumulator; never recomputed from `food_value`.
    pub(crate) size: Vec2,
    /// Current world position.
    pub(crate) position: Vec2,
    /// Position the player spawned at and drifts back toward.
    pub(crate) start_position: Vec2,
    /// Velocity last reported by the physics collaborator.
    pub(crate) velocity: Vec2,
}

impl PlayerState {
    pub(crate) fn spawn(id: BlobId, position: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            food_value: 0,
            size: Vec2::splat(tuning.player_default_size),
            position,
            start_position: position,
            velocity: Vec2::ZERO,
        }
    }

    /// Applies one growth step to both the food value and the size.
    pub(crate) fn grow(&mut self, delta: i32, tuning: &Tuning) {
        self.size = size::apply_delta(
            self.size,
            delta,
            tuning.growth_factor,
            tuning.max_food_value,
        );
        self.food_value = self.food_value.saturating_add(delta);
    }

    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            food_value: self.food_value,
            size: self.size,
            position: self.position,
            start_position: self.start_position,
            velocity: self.velocity,
        }
    }
}

/// Consumable blob stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct ConsumableState {
    /// Identifier allocated to the consumable.
    pub(crate) id: BlobId,
    /// Effect the consumable has when eaten.
    pub(crate) action: ConsumableAction,
    /// Derived once from the action's food value at spawn.
    pub(crate) size: Vec2,
    /// World position of the consumable.
    pub(crate) position: Vec2,
}

impl ConsumableState {
    pub(crate) fn spawn(
        id: BlobId,
        action: ConsumableAction,
        position: Vec2,
        tuning: &Tuning,
    ) -> Self {
        Self {
            id,
            action,
            size: action.size(tuning.max_food_value, tuning.min_visible_size),
            position,
        }
    }

    pub(crate) fn snapshot(&self) -> ConsumableSnapshot {
        ConsumableSnapshot {
            id: self.id,
            action: self.action,
            size: self.size,
            position: self.position,
        }
    }
}

#[derive(Clone, Debug)]
enum BlobState {
    Player(PlayerState),
    Consumable(ConsumableState),
}

impl BlobState {
    fn kind(&self) -> BlobKind {
        match self {
            Self::Player(_) => BlobKind::Player,
            Self::Consumable(consumable) => consumable.action.kind(),
        }
    }
}

/// Registry that stores blobs and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct BlobRegistry {
    entries: BTreeMap<BlobId, BlobState>,
    next_blob_id: BlobId,
}

impl BlobRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_blob_id: BlobId::new(0),
        }
    }

    fn allocate(&mut self) -> BlobId {
        let id = self.next_blob_id;
        self.next_blob_id = BlobId::new(id.get().wrapping_add(1));
        id
    }

    pub(crate) fn spawn_player(&mut self, position: Vec2, tuning: &Tuning) -> BlobId {
        let id = self.allocate();
        let _ = self
            .entries
            .insert(id, BlobState::Player(PlayerState::spawn(id, position, tuning)));
        id
    }

    pub(crate) fn spawn_consumable(
        &mut self,
        action: ConsumableAction,
        position: Vec2,
        tuning: &Tuning,
    ) -> ConsumableSnapshot {
        let id = self.allocate();
        let state = ConsumableState::spawn(id, action, position, tuning);
        let snapshot = state.snapshot();
        let _ = self.entries.insert(id, BlobState::Consumable(state));
        snapshot
    }

    /// Removes a consumable, leaving players untouched.
    pub(crate) fn remove_consumable(&mut self, id: BlobId) -> Option<ConsumableState> {
        if !matches!(self.entries.get(&id), Some(BlobState::Consumable(_))) {
            return None;
        }
        match self.entries.remove(&id) {
            Some(BlobState::Consumable(consumable)) => Some(consumable),
            _ => None,
        }
    }

    pub(crate) fn player(&self, id: BlobId) -> Option<&PlayerState> {
        match self.entries.get(&id) {
            Some(BlobState::Player(player)) => Some(player),
            _ => None,
        }
    }

    pub(crate) fn player_mut(&mut self, id: BlobId) -> Option<&mut PlayerState> {
        match self.entries.get_mut(&id) {
            Some(BlobState::Player(player)) => Some(player),
            _ => None,
        }
    }

    pub(crate) fn consumable(&self, id: BlobId) -> Option<&ConsumableState> {
        match self.entries.get(&id) {
            Some(BlobState::Consumable(consumable)) => Some(consumable),
            _ => None,
        }
    }

    pub(crate) fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.entries.values().filter_map(|blob| match blob {
            BlobState::Player(player) => Some(player),
            BlobState::Consumable(_) => None,
        })
    }

    pub(crate) fn consumables(&self) -> impl Iterator<Item = &ConsumableState> {
        self.entries.values().filter_map(|blob| match blob {
            BlobState::Consumable(consumable) => Some(consumable),
            BlobState::Player(_) => None,
        })
    }

    /// Orders a player/consumable contact into a pair, in either argument order.
    ///
    /// Returns `None` for unknown blobs and for contacts between two players
    /// or two consumables.
    pub(crate) fn resolve_contact(
        &self,
        first: BlobId,
        second: BlobId,
    ) -> Option<(ContactPair, BlobKind)> {
        let first_kind = self.entries.get(&first)?.kind();
        let second_kind = self.entries.get(&second)?.kind();
        match (first_kind, second_kind) {
            (BlobKind::Player, kind) if kind.is_consumable() => {
                Some((ContactPair::new(first, second), kind))
            }
            (kind, BlobKind::Player) if kind.is_consumable() => {
                Some((ContactPair::new(second, first), kind))
            }
            _ => None,
        }
    }
}
