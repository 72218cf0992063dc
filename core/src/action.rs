//! Strategies describing what a consumable does to the player that eats it.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{size, BlobId, BlobKind, Command, ContactPair};

/// Effect a consumable imparts on contact, selected by its kind at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableAction {
    /// Plain food; its value is transferred through a growth animation.
    Food {
        /// Signed food value transferred to the player.
        food_value: i32,
    },
    /// Power-up; transferred like food and always eaten to completion.
    PowerUp {
        /// Signed food value transferred to the player.
        food_value: i32,
    },
}

/// Raised when a blob kind has no consumable behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("blob kind {kind:?} has no consumable action")]
pub struct UnsupportedKindError {
    /// Kind that was requested.
    pub kind: BlobKind,
}

impl ConsumableAction {
    /// Selects the action variant for a blob kind.
    pub fn for_kind(kind: BlobKind, food_value: i32) -> Result<Self, UnsupportedKindError> {
        match kind {
            BlobKind::Food => Ok(Self::Food { food_value }),
            BlobKind::PowerUp => Ok(Self::PowerUp { food_value }),
            BlobKind::Player => Err(UnsupportedKindError { kind }),
        }
    }

    /// Kind of blob the action belongs to.
    #[must_use]
    pub const fn kind(&self) -> BlobKind {
        match self {
            Self::Food { .. } => BlobKind::Food,
            Self::PowerUp { .. } => BlobKind::PowerUp,
        }
    }

    /// Signed food value the action imparts.
    #[must_use]
    pub const fn food_value(&self) -> i32 {
        match self {
            Self::Food { food_value } | Self::PowerUp { food_value } => *food_value,
        }
    }

    /// Replaces the food value the action imparts.
    pub fn set_food_value(&mut self, value: i32) {
        match self {
            Self::Food { food_value } | Self::PowerUp { food_value } => *food_value = value,
        }
    }

    /// Spawn size of a consumable carrying this action.
    #[must_use]
    pub fn size(&self, max_food_value: i32, min_visible: f32) -> Vec2 {
        size::size_from_value(self.food_value(), max_food_value, min_visible)
    }

    /// Reports whether losing contact stops an in-flight transfer.
    ///
    /// Power-ups are always eaten completely once started.
    #[must_use]
    pub const fn cancels_on_contact_end(&self) -> bool {
        matches!(self, Self::Food { .. })
    }

    /// Emits the commands a player contact triggers.
    ///
    /// Both variants hand the transfer to a growth animation. Instantaneous
    /// power-up effects belong in the `PowerUp` arm.
    pub fn on_player_consumption(&self, player: BlobId, consumable: BlobId, out: &mut Vec<Command>) {
        let pair = ContactPair::new(player, consumable);
        match self {
            Self::Food { .. } => out.push(Command::StartGrowth { pair }),
            Self::PowerUp { .. } => out.push(Command::StartGrowth { pair }),
        }
    }
}
