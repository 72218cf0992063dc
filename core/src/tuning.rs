//! Game-wide balancing constants for consumption and recovery.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::size::MIN_VISIBLE_SIZE;

/// Lowest food value a player may reach through consumption.
pub const DEFAULT_MINIMUM_FOOD_VALUE: i32 = -50;
/// Normalisation ceiling used for proportional sizing.
pub const DEFAULT_MAX_FOOD_VALUE: i32 = 100;
/// Largest food value magnitude transferred per tick.
pub const DEFAULT_STEP_SIZE: i32 = 5;
/// Damping applied to visual growth relative to food value change.
pub const DEFAULT_GROWTH_FACTOR: f32 = 3.0;
/// Speed, in world units per second, at which idle players drift home.
pub const DEFAULT_RECOVERY_SPEED: f32 = 0.2;
/// Scale a player spawns with.
pub const DEFAULT_PLAYER_SIZE: f32 = 0.9;

/// Balancing parameters shared by the world and its systems.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Floor a player's food value may never drop below through consumption.
    pub minimum_food_value: i32,
    /// Normalisation ceiling for sizing; must be positive.
    pub max_food_value: i32,
    /// Largest food value magnitude a growth animation applies per tick.
    pub step_size: i32,
    /// Damping applied to player growth.
    pub growth_factor: f32,
    /// Drift-correction speed toward the player's start position.
    pub recovery_speed: f32,
    /// Scale a player spawns with.
    pub player_default_size: f32,
    /// Smallest scale a consumable is drawn with.
    pub min_visible_size: f32,
}

/// Reasons a [`Tuning`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum TuningError {
    /// The sizing ceiling was zero or negative.
    #[error("max_food_value must be positive, got {0}")]
    MaxFoodValue(i32),
    /// The per-tick transfer cap was zero or negative.
    #[error("step_size must be positive, got {0}")]
    StepSize(i32),
    /// The growth damping was not a positive finite number.
    #[error("growth_factor must be positive and finite, got {0}")]
    GrowthFactor(f32),
    /// The recovery speed was negative or not finite.
    #[error("recovery_speed must be non-negative and finite, got {0}")]
    RecoverySpeed(f32),
    /// A size parameter was not a positive finite number.
    #[error("{name} must be positive and finite, got {value}")]
    Size {
        /// Name of the offending field.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
}

impl Tuning {
    /// Checks that every parameter lies in its valid range.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_food_value <= 0 {
            return Err(TuningError::MaxFoodValue(self.max_food_value));
        }
        if self.step_size <= 0 {
            return Err(TuningError::StepSize(self.step_size));
        }
        if !(self.growth_factor.is_finite() && self.growth_factor > 0.0) {
            return Err(TuningError::GrowthFactor(self.growth_factor));
        }
        if !(self.recovery_speed.is_finite() && self.recovery_speed >= 0.0) {
            return Err(TuningError::RecoverySpeed(self.recovery_speed));
        }
        for (name, value) in [
            ("player_default_size", self.player_default_size),
            ("min_visible_size", self.min_visible_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Size { name, value });
            }
        }
        Ok(())
    }

    /// Reports whether a consumption whose worst-case outcome is
    /// `prospective` may start.
    ///
    /// The outcome must stay strictly above the floor and fit a player's food
    /// value.
    #[must_use]
    pub fn admits(&self, prospective: i64) -> bool {
        prospective > i64::from(self.minimum_food_value) && prospective <= i64::from(i32::MAX)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            minimum_food_value: DEFAULT_MINIMUM_FOOD_VALUE,
            max_food_value: DEFAULT_MAX_FOOD_VALUE,
            step_size: DEFAULT_STEP_SIZE,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            recovery_speed: DEFAULT_RECOVERY_SPEED,
            player_default_size: DEFAULT_PLAYER_SIZE,
            min_visible_size: MIN_VISIBLE_SIZE,
        }
    }
}
