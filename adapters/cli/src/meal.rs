//! Command-line descriptions of consumables and physics nudges.

use std::{num::ParseIntError, str::FromStr};

use blob_arena_core::BlobKind;
use glam::Vec2;
use thiserror::Error;

/// Delimiter separating the kind from the food value.
const FIELD_DELIMITER: char = ':';

/// Consumable offered to the player, written as `<kind>:<value>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Meal {
    /// Kind of blob to spawn.
    pub(crate) kind: BlobKind,
    /// Signed food value the consumable carries.
    pub(crate) food_value: i32,
}

/// Errors that can occur while parsing meal descriptions.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MealParseError {
    /// The description did not contain a `:` separator.
    #[error("meal '{0}' must look like <kind>:<value>")]
    MissingDelimiter(String),
    /// The kind segment was not recognised.
    #[error("unknown blob kind '{0}' (expected food, power-up or player)")]
    UnknownKind(String),
    /// The value segment was not a signed integer.
    #[error("food value '{value}' is not an integer: {source}")]
    InvalidValue {
        /// Offending value segment.
        value: String,
        /// Underlying parse failure.
        source: ParseIntError,
    },
}

impl FromStr for Meal {
    type Err = MealParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let (kind, food_value) = trimmed
            .split_once(FIELD_DELIMITER)
            .ok_or_else(|| MealParseError::MissingDelimiter(trimmed.to_owned()))?;

        let kind = parse_kind(kind.trim())?;
        let food_value = food_value
            .trim()
            .parse::<i32>()
            .map_err(|source| MealParseError::InvalidValue {
                value: food_value.trim().to_owned(),
                source,
            })?;

        Ok(Self { kind, food_value })
    }
}

fn parse_kind(kind: &str) -> Result<BlobKind, MealParseError> {
    match kind.to_ascii_lowercase().as_str() {
        "food" => Ok(BlobKind::Food),
        "power-up" | "powerup" | "power_up" => Ok(BlobKind::PowerUp),
        // Accepted so the world's rejection path can be exercised.
        "player" => Ok(BlobKind::Player),
        _ => Err(MealParseError::UnknownKind(kind.to_owned())),
    }
}

/// Offset applied to the player before feeding, written as `<x>,<y>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Displacement(pub(crate) Vec2);

/// Errors that can occur while parsing displacement vectors.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("displacement '{0}' must look like <x>,<y>")]
pub(crate) struct DisplacementParseError(String);

impl FromStr for Displacement {
    type Err = DisplacementParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DisplacementParseError(value.to_owned());
        let (x, y) = value.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<f32>().map_err(|_| invalid())?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(invalid());
        }
        Ok(Self(Vec2::new(x, y)))
    }
}
