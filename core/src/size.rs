//! Mapping between signed food values and visual blob scale.
//!
//! Two size semantics coexist. Consumables derive their size once from their
//! food value via [`size_from_value`]. Players keep a running accumulator that
//! starts at a fixed default and is nudged by [`apply_delta`] on every growth
//! step; it is never recomputed from the player's food value.

use glam::Vec2;

/// Smallest scale a consumable is drawn with, regardless of its food value.
pub const MIN_VISIBLE_SIZE: f32 = 0.1;

/// Derives the square scale of a consumable from its food value.
///
/// The sign of `value` is ignored, so a draining power-up is as large as food
/// of the same magnitude. `max_magnitude` is clamped to at least one so the
/// result is always finite and strictly positive.
#[must_use]
pub fn size_from_value(value: i32, max_magnitude: i32, min_visible: f32) -> Vec2 {
    let maximum = max_magnitude.max(1) as f32;
    let magnitude = value.unsigned_abs() as f32;
    Vec2::splat(min_visible + magnitude / maximum)
}

/// Per-axis scale change produced by transferring `delta` food value.
///
/// `growth_factor` dampens visual growth relative to the logical change.
#[must_use]
pub fn growth_increment(delta: i32, growth_factor: f32, max_magnitude: i32) -> Vec2 {
    let denominator = growth_factor * max_magnitude.max(1) as f32;
    Vec2::splat(delta as f32 / denominator)
}

/// Adds the growth increment for `delta` to an accumulated size.
#[must_use]
pub fn apply_delta(size: Vec2, delta: i32, growth_factor: f32, max_magnitude: i32) -> Vec2 {
    size + growth_increment(delta, growth_factor, max_magnitude)
}
