#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drifts stationary players back to their start position.

use std::time::Duration;

use blob_arena_core::{move_towards, Command, Event, PlayerView, Tuning};
use glam::Vec2;

/// Configuration parameters required to construct the recovery system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    speed: f32,
}

impl Config {
    /// Creates a configuration that recovers at `speed` world units per second.
    #[must_use]
    pub const fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Derives the configuration from the arena tuning.
    #[must_use]
    pub const fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.recovery_speed)
    }
}

/// Recovery system that emits `Command::MovePlayer` for idle, displaced players.
#[derive(Debug)]
pub struct Recovery {
    speed: f32,
}

impl Recovery {
    /// Creates a new recovery system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            speed: config.speed,
        }
    }

    /// Consumes time events and the player view to emit recovery moves.
    ///
    /// Players whose last reported velocity is non-zero are left to the
    /// physics collaborator.
    pub fn handle(&mut self, events: &[Event], players: &PlayerView, out: &mut Vec<Command>) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = elapsed.saturating_add(*dt);
            }
        }

        let step = self.step_distance(elapsed);
        if step <= 0.0 {
            return;
        }

        for player in players.iter() {
            if player.velocity != Vec2::ZERO || player.position == player.start_position {
                continue;
            }
            out.push(Command::MovePlayer {
                player: player.id,
                position: move_towards(player.position, player.start_position, step),
            });
        }
    }

    fn step_distance(&self, elapsed: Duration) -> f32 {
        self.speed * elapsed.as_secs_f32()
    }
}
