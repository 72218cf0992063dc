//! Scripted feeding session that plays the arena, physics, and clock roles.

use std::time::Duration;

use anyhow::{Context, Result};
use blob_arena_core::{BlobId, Command, ContactPair, Event, PlayerSnapshot, Tuning};
use blob_arena_system_consumption::Consumption;
use blob_arena_system_recovery::{Config as RecoveryConfig, Recovery};
use blob_arena_world::{self as world, query, World};
use glam::Vec2;

use crate::meal::Meal;

/// How a single meal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MealOutcome {
    /// The full food value was transferred.
    Completed {
        /// Ticks the transfer took.
        ticks: u32,
    },
    /// Contact was lost before the transfer finished.
    Cancelled {
        /// Ticks that elapsed before the release.
        ticks: u32,
        /// Food value that was never transferred.
        remaining: i32,
    },
    /// The food value floor refused the consumption.
    Refused {
        /// Food value the player could have ended with.
        prospective: i64,
    },
    /// The consumable could not be spawned.
    Rejected,
    /// The tick budget ran out first.
    Unfinished {
        /// Ticks that elapsed.
        ticks: u32,
    },
}

/// Limits applied while feeding a meal.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FeedOptions {
    /// Tick after which contact is released, if any.
    pub(crate) release_after: Option<u32>,
    /// Largest number of ticks spent on one meal.
    pub(crate) max_ticks: u32,
}

/// World plus systems pumped until quiescent after every command.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    consumption: Consumption,
    recovery: Recovery,
    dt: Duration,
    player: BlobId,
}

impl Session {
    pub(crate) fn new(tuning: Tuning, dt: Duration) -> Result<Self> {
        let world = World::with_tuning(tuning).context("invalid tuning")?;
        let recovery = Recovery::new(RecoveryConfig::from_tuning(query::tuning(&world)));
        let mut session = Self {
            world,
            consumption: Consumption::new(),
            recovery,
            dt,
            player: BlobId::new(0),
        };

        let events = session.submit(Command::SpawnPlayer {
            position: Vec2::ZERO,
        });
        session.player = events
            .iter()
            .find_map(|event| match event {
                Event::PlayerSpawned { player, .. } => Some(*player),
                _ => None,
            })
            .context("world did not spawn the player")?;
        Ok(session)
    }

    pub(crate) fn player(&self) -> Result<PlayerSnapshot> {
        query::player(&self.world, self.player).context("player disappeared from the arena")
    }

    /// Pushes the player away from its start position, as a collision would.
    pub(crate) fn displace(&mut self, offset: Vec2) -> Result<()> {
        let position = self.player()?.position + offset;
        let _ = self.submit(Command::MovePlayer {
            player: self.player,
            position,
        });
        Ok(())
    }

    /// Spawns the meal next to the player, keeps them in contact, and ticks
    /// until the transfer ends or the options stop it.
    pub(crate) fn feed<F>(
        &mut self,
        meal: Meal,
        options: FeedOptions,
        mut on_tick: F,
    ) -> Result<MealOutcome>
    where
        F: FnMut(u32, &PlayerSnapshot),
    {
        let position = self.player()?.start_position + Vec2::X;
        let events = self.submit(Command::SpawnConsumable {
            kind: meal.kind,
            food_value: meal.food_value,
            position,
        });
        let Some(consumable) = events.iter().find_map(|event| match event {
            Event::ConsumableSpawned { consumable, .. } => Some(*consumable),
            _ => None,
        }) else {
            return Ok(MealOutcome::Rejected);
        };
        let pair = ContactPair::new(self.player, consumable);

        let events = self.submit(Command::BeginContact {
            first: self.player,
            second: consumable,
        });
        if let Some(prospective) = events.iter().find_map(|event| match event {
            Event::GrowthRefused { prospective, .. } => Some(*prospective),
            _ => None,
        }) {
            self.despawn(consumable);
            return Ok(MealOutcome::Refused { prospective });
        }
        if events.contains(&Event::GrowthCompleted { pair }) {
            self.despawn(consumable);
            return Ok(MealOutcome::Completed { ticks: 0 });
        }

        for tick in 1..=options.max_ticks {
            let events = self.submit(Command::Tick { dt: self.dt });
            on_tick(tick, &self.player()?);

            if events.contains(&Event::GrowthCompleted { pair }) {
                self.despawn(consumable);
                return Ok(MealOutcome::Completed { ticks: tick });
            }

            if options.release_after == Some(tick) {
                let events = self.submit(Command::EndContact {
                    first: consumable,
                    second: self.player,
                });
                if let Some(remaining) = cancelled_remaining(&events, pair) {
                    self.despawn(consumable);
                    return Ok(MealOutcome::Cancelled {
                        ticks: tick,
                        remaining,
                    });
                }
            }
        }

        self.despawn(consumable);
        Ok(MealOutcome::Unfinished {
            ticks: options.max_ticks,
        })
    }

    fn despawn(&mut self, consumable: BlobId) {
        let _ = self.submit(Command::DespawnConsumable { consumable });
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
            let players = query::player_view(&self.world);
            let mut commands = Vec::new();
            self.consumption.handle(&events, &consumables, &mut commands);
            self.recovery.handle(&events, &players, &mut commands);

            produced.extend(events);
            pending = commands;
        }

        produced
    }
}

fn cancelled_remaining(events: &[Event], pair: ContactPair) -> Option<i32> {
    events.iter().find_map(|event| match event {
        Event::GrowthCancelled {
            pair: cancelled,
            remaining,
        } if *cancelled == pair => Some(*remaining),
        _ => None,
    })
}
