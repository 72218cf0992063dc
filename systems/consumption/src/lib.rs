#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns player contacts into growth commands.
//!
//! A contact-begin hands the pair to the consumable's action, which requests a
//! growth animation. A contact-end cancels the pair's animation when the
//! consumable's action allows it; power-ups keep transferring until done.
//! Whether a consumption is admitted under the food value floor is decided
//! by the world when it applies `Command::StartGrowth`.

use blob_arena_core::{Command, ConsumableView, Event};

/// Consumption system that reacts to contact events.
#[derive(Debug, Default)]
pub struct Consumption {
    scratch: Vec<Command>,
}

impl Consumption {
    /// Creates a new consumption system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the consumable view to emit growth commands.
    pub fn handle(&mut self, events: &[Event], consumables: &ConsumableView, out: &mut Vec<Command>) {
        self.scratch.clear();

        for event in events {
            match event {
                Event::ContactBegan { pair, .. } => {
                    let Some(consumable) = consumables.get(pair.consumable()) else {
                        continue;
                    };
                    consumable.action.on_player_consumption(
                        pair.player(),
                        pair.consumable(),
                        &mut self.scratch,
                    );
                }
                Event::ContactEnded { pair, .. } => {
                    let cancels = consumables
                        .get(pair.consumable())
                        .is_some_and(|consumable| consumable.action.cancels_on_contact_end());
                    if cancels {
                        self.scratch.push(Command::CancelGrowth { pair: *pair });
                    }
                }
                _ => {}
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
