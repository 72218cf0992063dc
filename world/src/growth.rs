//! Per-contact-pair table of running growth animations.

use std::collections::BTreeMap;

use blob_arena_core::{BlobId, ContactPair, Event, GrowthAnimation, GrowthSnapshot, Tuning};

use crate::blobs::BlobRegistry;

/// Running animations keyed by the contact pair that started them.
///
/// Only running animations are stored; completed or cancelled entries are
/// removed immediately so a stale step can never be applied.
#[derive(Debug, Default)]
pub(crate) struct GrowthTable {
    entries: BTreeMap<ContactPair, GrowthAnimation>,
}

impl GrowthTable {
    pub(crate) fn is_running(&self, pair: ContactPair) -> bool {
        self.entries.contains_key(&pair)
    }

    pub(crate) fn insert(&mut self, pair: ContactPair, animation: GrowthAnimation) {
        debug_assert!(animation.is_running(), "only running animations are tracked");
        let _ = self.entries.insert(pair, animation);
    }

    /// Sums what the player's running animations still have to transfer,
    /// returned as `(gains, losses)`.
    pub(crate) fn pending(&self, player: BlobId) -> (i64, i64) {
        self.entries
            .iter()
            .filter(|(pair, _)| pair.player() == player)
            .map(|(_, animation)| i64::from(animation.remaining()))
            .fold((0, 0), |(gains, losses), remaining| {
                if remaining > 0 {
                    (gains + remaining, losses)
                } else {
                    (gains, losses + remaining)
                }
            })
    }

    /// Stops the animation for the pair and reports the untransferred value.
    pub(crate) fn cancel(&mut self, pair: ContactPair) -> Option<i32> {
        let mut animation = self.entries.remove(&pair)?;
        animation.cancel().ok()?;
        Some(animation.remaining())
    }

    /// Stops every animation the blob takes part in.
    pub(crate) fn cancel_involving(&mut self, blob: BlobId) -> Vec<(ContactPair, i32)> {
        let pairs: Vec<ContactPair> = self
            .entries
            .keys()
            .copied()
            .filter(|pair| pair.involves(blob))
            .collect();
        pairs
            .into_iter()
            .filter_map(|pair| self.cancel(pair).map(|remaining| (pair, remaining)))
            .collect()
    }

    /// Applies one bounded step of every running animation to its player.
    pub(crate) fn advance(
        &mut self,
        blobs: &mut BlobRegistry,
        tuning: &Tuning,
        out_events: &mut Vec<Event>,
    ) {
        let mut finished: Vec<ContactPair> = Vec::new();

        for (pair, animation) in self.entries.iter_mut() {
            let Some(player) = blobs.player_mut(pair.player()) else {
                tracing::error!(?pair, "growth animation lost its player");
                finished.push(*pair);
                continue;
            };

            match animation.step() {
                Ok(step) => {
                    player.grow(step.delta, tuning);
                    tracing::trace!(
                        ?pair,
                        delta = step.delta,
                        food_value = player.food_value,
                        "growth step applied"
                    );
                    out_events.push(Event::GrowthStepped {
                        pair: *pair,
                        delta: step.delta,
                        food_value: player.food_value,
                        size: player.size,
                    });
                    if step.finished {
                        tracing::debug!(?pair, "growth completed");
                        out_events.push(Event::GrowthCompleted { pair: *pair });
                        finished.push(*pair);
                    }
                }
                Err(error) => {
                    tracing::error!(?pair, %error, "dropping growth animation");
                    finished.push(*pair);
                }
            }
        }

        for pair in finished {
            let _ = self.entries.remove(&pair);
        }
    }

    pub(crate) fn get(&self, pair: ContactPair) -> Option<GrowthSnapshot> {
        self.entries.get(&pair).map(|animation| GrowthSnapshot {
            pair,
            remaining: animation.remaining(),
        })
    }

    pub(crate) fn snapshots(&self) -> Vec<GrowthSnapshot> {
        self.entries
            .iter()
            .map(|(pair, animation)| GrowthSnapshot {
                pair: *pair,
                remaining: animation.remaining(),
            })
            .collect()
    }
}
