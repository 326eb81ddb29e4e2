//! Id allocation for resource actors.
//!
//! An [`IdSource`] only proposes candidates. The [`ResourceActor`](crate::ResourceActor)
//! owns the store, so it is the one that checks a candidate against existing
//! entries and asks for another on collision.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

/// Number of candidates the actor draws before giving up on a create.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// Proposes raw ids for new entities.
pub trait IdSource: Send + 'static {
    fn next_id(&mut self) -> u32;
}

/// Monotonic counter starting at 1. Never collides until it wraps.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Uniform random ids drawn from an inclusive range.
///
/// Collisions are expected to be rare when the range is large relative to the
/// number of live entities, but they are possible, which is why the actor
/// re-draws instead of trusting the source.
#[derive(Debug, Clone)]
pub struct RandomIds {
    range: RangeInclusive<u32>,
    rng: StdRng,
}

impl RandomIds {
    pub fn new(range: RangeInclusive<u32>) -> Self {
        Self {
            range,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(range: RangeInclusive<u32>, seed: u64) -> Self {
        Self {
            range,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self) -> u32 {
        self.rng.gen_range(self.range.clone())
    }
}
