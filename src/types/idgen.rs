//! Identifier generation for UUID-keyed records.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh ids for pools, performances, histories and bets.
pub trait IdGenerator: Send {
    fn next_id(&self) -> Uuid;
}

/// Random (v4) UUIDs from the OS CSPRNG. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic, strictly increasing ids for tests and fixtures.
///
/// ```rust
/// use cricket_fantasy::types::idgen::{IdGenerator, SequentialIdGenerator};
///
/// let ids = SequentialIdGenerator::starting_at(1);
/// assert_eq!(ids.next_id().as_u128(), 1);
/// assert_eq!(ids.next_id().as_u128(), 2);
/// ```
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::Relaxed)))
    }
}
