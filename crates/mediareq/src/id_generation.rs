//! Random ticket id generation.
//!
//! Ids are drawn uniformly from 1000-9999 and redrawn on collision with an
//! id already in the store. The draw itself comes from an [`IdSource`], so
//! tests can script the exact sequence of raw values (including repeats) to
//! exercise the collision path deterministically.
//!
//! # Example
//!
//! ```
//! use mediareq::domain::TicketId;
//! use mediareq::id_generation::{IdGenerator, RandomIdSource};
//! use std::collections::HashSet;
//!
//! let mut generator = IdGenerator::new(Box::new(RandomIdSource::seeded(7)));
//! let taken = HashSet::<TicketId>::new();
//!
//! let id = generator.generate(|id| taken.contains(id), taken.len()).unwrap();
//! assert_eq!(id.as_str().len(), 4);
//! ```

use crate::domain::{MAX_TICKET_ID, MIN_TICKET_ID, TICKET_ID_SPACE, TicketId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, warn};

/// Random draws attempted before falling back to a linear scan.
const MAX_RANDOM_ATTEMPTS: usize = 1000;

/// Errors that can occur during ID generation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdGenerationError {
    /// All ids in the space are taken.
    #[error("All {capacity} request IDs are in use")]
    Exhausted {
        /// Size of the id space.
        capacity: usize,
    },
}

/// Supplies raw candidate values for new ids.
pub trait IdSource: Send {
    /// Draw the next candidate. Values outside 1000-9999 are discarded by
    /// the generator.
    fn next_candidate(&mut self) -> u16;
}

/// Uniform random candidates backed by [`StdRng`].
#[derive(Debug)]
pub struct RandomIdSource {
    rng: StdRng,
}

impl RandomIdSource {
    /// Source seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source for tests and simulations.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIdSource {
    fn next_candidate(&mut self) -> u16 {
        self.rng.gen_range(MIN_TICKET_ID..=MAX_TICKET_ID)
    }
}

/// Replays a fixed list of candidates, cycling when it runs out.
///
/// Useful for forcing collisions in tests.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone)]
pub struct ScriptedIdSource {
    values: Vec<u16>,
    position: usize,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedIdSource {
    /// Create a source that yields `values` in order.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty.
    #[must_use]
    pub fn new(values: Vec<u16>) -> Self {
        assert!(!values.is_empty(), "ScriptedIdSource needs at least one value");
        Self {
            values,
            position: 0,
        }
    }

    /// Number of candidates drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.position
    }
}

#[cfg(any(test, feature = "test-util"))]
impl IdSource for ScriptedIdSource {
    fn next_candidate(&mut self) -> u16 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

/// Collision-aware ticket id generator.
pub struct IdGenerator {
    source: Box<dyn IdSource>,
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("source", &"<dyn IdSource>")
            .finish()
    }
}

impl IdGenerator {
    /// Create a generator drawing from `source`.
    #[must_use]
    pub fn new(source: Box<dyn IdSource>) -> Self {
        Self { source }
    }

    /// Generator backed by an entropy-seeded [`RandomIdSource`].
    #[must_use]
    pub fn random() -> Self {
        Self::new(Box::new(RandomIdSource::new()))
    }

    /// Generate an id for which `is_taken` returns `false`.
    ///
    /// `taken_count` is the number of ids currently in use; it lets the
    /// generator fail fast once the space is full.
    ///
    /// Candidates are drawn from the source until a free one appears. After
    /// [`MAX_RANDOM_ATTEMPTS`] consecutive misses (only plausible in a nearly
    /// full store) the generator scans upward from the last candidate,
    /// wrapping at 9999, and returns the first free id.
    ///
    /// # Errors
    ///
    /// Returns [`IdGenerationError::Exhausted`] when every id is taken.
    pub fn generate<F>(
        &mut self,
        is_taken: F,
        taken_count: usize,
    ) -> Result<TicketId, IdGenerationError>
    where
        F: Fn(&TicketId) -> bool,
    {
        if taken_count >= TICKET_ID_SPACE {
            return Err(IdGenerationError::Exhausted {
                capacity: TICKET_ID_SPACE,
            });
        }

        let mut last = MIN_TICKET_ID;
        for attempt in 0..MAX_RANDOM_ATTEMPTS {
            let raw = self.source.next_candidate();
            let Some(candidate) = TicketId::from_number(raw) else {
                debug!(raw, "Discarding out-of-range id candidate");
                continue;
            };
            last = raw;

            if !is_taken(&candidate) {
                if attempt > 0 {
                    debug!(attempt, id = %candidate, "Generated unique ID after collision retries");
                }
                return Ok(candidate);
            }
        }

        warn!(
            attempts = MAX_RANDOM_ATTEMPTS,
            taken_count, "Random id draws exhausted, scanning for a free id"
        );
        scan_for_free_id(last, &is_taken).ok_or(IdGenerationError::Exhausted {
            capacity: TICKET_ID_SPACE,
        })
    }
}

/// Walk the id space once starting at `start`, wrapping at the top.
fn scan_for_free_id<F>(start: u16, is_taken: &F) -> Option<TicketId>
where
    F: Fn(&TicketId) -> bool,
{
    let span = MAX_TICKET_ID - MIN_TICKET_ID + 1;
    let offset = start.saturating_sub(MIN_TICKET_ID) % span;
    (0..span)
        .map(|step| MIN_TICKET_ID + (offset + step) % span)
        .filter_map(TicketId::from_number)
        .find(|candidate| !is_taken(candidate))
}
