//! Injected random-choice capability for response selection.
//!
//! Selection is uniform over a resolved candidate list. Production code uses
//! [`ThreadRngChoice`]; tests substitute [`SeededChoice`] or [`FixedChoice`]
//! so the chosen candidate is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Source of candidate indices.
pub trait ChoiceSource: Send + Sync {
    /// Return an index in `0..len`. Callers never pass `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice backed by the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngChoice;

impl ChoiceSource for ThreadRngChoice {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len.max(1))
    }
}

/// Uniform choice from a seeded RNG, reproducible across runs.
#[derive(Debug)]
pub struct SeededChoice {
    rng: Mutex<StdRng>,
}

impl SeededChoice {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ChoiceSource for SeededChoice {
    fn pick(&self, len: usize) -> usize {
        let upper = len.max(1);
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..upper),
            // A poisoned RNG still holds a usable state.
            Err(poisoned) => poisoned.into_inner().gen_range(0..upper),
        }
    }
}

/// Always picks the same position (modulo the list length).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedChoice(pub usize);

impl ChoiceSource for FixedChoice {
    fn pick(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.0 % len }
    }
}
