//! Random source shared by the question bank and the gacha pool.
//!
//! Production uses the thread-local RNG; `RNG_SEED` switches to a seeded
//! `StdRng` so a run can be replayed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, 1)`.
    fn roll(&self) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick(&self, len: usize) -> usize;
}

pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen::<f64>(),
            Err(poisoned) => poisoned.into_inner().gen::<f64>(),
        }
    }

    fn pick(&self, len: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..len),
            Err(poisoned) => poisoned.into_inner().gen_range(0..len),
        }
    }
}

/// Replays fixed rolls and picks in order, cycling when exhausted.
#[cfg(test)]
pub struct ScriptedRandom {
    rolls: Vec<f64>,
    picks: Vec<usize>,
    cursor: Mutex<(usize, usize)>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(rolls: Vec<f64>, picks: Vec<usize>) -> Self {
        Self {
            rolls,
            picks,
            cursor: Mutex::new((0, 0)),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn roll(&self) -> f64 {
        let mut cursor = self.cursor.lock().unwrap();
        let value = self.rolls[cursor.0 % self.rolls.len()];
        cursor.0 += 1;
        value
    }

    fn pick(&self, len: usize) -> usize {
        let mut cursor = self.cursor.lock().unwrap();
        let value = self.picks[cursor.1 % self.picks.len()] % len;
        cursor.1 += 1;
        value
    }
}
