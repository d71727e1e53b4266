//! Injectable random source.
//!
//! Every gameplay roll (spawn kind and position, crits, drops, upgrade
//! shuffles, fire jitter) goes through [`RandomSource`] so tests can pin
//! outcomes with [`ScriptedRandom`].

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform sample in `[lo, hi)`.
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unit() as f32
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        ((self.next_unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of samples, then repeats `fallback` forever.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(samples: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fallback: fallback.clamp(0.0, 0.999_999),
        }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([], value)
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}
