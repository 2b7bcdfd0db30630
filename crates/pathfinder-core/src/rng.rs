//! Random sources for graph generation and layout.
//!
//! Every algorithm in this crate draws its randomness through
//! [`RandomSource`], a uniform `[0, 1)` sampler. Passing the same source
//! state into generation and layout reproduces the same graph and the same
//! placements bit for bit.
//!
//! Three implementations are provided:
//!
//! - [`DeterministicRng`]: a seeded, platform-independent generator used by
//!   the CLI and the simulation campaign.
//! - [`ReplaySource`] / [`RecordingSource`]: record the draws one run made
//!   and feed them back verbatim.
//! - `rand::rngs::StdRng`, for callers that already carry a `rand` RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A uniform random number source over `[0, 1)`.
pub trait RandomSource {
    /// Next sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (high - low).mul_add(self.next_unit(), low)
    }

    /// Uniform index in `[0, upper)`, computed as `floor(r * upper)`.
    ///
    /// Returns 0 when `upper` is 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        let idx = (self.next_unit() * upper as f64).floor() as usize;
        idx.min(upper - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Tiny deterministic RNG.
///
/// A 64-bit LCG; only the top 53 bits feed [`RandomSource::next_unit`], so
/// the weak low bits never surface. Reproducible across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a new deterministic RNG from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Next pseudo-random `u64`.
    #[must_use]
    pub const fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }
}

impl RandomSource for DeterministicRng {
    #[allow(clippy::cast_precision_loss)]
    fn next_unit(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1_u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }
}

impl RandomSource for rand::rngs::StdRng {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// A fresh seed from the operating system's entropy source.
#[must_use]
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// An empty script always yields `0.0`. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    /// Create a source that replays `draws` in order.
    #[must_use]
    pub const fn new(draws: Vec<f64>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn next_unit(&mut self) -> f64 {
        // Largest f64 below 1.0.
        const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(0.0, MAX_UNIT)
    }
}

/// Wraps another source and records every draw it hands out.
#[derive(Debug, Clone)]
pub struct RecordingSource<R> {
    inner: R,
    draws: Vec<f64>,
}

impl<R: RandomSource> RecordingSource<R> {
    /// Start recording draws from `inner`.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            draws: Vec::new(),
        }
    }

    /// The draws handed out so far, in order.
    #[must_use]
    pub fn draws(&self) -> &[f64] {
        &self.draws
    }

    /// Stop recording and return a [`ReplaySource`] over the recorded draws.
    #[must_use]
    pub fn into_replay(self) -> ReplaySource {
        ReplaySource::new(self.draws)
    }
}

impl<R: RandomSource> RandomSource for RecordingSource<R> {
    fn next_unit(&mut self) -> f64 {
        let value = self.inner.next_unit();
        self.draws.push(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn deterministic_rng_is_reproducible() {
        let mut a = DeterministicRng::new(42);
        let mut b = DeterministicRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_unit().to_bits(), b.next_unit().to_bits());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(2);
        let same = (0..16).filter(|_| a.next_u64() == b.next_u64()).count();
        assert!(same < 16);
    }

    #[test]
    fn unit_samples_stay_in_half_open_range() {
        let mut rng = DeterministicRng::new(7);
        for _ in 0..10_000 {
            let x = rng.next_unit();
            assert!((0.0..1.0).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn below_never_reaches_upper() {
        let mut rng = ReplaySource::new(vec![0.0, 0.5, 0.999_999_999]);
        assert_eq!(rng.below(4), 0);
        assert_eq!(rng.below(4), 2);
        assert_eq!(rng.below(4), 3);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn uniform_maps_onto_interval() {
        let mut rng = ReplaySource::new(vec![0.0, 0.5]);
        assert!((rng.uniform(10.0, 20.0) - 10.0).abs() < f64::EPSILON);
        assert!((rng.uniform(10.0, 20.0) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn replay_cycles_and_counts() {
        let mut rng = ReplaySource::new(vec![0.25, 0.75]);
        let got: Vec<f64> = (0..4).map(|_| rng.next_unit()).collect();
        assert_eq!(got, vec![0.25, 0.75, 0.25, 0.75]);
        assert_eq!(rng.consumed(), 4);
    }

    #[test]
    fn empty_replay_yields_zero() {
        let mut rng = ReplaySource::new(Vec::new());
        assert!(rng.next_unit().abs() < f64::EPSILON);
    }

    #[test]
    fn recording_then_replaying_matches() {
        let mut rec = RecordingSource::new(DeterministicRng::new(99));
        let first: Vec<f64> = (0..8).map(|_| rec.next_unit()).collect();
        assert_eq!(rec.draws(), first.as_slice());

        let mut replay = rec.into_replay();
        let second: Vec<f64> = (0..8).map(|_| replay.next_unit()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn std_rng_is_a_source() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let x = rng.next_unit();
        assert!((0.0..1.0).contains(&x));
    }
}
