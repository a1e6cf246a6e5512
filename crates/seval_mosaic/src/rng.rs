//! The two random streams used by mosaic sampling.

use rand_chacha::ChaCha8Rng;
use seval_core::Seed;

/// ChaCha stream feeding class-balanced draws and the target-pool shuffle.
pub const NUMERIC_STREAM: u64 = 0;

/// ChaCha stream feeding the outer-pool and quadrant shuffles.
pub const SHUFFLE_STREAM: u64 = 1;

/// A pair of independent generators owned by one composition run.
///
/// `numeric` serves choice-with-replacement sampling and the target-pool
/// shuffle; `shuffle` serves the outer-pool shuffle and the per-mosaic
/// quadrant shuffle. Both come from the same seed but run on different ChaCha
/// streams, so neither one's consumption shifts the other's sequence.
#[derive(Debug, Clone)]
pub struct RngPair {
    numeric: ChaCha8Rng,
    shuffle: ChaCha8Rng,
}

impl RngPair {
    /// Build both generators from one seed.
    #[must_use]
    pub fn from_seed(seed: Seed) -> Self {
        Self {
            numeric: seed.to_stream_rng(NUMERIC_STREAM),
            shuffle: seed.to_stream_rng(SHUFFLE_STREAM),
        }
    }

    /// Build both generators from a freshly drawn entropy seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = Seed::from_entropy();
        tracing::trace!(seed = ?seed, "Drew entropy seed for unseeded run");
        Self::from_seed(seed)
    }

    /// Seeded when `seed` is given, entropy-backed otherwise.
    #[must_use]
    pub fn new(seed: Option<Seed>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }

    /// Borrow both generators at once as `(numeric, shuffle)`.
    pub fn streams(&mut self) -> (&mut ChaCha8Rng, &mut ChaCha8Rng) {
        (&mut self.numeric, &mut self.shuffle)
    }
}
