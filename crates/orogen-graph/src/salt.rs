//! Seeded salt derivation for samplers and placement strategies.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Hands out decorrelation salts from a seeded ChaCha8 stream.
///
/// Two sources built from the same seed produce the same salt sequence, so a
/// pack built twice from one seed is byte-identical. Callers that genuinely
/// want unrepeatable output seed from entropy themselves.
pub struct SaltSource {
    rng: ChaCha8Rng,
}

impl SaltSource {
    /// Creates a salt source from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws the next salt.
    ///
    /// Salts stay within `u32` range so they survive the engine's integer
    /// parsing regardless of platform word size.
    pub fn next_salt(&mut self) -> u64 {
        self.rng.random::<u32>() as u64
    }
}
