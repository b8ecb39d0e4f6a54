//! Deterministic RNG wrapper using PCG32.
//!
//! Every random decision in the engine (generator parameters, layer rolls,
//! colour picks) is drawn from a `DeterministicRng` passed in by the caller,
//! so the same seed always produces the same texture.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating its bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive an independent seed for the `index`-th item of a batch using BLAKE3.
    pub fn derive_seed(base_seed: u32, index: u32) -> u32 {
        let mut input = Vec::with_capacity(8);
        input.extend_from_slice(&base_seed.to_le_bytes());
        input.extend_from_slice(&index.to_le_bytes());
        let hash = blake3::hash(&input);
        let bytes = hash.as_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random u32.
    #[inline]
    pub fn gen_u32(&mut self) -> u32 {
        self.inner.gen::<u32>()
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Random f64 in `[0, range)`. A negative range yields `(range, 0]`.
    #[inline]
    pub fn frand(&mut self, range: f64) -> f64 {
        self.gen_f64() * range
    }

    /// Random f64 between `a` and `b`; the bounds may be given in either order.
    #[inline]
    pub fn frand_between(&mut self, a: f64, b: f64) -> f64 {
        a + self.frand(b - a)
    }

    /// Flip a fair coin.
    #[inline]
    pub fn coin(&mut self) -> bool {
        self.inner.gen::<bool>()
    }

    /// Pick an index in `[0, len)`. `len` must be non-zero.
    #[inline]
    pub fn pick(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}
