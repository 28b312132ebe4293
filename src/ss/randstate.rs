// Random State
// Seeded random source shared by prime generation and key construction

use num_bigint::{BigUint, RandBigInt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random state handed to every operation that draws randomness.
///
/// One instance is one stream of draws: the same seed always yields the
/// same primes and keys. Not meant to be shared between threads; give each
/// thread its own instance.
pub struct RandState {
    inner: StdRng,
}

impl RandState {
    /// Create a deterministic random state from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a random state seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Uniform integer in [low, high)
    ///
    /// # Panics
    /// Panics if `low >= high`.
    pub fn gen_range_u64(&mut self, low: u64, high: u64) -> u64 {
        self.inner.gen_range(low..high)
    }

    /// Uniform big integer in [0, 2^bits)
    pub fn gen_biguint(&mut self, bits: u64) -> BigUint {
        self.inner.gen_biguint(bits)
    }

    /// Uniform big integer in [low, high)
    ///
    /// # Panics
    /// Panics if `low >= high`.
    pub fn gen_biguint_range(&mut self, low: &BigUint, high: &BigUint) -> BigUint {
        self.inner.gen_biguint_range(low, high)
    }
}
