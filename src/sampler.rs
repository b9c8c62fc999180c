use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SampleError;

/// Seedable source of uniform index draws, sampling with replacement.
///
/// A fixed seed reproduces the exact draw sequence. Without one, the
/// sampler is seeded once from the wall clock's nanoseconds.
pub struct Sampler {
    rng:  StdRng,
    seed: u64,
}

impl Sampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::from_seed(nanos)
    }

    /// The seed this sampler started from. Pass it back to `from_seed` to
    /// replay a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One uniform draw from `[0, len)`.
    pub fn draw(&mut self, len: usize) -> Result<usize, SampleError> {
        if len == 0 {
            return Err(SampleError::EmptyIndex);
        }
        Ok(self.rng.gen_range(0..len))
    }

    /// `n` independent draws from `[0, len)`. Repeats are expected.
    ///
    /// An empty range fails before anything is drawn, even for `n == 0`.
    pub fn draws(&mut self, len: usize, n: usize) -> Result<Vec<usize>, SampleError> {
        if len == 0 {
            return Err(SampleError::EmptyIndex);
        }
        Ok((0..n).map(|_| self.rng.gen_range(0..len)).collect())
    }
}
