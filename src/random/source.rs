use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable uniform sampler shared by initialization, mutation and the sample providers.
///
/// Every piece of code that needs randomness takes a `&mut RandomSource`, so a test can pin
/// the whole run with [`RandomSource::seeded`].
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> RandomSource {
        RandomSource { rng: StdRng::seed_from_u64(seed) }
    }

    /// Seeds from the operating system's entropy source.
    pub fn from_entropy() -> RandomSource {
        RandomSource { rng: StdRng::from_entropy() }
    }

    /// Uniform real in `[min, max)`.  An empty range (`min >= max`) yields `min`.
    pub fn uniform_real(&mut self, min: f64, max: f64) -> f64 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.  `min > max` yields `min`.
    pub fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        if min <= max {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.uniform_int(0, len as i64 - 1) as usize
    }

    /// Derives an independent source, e.g. for a sample provider that must not
    /// share a stream with mutation.
    pub fn fork(&mut self) -> RandomSource {
        RandomSource::seeded(self.rng.gen())
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        RandomSource::from_entropy()
    }
}
