use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

/// Source of uniform draws without replacement.
pub trait Sampler: Send + Sync {
    /// `amount` distinct indices from `0..population`, in random order.
    ///
    /// Callers guarantee `amount <= population`.
    fn sample(&self, population: usize, amount: usize) -> Vec<usize>;
}

/// Draws from the thread-local generator; every call differs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut rand::rng(), population, amount).into_vec()
    }
}

/// Deterministic sampler for reproducible runs.
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for SeededSampler {
    fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
        let mut rng = self.rng.lock();
        index::sample(&mut *rng, population, amount).into_vec()
    }
}
