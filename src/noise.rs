// 🎲 Deterministic Noise - seed in, [0, 1) out
// Not a statistical PRNG: the same seed always yields the same draw

#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of reproducible pseudo-random draws.
///
/// Implementations must be pure functions of `seed` so that two engines fed
/// the same inputs produce identical records.
pub trait NoiseSource: Send + Sync {
    /// Returns a value in `[0, 1)`
    fn draw(&self, seed: i64) -> f64;
}

/// `frac(sin(seed) * 10000)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SineNoise;

impl NoiseSource for SineNoise {
    fn draw(&self, seed: i64) -> f64 {
        let x = (seed as f64).sin() * 10000.0;
        x - x.floor()
    }
}

/// Wraps another source and counts how many draws were made.
///
/// Used to observe whether the engine actually recomputed a record.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CountingNoise<N: NoiseSource = SineNoise> {
    inner: N,
    draws: AtomicUsize,
}

#[cfg(test)]
impl<N: NoiseSource> CountingNoise<N> {
    pub fn new(inner: N) -> Self {
        CountingNoise {
            inner,
            draws: AtomicUsize::new(0),
        }
    }

    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.draws.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl<N: NoiseSource> NoiseSource for CountingNoise<N> {
    fn draw(&self, seed: i64) -> f64 {
        self.draws.fetch_add(1, Ordering::SeqCst);
        self.inner.draw(seed)
    }
}

impl<T: NoiseSource + ?Sized> NoiseSource for std::sync::Arc<T> {
    fn draw(&self, seed: i64) -> f64 {
        (**self).draw(seed)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_sine_noise_in_unit_interval() {
        let noise = SineNoise;
        for seed in -500..5000 {
            let v = noise.draw(seed);
            assert!((0.0..1.0).contains(&v), "seed {} gave {}", seed, v);
        }
    }

    #[test]
    fn test_sine_noise_is_reproducible() {
        let noise = SineNoise;
        assert_eq!(noise.draw(2054), noise.draw(2054));
        assert_ne!(noise.draw(2054), noise.draw(2055));
    }

    #[test]
    fn test_sine_noise_matches_formula() {
        let x = (1.0f64).sin() * 10000.0;
        assert_eq!(SineNoise.draw(1), x - x.floor());
        assert_eq!(SineNoise.draw(0), 0.0);
    }

    #[test]
    fn test_counting_noise_counts() {
        let noise = CountingNoise::new(SineNoise);
        noise.draw(1);
        noise.draw(2);
        assert_eq!(noise.draws(), 2);
        noise.reset();
        assert_eq!(noise.draws(), 0);
    }

    #[test]
    fn test_arc_forwards_draws() {
        let counting = Arc::new(CountingNoise::new(SineNoise));
        let shared: Arc<CountingNoise> = Arc::clone(&counting);
        assert_eq!(shared.draw(7), SineNoise.draw(7));
        assert_eq!(counting.draws(), 1);
    }
}
