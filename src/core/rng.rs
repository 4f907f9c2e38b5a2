//! Seeded Random Number Generator
//!
//! Uses Xorshift128+ for fast, reproducible randomness. A session logs its
//! seed, so any game can be replayed draw for draw.

/// Source of uniform draws for a game loop.
///
/// Implemented by [`DeterministicRng`] and by any `FnMut(u32) -> u32`
/// closure, which lets tests script the exact sequence of draws.
pub trait RandomSource: Send {
    /// Draw a value uniformly from `[0, bound)`. `bound` is never 0.
    fn next_int(&mut self, bound: u32) -> u32;
}

impl<F> RandomSource for F
where
    F: FnMut(u32) -> u32 + Send,
{
    fn next_int(&mut self, bound: u32) -> u32 {
        self(bound)
    }
}

/// Seeded PRNG using the Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use paingame::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    seed: u64,
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { seed, state }
    }

    /// Create an RNG seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Rejection sampling keeps the draw unbiased for every `max`.
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        let max = max as u64;
        // Largest multiple of `max` that fits in u64
        let zone = u64::MAX - (u64::MAX % max);
        loop {
            let v = self.next_u64();
            if v < zone {
                return (v % max) as u32;
            }
        }
    }
}

impl RandomSource for DeterministicRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        DeterministicRng::next_int(self, bound)
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_seed_is_remembered() {
        let mut rng = DeterministicRng::new(777);
        rng.next_u64();
        assert_eq!(rng.seed(), 777);
    }

    #[test]
    fn test_next_int_edges() {
        let mut rng = DeterministicRng::new(1234);

        assert_eq!(rng.next_int(0), 0);
        for _ in 0..100 {
            assert_eq!(rng.next_int(1), 0);
        }
    }

    #[test]
    fn test_next_int_hits_every_value() {
        let mut rng = DeterministicRng::new(42);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            seen[rng.next_int(10) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_closure_source() {
        let mut calls = 0;
        let mut source = move |bound: u32| {
            calls += 1;
            calls % bound
        };
        assert_eq!(RandomSource::next_int(&mut source, 10), 1);
        assert_eq!(RandomSource::next_int(&mut source, 10), 2);
    }

    proptest! {
        #[test]
        fn next_int_stays_in_bounds(seed in any::<u64>(), bound in 1u32..10_000) {
            let mut rng = DeterministicRng::new(seed);
            for _ in 0..50 {
                prop_assert!(rng.next_int(bound) < bound);
            }
        }
    }
}
