//! Deterministic random number generation for battle resolution.
//!
//! Every stochastic roll in the kernel goes through `BattleRng`:
//! accuracy checks, critical hits, the damage spread, status-failure
//! rolls, secondary-effect chances, and speed-tie coin flips.
//!
//! - **Deterministic**: same seed produces an identical battle given
//!   identical agent decisions.
//! - **Forkable**: independent branches for running many battles from
//!   one configured seed.
//!
//! ```
//! use rust_arena::core::BattleRng;
//!
//! let mut rng = BattleRng::new(42);
//! let mut other = BattleRng::new(42);
//! assert_eq!(rng.percent_roll(50), other.percent_roll(50));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by a single battle.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness.
#[derive(Clone, Debug)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl BattleRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence,
    /// so a batch of battles can share one configured seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Roll `uniform(0, 100) < chance`.
    ///
    /// This is the accuracy / secondary-effect roll. A chance of 100
    /// always succeeds, a chance of 0 always fails.
    pub fn percent_roll(&mut self, chance: u8) -> bool {
        self.inner.gen_range(0.0..100.0) < f64::from(chance)
    }

    /// Roll an event with the given probability of success.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// The critical-hit roll: 1/16 chance.
    pub fn crit_roll(&mut self) -> bool {
        self.inner.gen::<f64>() < 0.0625
    }

    /// The damage spread factor, uniform in [0.85, 1.0].
    pub fn damage_spread(&mut self) -> f64 {
        self.inner.gen_range(0.85..1.0)
    }

    /// An unbiased coin flip, used to break speed ties.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen::<f64>() < 0.5
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = BattleRng::new(42);
        let mut rng2 = BattleRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.damage_spread(), rng2.damage_spread());
            assert_eq!(rng1.percent_roll(70), rng2.percent_roll(70));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = BattleRng::new(1);
        let mut rng2 = BattleRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.damage_spread()).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.damage_spread()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = BattleRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.damage_spread()).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.damage_spread()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = BattleRng::new(42);
        let mut rng2 = BattleRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
    }

    #[test]
    fn test_percent_roll_extremes() {
        let mut rng = BattleRng::new(7);
        for _ in 0..100 {
            assert!(rng.percent_roll(100));
            assert!(!rng.percent_roll(0));
        }
    }

    #[test]
    fn test_damage_spread_bounds() {
        let mut rng = BattleRng::new(11);
        for _ in 0..1000 {
            let f = rng.damage_spread();
            assert!((0.85..1.0).contains(&f));
        }
    }

    #[test]
    fn test_coin_flip_is_roughly_fair() {
        let mut rng = BattleRng::new(99);
        let heads = (0..10_000).filter(|_| rng.coin_flip()).count();
        assert!((4_500..5_500).contains(&heads), "heads = {heads}");
    }
}
