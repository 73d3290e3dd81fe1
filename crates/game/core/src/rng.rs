//! Injectable random sources for crit rolls, dodge rolls and tie-breaks.
//!
//! Randomness is the engine's only nondeterministic input. Every draw goes
//! through [`CombatRng`], so tests can pin outcomes with [`ScriptedRng`] and
//! bulk runs can seed one [`PcgRng`] per match.
//!
//! # Determinism
//!
//! Given the same sequence of draws, a match produces the same step log.
//! Draws are only consumed when an outcome is actually uncertain: a chance of
//! `0.0` or `>= 1.0` never touches the source.

/// Random source consumed by the duel engine.
pub trait CombatRng {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Bernoulli trial with success probability `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        if probability >= 1.0 {
            return true;
        }
        self.unit() < probability
    }

    /// Unweighted coin flip.
    fn coin_flip(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }
}

impl<R: CombatRng + ?Sized> CombatRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Same seed, same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed),
        }
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed sequence of raw draws, cycling when exhausted.
///
/// `ScriptedRng::new([0])` makes every chance succeed; `[u32::MAX]` makes
/// every chance below 1.0 fail and every coin flip land on the first side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedRng {
    draws: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        let mut draws = draws.into();
        if draws.is_empty() {
            draws.push(u32::MAX);
        }
        Self { draws, cursor: 0 }
    }

    /// Every probabilistic check fails.
    pub fn never() -> Self {
        Self::new([u32::MAX])
    }

    /// Every probabilistic check succeeds.
    pub fn always() -> Self {
        Self::new([0])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl CombatRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}

/// Compute a deterministic per-run seed for bulk simulation.
///
/// Seeds depend only on `(base_seed, run_index)`, so a bulk run reproduces
/// regardless of how runs are batched across workers.
pub fn compute_seed(base_seed: u64, run_index: u64) -> u64 {
    // SplitMix64-style mixing
    let mut hash = base_seed ^ run_index.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}
