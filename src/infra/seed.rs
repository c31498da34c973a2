// ============================================================
// Layer 6 — Pinned Randomness
// ============================================================
// Grading compares a learner run against an oracle run, so both
// must see exactly the same random stream. There is no global
// RNG anywhere in the crate: every stochastic operation takes
// an explicit StdRng, and every run starts from one of these.
//
// StdRng is stable for a given rand release, which is all the
// grader needs — both runs happen in the same process.
//
// Reference: rand crate documentation (SeedableRng)

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A fresh generator pinned to `seed`.
pub fn fix_random_seed(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<u32> = fix_random_seed(1).sample_iter(rand::distributions::Standard).take(8).collect();
        let b: Vec<u32> = fix_random_seed(1).sample_iter(rand::distributions::Standard).take(8).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_stream() {
        let a: u64 = fix_random_seed(1).gen();
        let b: u64 = fix_random_seed(2).gen();
        assert_ne!(a, b);
    }
}
