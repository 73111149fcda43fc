//! Random Number Generator.

use crate::common::*;

/// 32-bit precision value for 1 - epsilon.
pub const ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1"); // 0.99999994

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32 pseudo-random number generator. Two generators constructed with the
/// same sequence index produce identical streams.
#[derive(Clone, Debug)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self { state: 0, inc: 0 };
        ret.seed(sequence_index);
        ret
    }

    /// Restart the generator on the given sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn seed(&mut self, sequence_index: u64) {
        self.state = 0;
        self.inc = sequence_index.wrapping_shl(1) | 1;
        self.uniform_u32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed u64 value built from two draws.
    pub fn uniform_u64(&mut self) -> u64 {
        let high = self.uniform_u32() as u64;
        let low = self.uniform_u32() as u64;
        (high << 32) | low
    }

    /// Returns a uniformly distributed value in `[lower_bound, upper_bound)`.
    ///
    /// * `lower_bound` - The lower bound.
    /// * `upper_bound` - The upper bound.
    pub fn bounded_uniform_u32(&mut self, lower_bound: u32, upper_bound: u32) -> u32 {
        let b = upper_bound - lower_bound;
        let threshold = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_u32();
            if r >= threshold {
                return lower_bound + r % b;
            }
        }
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf32!("0x1.0p-32") as Float,
            ONE_MINUS_EPSILON,
        )
    }

    /// Randomly permute a slice.
    ///
    /// * `v` - The slice to shuffle.
    pub fn shuffle<T>(&mut self, v: &mut [T]) {
        let count = v.len();
        for i in 0..count {
            let other = i + self.bounded_uniform_u32(0, (count - i) as u32) as usize;
            v.swap(i, other);
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_seeds_identical_streams() {
        let mut a = RNG::new(42);
        let mut b = RNG::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform_u32(), b.uniform_u32());
        }
        let mut c = RNG::new(43);
        let same = (0..100).filter(|_| a.uniform_u32() == c.uniform_u32()).count();
        assert!(same < 5);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = RNG::new(7);
        let mut v: Vec<usize> = (0..50).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn uniform_float_in_unit_interval(seed in 0..u64::MAX) {
            let mut rng = RNG::new(seed);
            for _ in 0..16 {
                let u = rng.uniform_float();
                prop_assert!((0.0..1.0).contains(&u));
            }
        }

        #[test]
        fn bounded_stays_in_range(seed in 0..u64::MAX, lo in 0..100u32, span in 1..100u32) {
            let mut rng = RNG::new(seed);
            let v = rng.bounded_uniform_u32(lo, lo + span);
            prop_assert!(v >= lo && v < lo + span);
        }
    }
}
