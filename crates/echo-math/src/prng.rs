// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{Quat, Vec3};

/// Replaces an all-zero seed, which would pin the generator at zero forever.
const ZERO_SEED_SUBSTITUTE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded `xoroshiro128+` generator behind every randomized math helper.
///
/// Sequences depend only on the seed, never on the platform, so jittered
/// sampling and randomized tests replay bit-for-bit. Not suitable for
/// anything security related.
///
/// The state serializes as two words so a running generator can be
/// checkpointed and resumed:
///
/// ```
/// use echo_math::Prng;
/// let mut rng = Prng::from_seed_u64(9);
/// rng.next_f32();
/// let saved = serde_json::to_string(&rng).unwrap();
/// let mut resumed: Prng = serde_json::from_str(&saved).unwrap();
/// assert_eq!(rng.next_f32().to_bits(), resumed.next_f32().to_bits());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prng {
    s0: u64,
    s1: u64,
}

impl Prng {
    /// Seeds the generator with its raw two-word state.
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        if seed0 == 0 && seed1 == 0 {
            return Self {
                s0: ZERO_SEED_SUBSTITUTE,
                s1: 0,
            };
        }
        Self {
            s0: seed0,
            s1: seed1,
        }
    }

    /// Seeds the generator from one word, spread over both state words with
    /// SplitMix64.
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut mix = seed;
        let a = splitmix64(&mut mix);
        let b = splitmix64(&mut mix);
        Self::from_seed(a, b)
    }

    /// Raw state words, suitable for [`Prng::from_seed`].
    pub fn state(&self) -> (u64, u64) {
        (self.s0, self.s1)
    }

    fn step(&mut self) -> u64 {
        let (s0, s1) = (self.s0, self.s1);
        let out = s0.wrapping_add(s1);
        let x = s1 ^ s0;
        self.s0 = s0.rotate_left(55) ^ x ^ (x << 14);
        self.s1 = x.rotate_left(36);
        out
    }

    /// Next float in `[0, 1)`, built from the top 23 bits of the output.
    pub fn next_f32(&mut self) -> f32 {
        let mantissa = (self.step() >> 41) as u32;
        f32::from_bits(0x3f80_0000 | mantissa) - 1.0
    }

    /// Next float in `[min, max)`. An empty range yields `min`.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        if min == max {
            min
        } else {
            min + self.next_f32() * (max - min)
        }
    }

    /// Next integer in the inclusive range `[min, max]`, free of modulo bias.
    ///
    /// Reversed bounds are swapped.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = (i64::from(hi) - i64::from(lo)) as u64 + 1;
        if span == 1 {
            return lo;
        }
        let pick = if span.is_power_of_two() {
            self.step() & (span - 1)
        } else {
            // Largest multiple of `span` below 2^64; draws above it are rejected.
            let zone = u64::MAX - u64::MAX % span;
            let mut draw = self.step();
            while draw >= zone {
                draw = self.step();
            }
            draw % span
        };
        (i64::from(lo) + pick as i64) as i32
    }

    /// Fair coin flip.
    pub fn next_bool(&mut self) -> bool {
        self.step() >> 63 == 1
    }

    /// Vector with each component drawn from `[min, max)` of the matching axis.
    pub fn next_vec3(&mut self, min: &Vec3, max: &Vec3) -> Vec3 {
        let x = self.next_range(min.x(), max.x());
        let y = self.next_range(min.y(), max.y());
        let z = self.next_range(min.z(), max.z());
        Vec3::new(x, y, z)
    }

    /// Direction uniformly distributed on the unit sphere.
    pub fn next_unit_vec3(&mut self) -> Vec3 {
        let z = self.next_range(-1.0, 1.0);
        let (sin, cos) = (self.next_f32() * TAU).sin_cos();
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * cos, r * sin, z)
    }

    /// Rotation uniformly distributed over SO(3) (Shoemake's method).
    pub fn next_rotation(&mut self) -> Quat {
        let u1 = self.next_f32();
        let (s2, c2) = (self.next_f32() * TAU).sin_cos();
        let (s3, c3) = (self.next_f32() * TAU).sin_cos();
        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();
        Quat::new(a * s2, a * c2, b * s3, b * c3)
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_substituted() {
        let mut rng = Prng::from_seed(0, 0);
        assert_eq!(rng.state(), (ZERO_SEED_SUBSTITUTE, 0));
        assert_ne!(rng.step(), rng.step());
    }

    #[test]
    fn full_i32_range_matches_reference_sequence() {
        let mut rng = Prng::from_seed(0xDEADBEEF, 0xFACEFEED);
        let values: Vec<i32> = (0..3).map(|_| rng.next_int(i32::MIN, i32::MAX)).collect();
        assert_eq!(values, vec![1501347292, 1946982111, -117316573]);
    }

    #[test]
    fn degenerate_and_reversed_int_ranges() {
        let mut rng = Prng::from_seed(42, 99);
        assert_eq!(rng.next_int(7, 7), 7);
        for _ in 0..64 {
            let v = rng.next_int(5, -5);
            assert!((-5..=5).contains(&v), "{v}");
        }
    }

    #[test]
    fn float_range_is_half_open() {
        let mut rng = Prng::from_seed_u64(7);
        for _ in 0..256 {
            let v = rng.next_range(-2.5, 4.0);
            assert!((-2.5..4.0).contains(&v), "{v} escaped [-2.5, 4.0)");
        }
        assert_eq!(rng.next_range(3.0, 3.0), 3.0);
    }

    #[test]
    fn equal_seeds_replay_bit_for_bit() {
        let mut a = Prng::from_seed_u64(0x00C0_FFEE);
        let mut b = Prng::from_seed_u64(0x00C0_FFEE);
        for _ in 0..16 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn unit_vectors_and_rotations_are_normalized() {
        let mut rng = Prng::from_seed_u64(3);
        for _ in 0..128 {
            let v = rng.next_unit_vec3();
            assert!((v.length() - 1.0).abs() < 1e-5, "{v:?}");
            let q = rng.next_rotation();
            assert!((q.length() - 1.0).abs() < 1e-5, "{q:?}");
        }
    }

    #[test]
    fn vec3_components_respect_their_own_bounds() {
        let mut rng = Prng::from_seed_u64(11);
        let (lo, hi) = (Vec3::new(-1.0, 10.0, 0.0), Vec3::new(1.0, 20.0, 0.0));
        for _ in 0..64 {
            let v = rng.next_vec3(&lo, &hi);
            assert!((-1.0..1.0).contains(&v.x()));
            assert!((10.0..20.0).contains(&v.y()));
            assert_eq!(v.z(), 0.0);
        }
    }

    #[test]
    fn coin_flips_are_not_constant() {
        let mut rng = Prng::from_seed_u64(5);
        let heads = (0..256).filter(|_| rng.next_bool()).count();
        assert!((64..192).contains(&heads), "{heads}");
    }
}
