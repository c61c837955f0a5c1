//! Deterministic jitter for synthetic poses.
//!
//! The functions here avoid `thread_rng` and do not depend on the internal
//! algorithm of any RNG crate. This keeps synthetic frames stable across
//! versions and platforms.

use crate::{JOINT_COUNT, Pose, Real, Vec3};

/// Deterministic uniform per-axis jitter in `[-max_abs, +max_abs]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointJitter {
    /// Base seed controlling the pseudo-random sequence.
    pub seed: u64,
    /// Maximum absolute per-axis displacement.
    pub max_abs: Real,
}

impl JointJitter {
    /// Sample a deterministic displacement for a `(frame_idx, joint_idx)` key.
    ///
    /// Each key seeds its own stream; the three axes are its first three draws.
    #[inline]
    pub fn sample(&self, frame_idx: usize, joint_idx: usize) -> Vec3 {
        let max_abs = self.max_abs.abs();
        if max_abs == 0.0 {
            return Vec3::zeros();
        }

        let mut stream = Stream::for_key(self.seed, frame_idx, joint_idx);
        Vec3::from_fn(|_, _| stream.next_symmetric()) * max_abs
    }

    /// Displace every joint of `pose` for frame `frame_idx`.
    pub fn apply(&self, frame_idx: usize, pose: &Pose) -> Pose {
        let mut out = *pose;
        for j in 0..JOINT_COUNT {
            out.joints[j] += self.sample(frame_idx, j);
        }
        out
    }
}

/// Minimal SplitMix64 stream.
struct Stream(u64);

impl Stream {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    fn for_key(seed: u64, frame_idx: usize, joint_idx: usize) -> Self {
        // Frame and joint land in separate halves before mixing with the seed.
        let key = (frame_idx as u64).rotate_left(32) ^ joint_idx as u64;
        Self(seed.wrapping_add(key.wrapping_mul(Self::GAMMA)))
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(Self::GAMMA);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[-1, 1)`.
    fn next_symmetric(&mut self) -> Real {
        // 52 random mantissa bits over exponent 1.0 give [1, 2).
        let unit = Real::from_bits(0x3FF0_0000_0000_0000 | (self.next_u64() >> 12)) - 1.0;
        2.0 * unit - 1.0
    }
}
