//! Deterministic synthetic pose helpers.
//!
//! Intended for tests, examples and benchmarks. Nothing here is used by the
//! calibration or analysis code paths.

mod noise;
mod poses;

pub use noise::JointJitter;
pub use poses::{interpolated_pose, sample_joints, sample_pose, scaled_pose, squat_end_pose};
