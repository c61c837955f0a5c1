//! Core geometry and pose primitives for `exercise-segment`.
//!
//! This crate provides the foundational building blocks used by all other
//! crates in the workspace:
//!
//! - linear algebra type aliases (`Real`, `Vec3`, `Pt3`) and small geometry
//!   helpers (`distance`, `lerp`, `weighted_centroid`),
//! - the fixed 13-joint skeleton ([`JointType`], [`BONES`]),
//! - the [`Pose`] container with per-joint confidence,
//! - a configurable [`PoseValidator`].
//!
//! Data flow (conceptually):
//! `raw pose -> validate -> normalize (calibration) -> analyze (segment)`
//!
//! # Modules
//!
//! - \[`math`\]: type aliases and geometry helpers.
//! - \[`types`\]: joints, poses and validator options.
//! - \[`validate`\]: pose usability checks.
//! - \[`synthetic`\]: deterministic sample poses and jitter (tests/examples).
//!
//! # Example
//!
//! ```
//! use segment_core::{JointType, PoseValidator, synthetic};
//!
//! let pose = synthetic::sample_pose(1_000);
//! assert!(PoseValidator::default().validate(&pose));
//!
//! let shoulder = pose.joint(JointType::LeftShoulder);
//! assert_eq!(shoulder.x, -20.0);
//! ```

/// Linear algebra type aliases and geometry helpers.
mod math;
/// Joint, pose and options types.
mod types;
/// Pose usability checks.
mod validate;
/// Deterministic synthetic pose helpers.
///
/// Small, reusable building blocks for constructing reference poses and
/// interpolated movements. Used in workspace tests and examples.
pub mod synthetic;

pub use math::*;
pub use types::*;
pub use validate::*;
