//! High-level entry crate for `exercise-segment`, real-time exercise pose
//! analysis.
//!
//! The workflow has three stages:
//! - **Calibrate** once on a neutral standing pose to remove subject size and
//!   position.
//! - **Define a segment**: a start keypose, an end keypose and the care joints
//!   that matter for the movement.
//! - **Analyze** each incoming frame for progress, similarity, completion and
//!   per-joint corrections.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use exercise_segment::prelude::*;
//! use exercise_segment::synthetic::{sample_pose, squat_end_pose};
//!
//! let mut engine = SegmentEngine::new();
//! engine.initialize()?;
//!
//! let calib = engine.calibrate(&sample_pose(0))?;
//! let care = [JointType::LeftKnee, JointType::RightKnee].map(JointType::index);
//! engine.create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &care)?;
//!
//! let out = engine.analyze(&SegmentInput::from(squat_end_pose(33)))?;
//! println!("progress {:.2}, completed {}", out.progress, out.completed);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`core`] - Joint and pose types, geometry helpers, pose validation
//! - [`calibration`] - Calibration, normalization, bone lengths
//! - [`analysis`] - Segments, the frame analyzer, similarity
//! - [`engine`] - Stateful engine, error codes, configuration
//! - [`synthetic`] - Deterministic sample poses and jitter

// ═══════════════════════════════════════════════════════════════════════════════
// Foundation
// ═══════════════════════════════════════════════════════════════════════════════

/// Joint and pose types, geometry helpers and pose validation.
pub mod core {
    pub use segment_core::*;
}

/// Body calibration from a reference pose.
pub mod calibration {
    pub use segment_calibration::*;
}

/// Segment definition and per-frame analysis.
pub mod analysis {
    pub use segment_analysis::*;
}

/// Stateful engine and boundary error codes.
pub mod engine {
    pub use segment_engine::*;
}

/// Deterministic synthetic poses for tests and demos.
pub mod synthetic {
    pub use segment_core::synthetic::*;
}

pub use nalgebra;

// ═══════════════════════════════════════════════════════════════════════════════
// Top-level re-exports
// ═══════════════════════════════════════════════════════════════════════════════

pub use segment_analysis::{
    AnalysisOptions, CareJoints, FrameStatus, Segment, SegmentAnalyzer, SegmentInput,
    SegmentOutput, calculate_similarity,
};
pub use segment_calibration::{
    Calibration, CalibrationError, CalibrationOptions, calibrate, normalize,
    validate_calibration,
};
pub use segment_core::{
    JOINT_COUNT, JointType, Landmark, Pose, PoseValidator, Pt3, Real, ValidatorOptions, Vec3,
    validate_pose,
};
pub use segment_engine::{
    EngineConfig, EngineState, ErrorCode, SegmentApi, SegmentApiError, SegmentEngine,
    error_message,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Convenient re-exports for common usage.
///
/// ```no_run
/// use exercise_segment::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::{EngineConfig, ErrorCode, SegmentApi, SegmentEngine};

    // Data types
    pub use crate::{
        Calibration, FrameStatus, JointType, Pose, Pt3, Real, SegmentInput, SegmentOutput, Vec3,
    };

    // Options
    pub use crate::{AnalysisOptions, CalibrationOptions, ValidatorOptions};
}
