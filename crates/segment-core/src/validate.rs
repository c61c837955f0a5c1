//! Pose usability checks.
//!
//! A structurally well-formed [`Pose`] may still be useless: low detector
//! confidence, missing torso joints, or every joint collapsed onto one point.
//! [`PoseValidator`] rejects such poses before they reach calibration or
//! analysis.

use log::debug;
use thiserror::Error;

use crate::{JointType, Pose, Real, ValidatorOptions, distance};

/// Why a pose was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PoseRejection {
    #[error("joint {joint} has a non-finite or out-of-range coordinate")]
    BadCoordinate { joint: JointType },
    #[error("joint {joint} has confidence {confidence} outside [0, 1]")]
    BadConfidence { joint: JointType, confidence: Real },
    #[error("only {usable} joints reach the confidence threshold, need {required}")]
    LowConfidence { usable: usize, required: usize },
    #[error("only {usable} of 4 shoulder/hip joints are usable, need {required}")]
    MissingTorso { usable: usize, required: usize },
    #[error("all joints collapse to one point (spread {spread})")]
    Degenerate { spread: Real },
}

/// Configurable pose validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoseValidator {
    pub opts: ValidatorOptions,
}

impl PoseValidator {
    pub fn new(opts: ValidatorOptions) -> Self {
        Self { opts }
    }

    /// Returns `true` if the pose is usable.
    pub fn validate(&self, pose: &Pose) -> bool {
        match self.check(pose) {
            Ok(()) => true,
            Err(reason) => {
                debug!("pose at t={} rejected: {}", pose.timestamp, reason);
                false
            }
        }
    }

    /// Run every rule and report the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`PoseRejection`] describing why the pose is unusable.
    pub fn check(&self, pose: &Pose) -> Result<(), PoseRejection> {
        let opts = &self.opts;

        for (joint, p, c) in pose.iter() {
            let in_range = |v: Real| v.is_finite() && v.abs() <= opts.max_abs_coordinate;
            if !(in_range(p.x) && in_range(p.y) && in_range(p.z)) {
                return Err(PoseRejection::BadCoordinate { joint });
            }
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                return Err(PoseRejection::BadConfidence {
                    joint,
                    confidence: c,
                });
            }
        }

        let usable = pose
            .confidence
            .iter()
            .filter(|&&c| c >= opts.min_confidence)
            .count();
        if usable < opts.min_usable_joints {
            return Err(PoseRejection::LowConfidence {
                usable,
                required: opts.min_usable_joints,
            });
        }

        let torso = JointType::TORSO
            .iter()
            .filter(|&&j| pose.confidence_of(j) >= opts.min_confidence)
            .count();
        if torso < opts.min_essential_joints {
            return Err(PoseRejection::MissingTorso {
                usable: torso,
                required: opts.min_essential_joints,
            });
        }

        let anchor = &pose.joints[0];
        let spread = pose
            .joints
            .iter()
            .map(|p| distance(anchor, p))
            .fold(0.0, Real::max);
        if spread <= opts.min_spread {
            return Err(PoseRejection::Degenerate { spread });
        }

        Ok(())
    }
}

/// Validate a pose with default thresholds.
pub fn validate_pose(pose: &Pose) -> bool {
    PoseValidator::default().validate(pose)
}
