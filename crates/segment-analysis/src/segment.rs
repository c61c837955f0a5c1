//! Reference movement between two normalized keyposes.

use thiserror::Error;

use segment_calibration::{Calibration, CalibrationOptions, normalize, validate_calibration};
use segment_core::{JOINT_COUNT, JointType, Pose, Real, Vec3, lerp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentBuildError {
    #[error("care joint set is empty")]
    EmptyCareJoints,
    #[error("care joint index {0} out of range (expected < 13)")]
    InvalidCareJoint(usize),
    #[error("{0} keypose has non-finite coordinates or out-of-range confidences")]
    InvalidKeypose(&'static str),
    #[error("segment calibration is not valid")]
    Calibration,
}

/// Non-empty set of joints that drive scoring.
///
/// The caller's order is kept for reporting; scoring uses each joint once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareJoints {
    order: Vec<JointType>,
    mask: [bool; JOINT_COUNT],
}

impl CareJoints {
    pub fn new(joints: &[JointType]) -> Result<Self, SegmentBuildError> {
        if joints.is_empty() {
            return Err(SegmentBuildError::EmptyCareJoints);
        }
        let mut mask = [false; JOINT_COUNT];
        for j in joints {
            mask[j.index()] = true;
        }
        Ok(Self {
            order: joints.to_vec(),
            mask,
        })
    }

    /// Build from raw joint indices.
    pub fn from_indices(indices: &[usize]) -> Result<Self, SegmentBuildError> {
        let joints = indices
            .iter()
            .map(|&i| JointType::from_index(i).ok_or(SegmentBuildError::InvalidCareJoint(i)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&joints)
    }

    /// Joints in the order they were supplied.
    pub fn as_slice(&self) -> &[JointType] {
        &self.order
    }

    pub fn contains(&self, joint: JointType) -> bool {
        self.mask[joint.index()]
    }

    /// Distinct care joints in skeleton order.
    pub fn unique(&self) -> impl Iterator<Item = JointType> + '_ {
        JointType::ALL.into_iter().filter(|j| self.contains(*j))
    }
}

/// A calibrated reference movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Pose,
    end: Pose,
    calibration: Calibration,
    care_joints: CareJoints,
}

impl Segment {
    /// Normalize both keyposes with `calibration` and store them.
    ///
    /// # Errors
    ///
    /// See [`SegmentBuildError`]. Checks run in the order: care joints,
    /// calibration, keyposes.
    pub fn new(
        start: &Pose,
        end: &Pose,
        calibration: &Calibration,
        care_joints: &[JointType],
        opts: &CalibrationOptions,
    ) -> Result<Self, SegmentBuildError> {
        let care = CareJoints::new(care_joints)?;
        Self::with_care_joints(start, end, calibration, care, opts)
    }

    pub fn with_care_joints(
        start: &Pose,
        end: &Pose,
        calibration: &Calibration,
        care_joints: CareJoints,
        opts: &CalibrationOptions,
    ) -> Result<Self, SegmentBuildError> {
        if !validate_calibration(calibration, opts) {
            return Err(SegmentBuildError::Calibration);
        }
        if !start.is_finite() {
            return Err(SegmentBuildError::InvalidKeypose("start"));
        }
        if !end.is_finite() {
            return Err(SegmentBuildError::InvalidKeypose("end"));
        }

        Ok(Self {
            start: normalize(start, calibration),
            end: normalize(end, calibration),
            calibration: *calibration,
            care_joints,
        })
    }

    /// Normalized start keypose.
    pub fn start(&self) -> &Pose {
        &self.start
    }

    /// Normalized end keypose.
    pub fn end(&self) -> &Pose {
        &self.end
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn care_joints(&self) -> &CareJoints {
        &self.care_joints
    }

    /// Start-to-end displacement of one joint.
    #[inline]
    pub fn displacement(&self, joint: JointType) -> Vec3 {
        self.end.joint(joint) - self.start.joint(joint)
    }

    /// Normalized target pose at fraction `t` along the segment.
    ///
    /// Confidences are the mean of the two keyposes; the timestamp is 0.
    pub fn pose_at(&self, t: Real) -> Pose {
        let joints = std::array::from_fn(|i| lerp(&self.start.joints[i], &self.end.joints[i], t));
        let confidence =
            std::array::from_fn(|i| 0.5 * (self.start.confidence[i] + self.end.confidence[i]));
        Pose::new(joints, confidence, 0)
    }
}
