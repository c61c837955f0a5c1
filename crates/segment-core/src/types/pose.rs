//! Pose container with per-joint confidence.
//!
//! A [`Pose`] always holds exactly [`JOINT_COUNT`] joints and the same number
//! of confidences; the fixed-size arrays make this a structural property.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use super::joint::{JOINT_COUNT, JointType};
use crate::{Pt3, Real};

/// One tracked landmark: position plus detector confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub position: Pt3,
    /// Detector confidence in `[0, 1]`.
    pub confidence: Real,
}

/// A single skeletal pose.
///
/// Index `i` in [`joints`](Self::joints) and [`confidence`](Self::confidence)
/// refers to the same anatomical joint, [`JointType::from_index(i)`](JointType::from_index).
///
/// # Example
///
/// ```
/// use segment_core::{JointType, Pose, Pt3};
///
/// let joints = [Pt3::origin(); 13];
/// let pose = Pose::uniform(joints, 0.9, 42);
///
/// assert_eq!(pose.confidence_of(JointType::LeftKnee), 0.9);
/// assert_eq!(pose.timestamp, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Joint positions, indexed by [`JointType`].
    pub joints: [Pt3; JOINT_COUNT],
    /// Per-joint confidence in `[0, 1]`.
    pub confidence: [Real; JOINT_COUNT],
    /// Capture time in monotonic milliseconds.
    pub timestamp: u64,
}

impl Pose {
    pub fn new(joints: [Pt3; JOINT_COUNT], confidence: [Real; JOINT_COUNT], timestamp: u64) -> Self {
        Self {
            joints,
            confidence,
            timestamp,
        }
    }

    /// Construct a pose where every joint shares one confidence value.
    pub fn uniform(joints: [Pt3; JOINT_COUNT], confidence: Real, timestamp: u64) -> Self {
        Self::new(joints, [confidence; JOINT_COUNT], timestamp)
    }

    /// Construct a pose from caller-supplied slices.
    ///
    /// # Errors
    ///
    /// Returns an error if either slice does not hold exactly [`JOINT_COUNT`]
    /// entries.
    pub fn from_slices(joints: &[Pt3], confidence: &[Real], timestamp: u64) -> Result<Self> {
        ensure!(
            joints.len() == JOINT_COUNT,
            "expected {} joints, got {}",
            JOINT_COUNT,
            joints.len()
        );
        ensure!(
            confidence.len() == JOINT_COUNT,
            "expected {} confidences, got {}",
            JOINT_COUNT,
            confidence.len()
        );

        let mut pose = Self::uniform([Pt3::origin(); JOINT_COUNT], 0.0, timestamp);
        pose.joints.copy_from_slice(joints);
        pose.confidence.copy_from_slice(confidence);
        Ok(pose)
    }

    /// Construct a pose from landmark records.
    pub fn from_landmarks(landmarks: &[Landmark; JOINT_COUNT], timestamp: u64) -> Self {
        Self::new(
            landmarks.map(|l| l.position),
            landmarks.map(|l| l.confidence),
            timestamp,
        )
    }

    #[inline]
    pub fn joint(&self, joint: JointType) -> &Pt3 {
        &self.joints[joint.index()]
    }

    #[inline]
    pub fn confidence_of(&self, joint: JointType) -> Real {
        self.confidence[joint.index()]
    }

    /// Position and confidence of one joint.
    pub fn landmark(&self, joint: JointType) -> Landmark {
        Landmark {
            position: *self.joint(joint),
            confidence: self.confidence_of(joint),
        }
    }

    /// Iterate over `(joint, position, confidence)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (JointType, &Pt3, Real)> + '_ {
        JointType::ALL
            .into_iter()
            .zip(self.joints.iter().zip(self.confidence.iter()))
            .map(|(j, (p, c))| (j, p, *c))
    }

    /// Apply `f` to every joint position; confidences and timestamp are kept.
    pub fn map_joints<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Pt3) -> Pt3,
    {
        Self {
            joints: self.joints.map(|p| f(&p)),
            confidence: self.confidence,
            timestamp: self.timestamp,
        }
    }

    /// Structural soundness: finite coordinates and confidences in `[0, 1]`.
    pub fn is_finite(&self) -> bool {
        self.joints
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
            && self
                .confidence
                .iter()
                .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_joints() -> [Pt3; JOINT_COUNT] {
        std::array::from_fn(|i| Pt3::new(i as Real, 2.0 * i as Real, 0.0))
    }

    #[test]
    fn from_slices_rejects_wrong_length() {
        let joints = vec![Pt3::origin(); 12];
        let conf = vec![0.9; 13];
        assert!(Pose::from_slices(&joints, &conf, 1).is_err());

        let joints = vec![Pt3::origin(); 13];
        let conf = vec![0.9; 14];
        assert!(Pose::from_slices(&joints, &conf, 1).is_err());
    }

    #[test]
    fn from_slices_preserves_order() {
        let joints = ramp_joints();
        let conf: Vec<Real> = (0..JOINT_COUNT).map(|i| i as Real / 20.0).collect();
        let pose = Pose::from_slices(&joints, &conf, 7).unwrap();

        assert_eq!(pose.joint(JointType::RightAnkle).x, 12.0);
        assert_eq!(pose.confidence_of(JointType::LeftHip), 7.0 / 20.0);
        assert_eq!(pose.timestamp, 7);
    }

    #[test]
    fn landmarks_roundtrip() {
        let pose = Pose::uniform(ramp_joints(), 0.8, 3);
        let landmarks = JointType::ALL.map(|j| pose.landmark(j));
        assert_eq!(Pose::from_landmarks(&landmarks, 3), pose);
    }

    #[test]
    fn map_joints_keeps_confidence_and_timestamp() {
        let pose = Pose::uniform(ramp_joints(), 0.6, 99);
        let shifted = pose.map_joints(|p| p + nalgebra::Vector3::new(1.0, 0.0, 0.0));

        assert_eq!(shifted.confidence, pose.confidence);
        assert_eq!(shifted.timestamp, 99);
        assert_eq!(shifted.joints[3].x, 4.0);
    }

    #[test]
    fn is_finite_detects_nan_and_bad_confidence() {
        let mut pose = Pose::uniform(ramp_joints(), 0.9, 1);
        assert!(pose.is_finite());

        pose.joints[2].y = Real::NAN;
        assert!(!pose.is_finite());

        let mut pose = Pose::uniform(ramp_joints(), 0.9, 1);
        pose.confidence[0] = 1.5;
        assert!(!pose.is_finite());
    }

    #[test]
    fn pose_serde_roundtrip() {
        let pose = Pose::uniform(ramp_joints(), 0.5, 11);
        let json = serde_json::to_string(&pose).unwrap();
        let restored: Pose = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, pose);
    }
}
