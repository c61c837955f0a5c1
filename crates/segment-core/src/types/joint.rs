//! The fixed 13-joint skeleton.

use serde::{Deserialize, Serialize};

/// Number of tracked joints in every [`Pose`](crate::Pose).
pub const JOINT_COUNT: usize = 13;

/// Anatomical landmarks tracked per pose.
///
/// The discriminant is the joint's index in [`Pose::joints`](crate::Pose::joints)
/// and [`Pose::confidence`](crate::Pose::confidence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum JointType {
    Nose = 0,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointType {
    /// All joints in index order.
    pub const ALL: [JointType; JOINT_COUNT] = [
        JointType::Nose,
        JointType::LeftShoulder,
        JointType::RightShoulder,
        JointType::LeftElbow,
        JointType::RightElbow,
        JointType::LeftWrist,
        JointType::RightWrist,
        JointType::LeftHip,
        JointType::RightHip,
        JointType::LeftKnee,
        JointType::RightKnee,
        JointType::LeftAnkle,
        JointType::RightAnkle,
    ];

    /// Shoulders and hips: the joints that stay comparatively rigid across
    /// most movements. Used for centering and calibration quality.
    pub const TORSO: [JointType; 4] = [
        JointType::LeftShoulder,
        JointType::RightShoulder,
        JointType::LeftHip,
        JointType::RightHip,
    ];

    /// Index of this joint in a pose's joint/confidence arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a raw index back to a joint. Returns `None` when out of range.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// The left/right counterpart of this joint (the nose maps to itself).
    pub fn mirror(self) -> Self {
        match self {
            JointType::Nose => JointType::Nose,
            JointType::LeftShoulder => JointType::RightShoulder,
            JointType::RightShoulder => JointType::LeftShoulder,
            JointType::LeftElbow => JointType::RightElbow,
            JointType::RightElbow => JointType::LeftElbow,
            JointType::LeftWrist => JointType::RightWrist,
            JointType::RightWrist => JointType::LeftWrist,
            JointType::LeftHip => JointType::RightHip,
            JointType::RightHip => JointType::LeftHip,
            JointType::LeftKnee => JointType::RightKnee,
            JointType::RightKnee => JointType::LeftKnee,
            JointType::LeftAnkle => JointType::RightAnkle,
            JointType::RightAnkle => JointType::LeftAnkle,
        }
    }

    /// Stable snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            JointType::Nose => "nose",
            JointType::LeftShoulder => "left_shoulder",
            JointType::RightShoulder => "right_shoulder",
            JointType::LeftElbow => "left_elbow",
            JointType::RightElbow => "right_elbow",
            JointType::LeftWrist => "left_wrist",
            JointType::RightWrist => "right_wrist",
            JointType::LeftHip => "left_hip",
            JointType::RightHip => "right_hip",
            JointType::LeftKnee => "left_knee",
            JointType::RightKnee => "right_knee",
            JointType::LeftAnkle => "left_ankle",
            JointType::RightAnkle => "right_ankle",
        }
    }
}

impl std::fmt::Display for JointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A rigid connection between two joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bone {
    pub from: JointType,
    pub to: JointType,
    pub name: &'static str,
}

impl Bone {
    const fn new(from: JointType, to: JointType, name: &'static str) -> Self {
        Self { from, to, name }
    }

    /// The bone on the other side of the body, if this bone is lateral.
    ///
    /// Bones whose endpoints mirror onto themselves (shoulder and hip spans)
    /// have no counterpart.
    pub fn mirror(&self) -> Option<Bone> {
        let from = self.from.mirror();
        let to = self.to.mirror();
        if (from, to) == (self.to, self.from) || (from, to) == (self.from, self.to) {
            return None;
        }
        BONES
            .iter()
            .copied()
            .find(|b| (b.from, b.to) == (from, to))
    }
}

/// Skeleton connections measured during calibration.
///
/// Left bones precede their right counterparts.
pub const BONES: [Bone; 12] = [
    Bone::new(JointType::LeftShoulder, JointType::RightShoulder, "shoulder_span"),
    Bone::new(JointType::LeftHip, JointType::RightHip, "hip_span"),
    Bone::new(JointType::LeftShoulder, JointType::LeftHip, "left_torso"),
    Bone::new(JointType::RightShoulder, JointType::RightHip, "right_torso"),
    Bone::new(JointType::LeftShoulder, JointType::LeftElbow, "left_upper_arm"),
    Bone::new(JointType::RightShoulder, JointType::RightElbow, "right_upper_arm"),
    Bone::new(JointType::LeftElbow, JointType::LeftWrist, "left_forearm"),
    Bone::new(JointType::RightElbow, JointType::RightWrist, "right_forearm"),
    Bone::new(JointType::LeftHip, JointType::LeftKnee, "left_thigh"),
    Bone::new(JointType::RightHip, JointType::RightKnee, "right_thigh"),
    Bone::new(JointType::LeftKnee, JointType::LeftAnkle, "left_shin"),
    Bone::new(JointType::RightKnee, JointType::RightAnkle, "right_shin"),
];
