//! Per-frame input and output records.

use serde::{Deserialize, Serialize};
use segment_core::{JOINT_COUNT, JointType, Pose, Real, Vec3};

/// How the frame behind an output was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameStatus {
    /// The frame was scored normally.
    Tracked,
    /// Every care joint fell below the confidence floor.
    LowConfidence,
    /// The frame failed validation, or no analysis was possible.
    Rejected,
}

impl std::fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FrameStatus::Tracked => "tracked",
            FrameStatus::LowConfidence => "low_confidence",
            FrameStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// One raw frame to analyze.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentInput {
    pub raw_pose: Pose,
}

impl From<Pose> for SegmentInput {
    fn from(raw_pose: Pose) -> Self {
        Self { raw_pose }
    }
}

/// Result of analyzing one frame against a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentOutput {
    /// Position along the segment in `[0, 1]`.
    pub progress: Real,
    pub completed: bool,
    /// Match quality of the care joints in `[0, 1]`.
    pub similarity: Real,
    /// `target - current` for every joint, in normalized units.
    pub corrections: [Vec3; JOINT_COUNT],
    /// Timestamp of the analyzed input.
    pub timestamp: u64,
    pub status: FrameStatus,
}

impl SegmentOutput {
    /// Zeroed output returned when analysis could not run at all.
    pub fn sentinel(timestamp: u64) -> Self {
        Self {
            progress: 0.0,
            completed: false,
            similarity: 0.0,
            corrections: [Vec3::zeros(); JOINT_COUNT],
            timestamp,
            status: FrameStatus::Rejected,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.status == FrameStatus::Tracked
    }

    pub fn correction(&self, joint: JointType) -> &Vec3 {
        &self.corrections[joint.index()]
    }

    /// Joint with the largest correction, if any correction is non-zero.
    pub fn worst_joint(&self) -> Option<(JointType, Real)> {
        JointType::ALL
            .iter()
            .map(|&j| (j, self.correction(j).norm()))
            .filter(|(_, n)| *n > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_zeroed() {
        let out = SegmentOutput::sentinel(42);
        assert_eq!(out.progress, 0.0);
        assert_eq!(out.similarity, 0.0);
        assert!(!out.completed);
        assert_eq!(out.timestamp, 42);
        assert_eq!(out.status, FrameStatus::Rejected);
        assert!(out.worst_joint().is_none());
    }

    #[test]
    fn worst_joint_picks_largest_correction() {
        let mut out = SegmentOutput::sentinel(0);
        out.corrections[JointType::LeftKnee.index()] = Vec3::new(0.0, 3.0, 0.0);
        out.corrections[JointType::RightHip.index()] = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(out.worst_joint(), Some((JointType::LeftKnee, 3.0)));
    }

    #[test]
    fn output_json_roundtrip() {
        let mut out = SegmentOutput::sentinel(9);
        out.status = FrameStatus::Tracked;
        out.progress = 0.25;
        let json = serde_json::to_string(&out).unwrap();
        let back: SegmentOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, out);
    }
}
