//! Reference poses for a standing subject and a squat.
//!
//! Coordinates follow the image convention (`+y` down) in canonical units
//! where the shoulder span is 40.

use crate::{JOINT_COUNT, Pose, Pt3, Real, Vec3, lerp};

/// Joint positions of a neutral standing pose.
pub fn sample_joints() -> [Pt3; JOINT_COUNT] {
    [
        Pt3::new(0.0, -10.0, 0.0),   // nose
        Pt3::new(-20.0, 0.0, 0.0),   // left shoulder
        Pt3::new(20.0, 0.0, 0.0),    // right shoulder
        Pt3::new(-30.0, 20.0, 0.0),  // left elbow
        Pt3::new(30.0, 20.0, 0.0),   // right elbow
        Pt3::new(-40.0, 40.0, 0.0),  // left wrist
        Pt3::new(40.0, 40.0, 0.0),   // right wrist
        Pt3::new(-10.0, 50.0, 0.0),  // left hip
        Pt3::new(10.0, 50.0, 0.0),   // right hip
        Pt3::new(-10.0, 80.0, 0.0),  // left knee
        Pt3::new(10.0, 80.0, 0.0),   // right knee
        Pt3::new(-10.0, 110.0, 0.0), // left ankle
        Pt3::new(10.0, 110.0, 0.0),  // right ankle
    ]
}

/// Neutral standing pose, confidence 0.9 on every joint.
pub fn sample_pose(timestamp: u64) -> Pose {
    Pose::uniform(sample_joints(), 0.9, timestamp)
}

/// Bottom of a squat: hips lowered by 20, knees pushed down to ankle height.
pub fn squat_end_pose(timestamp: u64) -> Pose {
    let mut joints = sample_joints();
    joints[7].y = 70.0;
    joints[8].y = 70.0;
    joints[9].y = 110.0;
    joints[10].y = 110.0;
    Pose::uniform(joints, 0.9, timestamp)
}

/// Jointwise interpolation between two poses at fraction `t`.
///
/// Confidences are averaged; the timestamp is taken from `timestamp`.
pub fn interpolated_pose(start: &Pose, end: &Pose, t: Real, timestamp: u64) -> Pose {
    let joints = std::array::from_fn(|i| lerp(&start.joints[i], &end.joints[i], t));
    let confidence = std::array::from_fn(|i| 0.5 * (start.confidence[i] + end.confidence[i]));
    Pose::new(joints, confidence, timestamp)
}

/// Scale a pose about the origin and then translate it.
///
/// Models the same subject seen larger/smaller or off-center.
pub fn scaled_pose(pose: &Pose, scale: Real, offset: Vec3) -> Pose {
    pose.map_joints(|p| Pt3::from(p.coords * scale) + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JointType, distance};

    #[test]
    fn sample_shoulder_span_is_canonical() {
        let pose = sample_pose(0);
        let span = distance(
            pose.joint(JointType::LeftShoulder),
            pose.joint(JointType::RightShoulder),
        );
        assert!((span - 40.0).abs() < 1e-12);
    }

    #[test]
    fn interpolation_hits_keyposes() {
        let start = sample_pose(0);
        let end = squat_end_pose(0);

        assert_eq!(interpolated_pose(&start, &end, 0.0, 0).joints, start.joints);
        assert_eq!(interpolated_pose(&start, &end, 1.0, 0).joints, end.joints);

        let mid = interpolated_pose(&start, &end, 0.5, 5);
        assert!((mid.joint(JointType::LeftHip).y - 60.0).abs() < 1e-12);
        assert_eq!(mid.timestamp, 5);
    }

    #[test]
    fn scaled_pose_scales_distances() {
        let pose = scaled_pose(&sample_pose(0), 2.0, Vec3::new(100.0, 0.0, 0.0));
        let span = distance(
            pose.joint(JointType::LeftShoulder),
            pose.joint(JointType::RightShoulder),
        );
        assert!((span - 80.0).abs() < 1e-12);
        assert!((pose.joint(JointType::Nose).x - 100.0).abs() < 1e-12);
    }
}
