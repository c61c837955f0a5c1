//! Reference-pose calibration and pose normalization.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use segment_core::{
    JointType, Pose, PoseRejection, PoseValidator, Pt3, Real, clamp01, distance,
    weighted_centroid,
};

use crate::{BoneLengthTable, CalibrationOptions};

/// Per-user mapping from raw pose coordinates to the canonical frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Multiplier applied after re-centering. Strictly positive when valid.
    pub scale_factor: Real,
    /// Raw-space point that maps to the canonical origin.
    pub center_offset: Pt3,
    pub is_calibrated: bool,
    /// Reliability score in `[0, 1]`.
    pub calibration_quality: Real,
    /// Bone lengths measured on the reference pose.
    #[serde(default)]
    pub bone_lengths: BoneLengthTable,
}

impl Calibration {
    /// Unit scale, zero offset, full quality.
    ///
    /// Normalizing with the identity leaves joint positions unchanged.
    pub fn identity() -> Self {
        Self {
            scale_factor: 1.0,
            center_offset: Pt3::origin(),
            is_calibrated: true,
            calibration_quality: 1.0,
            bone_lengths: BoneLengthTable::default(),
        }
    }

    /// Shorthand for [`validate_calibration`].
    pub fn is_valid(&self, opts: &CalibrationOptions) -> bool {
        validate_calibration(self, opts)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::identity()
    }
}

/// Why a reference pose could not be calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    #[error("reference pose rejected: {0}")]
    InvalidPose(#[from] PoseRejection),
    #[error("shoulder span {length} is too small to measure")]
    DegenerateReference { length: Real },
    #[error("scale factor {scale} outside [{min}, {max}]")]
    ScaleOutOfRange { scale: Real, min: Real, max: Real },
    #[error("no confident torso joint to anchor the center offset")]
    InsufficientConfidence,
    #[error("calibration quality {quality:.3} below minimum {min}")]
    QualityTooLow { quality: Real, min: Real },
    #[error("center offset magnitude {magnitude} exceeds {max}")]
    CenterOutOfRange { magnitude: Real, max: Real },
}

/// Derive a calibration from a reference pose.
///
/// The shoulder span fixes the scale, the confidence-weighted torso centroid
/// fixes the center. Quality is the mean torso confidence times the left/right
/// bone symmetry.
///
/// # Errors
///
/// Returns [`CalibrationError`] when the pose is unusable or the resulting
/// calibration would not pass [`validate_calibration`]. No partial calibration
/// is produced.
pub fn calibrate(pose: &Pose, opts: &CalibrationOptions) -> Result<Calibration, CalibrationError> {
    PoseValidator::new(opts.validator).check(pose)?;

    let width = distance(
        pose.joint(JointType::LeftShoulder),
        pose.joint(JointType::RightShoulder),
    );
    if width.is_nan() || width <= opts.min_reference_length {
        return Err(CalibrationError::DegenerateReference { length: width });
    }

    let scale = opts.reference_shoulder_width / width;
    if !opts.scale_in_range(scale) {
        return Err(CalibrationError::ScaleOutOfRange {
            scale,
            min: opts.min_scale,
            max: opts.max_scale,
        });
    }

    let center = weighted_centroid(
        JointType::TORSO
            .iter()
            .map(|&j| (pose.joint(j), pose.confidence_of(j))),
    )
    .ok_or(CalibrationError::InsufficientConfidence)?;

    let bone_lengths = BoneLengthTable::measure(
        pose,
        scale,
        opts.validator.min_confidence,
        opts.min_reference_length,
    );

    let torso_conf = JointType::TORSO
        .iter()
        .map(|&j| pose.confidence_of(j))
        .sum::<Real>()
        / JointType::TORSO.len() as Real;
    let symmetry = bone_lengths.symmetry();
    let quality = clamp01(torso_conf * symmetry);

    debug!(
        "calibrate: shoulder width {:.3}, scale {:.4}, torso conf {:.3}, symmetry {:.3}, quality {:.3}",
        width, scale, torso_conf, symmetry, quality
    );

    if quality < opts.min_quality {
        return Err(CalibrationError::QualityTooLow {
            quality,
            min: opts.min_quality,
        });
    }

    let magnitude = center.coords.norm();
    if !magnitude.is_finite() || magnitude > opts.max_center_offset {
        return Err(CalibrationError::CenterOutOfRange {
            magnitude,
            max: opts.max_center_offset,
        });
    }

    Ok(Calibration {
        scale_factor: scale,
        center_offset: center,
        is_calibrated: true,
        calibration_quality: quality,
        bone_lengths,
    })
}

/// Map a raw pose into the canonical frame.
///
/// Confidences and timestamp are carried over unchanged.
pub fn normalize(pose: &Pose, calib: &Calibration) -> Pose {
    pose.map_joints(|p| Pt3::from((p - calib.center_offset) * calib.scale_factor))
}

/// Plausibility check for a calibration, including caller-built ones.
pub fn validate_calibration(calib: &Calibration, opts: &CalibrationOptions) -> bool {
    let reason = if !calib.is_calibrated {
        "not calibrated"
    } else if !opts.scale_in_range(calib.scale_factor) {
        "scale out of range"
    } else if !(opts.min_quality..=1.0).contains(&calib.calibration_quality) {
        "quality out of range"
    } else if !calib.center_offset.coords.iter().all(|v| v.is_finite())
        || calib.center_offset.coords.norm() > opts.max_center_offset
    {
        "center offset out of range"
    } else {
        return true;
    };
    debug!("calibration rejected: {reason}");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_core::synthetic::{sample_pose, scaled_pose, squat_end_pose};
    use segment_core::{JOINT_COUNT, Vec3};

    fn opts() -> CalibrationOptions {
        CalibrationOptions::default()
    }

    #[test]
    fn sample_pose_calibrates_to_unit_scale() {
        let calib = calibrate(&sample_pose(0), &opts()).unwrap();

        assert!(calib.is_calibrated);
        assert!((calib.scale_factor - 1.0).abs() < 1e-12);
        assert!((calib.center_offset - Pt3::new(0.0, 25.0, 0.0)).norm() < 1e-12);
        assert!((calib.calibration_quality - 0.9).abs() < 1e-12);
        assert!(validate_calibration(&calib, &opts()));
    }

    #[test]
    fn scaled_subject_is_normalized_back() {
        let offset = Vec3::new(300.0, -120.0, 5.0);
        let reference = sample_pose(0);
        let big = scaled_pose(&reference, 2.5, offset);

        let calib = calibrate(&big, &opts()).unwrap();
        assert!((calib.scale_factor - 0.4).abs() < 1e-12);

        let ref_calib = calibrate(&reference, &opts()).unwrap();
        let a = normalize(&big, &calib);
        let b = normalize(&reference, &ref_calib);
        for j in 0..JOINT_COUNT {
            assert!((a.joints[j] - b.joints[j]).norm() < 1e-9, "joint {j}");
        }
    }

    #[test]
    fn normalization_is_idempotent_under_identity() {
        let calib = calibrate(&sample_pose(0), &opts()).unwrap();
        let once = normalize(&squat_end_pose(7), &calib);
        let twice = normalize(&once, &Calibration::identity());
        assert_eq!(once, twice);
        assert_eq!(twice.timestamp, 7);
    }

    #[test]
    fn collapsed_pose_fails() {
        let pose = Pose::uniform([Pt3::new(1.0, 1.0, 0.0); JOINT_COUNT], 0.3, 0);
        assert!(matches!(
            calibrate(&pose, &opts()),
            Err(CalibrationError::InvalidPose(_))
        ));
    }

    #[test]
    fn coincident_shoulders_are_degenerate() {
        let mut pose = sample_pose(0);
        pose.joints[2] = pose.joints[1];
        assert!(matches!(
            calibrate(&pose, &opts()),
            Err(CalibrationError::DegenerateReference { .. })
        ));
    }

    #[test]
    fn asymmetric_pose_fails_quality() {
        let mut pose = sample_pose(0);
        // Stretch the whole left side far out of proportion.
        pose.joints[3] = Pt3::new(-200.0, 20.0, 0.0);
        pose.joints[5] = Pt3::new(-600.0, 40.0, 0.0);
        pose.joints[9] = Pt3::new(-10.0, 400.0, 0.0);
        pose.joints[11] = Pt3::new(-10.0, 1000.0, 0.0);
        assert!(matches!(
            calibrate(&pose, &opts()),
            Err(CalibrationError::QualityTooLow { .. })
        ));
    }

    #[test]
    fn tiny_subject_is_out_of_range() {
        let pose = scaled_pose(&sample_pose(0), 1e-4, Vec3::zeros());
        assert!(matches!(
            calibrate(&pose, &opts()),
            Err(CalibrationError::ScaleOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_calibration_rules() {
        let o = opts();
        assert!(validate_calibration(&Calibration::identity(), &o));

        let mut c = Calibration::identity();
        c.is_calibrated = false;
        assert!(!validate_calibration(&c, &o));

        let mut c = Calibration::identity();
        c.scale_factor = 0.0;
        assert!(!validate_calibration(&c, &o));

        let mut c = Calibration::identity();
        c.calibration_quality = 0.59;
        assert!(!validate_calibration(&c, &o));

        let mut c = Calibration::identity();
        c.center_offset = Pt3::new(Real::NAN, 0.0, 0.0);
        assert!(!validate_calibration(&c, &o));

        let mut c = Calibration::identity();
        c.center_offset = Pt3::new(20_000.0, 0.0, 0.0);
        assert!(!validate_calibration(&c, &o));
    }

    #[test]
    fn calibration_json_roundtrip() {
        let calib = calibrate(&sample_pose(0), &opts()).unwrap();
        let json = serde_json::to_string(&calib).unwrap();
        let restored: Calibration = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, calib);
    }
}
