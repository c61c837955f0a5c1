//! Confidence-weighted pose similarity.

use segment_core::{Pose, Real, distance};

use crate::AnalysisOptions;

/// Map a mean distance to a score in `[0, 1]`.
///
/// `1 / (1 + d / scale)`: zero distance scores exactly 1, and the score halves
/// at `d == scale`. A non-positive `scale` degenerates to a step: 1 at zero
/// distance, 0 otherwise.
#[inline]
pub fn similarity_from_distance(mean_distance: Real, scale: Real) -> Real {
    if !mean_distance.is_finite() {
        return 0.0;
    }
    let d = mean_distance.max(0.0);
    if d == 0.0 {
        return 1.0;
    }
    if scale.is_nan() || scale <= 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + d / scale)
}

/// Compare two poses over all joints.
///
/// Each joint is weighted by the smaller of its two confidences, with weights
/// below the confidence floor dropped. Identical joint positions always score
/// 1.0. If no joint carries weight the score is 0.0.
pub fn calculate_similarity(a: &Pose, b: &Pose, opts: &AnalysisOptions) -> Real {
    if a.joints == b.joints {
        return 1.0;
    }

    let mut sum_w = 0.0;
    let mut sum_wd = 0.0;
    for i in 0..a.joints.len() {
        let w = opts.weight(a.confidence[i].min(b.confidence[i]));
        if w > 0.0 {
            sum_w += w;
            sum_wd += w * distance(&a.joints[i], &b.joints[i]);
        }
    }

    if sum_w <= 0.0 {
        return 0.0;
    }
    similarity_from_distance(sum_wd / sum_w, opts.similarity_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_core::synthetic::{sample_pose, scaled_pose, squat_end_pose};
    use segment_core::{JOINT_COUNT, Vec3};

    #[test]
    fn identical_poses_score_one() {
        let opts = AnalysisOptions::default();
        let pose = sample_pose(0);
        assert_eq!(calculate_similarity(&pose, &pose, &opts), 1.0);

        // Even with no usable confidence.
        let mut dark = pose;
        dark.confidence = [0.0; JOINT_COUNT];
        assert_eq!(calculate_similarity(&dark, &dark, &opts), 1.0);
    }

    #[test]
    fn divergent_poses_score_lower() {
        let opts = AnalysisOptions::default();
        let a = sample_pose(0);
        let near = scaled_pose(&a, 1.0, Vec3::new(1.0, 0.0, 0.0));
        let far = scaled_pose(&a, 1.0, Vec3::new(50.0, 0.0, 0.0));

        let s_near = calculate_similarity(&a, &near, &opts);
        let s_far = calculate_similarity(&a, &far, &opts);
        assert!(s_near < 1.0);
        assert!(s_far < s_near);
        assert!(s_far > 0.0);

        // Uniform 1-unit shift: 1 / (1 + 1/10).
        assert!((s_near - 1.0 / 1.1).abs() < 1e-12);
    }

    #[test]
    fn squat_similarity_is_bounded_and_symmetric() {
        let opts = AnalysisOptions::default();
        let a = sample_pose(0);
        let b = squat_end_pose(0);
        let ab = calculate_similarity(&a, &b, &opts);
        let ba = calculate_similarity(&b, &a, &opts);
        assert!((0.0..=1.0).contains(&ab));
        assert_eq!(ab, ba);
    }

    #[test]
    fn no_weight_scores_zero() {
        let opts = AnalysisOptions::default();
        let a = sample_pose(0);
        let mut b = squat_end_pose(0);
        b.confidence = [0.05; JOINT_COUNT];
        assert_eq!(calculate_similarity(&a, &b, &opts), 0.0);
    }

    #[test]
    fn mapping_is_monotone() {
        assert_eq!(similarity_from_distance(0.0, 10.0), 1.0);
        assert!((similarity_from_distance(10.0, 10.0) - 0.5).abs() < 1e-12);
        assert!(similarity_from_distance(100.0, 10.0) < similarity_from_distance(20.0, 10.0));
        assert_eq!(similarity_from_distance(Real::NAN, 10.0), 0.0);
    }

    #[test]
    fn degenerate_scale_is_a_step() {
        assert_eq!(similarity_from_distance(0.0, 0.0), 1.0);
        assert_eq!(similarity_from_distance(0.5, 0.0), 0.0);
        assert_eq!(similarity_from_distance(0.5, -3.0), 0.0);
        assert_eq!(similarity_from_distance(0.5, Real::NAN), 0.0);

        let opts = AnalysisOptions {
            similarity_scale: 0.0,
            ..Default::default()
        };
        let s = calculate_similarity(&sample_pose(0), &squat_end_pose(0), &opts);
        assert_eq!(s, 0.0);
    }
}
