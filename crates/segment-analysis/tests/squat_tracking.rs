//! Squat tracking over a synthetic rep with deterministic jitter.

use segment_analysis::{AnalysisOptions, FrameStatus, Segment, SegmentAnalyzer, calculate_similarity};
use segment_calibration::{CalibrationOptions, calibrate};
use segment_core::synthetic::{JointJitter, interpolated_pose, sample_pose, scaled_pose, squat_end_pose};
use segment_core::{JointType, Real, Vec3};

const CARE: [JointType; 4] = [
    JointType::LeftKnee,
    JointType::RightKnee,
    JointType::LeftHip,
    JointType::RightHip,
];

fn squat_segment() -> Segment {
    let opts = CalibrationOptions::default();
    let calib = calibrate(&sample_pose(0), &opts).expect("calibration");
    Segment::new(&sample_pose(0), &squat_end_pose(0), &calib, &CARE, &opts).expect("segment")
}

#[test]
fn down_then_up_completes_only_at_the_bottom() {
    let seg = squat_segment();
    let mut analyzer = SegmentAnalyzer::new(AnalysisOptions::default());
    let jitter = JointJitter {
        seed: 7,
        max_abs: 0.2,
    };

    let steps: Vec<Real> = (0..=10)
        .chain((0..10).rev())
        .map(|k| k as Real / 10.0)
        .collect();

    let mut completed_at = Vec::new();
    for (frame, &t) in steps.iter().enumerate() {
        let pose = interpolated_pose(&sample_pose(0), &squat_end_pose(0), t, 33 * frame as u64);
        let out = analyzer.analyze(&seg, &jitter.apply(frame, &pose));

        assert_eq!(out.status, FrameStatus::Tracked);
        assert!((out.progress - t).abs() < 0.02, "frame {frame}: t={t}, got {}", out.progress);
        assert!(out.similarity > 0.95, "frame {frame}: similarity {}", out.similarity);
        if out.completed {
            completed_at.push(frame);
        }
    }

    assert_eq!(completed_at, vec![10]);
}

#[test]
fn progress_is_monotone_on_the_way_down() {
    let seg = squat_segment();
    let mut analyzer = SegmentAnalyzer::default();

    let mut prev = -1.0;
    for k in 0..=20 {
        let t = k as Real / 20.0;
        let pose = interpolated_pose(&sample_pose(0), &squat_end_pose(0), t, k);
        let out = analyzer.analyze(&seg, &pose);
        assert!(out.progress > prev - 1e-12);
        prev = out.progress;
    }
}

#[test]
fn calibration_absorbs_subject_size_and_position() {
    let opts = CalibrationOptions::default();
    let offset = Vec3::new(640.0, 360.0, 0.0);
    let big_start = scaled_pose(&sample_pose(0), 3.0, offset);
    let big_end = scaled_pose(&squat_end_pose(0), 3.0, offset);

    let calib = calibrate(&big_start, &opts).expect("calibration");
    let seg = Segment::new(&big_start, &big_end, &calib, &CARE, &opts).expect("segment");

    let mut analyzer = SegmentAnalyzer::default();
    let mid = interpolated_pose(&big_start, &big_end, 0.5, 1);
    let out = analyzer.analyze(&seg, &mid);
    assert!((out.progress - 0.5).abs() < 1e-9);
    assert!(out.similarity > 0.999_999);
}

#[test]
fn off_path_frame_scores_lower_and_gets_corrections() {
    let seg = squat_segment();
    let mut analyzer = SegmentAnalyzer::default();

    let mut pose = interpolated_pose(&sample_pose(0), &squat_end_pose(0), 0.5, 1);
    // Knees caving inward.
    pose.joints[JointType::LeftKnee.index()].x += 6.0;
    pose.joints[JointType::RightKnee.index()].x -= 6.0;

    let out = analyzer.analyze(&seg, &pose);
    assert!((out.progress - 0.5).abs() < 1e-9);
    assert!(out.similarity < 0.8);
    assert!((out.correction(JointType::LeftKnee).x + 6.0).abs() < 1e-9);
    assert!((out.correction(JointType::RightKnee).x - 6.0).abs() < 1e-9);
    assert!(out.correction(JointType::LeftHip).norm() < 1e-9);
}

#[test]
fn stateless_similarity_is_reflexive() {
    let opts = AnalysisOptions::default();
    let pose = squat_end_pose(5);
    assert_eq!(calculate_similarity(&pose, &pose, &opts), 1.0);
    let s = calculate_similarity(&sample_pose(0), &pose, &opts);
    assert!(s > 0.0 && s < 1.0);
}
