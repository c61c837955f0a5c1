//! Squat segment walkthrough with synthetic poses.
//!
//! This example runs the whole engine workflow once:
//! 1. Calibrate on a neutral standing pose
//! 2. Create a squat segment with knees and hips as care joints
//! 3. Analyze poses at fixed fractions of the movement
//! 4. Show error handling on a collapsed pose
//!
//! Run with: `cargo run -p exercise-segment --example squat_walkthrough`

use anyhow::Result;
use exercise_segment::prelude::*;
use exercise_segment::synthetic::{interpolated_pose, sample_pose, squat_end_pose};
use exercise_segment::{JOINT_COUNT, error_message};

fn main() -> Result<()> {
    println!("=== Squat Segment Walkthrough (Synthetic Data) ===\n");

    let mut engine = SegmentEngine::new();
    engine.initialize()?;
    println!("Engine state: {}\n", engine.state());

    // Calibration
    println!("--- Step 1: Calibration ---");
    let calib = engine.calibrate(&sample_pose(0))?;
    println!("  Scale factor: {:.4}", calib.scale_factor);
    println!(
        "  Center offset: ({:.1}, {:.1}, {:.1})",
        calib.center_offset.x, calib.center_offset.y, calib.center_offset.z
    );
    println!("  Quality: {:.3}", calib.calibration_quality);
    println!("  Valid: {}", engine.validate_calibration(&calib));
    for (bone, len) in calib.bone_lengths.iter().filter(|(_, l)| l.valid) {
        println!("    {:<16} {:6.2}", bone.name, len.normalized);
    }
    println!();

    // Segment
    println!("--- Step 2: Segment ---");
    let care = [
        JointType::LeftKnee,
        JointType::RightKnee,
        JointType::LeftHip,
        JointType::RightHip,
    ]
    .map(JointType::index);
    engine.create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &care)?;
    println!("  Care joints: {care:?}");
    println!("  Engine state: {}\n", engine.state());

    // Analysis
    println!("--- Step 3: Analysis ---");
    println!("  {:>6} {:>9} {:>10} {:>9}", "t", "progress", "similarity", "completed");
    for (k, t) in [0.0, 0.25, 0.5, 0.75, 1.0].into_iter().enumerate() {
        let pose = interpolated_pose(&sample_pose(0), &squat_end_pose(0), t, 33 * k as u64);
        let out = engine.analyze(&SegmentInput::from(pose))?;
        println!(
            "  {:>6.2} {:>9.3} {:>10.4} {:>9}",
            t, out.progress, out.similarity, out.completed
        );
    }
    println!();

    let similarity = engine.calculate_similarity(&sample_pose(0), &squat_end_pose(0));
    println!("  Standing vs squat similarity: {similarity:.4}\n");

    // Error handling
    println!("--- Step 4: Error handling ---");
    let collapsed = Pose::uniform([sample_pose(0).joints[0]; JOINT_COUNT], 0.3, 0);
    println!("  Collapsed pose valid: {}", engine.validate_pose(&collapsed));
    match engine.calibrate(&collapsed) {
        Ok(_) => println!("  Unexpected success"),
        Err(err) => println!(
            "  calibrate -> {} ({}): {}",
            err.code().code(),
            error_message(err.code().code()),
            err
        ),
    }
    println!("  Calibration kept: {}", engine.calibration() == Some(&calib));

    engine.teardown();
    println!("\nEngine state after teardown: {}", engine.state());

    Ok(())
}
