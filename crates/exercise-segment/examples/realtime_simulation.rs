//! Simulated 30 fps squat reps with tracking noise and dropouts.
//!
//! Frames are generated along a down-then-up path with deterministic jitter.
//! The knees drive the segment. A few frames lose them (low confidence) or
//! are corrupted entirely (rejected) to show how the engine keeps its last
//! estimate.
//!
//! Run with: `cargo run -p exercise-segment --example realtime_simulation`

use anyhow::Result;
use exercise_segment::prelude::*;
use exercise_segment::synthetic::{JointJitter, interpolated_pose, sample_pose, squat_end_pose};
use exercise_segment::JOINT_COUNT;

const FRAME_MS: u64 = 33;
const FRAMES_PER_REP: usize = 40;
const REPS: usize = 2;

fn main() -> Result<()> {
    println!("=== Real-time Squat Simulation ===\n");

    let config = EngineConfig::from_json(r#"{ "analysis": { "completion_threshold": 0.9 } }"#)?;
    let mut engine = SegmentEngine::with_config(config);
    engine.initialize()?;

    let calib = engine.calibrate(&sample_pose(0))?;
    let care = [JointType::LeftKnee, JointType::RightKnee].map(JointType::index);
    engine.create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &care)?;

    let jitter = JointJitter {
        seed: 2024,
        max_abs: 0.5,
    };

    let mut reps_done = 0;
    let mut in_bottom = false;
    let mut sim_sum = 0.0;
    let mut tracked = 0usize;

    for frame in 0..FRAMES_PER_REP * REPS {
        let phase = (frame % FRAMES_PER_REP) as Real / FRAMES_PER_REP as Real;
        // Triangle wave: 0 -> 1 -> 0 over one rep.
        let t = 1.0 - (2.0 * phase - 1.0).abs();
        let timestamp = frame as u64 * FRAME_MS;

        let mut pose = jitter.apply(
            frame,
            &interpolated_pose(&sample_pose(0), &squat_end_pose(0), t, timestamp),
        );
        match frame % 17 {
            5 => {
                pose.confidence[JointType::LeftKnee.index()] = 0.05;
                pose.confidence[JointType::RightKnee.index()] = 0.05;
            }
            11 => pose = Pose::uniform([pose.joints[0]; JOINT_COUNT], 0.2, timestamp),
            _ => {}
        }

        let (out, code) = engine.analyze_or_sentinel(&SegmentInput::from(pose));
        if code != ErrorCode::Ok {
            println!("frame {frame:3}: error {code}");
            continue;
        }

        if out.status == FrameStatus::Tracked {
            sim_sum += out.similarity;
            tracked += 1;
        }
        if out.completed && !in_bottom {
            reps_done += 1;
            in_bottom = true;
        } else if out.progress < 0.2 {
            in_bottom = false;
        }

        if frame % 4 == 0 || out.status != FrameStatus::Tracked {
            let worst = out
                .worst_joint()
                .map(|(j, d)| format!("{j} {d:.2}"))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "frame {frame:3} t={:>5}ms  progress {:.3}  similarity {:.3}  {:<14}  worst {worst}",
                out.timestamp,
                out.progress,
                out.similarity,
                out.status.to_string()
            );
        }
    }

    println!("\nReps counted: {reps_done}");
    if tracked > 0 {
        println!("Mean similarity on tracked frames: {:.4}", sim_sum / tracked as Real);
    }
    println!("Final state: {}", engine.state());

    let last = engine.target_pose().map(|p| p.timestamp);
    println!("Last target timestamp: {last:?}");
    println!("\nLast config:\n{}", engine.config().to_json()?);

    Ok(())
}
