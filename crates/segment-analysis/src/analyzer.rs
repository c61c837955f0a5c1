//! Per-frame projection of a pose onto a segment.
//!
//! Progress is the closed-form minimizer of
//!
//! ```text
//! E(t) = Σ_j w_j |c_j - lerp(s_j, e_j, t)|²
//! ```
//!
//! over the care joints, clamped to `[0, 1]`:
//!
//! ```text
//! t* = Σ_j w_j (c_j - s_j)·d_j / Σ_j w_j |d_j|²,   d_j = e_j - s_j
//! ```
//!
//! `w_j` is the frame's confidence for joint `j`, zeroed below the floor.

use log::{debug, trace};

use segment_calibration::{Calibration, normalize};
use segment_core::{JOINT_COUNT, Pose, PoseValidator, Real, Vec3, clamp01, distance};

use crate::{AnalysisOptions, FrameStatus, Segment, SegmentOutput, similarity_from_distance};

/// Below this `Σ w |d|²` the segment is treated as stationary.
const STATIONARY_EPS: Real = 1e-12;

/// Stateful frame analyzer.
///
/// Retains the last progress and output between frames so that rejected and
/// low-confidence frames can be answered without a fresh estimate.
#[derive(Debug, Clone, Default)]
pub struct SegmentAnalyzer {
    opts: AnalysisOptions,
    validator: PoseValidator,
    progress: Real,
    last: Option<SegmentOutput>,
    target: Option<Pose>,
    frames: u64,
}

impl SegmentAnalyzer {
    pub fn new(opts: AnalysisOptions) -> Self {
        Self {
            opts,
            ..Default::default()
        }
    }

    /// Replace the validator used to gate incoming frames.
    pub fn with_validator(mut self, validator: PoseValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.opts
    }

    /// Progress retained from the last scored frame.
    pub fn progress(&self) -> Real {
        self.progress
    }

    pub fn last_output(&self) -> Option<&SegmentOutput> {
        self.last.as_ref()
    }

    /// Normalized target pose of the last scored frame.
    pub fn target_pose(&self) -> Option<&Pose> {
        self.target.as_ref()
    }

    /// Number of frames that updated the state.
    pub fn frames_analyzed(&self) -> u64 {
        self.frames
    }

    /// Forget retained progress and outputs. Options are kept.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.last = None;
        self.target = None;
        self.frames = 0;
    }

    /// Score one raw frame against `segment`, normalized with the calibration
    /// the segment was built with.
    pub fn analyze(&mut self, segment: &Segment, raw: &Pose) -> SegmentOutput {
        self.analyze_calibrated(segment, segment.calibration(), raw)
    }

    /// Score one raw frame against `segment`, normalized with `calibration`.
    ///
    /// The keyposes are already canonical, so `calibration` may differ from
    /// the one the segment was built with (the subject moved and recalibrated).
    pub fn analyze_calibrated(
        &mut self,
        segment: &Segment,
        calibration: &Calibration,
        raw: &Pose,
    ) -> SegmentOutput {
        if !self.validator.validate(raw) {
            return self.rejected(raw.timestamp);
        }

        let current = normalize(raw, calibration);

        let mut weights = [0.0; JOINT_COUNT];
        for j in segment.care_joints().unique() {
            weights[j.index()] = self.opts.weight(current.confidence_of(j));
        }
        let total_w: Real = weights.iter().sum();

        if total_w <= 0.0 {
            debug!(
                "frame t={}: no care joint above confidence floor {}",
                raw.timestamp, self.opts.confidence_floor
            );
            let target = segment.pose_at(self.progress);
            let out = SegmentOutput {
                progress: self.progress,
                completed: false,
                similarity: 0.0,
                corrections: corrections(&target, &current),
                timestamp: raw.timestamp,
                status: FrameStatus::LowConfidence,
            };
            self.commit(out, target);
            return out;
        }

        let progress = project(segment, &current, &weights);
        let target = segment.pose_at(progress);

        let mean_dist = weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0.0)
            .map(|(i, w)| w * distance(&current.joints[i], &target.joints[i]))
            .sum::<Real>()
            / total_w;
        let similarity = similarity_from_distance(mean_dist, self.opts.similarity_scale);

        let out = SegmentOutput {
            progress,
            completed: progress >= self.opts.completion_threshold,
            similarity,
            corrections: corrections(&target, &current),
            timestamp: raw.timestamp,
            status: FrameStatus::Tracked,
        };
        trace!(
            "frame t={}: progress {:.4}, mean distance {:.4}, similarity {:.4}",
            raw.timestamp, progress, mean_dist, similarity
        );

        self.progress = progress;
        self.commit(out, target);
        out
    }

    fn commit(&mut self, out: SegmentOutput, mut target: Pose) {
        target.timestamp = out.timestamp;
        self.last = Some(out);
        self.target = Some(target);
        self.frames += 1;
    }

    /// Answer for a frame that failed validation. State is untouched.
    fn rejected(&self, timestamp: u64) -> SegmentOutput {
        match self.last {
            Some(last) => SegmentOutput {
                timestamp,
                status: FrameStatus::Rejected,
                ..last
            },
            None => SegmentOutput {
                progress: self.progress,
                ..SegmentOutput::sentinel(timestamp)
            },
        }
    }
}

/// Weighted least-squares position of `current` along the segment.
fn project(segment: &Segment, current: &Pose, weights: &[Real; JOINT_COUNT]) -> Real {
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        let s = &segment.start().joints[i];
        let d = segment.end().joints[i] - s;
        num += w * (current.joints[i] - s).dot(&d);
        den += w * d.norm_squared();
    }
    if den <= STATIONARY_EPS {
        return 0.0;
    }
    clamp01(num / den)
}

fn corrections(target: &Pose, current: &Pose) -> [Vec3; JOINT_COUNT] {
    std::array::from_fn(|i| target.joints[i] - current.joints[i])
}
