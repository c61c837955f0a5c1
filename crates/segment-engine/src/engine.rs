//! Stateful engine holding the active calibration and segment.

use anyhow::Result;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use segment_analysis::{
    CareJoints, Segment, SegmentAnalyzer, SegmentInput, SegmentOutput, calculate_similarity,
};
use segment_calibration::{Calibration, calibrate, validate_calibration};
use segment_core::{Pose, PoseValidator, Real};

use crate::{EngineConfig, SegmentApi, SegmentApiError};

/// Lifecycle stage, derived from what the engine currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Calibrated,
    SegmentReady,
    Analyzing,
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Initialized => "initialized",
            EngineState::Calibrated => "calibrated",
            EngineState::SegmentReady => "segment_ready",
            EngineState::Analyzing => "analyzing",
        };
        f.write_str(s)
    }
}

/// Single-owner engine implementing [`SegmentApi`].
///
/// # Lifecycle
///
/// - `initialize` enables the stateful operations.
/// - `calibrate` stores the latest successful calibration. A failure keeps
///   the previous one.
/// - `create_segment` swaps in a new segment and clears analysis state. A
///   failure keeps the previous segment.
/// - Frames are normalized with the latest calibration, so a `calibrate`
///   between two frames takes effect on the next one. Without one, the
///   segment's own calibration is used.
/// - `teardown` (also run on drop) releases everything.
///
/// # Example
///
/// ```
/// use segment_engine::{SegmentApi, SegmentEngine};
/// use segment_analysis::SegmentInput;
/// use segment_core::synthetic::{sample_pose, squat_end_pose};
///
/// let mut engine = SegmentEngine::new();
/// engine.initialize().unwrap();
/// let calib = engine.calibrate(&sample_pose(0)).unwrap();
/// engine
///     .create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &[7, 8, 9, 10])
///     .unwrap();
///
/// let out = engine.analyze(&SegmentInput::from(squat_end_pose(33))).unwrap();
/// assert!(out.completed);
/// ```
#[derive(Debug)]
pub struct SegmentEngine {
    config: EngineConfig,
    initialized: bool,
    calibration: Option<Calibration>,
    segment: Option<Segment>,
    analyzer: SegmentAnalyzer,
}

impl SegmentEngine {
    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Uninitialized engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            initialized: false,
            calibration: None,
            segment: None,
            analyzer: build_analyzer(&config),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// The active calibration and segment are kept; analysis state restarts.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentApiError::InvalidParameter`] if the config does not
    /// validate. The previous config stays in effect.
    pub fn set_config(&mut self, config: EngineConfig) -> Result<(), SegmentApiError> {
        config
            .validate()
            .map_err(|e| SegmentApiError::InvalidParameter(format!("{e:#}")))?;
        self.config = config;
        self.analyzer = build_analyzer(&config);
        Ok(())
    }

    /// Load a JSON configuration via [`EngineConfig::from_json`].
    pub fn load_config_json(&mut self, json: &str) -> Result<()> {
        let config = EngineConfig::from_json(json)?;
        self.set_config(config)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        if !self.initialized {
            EngineState::Uninitialized
        } else if self.segment.is_some() {
            if self.analyzer.frames_analyzed() > 0 {
                EngineState::Analyzing
            } else {
                EngineState::SegmentReady
            }
        } else if self.calibration.is_some() {
            EngineState::Calibrated
        } else {
            EngineState::Initialized
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Calibration from the last successful `calibrate`.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.calibration.as_ref()
    }

    pub fn segment(&self) -> Option<&Segment> {
        self.segment.as_ref()
    }

    /// Normalized target pose at the last estimated progress.
    pub fn target_pose(&self) -> Option<&Pose> {
        self.analyzer.target_pose()
    }

    /// Normalized end keypose of the active segment.
    pub fn transformed_end_pose(&self) -> Option<&Pose> {
        self.segment.as_ref().map(Segment::end)
    }

    /// Progress retained by the analyzer.
    pub fn progress(&self) -> Real {
        self.analyzer.progress()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn require_initialized(&self) -> Result<(), SegmentApiError> {
        if self.initialized {
            Ok(())
        } else {
            Err(SegmentApiError::NotInitialized)
        }
    }
}

impl Default for SegmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentApi for SegmentEngine {
    fn initialize(&mut self) -> Result<(), SegmentApiError> {
        if !self.initialized {
            self.initialized = true;
            info!("segment engine initialized");
        }
        Ok(())
    }

    fn calibrate(&mut self, pose: &Pose) -> Result<Calibration, SegmentApiError> {
        self.require_initialized()?;
        match calibrate(pose, &self.config.calibration) {
            Ok(calib) => {
                info!(
                    "calibrated: scale {:.4}, quality {:.3}",
                    calib.scale_factor, calib.calibration_quality
                );
                self.calibration = Some(calib);
                Ok(calib)
            }
            Err(err) => {
                warn!("calibration failed: {err}");
                Err(err.into())
            }
        }
    }

    fn validate_calibration(&self, calibration: &Calibration) -> bool {
        validate_calibration(calibration, &self.config.calibration)
    }

    fn create_segment(
        &mut self,
        start: &Pose,
        end: &Pose,
        calibration: &Calibration,
        care_joints: &[usize],
    ) -> Result<(), SegmentApiError> {
        self.require_initialized()?;
        let care = CareJoints::from_indices(care_joints)?;
        let segment =
            Segment::with_care_joints(start, end, calibration, care, &self.config.calibration)?;

        debug!(
            "segment created with care joints {:?}",
            segment.care_joints().as_slice()
        );
        self.segment = Some(segment);
        self.analyzer.reset();
        Ok(())
    }

    fn analyze(&mut self, input: &SegmentInput) -> Result<SegmentOutput, SegmentApiError> {
        self.require_initialized()?;
        let Some(segment) = self.segment.as_ref() else {
            return Err(SegmentApiError::SegmentNotCreated);
        };
        let calibration = self.calibration.as_ref().unwrap_or(segment.calibration());
        Ok(self
            .analyzer
            .analyze_calibrated(segment, calibration, &input.raw_pose))
    }

    fn reset_segment(&mut self) -> Result<(), SegmentApiError> {
        self.require_initialized()?;
        if self.segment.is_none() {
            return Err(SegmentApiError::SegmentNotCreated);
        }
        self.analyzer.reset();
        Ok(())
    }

    fn destroy_segment(&mut self) {
        if self.segment.take().is_some() {
            debug!("segment destroyed");
        }
        self.analyzer.reset();
    }

    fn calculate_similarity(&self, a: &Pose, b: &Pose) -> Real {
        calculate_similarity(a, b, &self.config.analysis)
    }

    fn validate_pose(&self, pose: &Pose) -> bool {
        PoseValidator::new(self.config.validator).validate(pose)
    }

    fn teardown(&mut self) {
        self.segment = None;
        self.calibration = None;
        self.analyzer.reset();
        if self.initialized {
            self.initialized = false;
            info!("segment engine shut down");
        }
    }
}

impl Drop for SegmentEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn build_analyzer(config: &EngineConfig) -> SegmentAnalyzer {
    SegmentAnalyzer::new(config.analysis).with_validator(PoseValidator::new(config.validator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use segment_core::synthetic::{sample_pose, squat_end_pose};

    #[test]
    fn state_progression() {
        let mut engine = SegmentEngine::new();
        assert_eq!(engine.state(), EngineState::Uninitialized);

        engine.initialize().unwrap();
        engine.initialize().unwrap();
        assert_eq!(engine.state(), EngineState::Initialized);

        let calib = engine.calibrate(&sample_pose(0)).unwrap();
        assert_eq!(engine.state(), EngineState::Calibrated);

        engine
            .create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &[9, 10])
            .unwrap();
        assert_eq!(engine.state(), EngineState::SegmentReady);

        engine.analyze(&sample_pose(1).into()).unwrap();
        assert_eq!(engine.state(), EngineState::Analyzing);

        engine.reset_segment().unwrap();
        assert_eq!(engine.state(), EngineState::SegmentReady);

        engine.destroy_segment();
        engine.destroy_segment();
        assert_eq!(engine.state(), EngineState::Calibrated);

        engine.teardown();
        engine.teardown();
        assert_eq!(engine.state(), EngineState::Uninitialized);
        assert!(engine.calibration().is_none());
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut engine = SegmentEngine::new();
        let mut config = EngineConfig::default();
        config.validator.min_confidence = 2.0;

        let err = engine.set_config(config).unwrap_err();
        assert_eq!(err.code(), crate::ErrorCode::InvalidParameter);
        assert_eq!(engine.config(), &EngineConfig::default());
    }

    #[test]
    fn transformed_end_pose_is_normalized() {
        let mut engine = SegmentEngine::new();
        engine.initialize().unwrap();
        assert!(engine.transformed_end_pose().is_none());

        let calib = engine.calibrate(&sample_pose(0)).unwrap();
        engine
            .create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &[7, 8])
            .unwrap();

        let end = engine.transformed_end_pose().unwrap();
        // Knees at raw y = 110, torso center at y = 25.
        assert!((end.joints[9].y - 85.0).abs() < 1e-12);
    }
}
