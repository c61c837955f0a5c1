//! Operation set exposed to callers.

use segment_analysis::{SegmentInput, SegmentOutput};
use segment_calibration::Calibration;
use segment_core::{Pose, Real};

use crate::{ErrorCode, SegmentApiError};

/// Calibrate, define a segment and analyze frames against it.
///
/// Every fallible operation returns a [`SegmentApiError`] whose
/// [`code`](SegmentApiError::code) is the stable boundary code. A failed
/// operation leaves the previous calibration and segment in place.
pub trait SegmentApi {
    /// Prepare the engine. Calling it again is a no-op.
    fn initialize(&mut self) -> Result<(), SegmentApiError>;

    /// Derive and store a calibration from a reference pose.
    fn calibrate(&mut self, pose: &Pose) -> Result<Calibration, SegmentApiError>;

    fn validate_calibration(&self, calibration: &Calibration) -> bool;

    /// Replace the active segment.
    ///
    /// `care_joints` holds raw joint indices in `0..13`.
    fn create_segment(
        &mut self,
        start: &Pose,
        end: &Pose,
        calibration: &Calibration,
        care_joints: &[usize],
    ) -> Result<(), SegmentApiError>;

    /// Analyze one frame against the active segment.
    fn analyze(&mut self, input: &SegmentInput) -> Result<SegmentOutput, SegmentApiError>;

    /// Fail-closed form of [`analyze`](Self::analyze).
    ///
    /// Always yields an output; on failure it is
    /// [`SegmentOutput::sentinel`] and the code says why.
    fn analyze_or_sentinel(&mut self, input: &SegmentInput) -> (SegmentOutput, ErrorCode) {
        match self.analyze(input) {
            Ok(out) => (out, ErrorCode::Ok),
            Err(err) => (
                SegmentOutput::sentinel(input.raw_pose.timestamp),
                err.code(),
            ),
        }
    }

    /// Clear per-segment analysis state, keeping the segment.
    fn reset_segment(&mut self) -> Result<(), SegmentApiError>;

    /// Drop the active segment, if any.
    fn destroy_segment(&mut self);

    fn calculate_similarity(&self, a: &Pose, b: &Pose) -> Real;

    fn validate_pose(&self, pose: &Pose) -> bool;

    fn error_message(&self, code: i32) -> &'static str {
        crate::error_message(code)
    }

    /// Release everything. Safe to call repeatedly.
    fn teardown(&mut self);
}
