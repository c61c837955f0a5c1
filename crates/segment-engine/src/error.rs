//! Boundary error codes and messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use segment_analysis::SegmentBuildError;
use segment_calibration::CalibrationError;
use segment_core::PoseRejection;

/// Stable numeric result codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    NotInitialized = -1,
    InvalidPose = -2,
    CalibrationFailed = -3,
    SegmentNotCreated = -4,
    InvalidParameter = -5,
    MemoryAllocation = -6,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::Ok,
        ErrorCode::NotInitialized,
        ErrorCode::InvalidPose,
        ErrorCode::CalibrationFailed,
        ErrorCode::SegmentNotCreated,
        ErrorCode::InvalidParameter,
        ErrorCode::MemoryAllocation,
    ];

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Fixed human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Ok => "Success",
            ErrorCode::NotInitialized => "System not initialized",
            ErrorCode::InvalidPose => "Invalid pose data",
            ErrorCode::CalibrationFailed => "Calibration failed",
            ErrorCode::SegmentNotCreated => "Segment not created",
            ErrorCode::InvalidParameter => "Invalid parameter",
            ErrorCode::MemoryAllocation => "Memory allocation failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Message for a raw code. Unknown codes map to `"Unknown error"`.
pub fn error_message(code: i32) -> &'static str {
    ErrorCode::from_code(code).map_or("Unknown error", ErrorCode::message)
}

/// Failure of an engine operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SegmentApiError {
    #[error("engine not initialized")]
    NotInitialized,
    #[error("invalid pose: {0}")]
    InvalidPose(#[from] PoseRejection),
    #[error("invalid {0} keypose")]
    InvalidKeypose(&'static str),
    #[error("calibration failed: {0}")]
    Calibration(CalibrationError),
    #[error("calibration rejected for segment creation")]
    InvalidCalibration,
    #[error("no active segment")]
    SegmentNotCreated,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SegmentApiError {
    /// Boundary code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SegmentApiError::NotInitialized => ErrorCode::NotInitialized,
            SegmentApiError::InvalidPose(_) | SegmentApiError::InvalidKeypose(_) => {
                ErrorCode::InvalidPose
            }
            SegmentApiError::Calibration(_) | SegmentApiError::InvalidCalibration => {
                ErrorCode::CalibrationFailed
            }
            SegmentApiError::SegmentNotCreated => ErrorCode::SegmentNotCreated,
            SegmentApiError::InvalidParameter(_) => ErrorCode::InvalidParameter,
        }
    }
}

impl From<CalibrationError> for SegmentApiError {
    fn from(err: CalibrationError) -> Self {
        match err {
            CalibrationError::InvalidPose(reason) => SegmentApiError::InvalidPose(reason),
            other => SegmentApiError::Calibration(other),
        }
    }
}

impl From<SegmentBuildError> for SegmentApiError {
    fn from(err: SegmentBuildError) -> Self {
        match err {
            SegmentBuildError::EmptyCareJoints | SegmentBuildError::InvalidCareJoint(_) => {
                SegmentApiError::InvalidParameter(err.to_string())
            }
            SegmentBuildError::InvalidKeypose(which) => SegmentApiError::InvalidKeypose(which),
            SegmentBuildError::Calibration => SegmentApiError::InvalidCalibration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_table() {
        assert_eq!(error_message(0), "Success");
        assert_eq!(error_message(-1), "System not initialized");
        assert_eq!(error_message(-2), "Invalid pose data");
        assert_eq!(error_message(-3), "Calibration failed");
        assert_eq!(error_message(-4), "Segment not created");
        assert_eq!(error_message(-5), "Invalid parameter");
        assert_eq!(error_message(-6), "Memory allocation failed");
        assert_eq!(error_message(-7), "Unknown error");
        assert_eq!(error_message(42), "Unknown error");
    }

    #[test]
    fn codes_roundtrip() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_code(code.code()), Some(code));
            assert!(!code.message().is_empty());
        }
        assert_eq!(ErrorCode::CalibrationFailed.code(), -3);
    }

    #[test]
    fn calibration_errors_split_by_cause() {
        let rejected = CalibrationError::InvalidPose(PoseRejection::Degenerate { spread: 0.0 });
        assert_eq!(SegmentApiError::from(rejected).code(), ErrorCode::InvalidPose);

        let low = CalibrationError::QualityTooLow {
            quality: 0.2,
            min: 0.6,
        };
        assert_eq!(SegmentApiError::from(low).code(), ErrorCode::CalibrationFailed);
    }

    #[test]
    fn build_errors_map_to_codes() {
        let cases = [
            (SegmentBuildError::EmptyCareJoints, ErrorCode::InvalidParameter),
            (SegmentBuildError::InvalidCareJoint(20), ErrorCode::InvalidParameter),
            (SegmentBuildError::InvalidKeypose("start"), ErrorCode::InvalidPose),
            (SegmentBuildError::Calibration, ErrorCode::CalibrationFailed),
        ];
        for (err, code) in cases {
            assert_eq!(SegmentApiError::from(err).code(), code);
        }
    }
}
