//! Error handling for conversion sessions
//!
//! This module defines the closed set of error kinds a conversion session can
//! report. Callers branch on the variant; the detail fields exist for humans
//! and logs.

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Error type for format negotiation and conversion operations
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The requested encoding/bit-depth combination is not supported
    #[error("Unsupported sample format: {details}")]
    UnsupportedFormat { details: String },

    /// The requested channel count is not supported
    #[error("Unsupported channel count: {channels} (supported: 1, 2)")]
    UnsupportedChannelCount { channels: u8 },

    /// The resampling engine could not be initialized
    #[error("Resampling engine initialization failed: {reason}")]
    EngineInitFailed { reason: String },

    /// Input byte length violates a framing precondition
    #[error("Invalid input size: {details}")]
    InvalidInputSize { details: String },

    /// A conversion buffer could not be allocated
    #[error("Failed to allocate conversion buffer of {bytes} bytes")]
    AllocationFailed { bytes: usize },

    /// The resampling engine rejected or aborted a conversion step
    #[error("Conversion failed: {reason}")]
    ConversionFailed { reason: String },

    /// The output byte size could not be computed
    #[error("Output size computation failed: {details}")]
    OutputSizeComputationFailed { details: String },
}

impl ConvertError {
    /// Create a new unsupported format error
    pub fn unsupported_format(details: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            details: details.into(),
        }
    }

    /// Create a new engine initialization error
    pub fn engine_init_failed(reason: impl Into<String>) -> Self {
        Self::EngineInitFailed {
            reason: reason.into(),
        }
    }

    /// Create a new invalid input size error
    pub fn invalid_input_size(details: impl Into<String>) -> Self {
        Self::InvalidInputSize {
            details: details.into(),
        }
    }

    /// Create a new conversion failure error
    pub fn conversion_failed(reason: impl Into<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFormat { .. }
            | Self::UnsupportedChannelCount { .. }
            | Self::EngineInitFailed { .. } => ErrorCategory::Negotiation,

            Self::InvalidInputSize { .. }
            | Self::AllocationFailed { .. }
            | Self::ConversionFailed { .. }
            | Self::OutputSizeComputationFailed { .. } => ErrorCategory::Conversion,
        }
    }
}

/// Error category for grouping related errors
///
/// Negotiation errors are reported at session creation and mean no session
/// was produced. Conversion errors are reported as the result of a convert
/// or flush call; the session state afterwards is undefined and the session
/// should be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Format negotiation and engine setup errors
    Negotiation,
    /// Per-call conversion errors
    Conversion,
}
