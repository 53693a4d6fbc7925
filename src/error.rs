//! Error types for the measurement pipeline.

use thiserror::Error;

/// Errors a measurement can return.
///
/// Every variant leaves the process in a clean state: whatever was opened
/// or allocated before the failure has already been released when the
/// error reaches the caller.
#[derive(Debug, Error)]
pub enum MeterError {
    #[error("sample count must be a positive number of frames")]
    InvalidSampleCount,

    #[error("failed to allocate a capture buffer for {frames} frames")]
    Allocation { frames: usize },

    #[error("failed to open capture device '{device}'")]
    DeviceOpen {
        device: String,
        #[source]
        source: alsa::Error,
    },

    #[error("failed to configure capture device '{device}'")]
    DeviceConfig {
        device: String,
        #[source]
        source: alsa::Error,
    },

    #[error("capture device read failed")]
    Read(#[source] alsa::Error),
}
