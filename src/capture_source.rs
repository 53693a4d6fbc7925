//! Capture source abstraction separating the measurement policy from the
//! audio backend.

use crate::error::MeterError;

/// A blocking source of interleaved signed 16-bit samples.
///
/// Implementations own the underlying device handle and release it when
/// dropped.
pub trait CaptureSource {
    /// Perform one blocking read filling `buf`, and return the number of
    /// frames actually delivered. A short count means the device gave up
    /// before the full block arrived.
    fn read(&mut self, buf: &mut [i16]) -> Result<usize, MeterError>;

    /// Attempt to bring the stream back to a readable state after a failed
    /// read.
    fn recover(&mut self) -> Result<(), MeterError>;
}
