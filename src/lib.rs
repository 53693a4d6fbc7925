//! sound_meter - one-shot microphone loudness measurement over ALSA.
//!
//! Reads a single block of signed 16-bit samples from a capture device and
//! reduces it to a calibrated integer decibel estimate. A measurement opens
//! the device for exactly one blocking read and closes it before returning,
//! so independent measurements can run from separate threads without
//! sharing any state.

mod alsa_device;
pub mod capture_source;
mod config;
mod error;
pub mod level;
mod meter;

pub use alsa_device::{open_capture, AlsaCapture, AlsaParams};
pub use capture_source::CaptureSource;
pub use config::MeterConfig;
pub use error::MeterError;
pub use level::{decibels, rms, DEFAULT_CALIBRATION};
pub use meter::{Measurement, SoundMeter};
