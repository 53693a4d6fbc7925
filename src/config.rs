//! Measurement configuration, loadable from a TOML file.
//!
//! Every field has a default tuned for a plain consumer microphone on the
//! ALSA "default" device, so an empty file (or no file at all) yields a
//! working configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::DEFAULT_CALIBRATION;

/// Capture and conversion settings for one measurement.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeterConfig {
    /// ALSA capture device name (e.g. "default", "plughw:0,0")
    #[serde(default = "default_device")]
    pub device: String,
    /// Requested sample rate in Hz; the driver may negotiate a nearby value
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Number of interleaved capture channels
    #[serde(default = "default_channels")]
    pub channels: u32,
    /// Requested device buffer time in microseconds
    #[serde(default = "default_buffer_time_us")]
    pub buffer_time_us: u32,
    /// Scale factor from raw RMS amplitude to the pressure value used for
    /// the decibel conversion
    #[serde(default = "default_calibration")]
    pub calibration: f64,
    /// Report silence instead of failing when a device read cannot be
    /// recovered
    #[serde(default)]
    pub best_effort: bool,
}

fn default_device() -> String {
    "default".to_string()
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_channels() -> u32 {
    1
}

fn default_buffer_time_us() -> u32 {
    500_000
}

fn default_calibration() -> f64 {
    DEFAULT_CALIBRATION
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            buffer_time_us: default_buffer_time_us(),
            calibration: default_calibration(),
            best_effort: false,
        }
    }
}

impl MeterConfig {
    /// Load a configuration from a TOML file. Missing keys fall back to
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }
}
