//! One-shot measurement policy: open, read one block, reduce, report.

use serde::Serialize;

use crate::alsa_device;
use crate::capture_source::CaptureSource;
use crate::config::MeterConfig;
use crate::error::MeterError;
use crate::level;

/// Result of one loudness measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Calibrated loudness estimate in whole decibels, never negative
    pub db: i32,
    /// RMS amplitude of the samples the estimate was computed from
    pub rms: f64,
    /// Frames the caller asked for
    pub frames_requested: usize,
    /// Frames the device actually delivered
    pub frames_read: usize,
}

/// A reusable recipe for one-shot loudness measurements.
///
/// Each call to [`measure`](SoundMeter::measure) opens the configured
/// device for a single block read and closes it again before the
/// [`Measurement`] is returned. No state is shared between calls, so one
/// meter can serve any number of threads at once.
pub struct SoundMeter {
    config: MeterConfig,
}

impl SoundMeter {
    pub fn new(config: MeterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    /// Measure the loudness of the next `sample_count` frames from the
    /// configured capture device.
    pub fn measure(&self, sample_count: usize) -> Result<Measurement, MeterError> {
        if sample_count == 0 {
            return Err(MeterError::InvalidSampleCount);
        }
        let mut source = alsa_device::open_capture(&self.config)?;
        self.measure_from(&mut source, sample_count)
    }

    /// Measure the loudness of the next `sample_count` frames from an
    /// already open capture source.
    pub fn measure_from(
        &self,
        source: &mut dyn CaptureSource,
        sample_count: usize,
    ) -> Result<Measurement, MeterError> {
        if sample_count == 0 {
            return Err(MeterError::InvalidSampleCount);
        }

        let channels = self.config.channels as usize;
        let slots = sample_count
            .checked_mul(channels)
            .ok_or(MeterError::Allocation {
                frames: sample_count,
            })?;
        let mut buf = alloc_samples(slots, sample_count)?;

        let frames_read = self.read_block(source, &mut buf, sample_count)?;

        // In best-effort mode the undelivered tail stays silent and still
        // counts; otherwise only the delivered prefix enters the average.
        let valid = if self.config.best_effort {
            buf.len()
        } else {
            frames_read.saturating_mul(channels).min(buf.len())
        };
        let rms = level::rms(&buf[..valid]);
        let db = level::decibels(rms, self.config.calibration);

        Ok(Measurement {
            db,
            rms,
            frames_requested: sample_count,
            frames_read,
        })
    }

    /// One blocking read with a single recovery attempt. At most one
    /// recovery and one retried read happen per measurement.
    fn read_block(
        &self,
        source: &mut dyn CaptureSource,
        buf: &mut [i16],
        frames_requested: usize,
    ) -> Result<usize, MeterError> {
        let frames = match source.read(buf) {
            Ok(frames) => frames,
            Err(_) => {
                log::warn!("capture read failed, attempting one recovery");
                let retried = match source.recover() {
                    Ok(()) => source.read(buf),
                    Err(e) => Err(e),
                };
                match retried {
                    Ok(frames) => frames,
                    Err(e) => {
                        if self.config.best_effort {
                            log::warn!("capture recovery failed ({}), reporting silence", e);
                            0
                        } else {
                            return Err(e);
                        }
                    }
                }
            }
        };

        if frames < frames_requested {
            log::warn!(
                "short read from capture device: expected {} frames, read {}",
                frames_requested,
                frames
            );
        }
        Ok(frames)
    }
}

fn alloc_samples(slots: usize, frames: usize) -> Result<Vec<i16>, MeterError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(slots)
        .map_err(|_| MeterError::Allocation { frames })?;
    buf.resize(slots, 0);
    Ok(buf)
}
