//! ALSA PCM capture backend.

use alsa::pcm::{Access, Format, HwParams, PCM};
use alsa::{Direction, ValueOr};

use crate::capture_source::CaptureSource;
use crate::config::MeterConfig;
use crate::error::MeterError;

/// Parameters negotiated with the ALSA hardware.
#[derive(Debug, Clone)]
pub struct AlsaParams {
    /// Actual sample rate after negotiation
    pub sample_rate: u32,
    /// Actual number of channels
    pub channels: u32,
    /// Period size in frames
    pub period_size: usize,
    /// Device buffer size in frames
    pub buffer_size: usize,
}

/// An open, started ALSA capture stream. The device handle is closed when
/// this is dropped.
pub struct AlsaCapture {
    pcm: PCM,
    params: AlsaParams,
}

impl AlsaCapture {
    /// Parameters the hardware actually granted.
    pub fn params(&self) -> &AlsaParams {
        &self.params
    }
}

/// Open the configured PCM device for capture and start the stream.
pub fn open_capture(config: &MeterConfig) -> Result<AlsaCapture, MeterError> {
    let pcm =
        PCM::new(&config.device, Direction::Capture, false).map_err(|source| {
            MeterError::DeviceOpen {
                device: config.device.clone(),
                source,
            }
        })?;

    let params = configure(&pcm, config).map_err(|source| MeterError::DeviceConfig {
        device: config.device.clone(),
        source,
    })?;

    log::info!(
        "ALSA capture: device={}, rate={}, channels={}, period_size={}, buffer_size={}",
        config.device,
        params.sample_rate,
        params.channels,
        params.period_size,
        params.buffer_size,
    );

    Ok(AlsaCapture { pcm, params })
}

fn configure(pcm: &PCM, config: &MeterConfig) -> Result<AlsaParams, alsa::Error> {
    // Configure hardware parameters
    {
        let hwp = HwParams::any(pcm)?;
        hwp.set_access(Access::RWInterleaved)?;
        hwp.set_format(Format::S16LE)?;
        hwp.set_channels(config.channels)?;
        hwp.set_rate_near(config.sample_rate, ValueOr::Nearest)?;
        hwp.set_buffer_time_near(config.buffer_time_us, ValueOr::Nearest)?;
        pcm.hw_params(&hwp)?;
    }

    // Read back actual negotiated parameters
    let params = {
        let hwp = pcm.hw_params_current()?;
        AlsaParams {
            sample_rate: hwp.get_rate()?,
            channels: hwp.get_channels()?,
            period_size: hwp.get_period_size()? as usize,
            buffer_size: hwp.get_buffer_size()? as usize,
        }
    };

    pcm.start()?;
    Ok(params)
}

impl CaptureSource for AlsaCapture {
    fn read(&mut self, buf: &mut [i16]) -> Result<usize, MeterError> {
        let io = self.pcm.io_i16().map_err(MeterError::Read)?;
        match io.readi(buf) {
            Ok(frames) => Ok(frames),
            Err(e) => {
                log::warn!("ALSA capture error: {}", e);
                Err(MeterError::Read(e))
            }
        }
    }

    fn recover(&mut self) -> Result<(), MeterError> {
        self.pcm.prepare().map_err(MeterError::Read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_nonexistent_device_reports_device_open() {
        let config = MeterConfig {
            device: "this_device_does_not_exist".to_string(),
            ..MeterConfig::default()
        };
        match open_capture(&config) {
            Ok(_) => panic!("opening a bogus device should fail"),
            Err(MeterError::DeviceOpen { device, .. }) => {
                assert_eq!(device, "this_device_does_not_exist");
            }
            Err(other) => panic!("expected DeviceOpen, got {:?}", other),
        }
    }
}
