use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sound_meter_rs::{MeterConfig, SoundMeter};

/// Capture one block of microphone samples and print its loudness in dB.
#[derive(Parser, Debug)]
#[command(name = "sound-meter", version, about)]
struct Cli {
    /// Number of frames to capture (48000 = one second at the default rate)
    samples: usize,

    /// ALSA capture device name
    #[arg(long)]
    device: Option<String>,

    /// Capture sample rate in Hz
    #[arg(long)]
    rate: Option<u32>,

    /// Number of capture channels
    #[arg(long)]
    channels: Option<u32>,

    /// Requested device buffer time in milliseconds
    #[arg(long)]
    buffer_ms: Option<u32>,

    /// RMS-to-pressure calibration factor
    #[arg(long)]
    calibration: Option<f64>,

    /// TOML config file; command line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report silence instead of failing when the device read cannot be
    /// recovered
    #[arg(long)]
    best_effort: bool,

    /// Print the full measurement as JSON instead of a bare decibel value
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Result<(MeterConfig, usize, bool)> {
        let mut config = match &self.config {
            Some(path) => MeterConfig::load(path)?,
            None => MeterConfig::default(),
        };
        if let Some(device) = self.device {
            config.device = device;
        }
        if let Some(rate) = self.rate {
            config.sample_rate = rate;
        }
        if let Some(channels) = self.channels {
            config.channels = channels;
        }
        if let Some(ms) = self.buffer_ms {
            config.buffer_time_us = ms.saturating_mul(1000);
        }
        if let Some(calibration) = self.calibration {
            config.calibration = calibration;
        }
        if self.best_effort {
            config.best_effort = true;
        }
        Ok((config, self.samples, self.json))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let (config, samples, json) = Cli::parse().into_config()?;
    let meter = SoundMeter::new(config);
    let measurement = meter.measure(samples)?;

    if json {
        println!("{}", serde_json::to_string(&measurement)?);
    } else {
        println!("{}", measurement.db);
    }
    Ok(())
}
