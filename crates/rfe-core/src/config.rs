use serde::Deserialize;

use crate::constants::{DEFAULT_NOISE_FACTOR, DEFAULT_PULSE_WIDTH};
use crate::error::{ConfigError, Result};
use crate::phase::Phase;
use crate::waveform::{WaveShape, Waveform};

/// Immutable engine configuration, fixed at construction.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Phase used when the context carries none.
    pub default_phase: Phase,
    /// Waveform used when the context carries none.
    pub default_waveform: Waveform,
    pub pulse_width: f64,
    pub noise_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_phase: Phase::CyberLotus,
            default_waveform: Waveform::Sine,
            pulse_width: DEFAULT_PULSE_WIDTH,
            noise_factor: DEFAULT_NOISE_FACTOR,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.pulse_width > 0.0 && self.pulse_width < 1.0) {
            return Err(ConfigError::PulseWidth(self.pulse_width));
        }
        if !(0.0..=1.0).contains(&self.noise_factor) {
            return Err(ConfigError::NoiseFactor(self.noise_factor));
        }
        Ok(())
    }

    pub fn wave_shape(&self) -> WaveShape {
        WaveShape {
            pulse_width: self.pulse_width,
            noise_factor: self.noise_factor,
        }
    }
}
