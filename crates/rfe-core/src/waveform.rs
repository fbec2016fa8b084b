//! Periodic angle → `[-1, 1]` functions that drive the oscillatory x/y axes.
//!
//! Everything here is pure except [`noise`], which draws its jitter from an
//! injected [`NoiseSource`]. Production uses [`ThreadNoise`]; tests seed a
//! [`SeededNoise`] and assert bounds rather than exact values.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NOISE_FACTOR, DEFAULT_PULSE_WIDTH};

/// Waveform family used for the x/y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
    Pulse,
    Noise,
    /// Not an angle function: the composer traces the phase ellipse instead.
    Elliptical,
}

impl Waveform {
    pub const ALL: [Waveform; 7] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::Pulse,
        Waveform::Noise,
        Waveform::Elliptical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Pulse => "pulse",
            Waveform::Noise => "noise",
            Waveform::Elliptical => "elliptical",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.name() == name)
    }

    /// Angle evaluator for this waveform, or `None` for [`Waveform::Elliptical`].
    pub fn evaluator(self) -> Option<WaveFn> {
        let f: WaveFn = match self {
            Waveform::Sine => eval_sine,
            Waveform::Triangle => eval_triangle,
            Waveform::Sawtooth => eval_sawtooth,
            Waveform::Square => eval_square,
            Waveform::Pulse => eval_pulse,
            Waveform::Noise => eval_noise,
            Waveform::Elliptical => return None,
        };
        Some(f)
    }
}

fn eval_sine(a: f64, _: &WaveShape, _: &dyn NoiseSource) -> f64 {
    sine(a)
}

fn eval_triangle(a: f64, _: &WaveShape, _: &dyn NoiseSource) -> f64 {
    triangle(a)
}

fn eval_sawtooth(a: f64, _: &WaveShape, _: &dyn NoiseSource) -> f64 {
    sawtooth(a)
}

fn eval_square(a: f64, _: &WaveShape, _: &dyn NoiseSource) -> f64 {
    square(a)
}

fn eval_pulse(a: f64, shape: &WaveShape, _: &dyn NoiseSource) -> f64 {
    pulse(a, shape.pulse_width)
}

fn eval_noise(a: f64, shape: &WaveShape, source: &dyn NoiseSource) -> f64 {
    noise(a, shape.noise_factor, source)
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown waveform '{s}'"))
    }
}

/// Signature shared by every angle evaluator.
pub type WaveFn = fn(f64, &WaveShape, &dyn NoiseSource) -> f64;

/// Shape parameters for the waveforms that take one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveShape {
    pub pulse_width: f64,
    pub noise_factor: f64,
}

impl Default for WaveShape {
    fn default() -> Self {
        Self {
            pulse_width: DEFAULT_PULSE_WIDTH,
            noise_factor: DEFAULT_NOISE_FACTOR,
        }
    }
}

/// Uniform jitter source for the noise waveform.
pub trait NoiseSource: Send + Sync {
    /// Sample uniformly from `[-amplitude, amplitude]`. Non-finite or
    /// non-positive amplitudes yield 0.
    fn jitter(&self, amplitude: f64) -> f64;
}

/// Thread-local system RNG. Lock-free across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadNoise;

impl NoiseSource for ThreadNoise {
    fn jitter(&self, amplitude: f64) -> f64 {
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return 0.0;
        }
        rand::rng().random_range(-amplitude..=amplitude)
    }
}

/// Reproducible jitter from a seeded `SmallRng`.
#[derive(Debug)]
pub struct SeededNoise {
    rng: Mutex<SmallRng>,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn jitter(&self, amplitude: f64) -> f64 {
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return 0.0;
        }
        // A poisoned lock only means another caller panicked mid-sample;
        // the RNG state itself is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(-amplitude..=amplitude)
    }
}

pub fn sine(angle: f64) -> f64 {
    angle.sin()
}

/// Piecewise-linear ramp: 0 at 0, +1 at π/2, -1 at 3π/2.
pub fn triangle(angle: f64) -> f64 {
    let p = angle.rem_euclid(TAU);
    if p < FRAC_PI_2 {
        p / FRAC_PI_2
    } else if p < 3.0 * FRAC_PI_2 {
        1.0 - (p - FRAC_PI_2) / FRAC_PI_2
    } else {
        -1.0 + (p - 3.0 * FRAC_PI_2) / FRAC_PI_2
    }
}

pub fn sawtooth(angle: f64) -> f64 {
    angle.rem_euclid(TAU) / PI - 1.0
}

/// Sign of the sine carrier; exactly 0 at its zero crossings.
pub fn square(angle: f64) -> f64 {
    let s = angle.sin();
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn pulse(angle: f64, width: f64) -> f64 {
    if angle.rem_euclid(TAU) < TAU * width {
        1.0
    } else {
        -1.0
    }
}

pub fn noise(angle: f64, factor: f64, source: &dyn NoiseSource) -> f64 {
    (angle.sin() + source.jitter(factor)).clamp(-1.0, 1.0)
}
