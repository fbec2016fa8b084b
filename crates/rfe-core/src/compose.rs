//! Field composition: trauma + component + context → [`ResonanceField`].
//!
//! The pipeline is pure apart from two injected ports on the engine: the
//! [`Clock`] (field timestamp and the rolling-virus pulse) and the
//! [`NoiseSource`] (noise waveform jitter). Freeze both and identical inputs
//! yield bit-identical fields.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::component::Component;
use crate::config::EngineConfig;
use crate::constants::{NEUTRAL_TRAUMA, clamp_finite};
use crate::context::ResonanceContext;
use crate::error::Result;
use crate::field::{FieldMeta, ResonanceField};
use crate::modulation::{clamp_coherence, clamp_strength, default_coherence, default_strength};
use crate::phase::phase_profile;
use crate::resonance_map::component_map;
use crate::waveform::{NoiseSource, ThreadNoise, WaveShape};

/// Normalize raw trauma input into `[0, 1]`. Non-finite input becomes 0.5.
pub fn normalize_trauma(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        tracing::warn!("invalid trauma input {value}, substituting {NEUTRAL_TRAUMA}");
        NEUTRAL_TRAUMA
    }
}

/// Linear map from `[-1, 1]` into `[lo, hi]`.
fn remap(raw: f64, lo: f64, hi: f64) -> f64 {
    lo + (raw + 1.0) / 2.0 * (hi - lo)
}

fn clamp_to_range(value: f64, lo: f64, hi: f64) -> f64 {
    clamp_finite(value, lo.min(hi), lo.max(hi))
}

/// Resonance field engine.
///
/// Holds only immutable configuration and the two ports, so a single engine
/// can be shared across threads and called concurrently.
#[derive(Clone)]
pub struct ResonanceEngine {
    config: EngineConfig,
    shape: WaveShape,
    clock: Arc<dyn Clock>,
    noise: Arc<dyn NoiseSource>,
}

impl Default for ResonanceEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            shape: config.wave_shape(),
            config,
            clock: Arc::new(SystemClock),
            noise: Arc::new(ThreadNoise),
        }
    }
}

impl fmt::Debug for ResonanceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResonanceEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResonanceEngine {
    /// Build an engine on the system clock and thread RNG.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shape: config.wave_shape(),
            config,
            ..Self::default()
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_noise(mut self, noise: impl NoiseSource + 'static) -> Self {
        self.noise = Arc::new(noise);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a field for a component given by name. Unknown names route to
    /// [`Component::All`].
    ///
    /// Never fails. A caller-supplied override that panics propagates.
    pub fn create_resonance_field(
        &self,
        trauma: f64,
        target: &str,
        ctx: &ResonanceContext,
    ) -> ResonanceField {
        self.field_for(trauma, Component::parse_or_all(target), ctx)
    }

    /// Build a field for an already-validated component.
    pub fn field_for(
        &self,
        trauma: f64,
        component: Component,
        ctx: &ResonanceContext,
    ) -> ResonanceField {
        let t = normalize_trauma(trauma);
        let phase = ctx.phase.unwrap_or(self.config.default_phase);
        let waveform = ctx.waveform.unwrap_or(self.config.default_waveform);
        let profile = phase_profile(phase);
        let ellipse = ctx.elliptical_params.unwrap_or(profile.ellipse);
        let (lo, hi) = ctx.output_range();

        let (x, y) = match waveform.evaluator() {
            Some(wave) => {
                let angle = t * TAU + ctx.shift();
                let noise = self.noise.as_ref();
                let raw_x = wave(angle, &self.shape, noise);
                // Quarter-period offset decorrelates the axes.
                let raw_y = wave(angle + FRAC_PI_2, &self.shape, noise);
                (remap(raw_x, lo, hi), remap(raw_y, lo, hi))
            }
            None => ellipse.point(t),
        };
        let x = clamp_to_range(x, lo, hi);
        let y = clamp_to_range(y, lo, hi);

        let z_curve = ctx.custom_z_curve.as_ref().unwrap_or(&profile.z_curve);
        let z = z_curve.apply(t);

        let strength = match &ctx.strength_modulator {
            Some(f) => clamp_strength(f(t, component, ctx)),
            None => default_strength(t, component, phase, ctx, self.clock.as_ref()),
        };
        let coherence = match &ctx.coherence_drift {
            Some(f) => clamp_coherence(f(t, component, ctx)),
            None => default_coherence(t, component, phase, ctx),
        };

        ResonanceField {
            x,
            y,
            z,
            component,
            component_map: component_map(component, t, phase, ctx.user_activity),
            strength,
            coherence,
            meta: FieldMeta {
                trauma_input: trauma,
                trauma_level: t,
                waveform,
                phase,
                z_curve_descriptor: z_curve.descriptor(),
                phase_shift: ctx.shift(),
                elliptical_params: ellipse,
                timestamp: self.clock.now_ms(),
            },
        }
    }

    /// Sample `steps` fields evenly across `t ∈ [0, 1]`.
    pub fn sweep(
        &self,
        steps: usize,
        component: Component,
        ctx: &ResonanceContext,
    ) -> Vec<ResonanceField> {
        let denom = steps.saturating_sub(1).max(1) as f64;
        (0..steps)
            .map(|i| self.field_for(i as f64 / denom, component, ctx))
            .collect()
    }
}
