//! Per-call situational context.
//!
//! Every field is optional. The data-only part deserializes from camelCase
//! JSON as published by the state bus; the function-valued overrides are code
//! and can only be attached through the builder methods.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::component::{Component, UserActivity};
use crate::phase::{EllipseParams, Phase, ZCurve};
use crate::waveform::Waveform;

/// Override for the strength or coherence calculation:
/// `(t, component, context) -> value`. Output is clamped by the engine.
pub type ModulatorFn = dyn Fn(f64, Component, &ResonanceContext) -> f64 + Send + Sync;

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResonanceContext {
    pub phase: Option<Phase>,
    pub user_activity: UserActivity,
    pub time_since_phase_transition_ms: Option<f64>,
    pub system_stability: Option<f64>,
    pub waveform: Option<Waveform>,
    /// Takes priority over the phase table's curve.
    pub custom_z_curve: Option<ZCurve>,
    pub phase_shift: f64,
    /// Output range for oscillatory x/y, `[min, max]`.
    pub range: Option<[f64; 2]>,
    /// Overrides the phase table's ellipse for the elliptical waveform.
    pub elliptical_params: Option<EllipseParams>,
    #[serde(skip)]
    pub strength_modulator: Option<Arc<ModulatorFn>>,
    #[serde(skip)]
    pub coherence_drift: Option<Arc<ModulatorFn>>,
}

impl ResonanceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_activity(mut self, activity: UserActivity) -> Self {
        self.user_activity = activity;
        self
    }

    pub fn with_transition_elapsed(mut self, ms: f64) -> Self {
        self.time_since_phase_transition_ms = Some(ms);
        self
    }

    pub fn with_stability(mut self, stability: f64) -> Self {
        self.system_stability = Some(stability);
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = Some(waveform);
        self
    }

    pub fn with_z_curve(mut self, curve: ZCurve) -> Self {
        self.custom_z_curve = Some(curve);
        self
    }

    pub fn with_phase_shift(mut self, shift: f64) -> Self {
        self.phase_shift = shift;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some([min, max]);
        self
    }

    pub fn with_ellipse(mut self, ellipse: EllipseParams) -> Self {
        self.elliptical_params = Some(ellipse);
        self
    }

    pub fn with_strength_modulator(
        mut self,
        f: impl Fn(f64, Component, &ResonanceContext) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.strength_modulator = Some(Arc::new(f));
        self
    }

    pub fn with_coherence_drift(
        mut self,
        f: impl Fn(f64, Component, &ResonanceContext) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.coherence_drift = Some(Arc::new(f));
        self
    }

    /// System stability clamped to `[0, 1]`; 1.0 when unreported.
    pub fn stability(&self) -> f64 {
        match self.system_stability {
            Some(s) if s.is_finite() => s.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    /// Phase shift in radians; 0 when non-finite.
    pub fn shift(&self) -> f64 {
        if self.phase_shift.is_finite() {
            self.phase_shift
        } else {
            0.0
        }
    }

    /// Elapsed ms since the last phase transition, if one is still inside
    /// `window_ms`.
    pub fn transition_within(&self, window_ms: f64) -> Option<f64> {
        self.time_since_phase_transition_ms
            .filter(|ms| ms.is_finite() && *ms < window_ms)
            .map(|ms| ms.max(0.0))
    }

    /// Output range as `(lo, hi)`; `(0, 1)` when unset or non-finite.
    pub fn output_range(&self) -> (f64, f64) {
        match self.range {
            Some([a, b]) if a.is_finite() && b.is_finite() => (a, b),
            _ => (0.0, 1.0),
        }
    }
}

impl fmt::Debug for ResonanceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResonanceContext")
            .field("phase", &self.phase)
            .field("user_activity", &self.user_activity)
            .field(
                "time_since_phase_transition_ms",
                &self.time_since_phase_transition_ms,
            )
            .field("system_stability", &self.system_stability)
            .field("waveform", &self.waveform)
            .field("custom_z_curve", &self.custom_z_curve)
            .field("phase_shift", &self.phase_shift)
            .field("range", &self.range)
            .field("elliptical_params", &self.elliptical_params)
            .field("strength_modulator", &self.strength_modulator.is_some())
            .field("coherence_drift", &self.coherence_drift.is_some())
            .finish()
    }
}
