use serde::Serialize;

use crate::component::Component;
use crate::phase::{EllipseParams, Phase};
use crate::resonance_map::ComponentMap;
use crate::waveform::Waveform;

/// One computed resonance field. Built fresh per call and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResonanceField {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub component: Component,
    pub component_map: ComponentMap,
    pub strength: f64,
    pub coherence: f64,
    pub meta: FieldMeta,
}

/// Resolved inputs, recorded for debugging. Not read by downstream logic.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    /// Raw caller input; serializes as `null` when non-finite.
    pub trauma_input: f64,
    /// Input after normalization into `[0, 1]`.
    pub trauma_level: f64,
    pub waveform: Waveform,
    pub phase: Phase,
    pub z_curve_descriptor: String,
    pub phase_shift: f64,
    pub elliptical_params: EllipseParams,
    /// Unix ms from the engine clock.
    pub timestamp: f64,
}

impl ResonanceField {
    pub fn vector(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Weight assigned to `component`, 0.0 if absent.
    pub fn weight(&self, component: Component) -> f64 {
        self.component_map.get(&component).copied().unwrap_or(0.0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
