//! Resonance field engine.
//!
//! Converts a scalar trauma intensity plus situational context into a
//! resonance field: oscillatory x/y coordinates, a z-axis intensity curve,
//! amplitude (strength), stability (coherence) and a weight per downstream
//! component. Phase-dependent ellipses, periodic waveforms and nonlinear
//! modulation are composed into one pure pipeline.
//!
//! Zero I/O. The only impurities are the clock and the noise source, both
//! injectable on [`ResonanceEngine`].

pub mod apply;
pub mod bench;
pub mod clock;
pub mod component;
pub mod compose;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod field;
pub mod modulation;
pub mod phase;
pub mod resonance_map;
pub mod waveform;

pub use apply::{RESONANCE_KEY, apply_resonance_to_component};
pub use bench::{BenchmarkStats, benchmark_with_rng};
pub use clock::{Clock, FrozenClock, SystemClock};
pub use component::{Component, UserActivity};
pub use compose::{ResonanceEngine, normalize_trauma};
pub use config::EngineConfig;
pub use context::{ModulatorFn, ResonanceContext};
pub use error::{ConfigError, Result};
pub use field::{FieldMeta, ResonanceField};
pub use phase::{CurveFn, EllipseParams, Phase, PhaseProfile, ZCurve, phase_profile};
pub use resonance_map::{ComponentMap, component_map};
pub use waveform::{NoiseSource, SeededNoise, ThreadNoise, WaveShape, Waveform};
