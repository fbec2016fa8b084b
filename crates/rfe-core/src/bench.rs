//! Throughput benchmark over random inputs.
//!
//! Diagnostic only: times every field construction and reports the
//! aggregate so regressions show up as a change in `vectors_per_second`.

use std::f64::consts::TAU;
use std::time::Instant;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::compose::ResonanceEngine;
use crate::component::{Component, UserActivity};
use crate::context::ResonanceContext;
use crate::phase::Phase;
use crate::waveform::Waveform;

const ACTIVITIES: [UserActivity; 3] = [
    UserActivity::Idle,
    UserActivity::Browsing,
    UserActivity::Checkout,
];

/// Timings are in milliseconds.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkStats {
    pub total_time: f64,
    pub average_vector_time: f64,
    pub vectors_per_second: f64,
    pub total_vectors: usize,
    pub max_vector_time: f64,
    pub min_vector_time: f64,
}

fn random_context(rng: &mut impl Rng) -> ResonanceContext {
    let mut ctx = ResonanceContext::new()
        .with_stability(rng.random_range(0.5..=1.0))
        .with_transition_elapsed(rng.random_range(0.0..10_000.0))
        .with_phase_shift(rng.random_range(0.0..TAU));
    ctx.phase = Phase::ALL.choose(rng).copied();
    ctx.waveform = Waveform::ALL.choose(rng).copied();
    ctx.user_activity = ACTIVITIES.choose(rng).copied().unwrap_or_default();
    ctx
}

fn random_component(rng: &mut impl Rng) -> Component {
    Component::ALL.choose(rng).copied().unwrap_or(Component::All)
}

/// Build `iterations` fields from random inputs drawn from `rng`.
pub fn benchmark_with_rng(
    engine: &ResonanceEngine,
    iterations: usize,
    rng: &mut impl Rng,
) -> BenchmarkStats {
    let mut max_ms = 0.0f64;
    let mut min_ms = f64::INFINITY;
    let mut sum_ms = 0.0;
    let mut sink = 0.0;

    let start = Instant::now();
    for _ in 0..iterations {
        let trauma = rng.random::<f64>();
        let component = random_component(rng);
        let ctx = random_context(rng);

        let t0 = Instant::now();
        let field = engine.field_for(trauma, component, &ctx);
        let elapsed = t0.elapsed().as_secs_f64() * 1000.0;

        sink += field.z;
        sum_ms += elapsed;
        max_ms = max_ms.max(elapsed);
        min_ms = min_ms.min(elapsed);
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    std::hint::black_box(sink);

    if iterations == 0 {
        return BenchmarkStats::default();
    }

    let stats = BenchmarkStats {
        total_time: total_ms,
        average_vector_time: sum_ms / iterations as f64,
        // Guard against a coarse clock reporting zero for a tiny run.
        vectors_per_second: iterations as f64 / (total_ms / 1000.0).max(f64::MIN_POSITIVE),
        total_vectors: iterations,
        max_vector_time: max_ms,
        min_vector_time: min_ms,
    };
    tracing::debug!(
        "benchmarked {} vectors in {:.3}ms ({:.0}/s)",
        stats.total_vectors,
        stats.total_time,
        stats.vectors_per_second
    );
    stats
}

impl ResonanceEngine {
    /// Benchmark field construction using the thread RNG for inputs.
    pub fn benchmark_resonance_vectors(&self, iterations: usize) -> BenchmarkStats {
        benchmark_with_rng(self, iterations, &mut rand::rng())
    }
}
