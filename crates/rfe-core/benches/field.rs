use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rfe_core::{
    Component, FrozenClock, Phase, ResonanceContext, ResonanceEngine, SeededNoise, UserActivity,
    Waveform, apply_resonance_to_component,
};
use serde_json::json;

fn engine() -> ResonanceEngine {
    ResonanceEngine::default()
        .with_clock(FrozenClock::at(0.0))
        .with_noise(SeededNoise::new(42))
}

fn bench_waveforms(c: &mut Criterion) {
    let engine = engine();
    let mut group = c.benchmark_group("field_for");
    for waveform in Waveform::ALL {
        let ctx = ResonanceContext::new()
            .with_phase(Phase::RollingVirus)
            .with_waveform(waveform)
            .with_activity(UserActivity::Checkout);
        group.bench_with_input(BenchmarkId::from_parameter(waveform), &ctx, |b, ctx| {
            b.iter(|| engine.field_for(black_box(0.73), Component::CommerceIntegration, ctx))
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let engine = engine();
    let field = engine.field_for(0.6, Component::SecurityTrauma, &ResonanceContext::new());
    let data = json!({
        "securityState": { "threatPerception": 0.1, "alertLevel": 0.2, "falsePositiveRate": 0.05 },
        "history": (0..64).collect::<Vec<_>>(),
    });
    c.bench_function("apply_security_trauma", |b| {
        b.iter(|| apply_resonance_to_component(black_box(&field), black_box(&data)))
    });
}

fn bench_harness(c: &mut Criterion) {
    let engine = engine();
    c.bench_function("benchmark_resonance_vectors_100", |b| {
        b.iter(|| engine.benchmark_resonance_vectors(black_box(100)))
    });
}

criterion_group!(benches, bench_waveforms, bench_apply, bench_harness);
criterion_main!(benches);
