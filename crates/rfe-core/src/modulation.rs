//! Default strength and coherence calculators.
//!
//! Used only when the context carries no override. The rolling-virus phase
//! pulses strength on a 2-second period, read from the injected [`Clock`];
//! everything else is a pure function of its arguments.

use std::f64::consts::TAU;

use crate::clock::Clock;
use crate::component::{Component, UserActivity};
use crate::constants::{
    COHERENCE_MAX, COHERENCE_MIN, PULSE_DEPTH, PULSE_PERIOD_MS, STRENGTH_MAX, STRENGTH_MIN,
    TRANSITION_WINDOW_MS, clamp_finite,
};
use crate::context::ResonanceContext;
use crate::phase::Phase;

pub fn clamp_strength(value: f64) -> f64 {
    clamp_finite(value, STRENGTH_MIN, STRENGTH_MAX)
}

pub fn clamp_coherence(value: f64) -> f64 {
    clamp_finite(value, COHERENCE_MIN, COHERENCE_MAX)
}

/// Rolling-virus pulse multiplier at `now_ms`: `1 + 0.15 sin(2π now / 2000)`.
pub fn rolling_pulse(now_ms: f64) -> f64 {
    1.0 + PULSE_DEPTH * (TAU * now_ms / PULSE_PERIOD_MS).sin()
}

/// Amplitude of the field, clamped to `[0.1, 2.0]`.
pub fn default_strength(
    t: f64,
    component: Component,
    phase: Phase,
    ctx: &ResonanceContext,
    clock: &dyn Clock,
) -> f64 {
    let stability = ctx.stability();
    let mut strength = 1.0;

    strength *= match phase {
        Phase::TraumaCore => 1.2,
        Phase::CyberLotus => 0.9,
        Phase::RollingVirus => 1.1 * stability.max(0.8) * rolling_pulse(clock.now_ms()),
        _ => 1.0,
    };

    match component {
        Component::SecurityTrauma => strength *= 1.1,
        Component::CommerceIntegration => match ctx.user_activity {
            UserActivity::Browsing => strength *= 0.8,
            UserActivity::Checkout => strength *= 1.2,
            _ => {}
        },
        Component::MemoryVessel => {
            // Freshly transitioned memories resonate harder, decaying to 1.0.
            if let Some(elapsed) = ctx.transition_within(TRANSITION_WINDOW_MS) {
                strength *= 1.3 - 0.3 * (elapsed / TRANSITION_WINDOW_MS);
            }
        }
        _ => {}
    }

    strength *= 0.8 + t.powf(1.5) * 0.4;
    strength *= stability.sqrt();

    clamp_strength(strength)
}

/// Stability of the field, clamped to `[0.8, 1.0]`.
pub fn default_coherence(
    t: f64,
    component: Component,
    phase: Phase,
    ctx: &ResonanceContext,
) -> f64 {
    let mut coherence = 1.0;

    if let Some(elapsed) = ctx.transition_within(TRANSITION_WINDOW_MS) {
        coherence *= 0.9 + 0.1 * (elapsed / TRANSITION_WINDOW_MS);
    }

    coherence *= ctx.stability();

    match phase {
        Phase::RollingVirus => coherence *= 0.95 - t * 0.1,
        Phase::Transcendent => coherence = 1.0,
        _ => {}
    }

    if component == Component::MemoryVessel {
        coherence = (coherence * 1.1).min(1.0);
    }

    clamp_coherence(coherence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrozenClock;
    use approx::assert_abs_diff_eq;

    // sin(2π · 0 / 2000) = 0, so the pulse is exactly 1.0.
    const QUIET: FrozenClock = FrozenClock { ms: 0.0 };

    fn ctx() -> ResonanceContext {
        ResonanceContext::new()
    }

    fn quiet(t: f64, component: Component, phase: Phase, ctx: &ResonanceContext) -> f64 {
        default_strength(t, component, phase, ctx, &QUIET)
    }

    #[test]
    fn test_pulse_extremes() {
        assert_abs_diff_eq!(rolling_pulse(0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rolling_pulse(500.0), 1.15, epsilon = 1e-12);
        assert_abs_diff_eq!(rolling_pulse(1500.0), 0.85, epsilon = 1e-12);
        assert_abs_diff_eq!(rolling_pulse(2500.0), 1.15, epsilon = 1e-9);
    }

    #[test]
    fn test_neutral_strength_at_zero_trauma() {
        let s = quiet(0.0, Component::All, Phase::Neutral, &ctx());
        assert_abs_diff_eq!(s, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_trauma_core_security_full_trauma() {
        let s = default_strength(
            1.0,
            Component::SecurityTrauma,
            Phase::TraumaCore,
            &ctx(),
            &QUIET,
        );
        assert_abs_diff_eq!(s, 1.2 * 1.1 * 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_commerce_activity_multipliers() {
        let browsing = ctx().with_activity(UserActivity::Browsing);
        let checkout = ctx().with_activity(UserActivity::Checkout);
        let b = quiet(0.0, Component::CommerceIntegration, Phase::Neutral, &browsing);
        let c = quiet(0.0, Component::CommerceIntegration, Phase::Neutral, &checkout);
        assert_abs_diff_eq!(b, 0.8 * 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 1.2 * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_memory_vessel_transition_boost_decays() {
        let fresh = ctx().with_transition_elapsed(0.0);
        let half = ctx().with_transition_elapsed(2500.0);
        let stale = ctx().with_transition_elapsed(6000.0);
        let f = quiet(0.0, Component::MemoryVessel, Phase::Neutral, &fresh);
        let h = quiet(0.0, Component::MemoryVessel, Phase::Neutral, &half);
        let s = quiet(0.0, Component::MemoryVessel, Phase::Neutral, &stale);
        assert_abs_diff_eq!(f, 1.3 * 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(h, 1.15 * 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(s, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_rolling_virus_follows_clock() {
        let peak = FrozenClock::at(500.0);
        let trough = FrozenClock::at(1500.0);
        let hi = default_strength(1.0, Component::All, Phase::RollingVirus, &ctx(), &peak);
        let lo = default_strength(1.0, Component::All, Phase::RollingVirus, &ctx(), &trough);
        assert_abs_diff_eq!(hi, 1.1 * 1.15 * 1.2, epsilon = 1e-9);
        assert_abs_diff_eq!(lo, 1.1 * 0.85 * 1.2, epsilon = 1e-9);
    }

    #[test]
    fn test_rolling_virus_stability_floor() {
        // max(0.8, 0.25) = 0.8, then damped by sqrt(0.25) = 0.5
        let shaky = ctx().with_stability(0.25);
        let s = quiet(1.0, Component::All, Phase::RollingVirus, &shaky);
        assert_abs_diff_eq!(s, 1.1 * 0.8 * 1.2 * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_strength_floor() {
        let dead = ctx().with_stability(0.0);
        let s = quiet(0.5, Component::All, Phase::TraumaCore, &dead);
        assert_eq!(s, STRENGTH_MIN);
    }

    #[test]
    fn test_coherence_defaults_to_one() {
        let c = default_coherence(0.5, Component::All, Phase::CyberLotus, &ctx());
        assert_eq!(c, 1.0);
    }

    #[test]
    fn test_coherence_transition_dip() {
        let fresh = ctx().with_transition_elapsed(0.0);
        let c = default_coherence(0.5, Component::All, Phase::CyberLotus, &fresh);
        assert_abs_diff_eq!(c, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_coherence_rolling_virus_decay() {
        let c = default_coherence(0.5, Component::All, Phase::RollingVirus, &ctx());
        assert_abs_diff_eq!(c, 0.9, epsilon = 1e-12);
        let c = default_coherence(1.0, Component::All, Phase::RollingVirus, &ctx());
        assert_abs_diff_eq!(c, 0.85, epsilon = 1e-12);
    }

    #[test]
    fn test_transcendent_forces_full_coherence() {
        let shaky = ctx().with_stability(0.1).with_transition_elapsed(0.0);
        let c = default_coherence(0.9, Component::All, Phase::Transcendent, &shaky);
        assert_eq!(c, 1.0);
    }

    #[test]
    fn test_memory_vessel_coherence_lift() {
        let mid = ctx().with_stability(0.85);
        let c = default_coherence(0.0, Component::MemoryVessel, Phase::Neutral, &mid);
        assert_abs_diff_eq!(c, 0.935, epsilon = 1e-12);
        let c = default_coherence(0.0, Component::MemoryVessel, Phase::Neutral, &ctx());
        assert_eq!(c, 1.0);
    }

    #[test]
    fn test_coherence_floor() {
        let shaky = ctx().with_stability(0.2);
        let c = default_coherence(0.5, Component::All, Phase::AlienFlora, &shaky);
        assert_eq!(c, COHERENCE_MIN);
    }
}
