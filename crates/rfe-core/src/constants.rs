/// Neutral trauma value substituted for non-finite input.
pub const NEUTRAL_TRAUMA: f64 = 0.5;

/// Default pulse duty cycle (fraction of the period spent high).
pub const DEFAULT_PULSE_WIDTH: f64 = 0.3;

/// Default noise jitter amplitude added to the sine carrier.
pub const DEFAULT_NOISE_FACTOR: f64 = 0.2;

/// Ellipse center shared by every phase profile.
pub const ELLIPSE_CENTER: [f64; 2] = [0.5, 0.5];

/// Window after a phase transition during which strength and coherence
/// are still settling (ms).
pub const TRANSITION_WINDOW_MS: f64 = 5000.0;

/// Period of the rolling-virus strength pulse (ms).
pub const PULSE_PERIOD_MS: f64 = 2000.0;

/// Amplitude of the rolling-virus strength pulse.
pub const PULSE_DEPTH: f64 = 0.15;

/// Strength clamp bounds.
pub const STRENGTH_MIN: f64 = 0.1;
pub const STRENGTH_MAX: f64 = 2.0;

/// Coherence clamp bounds.
pub const COHERENCE_MIN: f64 = 0.8;
pub const COHERENCE_MAX: f64 = 1.0;

/// Base weight of a non-target component when a specific target is named.
pub const SECONDARY_WEIGHT: f64 = 0.7;

/// Trauma level above which secondary components are drawn in.
pub const SPILLOVER_THRESHOLD: f64 = 0.7;

/// Checkout boost applied to memory-vessel when commerce is the target.
pub const CHECKOUT_MEMORY_BOOST: f64 = 0.2;

/// Clamp `value` into `[lo, hi]`, mapping NaN to `lo`.
pub(crate) fn clamp_finite(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}
