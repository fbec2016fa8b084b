//! Phase profile table: ellipse shape and z-axis curve per phase.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{ELLIPSE_CENTER, clamp_finite};

/// Named mode parameterizing ellipse shape and z-curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Phase {
    CyberLotus,
    AlienFlora,
    RollingVirus,
    TraumaCore,
    Transcendent,
    /// Any unrecognized phase name; uses the neutral default profile.
    Neutral,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::CyberLotus,
        Phase::AlienFlora,
        Phase::RollingVirus,
        Phase::TraumaCore,
        Phase::Transcendent,
        Phase::Neutral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::CyberLotus => "cyber-lotus",
            Phase::AlienFlora => "alien-flora",
            Phase::RollingVirus => "rolling-virus",
            Phase::TraumaCore => "trauma-core",
            Phase::Transcendent => "transcendent",
            Phase::Neutral => "neutral",
        }
    }

    /// Lenient lookup: unknown names resolve to [`Phase::Neutral`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .unwrap_or_else(|| {
                tracing::debug!("unknown phase '{name}', using neutral profile");
                Phase::Neutral
            })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Phase {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl FromStr for Phase {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Caller-supplied z-curve evaluator.
pub type CurveFn = dyn Fn(f64) -> f64 + Send + Sync;

/// Mapping from normalized trauma `t` to the z coordinate.
#[derive(Clone)]
pub enum ZCurve {
    /// `t^exponent`
    Power(f64),
    /// `1 / (1 + e^{-steepness (t - midpoint)})`
    Logistic { steepness: f64, midpoint: f64 },
    Custom(Arc<CurveFn>),
}

impl ZCurve {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        ZCurve::Custom(Arc::new(f))
    }

    /// Evaluate at `t`, clamped to `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        let z = match self {
            ZCurve::Power(exp) => t.powf(*exp),
            ZCurve::Logistic {
                steepness,
                midpoint,
            } => 1.0 / (1.0 + (-steepness * (t - midpoint)).exp()),
            ZCurve::Custom(f) => f(t),
        };
        clamp_finite(z, 0.0, 1.0)
    }

    /// Human-readable form recorded in field metadata.
    pub fn descriptor(&self) -> String {
        match self {
            ZCurve::Power(exp) => format!("t^{exp}"),
            ZCurve::Logistic {
                steepness,
                midpoint,
            } => format!("logistic(k={steepness}, t0={midpoint})"),
            ZCurve::Custom(_) => "custom".to_string(),
        }
    }
}

impl fmt::Debug for ZCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZCurve({})", self.descriptor())
    }
}

impl Serialize for ZCurve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.descriptor())
    }
}

/// Data-only contexts carry a z-curve as a bare exponent.
impl<'de> Deserialize<'de> for ZCurve {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(ZCurve::Power)
    }
}

/// Rotated ellipse traced by the elliptical waveform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseParams {
    pub x_radius: f64,
    pub y_radius: f64,
    pub rotation: f64,
    #[serde(default = "default_center")]
    pub center: [f64; 2],
}

fn default_center() -> [f64; 2] {
    ELLIPSE_CENTER
}

impl EllipseParams {
    pub fn new(x_radius: f64, y_radius: f64, rotation: f64) -> Self {
        Self {
            x_radius,
            y_radius,
            rotation,
            center: ELLIPSE_CENTER,
        }
    }

    /// Point at `t` of a full revolution, rotated then offset by `center`.
    pub fn point(&self, t: f64) -> (f64, f64) {
        let angle = t * std::f64::consts::TAU;
        let x0 = angle.cos() * self.x_radius;
        let y0 = angle.sin() * self.y_radius;
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let x = x0 * cos_r - y0 * sin_r;
        let y = x0 * sin_r + y0 * cos_r;
        (x + self.center[0], y + self.center[1])
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseProfile {
    pub phase: Phase,
    pub ellipse: EllipseParams,
    pub z_curve: ZCurve,
}

pub fn phase_profile(phase: Phase) -> PhaseProfile {
    let (ellipse, z_curve) = match phase {
        Phase::CyberLotus => (EllipseParams::new(0.4, 0.6, 0.0), ZCurve::Power(0.8)),
        Phase::AlienFlora => (EllipseParams::new(0.6, 0.4, PI / 6.0), ZCurve::Power(1.0)),
        Phase::RollingVirus => (EllipseParams::new(0.5, 0.5, PI / 4.0), ZCurve::Power(1.2)),
        Phase::TraumaCore => (EllipseParams::new(0.7, 0.3, PI / 3.0), ZCurve::Power(1.5)),
        Phase::Transcendent => (
            EllipseParams::new(0.5, 0.5, 0.0),
            ZCurve::Logistic {
                steepness: 10.0,
                midpoint: 0.5,
            },
        ),
        Phase::Neutral => (EllipseParams::new(0.5, 0.5, 0.0), ZCurve::Power(1.0)),
    };
    PhaseProfile {
        phase,
        ellipse,
        z_curve,
    }
}
