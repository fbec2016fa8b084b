//! Wall-clock access behind a port so field construction can be frozen in tests.
//!
//! The engine reads time in two places: the `meta.timestamp` of every field and
//! the rolling-virus strength pulse. Both go through [`Clock`].

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix time in milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> f64;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
            * 1000.0
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrozenClock {
    pub ms: f64,
}

impl FrozenClock {
    pub fn at(ms: f64) -> Self {
        Self { ms }
    }
}

impl Clock for FrozenClock {
    fn now_ms(&self) -> f64 {
        self.ms
    }
}
