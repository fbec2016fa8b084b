use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    PulseWidth(f64),
    NoiseFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::PulseWidth(w) => {
                write!(f, "pulse-width must lie strictly between 0 and 1, got {w}")
            }
            ConfigError::NoiseFactor(n) => {
                write!(f, "noise-factor must lie in [0, 1], got {n}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub type Result<T> = std::result::Result<T, ConfigError>;
