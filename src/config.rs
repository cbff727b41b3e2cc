use std::error::Error;
use std::fmt;

// Validated mining thresholds. min_support is an absolute transaction
// count; confidence_threshold is a percentage.
#[derive(Clone, Copy, Debug)]
pub struct MiningConfig {
    pub min_support: u32,
    pub confidence_threshold: f64,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MinSupportZero,
    ConfidenceOutOfRange(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MinSupportZero => {
                write!(f, "minimum support must be a positive transaction count")
            }
            ConfigError::ConfidenceOutOfRange(value) => write!(
                f,
                "confidence threshold {} is outside the range [0,100]",
                value
            ),
        }
    }
}

impl Error for ConfigError {}

impl MiningConfig {
    // Out-of-range values are rejected here, never clamped.
    pub fn new(min_support: u32, confidence_threshold: f64) -> Result<MiningConfig, ConfigError> {
        if min_support == 0 {
            return Err(ConfigError::MinSupportZero);
        }
        if !(confidence_threshold >= 0.0 && confidence_threshold <= 100.0) {
            return Err(ConfigError::ConfidenceOutOfRange(confidence_threshold));
        }
        Ok(MiningConfig {
            min_support,
            confidence_threshold,
        })
    }
}
