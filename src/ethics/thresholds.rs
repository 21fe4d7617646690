use serde::{Deserialize, Serialize};
use validator::Validate;

pub const SHUTOFF_HARM_THRESHOLD: f64 = 0.7;
pub const FEASIBILITY_MIN: f64 = 0.5;
pub const NECESSITY_LOW: f64 = 0.3;
pub const NECESSITY_HIGH: f64 = 0.8;
pub const HARM_LOW: f64 = 0.2;
pub const COLLATERAL_MIN: f64 = 0.35;

fn default_shutoff_harm_threshold() -> f64 {
    SHUTOFF_HARM_THRESHOLD
}

fn default_feasibility_min() -> f64 {
    FEASIBILITY_MIN
}

fn default_necessity_low() -> f64 {
    NECESSITY_LOW
}

fn default_necessity_high() -> f64 {
    NECESSITY_HIGH
}

fn default_harm_low() -> f64 {
    HARM_LOW
}

fn default_collateral_min() -> f64 {
    COLLATERAL_MIN
}

/// Gate thresholds. Fields are read-only once built; an engine holds its own
/// copy for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Thresholds {
    #[serde(default = "default_shutoff_harm_threshold")]
    #[validate(range(min = 0.0, max = 1.0))]
    shutoff_harm_threshold: f64,
    #[serde(default = "default_feasibility_min")]
    #[validate(range(min = 0.0, max = 1.0))]
    feasibility_min: f64,
    #[serde(default = "default_necessity_low")]
    #[validate(range(min = 0.0, max = 1.0))]
    necessity_low: f64,
    #[serde(default = "default_necessity_high")]
    #[validate(range(min = 0.0, max = 1.0))]
    necessity_high: f64,
    #[serde(default = "default_harm_low")]
    #[validate(range(min = 0.0, max = 1.0))]
    harm_low: f64,
    #[serde(default = "default_collateral_min")]
    #[validate(range(min = 0.0, max = 1.0))]
    collateral_min: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            shutoff_harm_threshold: SHUTOFF_HARM_THRESHOLD,
            feasibility_min: FEASIBILITY_MIN,
            necessity_low: NECESSITY_LOW,
            necessity_high: NECESSITY_HIGH,
            harm_low: HARM_LOW,
            collateral_min: COLLATERAL_MIN,
        }
    }
}

impl Thresholds {
    pub fn shutoff_harm_threshold(&self) -> f64 {
        self.shutoff_harm_threshold
    }

    pub fn feasibility_min(&self) -> f64 {
        self.feasibility_min
    }

    pub fn necessity_low(&self) -> f64 {
        self.necessity_low
    }

    pub fn necessity_high(&self) -> f64 {
        self.necessity_high
    }

    pub fn harm_low(&self) -> f64 {
        self.harm_low
    }

    pub fn collateral_min(&self) -> f64 {
        self.collateral_min
    }

    pub fn with_shutoff_harm_threshold(mut self, value: f64) -> Self {
        self.shutoff_harm_threshold = value;
        self
    }

    pub fn with_feasibility_min(mut self, value: f64) -> Self {
        self.feasibility_min = value;
        self
    }

    pub fn with_necessity_low(mut self, value: f64) -> Self {
        self.necessity_low = value;
        self
    }

    pub fn with_necessity_high(mut self, value: f64) -> Self {
        self.necessity_high = value;
        self
    }

    pub fn with_harm_low(mut self, value: f64) -> Self {
        self.harm_low = value;
        self
    }

    pub fn with_collateral_min(mut self, value: f64) -> Self {
        self.collateral_min = value;
        self
    }

    pub fn all_finite(&self) -> bool {
        [
            self.shutoff_harm_threshold,
            self.feasibility_min,
            self.necessity_low,
            self.necessity_high,
            self.harm_low,
            self.collateral_min,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}
