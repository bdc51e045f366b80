//! Fixed additive confidence weights for the gate pipeline
//!
//! Weights are constants, not derived from the magnitude of alignment.

pub const REGIME_WEIGHT: u32 = 25;
pub const BIAS_WEIGHT: u32 = 20;
pub const PULLBACK_WEIGHT: u32 = 10;
pub const TRIGGER_WEIGHT: u32 = 15;

/// Accumulates weight for each gate passed. Maximum before the final
/// RR/score gates is 70.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreCard {
    total: u32,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regime_passed(&mut self) {
        self.total += REGIME_WEIGHT;
    }

    pub fn bias_passed(&mut self) {
        self.total += BIAS_WEIGHT;
    }

    pub fn pullback_passed(&mut self) {
        self.total += PULLBACK_WEIGHT;
    }

    pub fn trigger_passed(&mut self) {
        self.total += TRIGGER_WEIGHT;
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}
