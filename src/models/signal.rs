//! Trade signal data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an accepted setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

/// A fully parameterized trade plan produced by the signal engine.
///
/// Constructed exactly once per accepted evaluation and never mutated;
/// the scanner consumes it immediately for cooldown and dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub direction: Direction,
    pub entry: f64,
    pub stop: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub risk_reward: f64,
    pub score: u32,
    pub reason: String,
    pub invalidate: String,
}
