//! Signal engine: the multi-timeframe gate pipeline
//!
//! A linear sequence of hard gates (regime, bias, alignment, readiness,
//! pullback, trigger, risk plan, RR, score). Failing any gate yields no
//! signal. The engine holds no state of its own: each evaluation is a
//! pure function of its three candle series and the parameter bundle.

use crate::config::StrategyParams;
use crate::indicators::trend::ema;
use crate::indicators::volatility::atr;
use crate::models::{Candle, Direction, Signal};
use crate::signals::scoring::ScoreCard;
use crate::signals::trigger;

/// Multiplier applied to risk for the second take-profit target.
const TP2_RISK_MULTIPLIER: f64 = 2.5;

/// Extra bars required beyond the slow EMA length before the slow average
/// is considered stable.
const HISTORY_MARGIN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Regime {
    Bull,
    Bear,
}

pub struct SignalEngine;

impl SignalEngine {
    /// Minimum series length for an evaluation under `params`.
    pub fn min_candles(params: &StrategyParams) -> usize {
        params.ema_slow + HISTORY_MARGIN
    }

    /// Evaluate one instrument across its three timeframes.
    ///
    /// `entry` is the lowest timeframe (trigger), `bias` the middle,
    /// `regime` the highest. Returns `None` both for rejected market
    /// conditions and for insufficient data.
    pub fn evaluate(
        entry: &[Candle],
        bias: &[Candle],
        regime: &[Candle],
        symbol: &str,
        params: &StrategyParams,
    ) -> Option<Signal> {
        let min_len = Self::min_candles(params);
        if entry.len() < min_len || bias.len() < min_len || regime.len() < min_len {
            return None;
        }

        let mut score = ScoreCard::new();

        // Regime: highest-timeframe close vs slow EMA. Exact equality is
        // a reject, not a default direction.
        let regime_closes: Vec<f64> = regime.iter().map(|c| c.close).collect();
        let regime_ema = ema::last_ema(&regime_closes, params.ema_slow)?;
        let regime_close = *regime_closes.last()?;
        let regime_state = if regime_close > regime_ema {
            Regime::Bull
        } else if regime_close < regime_ema {
            Regime::Bear
        } else {
            return None;
        };
        score.regime_passed();

        // Bias: middle-timeframe close vs slow EMA.
        let bias_closes: Vec<f64> = bias.iter().map(|c| c.close).collect();
        let bias_ema = ema::last_ema(&bias_closes, params.ema_slow)?;
        let bias_close = *bias_closes.last()?;
        let bias_dir = if bias_close > bias_ema {
            Direction::Long
        } else {
            Direction::Short
        };

        // Alignment gate: regime and bias must agree.
        let direction = match (regime_state, bias_dir) {
            (Regime::Bull, Direction::Long) => Direction::Long,
            (Regime::Bear, Direction::Short) => Direction::Short,
            _ => return None,
        };
        score.bias_passed();

        // Entry readiness: fast EMA and a defined, positive ATR.
        let entry_closes: Vec<f64> = entry.iter().map(|c| c.close).collect();
        let fast_ema = ema::last_ema(&entry_closes, params.ema_fast)?;
        let atr_value = atr::last_atr(entry, params.atr_length).filter(|v| *v > 0.0)?;

        let last = entry.last()?;
        let entry_price = last.close;

        // Pullback gate: close within tolerance of the fast EMA, or the
        // bar's wick straddles it.
        let dist = (entry_price - fast_ema).abs() / entry_price.max(1e-9);
        let near = dist <= params.pullback_pct;
        let wick_touch = last.low <= fast_ema && fast_ema <= last.high;
        if !(near || wick_touch) {
            return None;
        }
        score.pullback_passed();

        // Trigger gate on the two latest closed bars.
        let triggered = match direction {
            Direction::Long => trigger::bullish_trigger(entry, fast_ema),
            Direction::Short => trigger::bearish_trigger(entry, fast_ema),
        };
        if !triggered {
            return None;
        }
        score.trigger_passed();

        // Risk plan.
        let (stop, tp1, tp2, risk_reward) = match direction {
            Direction::Long => {
                let stop = entry_price - params.atr_multiplier * atr_value;
                let risk = entry_price - stop;
                if risk <= 0.0 {
                    return None;
                }
                let tp1 = entry_price + params.min_risk_reward * risk;
                let tp2 = entry_price + TP2_RISK_MULTIPLIER * risk;
                (stop, tp1, tp2, (tp1 - entry_price) / risk)
            }
            Direction::Short => {
                let stop = entry_price + params.atr_multiplier * atr_value;
                let risk = stop - entry_price;
                if risk <= 0.0 {
                    return None;
                }
                let tp1 = entry_price - params.min_risk_reward * risk;
                let tp2 = entry_price - TP2_RISK_MULTIPLIER * risk;
                (stop, tp1, tp2, (entry_price - tp1) / risk)
            }
        };

        // Final gates.
        if risk_reward < params.min_risk_reward {
            return None;
        }
        if score.total() < params.min_score {
            return None;
        }

        let (reason, invalidate) = match direction {
            Direction::Long => (
                format!(
                    "regime bull + bias long + pullback into EMA{} + bullish close/reclaim",
                    params.ema_fast
                ),
                format!("close below EMA{}", params.ema_fast),
            ),
            Direction::Short => (
                format!(
                    "regime bear + bias short + pullback into EMA{} + bearish close/reject",
                    params.ema_fast
                ),
                format!("close above EMA{}", params.ema_fast),
            ),
        };

        Some(Signal {
            symbol: symbol.to_string(),
            direction,
            entry: entry_price,
            stop,
            tp1,
            tp2,
            risk_reward,
            score: score.total(),
            reason,
            invalidate,
        })
    }
}
