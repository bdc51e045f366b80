//! Environment-based configuration
//!
//! Every strategy parameter is surfaced through the environment with the
//! defaults below; the bundle is loaded once at startup and read-only for
//! the lifetime of the process.

use crate::models::Timeframe;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParam {
        name,
        reason: reason.into(),
    }
}

/// Current deployment environment (`ENVIRONMENT`, defaults to "development").
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

/// Evaluation parameters for the signal engine.
///
/// Process-wide, loaded once; changing any value requires a restart.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub atr_length: usize,
    pub atr_multiplier: f64,
    pub pullback_pct: f64,
    pub min_risk_reward: f64,
    pub cooldown_minutes: u64,
    pub min_score: u32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            ema_fast: 50,
            ema_slow: 200,
            atr_length: 14,
            atr_multiplier: 1.2,
            pullback_pct: 0.008,
            min_risk_reward: 1.5,
            cooldown_minutes: 15,
            min_score: 55,
        }
    }
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ema_fast == 0 {
            return Err(invalid("EMA_FAST", "must be > 0"));
        }
        if self.ema_slow <= self.ema_fast {
            return Err(invalid(
                "EMA_SLOW",
                format!("must be > EMA_FAST ({})", self.ema_fast),
            ));
        }
        if self.atr_length == 0 {
            return Err(invalid("ATR_LENGTH", "must be > 0"));
        }
        if self.atr_multiplier <= 0.0 {
            return Err(invalid("ATR_MULTIPLIER", "must be > 0"));
        }
        if self.pullback_pct <= 0.0 || self.pullback_pct >= 1.0 {
            return Err(invalid("PULLBACK_PCT", "must be inside (0, 1)"));
        }
        if self.min_risk_reward <= 0.0 {
            return Err(invalid("MIN_RISK_REWARD", "must be > 0"));
        }
        if self.min_score > 100 {
            return Err(invalid("MIN_SCORE", "must be within [0, 100]"));
        }
        Ok(())
    }
}

/// Telegram delivery settings; the scanner runs in log-only mode when
/// these are absent.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub symbols: Vec<String>,
    pub entry_tf: Timeframe,
    pub bias_tf: Timeframe,
    pub regime_tf: Timeframe,
    pub candle_limit: usize,
    pub fetch_retries: usize,
    pub health_port: u16,
    pub telegram: Option<TelegramConfig>,
    pub params: StrategyParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbols: vec![
                "BTC/USDT:USDT".to_string(),
                "ETH/USDT:USDT".to_string(),
                "SOL/USDT:USDT".to_string(),
                "ASTER/USDT:USDT".to_string(),
            ],
            entry_tf: Timeframe::M15,
            bias_tf: Timeframe::H1,
            regime_tf: Timeframe::H4,
            candle_limit: 300,
            fetch_retries: 3,
            health_port: 8080,
            telegram: None,
            params: StrategyParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let symbols = match env::var("SYMBOLS") {
            Ok(raw) => {
                let parsed: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if parsed.is_empty() {
                    return Err(invalid("SYMBOLS", "must list at least one symbol"));
                }
                parsed
            }
            Err(_) => defaults.symbols,
        };

        let params = StrategyParams {
            ema_fast: env_parse("EMA_FAST", defaults.params.ema_fast)?,
            ema_slow: env_parse("EMA_SLOW", defaults.params.ema_slow)?,
            atr_length: env_parse("ATR_LENGTH", defaults.params.atr_length)?,
            atr_multiplier: env_parse("ATR_MULTIPLIER", defaults.params.atr_multiplier)?,
            pullback_pct: env_parse("PULLBACK_PCT", defaults.params.pullback_pct)?,
            min_risk_reward: env_parse("MIN_RISK_REWARD", defaults.params.min_risk_reward)?,
            cooldown_minutes: env_parse("COOLDOWN_MINUTES", defaults.params.cooldown_minutes)?,
            min_score: env_parse("MIN_SCORE", defaults.params.min_score)?,
        };
        params.validate()?;

        let telegram = match (env::var("TG_BOT_TOKEN"), env::var("TG_CHAT_ID")) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Ok(Self {
            symbols,
            entry_tf: env_parse_tf("ENTRY_TIMEFRAME", defaults.entry_tf)?,
            bias_tf: env_parse_tf("BIAS_TIMEFRAME", defaults.bias_tf)?,
            regime_tf: env_parse_tf("REGIME_TIMEFRAME", defaults.regime_tf)?,
            candle_limit: env_parse("CANDLE_LIMIT", defaults.candle_limit)?,
            fetch_retries: env_parse("FETCH_RETRIES", defaults.fetch_retries)?,
            health_port: env_parse("HEALTH_PORT", defaults.health_port)?,
            telegram,
            params,
        })
    }
}

fn env_parse<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(name, e.to_string())),
        Err(_) => Ok(default),
    }
}

fn env_parse_tf(name: &'static str, default: Timeframe) -> Result<Timeframe, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: String| invalid(name, e)),
        Err(_) => Ok(default),
    }
}
