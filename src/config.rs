use crate::error::{AnalysisError, Result};
use std::env;
use std::str::FromStr;

/// Thresholds used by the analyzers and the confluence scorer.
///
/// Defaults: bands 5% / 95%, Fibonacci proximity 2%, RSI 30 / 70, momentum 5%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPolicy {
    /// Band position at or below which price counts as at the lower band.
    pub band_lower_threshold: f64,
    /// Band position at or above which price counts as at the upper band.
    pub band_upper_threshold: f64,
    /// Relative distance under which price is "near" a Fibonacci level.
    pub fib_proximity: f64,
    /// RSI strictly below this is oversold.
    pub rsi_oversold: f64,
    /// RSI strictly above this is overbought.
    pub rsi_overbought: f64,
    /// Absolute 24h change (percent) that counts as strong momentum.
    pub momentum_threshold: f64,
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self {
            band_lower_threshold: 0.05,
            band_upper_threshold: 0.95,
            fib_proximity: 0.02,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            momentum_threshold: 5.0,
        }
    }
}

impl SignalPolicy {
    /// Load policy overrides from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            band_lower_threshold: env_or("BAND_LOWER_THRESHOLD", defaults.band_lower_threshold),
            band_upper_threshold: env_or("BAND_UPPER_THRESHOLD", defaults.band_upper_threshold),
            fib_proximity: env_or("FIB_PROXIMITY", defaults.fib_proximity),
            rsi_oversold: env_or("RSI_OVERSOLD", defaults.rsi_oversold),
            rsi_overbought: env_or("RSI_OVERBOUGHT", defaults.rsi_overbought),
            momentum_threshold: env_or("MOMENTUM_THRESHOLD", defaults.momentum_threshold),
        }
    }

    /// Reject thresholds that would make a signal unreachable or always on.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.band_lower_threshold)
            || self.band_upper_threshold <= self.band_lower_threshold
            || self.band_upper_threshold > 1.0
        {
            return Err(AnalysisError::Config(format!(
                "band thresholds must satisfy 0 <= lower < upper <= 1, got {} / {}",
                self.band_lower_threshold, self.band_upper_threshold
            )));
        }
        if self.fib_proximity <= 0.0 {
            return Err(AnalysisError::Config(format!(
                "FIB_PROXIMITY must be positive, got {}",
                self.fib_proximity
            )));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(AnalysisError::Config(format!(
                "RSI_OVERSOLD ({}) must be below RSI_OVERBOUGHT ({})",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if self.momentum_threshold < 0.0 {
            return Err(AnalysisError::Config(format!(
                "MOMENTUM_THRESHOLD must not be negative, got {}",
                self.momentum_threshold
            )));
        }
        Ok(())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Symbol to analyze.
    pub symbol: String,
    /// Candle timeframe (e.g. "1h").
    pub timeframe: String,
    /// Path to a JSON array of candles.
    pub series_path: String,
    /// Current price. Falls back to the last candle close when unset.
    pub price: Option<f64>,
    /// 24h change in percent.
    pub change_24h: f64,
    /// Trailing window used for swing detection.
    pub fib_lookback: usize,
    /// Analyzer and scorer thresholds.
    pub policy: SignalPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            symbol: env::var("SYMBOL").unwrap_or_else(|_| "btc".to_string()),
            timeframe: env::var("TIMEFRAME").unwrap_or_else(|_| "1h".to_string()),
            series_path: env::var("SERIES_PATH").unwrap_or_else(|_| "series.json".to_string()),
            price: env::var("PRICE").ok().and_then(|v| v.parse().ok()),
            change_24h: env_or("CHANGE_24H", 0.0),
            fib_lookback: env_or("FIB_LOOKBACK", 100),
            policy: SignalPolicy::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: "btc".to_string(),
            timeframe: "1h".to_string(),
            series_path: "series.json".to_string(),
            price: None,
            change_24h: 0.0,
            fib_lookback: 100,
            policy: SignalPolicy::default(),
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
