//! Swing high/low detection and Fibonacci retracement levels.

use crate::error::{AnalysisError, Result};
use crate::types::{Candle, FibonacciLevels};

/// Finds the swing extremes of a trailing window and derives retracement levels.
///
/// - Swing high: highest close in the window
/// - Swing low: lowest close in the window
/// - Trend: uptrend when the low came before the high, downtrend otherwise
#[derive(Debug, Clone, Copy)]
pub struct SwingFibonacciAnalyzer {
    lookback: usize,
}

impl Default for SwingFibonacciAnalyzer {
    fn default() -> Self {
        Self { lookback: 100 }
    }
}

impl SwingFibonacciAnalyzer {
    pub fn new(lookback: usize) -> Self {
        Self { lookback }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Compute levels over the trailing `lookback` candles of `series`.
    pub fn compute_levels(&self, series: &[Candle]) -> Result<FibonacciLevels> {
        compute_levels(series, self.lookback)
    }
}

/// Compute swing extremes and retracement levels over the trailing window.
///
/// The window is `min(lookback, series.len())` candles, with a minimum of one.
/// On equal closes the earliest candle wins, so a flat window reports the same
/// index for both extremes and an unknown trend.
pub fn compute_levels(series: &[Candle], lookback: usize) -> Result<FibonacciLevels> {
    if series.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "cannot compute swing levels on an empty series".to_string(),
        ));
    }

    let window_len = lookback.clamp(1, series.len());
    let window = &series[series.len() - window_len..];

    let mut swing_high = window[0].close;
    let mut swing_high_index = 0;
    let mut swing_low = window[0].close;
    let mut swing_low_index = 0;

    for (i, candle) in window.iter().enumerate().skip(1) {
        if candle.close > swing_high {
            swing_high = candle.close;
            swing_high_index = i;
        }
        if candle.close < swing_low {
            swing_low = candle.close;
            swing_low_index = i;
        }
    }

    Ok(FibonacciLevels::from_swings(
        swing_low,
        swing_low_index,
        swing_high,
        swing_high_index,
    ))
}
