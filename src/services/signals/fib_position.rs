//! Price position relative to Fibonacci retracement levels.

use tracing::debug;

use crate::types::{
    FibonacciLevels, KeyLevel, Signal, FIBONACCI_LABELS, FIBONACCI_RATIOS, SWING_HIGH_INDEX,
    SWING_LOW_INDEX,
};

/// Whether `price` is within `tolerance` (relative to price) of `level`.
pub fn is_near(price: f64, level: f64, tolerance: f64) -> bool {
    price > 0.0 && (price - level).abs() / price < tolerance
}

/// Classifies price against retracement levels.
///
/// Signals, checked in order:
/// - Near the 61.8% level = bounce zone (bullish)
/// - Near the 100% level = swing high resistance (bearish)
/// - Below the 0% level = below support, contrarian buy
/// - Above the 100% level = extended above resistance (bearish)
#[derive(Debug, Clone, Copy)]
pub struct FibonacciPositionAnalyzer {
    proximity: f64,
}

impl Default for FibonacciPositionAnalyzer {
    fn default() -> Self {
        Self { proximity: 0.02 }
    }
}

impl FibonacciPositionAnalyzer {
    pub fn new(proximity: f64) -> Self {
        Self { proximity }
    }

    pub fn analyze_position(&self, price: f64, fib: &FibonacciLevels) -> Signal {
        if !price.is_finite() || price <= 0.0 {
            debug!("Fibonacci position skipped for non-positive price {}", price);
            return Signal::neutral("invalid price");
        }
        // Every level collapses onto one price, so proximity says nothing.
        if fib.is_degenerate() {
            return Signal::neutral("flat swing window, levels undefined");
        }

        let golden = fib.golden_ratio();
        let swing_high = fib.levels[SWING_HIGH_INDEX];
        let swing_low = fib.levels[SWING_LOW_INDEX];

        if is_near(price, golden, self.proximity) {
            Signal::buy(format!("price near golden ratio 61.8% level ({:.2})", golden))
        } else if is_near(price, swing_high, self.proximity) {
            Signal::sell(format!("price near swing high resistance ({:.2})", swing_high))
        } else if price < swing_low {
            Signal::buy(format!(
                "price below swing low support ({:.2}), contrarian buy zone",
                swing_low
            ))
        } else if price > swing_high {
            Signal::sell(format!("price extended above swing high ({:.2})", swing_high))
        } else {
            Signal::neutral("price between key Fibonacci levels")
        }
    }

    /// All seven levels with labels, flagging those close to `price`.
    pub fn key_levels(&self, price: f64, fib: &FibonacciLevels) -> Vec<KeyLevel> {
        fib.levels
            .iter()
            .enumerate()
            .map(|(i, &level)| KeyLevel {
                label: FIBONACCI_LABELS[i],
                ratio: FIBONACCI_RATIOS[i],
                price: level,
                near_price: is_near(price, level, self.proximity),
            })
            .collect()
    }
}
