//! Bollinger Band position analysis.

use tracing::debug;

use crate::types::{BandSnapshot, Candle, Signal};

/// Classifies price against the latest candle's Bollinger Bands.
///
/// Position (%B) = (price - lower) / (upper - lower):
/// - 0 or below: at/below the lower band (oversold, bullish)
/// - 1 or above: at/above the upper band (overbought, bearish)
///
/// Only the outer 5% of the band width on either side produces a signal.
#[derive(Debug, Clone, Copy)]
pub struct BandPositionAnalyzer {
    lower_threshold: f64,
    upper_threshold: f64,
}

impl Default for BandPositionAnalyzer {
    fn default() -> Self {
        Self {
            lower_threshold: 0.05,
            upper_threshold: 0.95,
        }
    }
}

impl BandPositionAnalyzer {
    pub fn new(lower_threshold: f64, upper_threshold: f64) -> Self {
        Self {
            lower_threshold,
            upper_threshold,
        }
    }

    /// Raw band position, or None when the bands are missing or zero-width.
    pub fn band_position(latest: &Candle, price: f64) -> Option<f64> {
        let (upper, _, lower) = latest.bands()?;
        let band_width = upper - lower;
        if band_width == 0.0 || !band_width.is_finite() {
            return None;
        }
        Some((price - lower) / band_width)
    }

    pub fn analyze_bands(&self, latest: &Candle, price: f64) -> Signal {
        if latest.bands().is_none() {
            return Signal::neutral("insufficient data");
        }

        let Some(position) = Self::band_position(latest, price) else {
            debug!("Zero-width Bollinger Bands at {}, no band signal", latest.time);
            return Signal::neutral("zero-width bands");
        };

        if position <= self.lower_threshold {
            Signal::buy("price at/below lower band — oversold")
        } else if position >= self.upper_threshold {
            Signal::sell("price at/above upper band — overbought")
        } else {
            Signal::neutral("price within normal band range")
        }
    }

    /// Band components, position and signal for display.
    pub fn snapshot(&self, latest: &Candle, price: f64) -> BandSnapshot {
        let position = Self::band_position(latest, price);
        BandSnapshot {
            upper: latest.bb_upper,
            middle: latest.bb_middle,
            lower: latest.bb_lower,
            position,
            display_pct: position.map(|p| (p * 100.0).clamp(0.0, 100.0)),
            signal: self.analyze_bands(latest, price),
        }
    }
}
