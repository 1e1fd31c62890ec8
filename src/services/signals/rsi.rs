//! RSI zone classification.

use crate::types::{RsiReading, RsiZone, Signal};

/// Classifies a precomputed RSI value.
///
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
/// - 45 to 55: Neutral
#[derive(Debug, Clone, Copy)]
pub struct RsiClassifier {
    oversold: f64,
    overbought: f64,
}

impl Default for RsiClassifier {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl RsiClassifier {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        Self {
            oversold,
            overbought,
        }
    }

    pub fn zone(&self, rsi: f64) -> RsiZone {
        if rsi < self.oversold {
            RsiZone::Oversold
        } else if rsi > self.overbought {
            RsiZone::Overbought
        } else if (45.0..=55.0).contains(&rsi) {
            RsiZone::Neutral
        } else if rsi < 50.0 {
            RsiZone::SlightlyBearish
        } else {
            RsiZone::SlightlyBullish
        }
    }

    /// Classify `rsi`. Absent or non-finite readings yield None.
    pub fn classify(&self, rsi: Option<f64>) -> Option<RsiReading> {
        let value = rsi.filter(|v| v.is_finite())?;
        let zone = self.zone(value);
        let signal = match zone {
            RsiZone::Oversold => Signal::buy(zone.description()),
            RsiZone::Overbought => Signal::sell(zone.description()),
            _ => Signal::neutral(zone.description()),
        };
        Some(RsiReading {
            value,
            zone,
            signal,
        })
    }
}
