use serde::Serialize;

use super::{ConfluenceResult, FibonacciLevels, KeyLevel, Quote, Signal};

/// Coarse classification of an RSI reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    SlightlyBearish,
    Neutral,
    SlightlyBullish,
    Overbought,
}

impl RsiZone {
    pub fn description(&self) -> &'static str {
        match self {
            RsiZone::Oversold => "oversold zone - potential buy signal",
            RsiZone::SlightlyBearish => "slightly bearish",
            RsiZone::Neutral => "neutral zone - no clear signal",
            RsiZone::SlightlyBullish => "slightly bullish",
            RsiZone::Overbought => "overbought zone - potential sell signal",
        }
    }
}

/// RSI value with its zone and directional reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsiReading {
    pub value: f64,
    pub zone: RsiZone,
    pub signal: Signal,
}

/// Bollinger Band components of the latest candle and where price sits in them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandSnapshot {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    /// Raw position, 0 at the lower band and 1 at the upper band. Unclamped.
    pub position: Option<f64>,
    /// Position as a percentage clamped to 0-100.
    pub display_pct: Option<f64>,
    pub signal: Signal,
}

/// Relationship between the 20 and 50 period moving averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageCross {
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    /// (ma20 - ma50) / ma50 in percent.
    pub spread_pct: Option<f64>,
    pub signal: Signal,
}

/// Everything a presentation layer needs for one symbol at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalAnalysis {
    pub symbol: String,
    pub timeframe: String,
    pub quote: Quote,
    pub confluence: ConfluenceResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiReading>,
    pub fibonacci: FibonacciLevels,
    pub fibonacci_signal: Signal,
    pub trend_signal: Signal,
    pub key_levels: Vec<KeyLevel>,
    pub bollinger: BandSnapshot,
    pub moving_averages: MovingAverageCross,
    /// Number of candles the analysis ran over.
    pub candles: usize,
    /// Unix timestamp (milliseconds) when computed.
    pub timestamp: i64,
}
