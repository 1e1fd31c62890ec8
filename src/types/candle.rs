use serde::{Deserialize, Serialize};

/// One sample of a price series, annotated with precomputed indicator values.
///
/// Indicator fields are absent when the producer did not have enough history
/// to compute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Unix timestamp (milliseconds) of the candle open.
    #[serde(default)]
    pub time: i64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma50: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_middle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_lower: Option<f64>,
}

impl Candle {
    /// Candle carrying only a close price.
    pub fn from_close(time: i64, close: f64) -> Self {
        Self {
            time,
            close,
            rsi: None,
            ma20: None,
            ma50: None,
            bb_upper: None,
            bb_middle: None,
            bb_lower: None,
        }
    }

    /// Attach Bollinger Band components.
    pub fn with_bands(mut self, upper: f64, middle: f64, lower: f64) -> Self {
        self.bb_upper = Some(upper);
        self.bb_middle = Some(middle);
        self.bb_lower = Some(lower);
        self
    }

    /// Attach an RSI reading.
    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    /// Attach the 20 and 50 period moving averages.
    pub fn with_moving_averages(mut self, ma20: f64, ma50: f64) -> Self {
        self.ma20 = Some(ma20);
        self.ma50 = Some(ma50);
        self
    }

    /// All three band components, if present.
    pub fn bands(&self) -> Option<(f64, f64, f64)> {
        Some((self.bb_upper?, self.bb_middle?, self.bb_lower?))
    }
}

/// Current market quote supplied independently of the series.
///
/// May be more recent than the last candle close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: f64,
    /// 24h change in percent.
    pub change_24h: f64,
}
