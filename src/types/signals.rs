use serde::{Deserialize, Serialize};

/// Retracement ratios, indexed 0..6.
pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// Display labels for each retracement ratio, same indexing as [`FIBONACCI_RATIOS`].
pub const FIBONACCI_LABELS: [&str; 7] = [
    "Swing Low (0%)",
    "Level 23.6%",
    "Level 38.2%",
    "Level 50%",
    "Golden Ratio (61.8%)",
    "Level 78.6%",
    "Swing High (100%)",
];

/// Index of the 61.8% level.
pub const GOLDEN_RATIO_INDEX: usize = 4;
/// Index of the 100% level (swing high).
pub const SWING_HIGH_INDEX: usize = 6;
/// Index of the 0% level (swing low).
pub const SWING_LOW_INDEX: usize = 0;

/// Direction of a single indicator signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Hold,
    Neutral,
}

impl SignalKind {
    /// Get display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::Hold => "HOLD",
            SignalKind::Neutral => "NEUTRAL",
        }
    }
}

/// A directional signal from one indicator with its justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub kind: SignalKind,
    pub reason: String,
}

impl Signal {
    pub fn new(kind: SignalKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    pub fn buy(reason: impl Into<String>) -> Self {
        Self::new(SignalKind::Buy, reason)
    }

    pub fn sell(reason: impl Into<String>) -> Self {
        Self::new(SignalKind::Sell, reason)
    }

    pub fn neutral(reason: impl Into<String>) -> Self {
        Self::new(SignalKind::Neutral, reason)
    }

    pub fn is_buy(&self) -> bool {
        self.kind == SignalKind::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.kind == SignalKind::Sell
    }
}

/// Trend direction inferred from the order of the swing extremes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    /// Swing low came first, then the swing high.
    Uptrend,
    /// Swing high came first, then the swing low.
    Downtrend,
    /// Flat or single-point window.
    Unknown,
}

impl Trend {
    /// Directional reading of the trend, for display.
    pub fn signal(&self) -> Signal {
        match self {
            Trend::Uptrend => Signal::buy(self.description()),
            Trend::Downtrend => Signal::sell(self.description()),
            Trend::Unknown => Signal::neutral(self.description()),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Trend::Uptrend => "uptrend: recent swing high above the swing low",
            Trend::Downtrend => "downtrend: recent swing low below the swing high",
            Trend::Unknown => "trend undetermined",
        }
    }
}

/// Swing extremes of a lookback window and the retracement levels between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciLevels {
    pub trend: Trend,
    /// Levels for [`FIBONACCI_RATIOS`], ascending regardless of trend.
    pub levels: [f64; 7],
    pub swing_high: f64,
    pub swing_low: f64,
    /// Position of the swing high within the window.
    pub swing_high_index: usize,
    /// Position of the swing low within the window.
    pub swing_low_index: usize,
}

impl FibonacciLevels {
    /// Build levels by interpolating between the swing extremes.
    pub fn from_swings(
        swing_low: f64,
        swing_low_index: usize,
        swing_high: f64,
        swing_high_index: usize,
    ) -> Self {
        let range = swing_high - swing_low;
        let mut levels = FIBONACCI_RATIOS.map(|ratio| swing_low + ratio * range);
        // low + 1.0 * (high - low) can drift by an ulp
        levels[SWING_HIGH_INDEX] = swing_high;
        let trend = if swing_low_index < swing_high_index {
            Trend::Uptrend
        } else if swing_high_index < swing_low_index {
            Trend::Downtrend
        } else {
            Trend::Unknown
        };

        Self {
            trend,
            levels,
            swing_high,
            swing_low,
            swing_high_index,
            swing_low_index,
        }
    }

    pub fn range(&self) -> f64 {
        self.swing_high - self.swing_low
    }

    /// True when every level collapses onto one price.
    pub fn is_degenerate(&self) -> bool {
        self.range() <= 0.0
    }

    pub fn golden_ratio(&self) -> f64 {
        self.levels[GOLDEN_RATIO_INDEX]
    }
}

/// A labelled retracement level, flagged when price sits close to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLevel {
    pub label: &'static str,
    pub ratio: f64,
    pub price: f64,
    pub near_price: bool,
}

/// Final action of the confluence scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }
}

/// Accumulated weighted votes per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfluenceScores {
    pub buy: u32,
    pub sell: u32,
}

/// Aggregated signal with confidence and the reasons that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfluenceResult {
    pub action: Action,
    /// Winning side's share of the maximum attainable weight (0-100).
    pub confidence: u8,
    pub scores: ConfluenceScores,
    /// One entry per non-neutral vote, in evaluation order.
    pub reasons: Vec<String>,
}
