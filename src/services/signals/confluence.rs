//! Weighted multi-indicator confluence scoring.

use crate::config::SignalPolicy;
use crate::types::{Action, ConfluenceResult, ConfluenceScores, Signal};

/// Vote weight of an RSI extreme.
pub const RSI_WEIGHT: u32 = 2;
/// Vote weight of a band-edge signal.
pub const BAND_WEIGHT: u32 = 1;
/// Vote weight of a Fibonacci position signal.
pub const FIBONACCI_WEIGHT: u32 = 1;
/// Vote weight of strong 24h momentum.
pub const MOMENTUM_WEIGHT: u32 = 1;
/// Highest score one side can reach.
pub const MAX_SCORE: u32 = RSI_WEIGHT + BAND_WEIGHT + FIBONACCI_WEIGHT + MOMENTUM_WEIGHT;

/// Inputs to one scoring call. Absent signals cast no vote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfluenceInput {
    pub rsi: Option<f64>,
    pub band_signal: Option<Signal>,
    pub fibonacci_signal: Option<Signal>,
    /// 24h change in percent.
    pub change_24h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vote {
    Buy,
    Sell,
}

/// Aggregates indicator votes into a single action.
///
/// Votes are cast in a fixed order (RSI, Bollinger, Fibonacci, momentum) and
/// each non-neutral vote appends one reason. Ties, including 0-0, resolve to
/// HOLD. Scoring never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfluenceScorer {
    policy: SignalPolicy,
}

impl ConfluenceScorer {
    pub fn new(policy: SignalPolicy) -> Self {
        Self { policy }
    }

    pub fn score(&self, input: &ConfluenceInput) -> ConfluenceResult {
        let mut scores = ConfluenceScores::default();
        let mut reasons = Vec::new();
        let mut cast = |vote: Vote, weight: u32, reason: String| {
            match vote {
                Vote::Buy => scores.buy += weight,
                Vote::Sell => scores.sell += weight,
            }
            reasons.push(reason);
        };

        if let Some(rsi) = input.rsi {
            if rsi < self.policy.rsi_oversold {
                cast(Vote::Buy, RSI_WEIGHT, format!("RSI oversold ({:.1})", rsi));
            } else if rsi > self.policy.rsi_overbought {
                cast(Vote::Sell, RSI_WEIGHT, format!("RSI overbought ({:.1})", rsi));
            }
        }

        if let Some(signal) = &input.band_signal {
            if let Some(vote) = signal_vote(signal) {
                cast(vote, BAND_WEIGHT, format!("Bollinger: {}", signal.reason));
            }
        }

        if let Some(signal) = &input.fibonacci_signal {
            if let Some(vote) = signal_vote(signal) {
                cast(vote, FIBONACCI_WEIGHT, format!("Fibonacci: {}", signal.reason));
            }
        }

        let change = input.change_24h;
        if change >= self.policy.momentum_threshold {
            cast(
                Vote::Buy,
                MOMENTUM_WEIGHT,
                format!("strong positive 24h momentum ({:+.2}%)", change),
            );
        } else if change <= -self.policy.momentum_threshold {
            cast(
                Vote::Sell,
                MOMENTUM_WEIGHT,
                format!("strong negative 24h momentum ({:+.2}%)", change),
            );
        }

        let action = if scores.buy > scores.sell {
            Action::Buy
        } else if scores.sell > scores.buy {
            Action::Sell
        } else {
            Action::Hold
        };

        ConfluenceResult {
            action,
            confidence: confidence(scores),
            scores,
            reasons,
        }
    }
}

fn signal_vote(signal: &Signal) -> Option<Vote> {
    if signal.is_buy() {
        Some(Vote::Buy)
    } else if signal.is_sell() {
        Some(Vote::Sell)
    } else {
        None
    }
}

/// Winning side's share of [`MAX_SCORE`], rounded to a whole percent.
fn confidence(scores: ConfluenceScores) -> u8 {
    let winning = scores.buy.max(scores.sell).min(MAX_SCORE);
    (winning as f64 / MAX_SCORE as f64 * 100.0).round() as u8
}
