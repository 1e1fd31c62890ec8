//! MA20 / MA50 crossover reading.

use crate::types::{Candle, MovingAverageCross, Signal};

/// Compare the latest candle's 20 and 50 period moving averages.
///
/// - MA20 above MA50 = golden cross (bullish)
/// - MA20 below MA50 = death cross (bearish)
///
/// Display only; the confluence score does not include it.
pub fn analyze_cross(latest: &Candle) -> MovingAverageCross {
    let (Some(ma20), Some(ma50)) = (latest.ma20, latest.ma50) else {
        return MovingAverageCross {
            ma20: latest.ma20,
            ma50: latest.ma50,
            spread_pct: None,
            signal: Signal::neutral("insufficient data"),
        };
    };

    let spread_pct = (ma50 != 0.0).then(|| (ma20 - ma50) / ma50 * 100.0);
    let spread = spread_pct.unwrap_or(0.0);

    let signal = if ma20 > ma50 {
        Signal::buy(format!("golden cross: MA20 above MA50 ({:+.2}%)", spread))
    } else if ma20 < ma50 {
        Signal::sell(format!("death cross: MA20 below MA50 ({:+.2}%)", spread))
    } else {
        Signal::neutral("moving averages aligned")
    };

    MovingAverageCross {
        ma20: Some(ma20),
        ma50: Some(ma50),
        spread_pct,
        signal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SignalKind;

    #[test]
    fn test_golden_cross() {
        let candle = Candle::from_close(0, 105.0).with_moving_averages(102.0, 100.0);
        let cross = analyze_cross(&candle);
        assert_eq!(cross.signal.kind, SignalKind::Buy);
        assert!((cross.spread_pct.unwrap() - 2.0).abs() < 1e-9);
        assert!(cross.signal.reason.contains("+2.00%"));
    }

    #[test]
    fn test_death_cross() {
        let candle = Candle::from_close(0, 95.0).with_moving_averages(97.0, 100.0);
        let cross = analyze_cross(&candle);
        assert_eq!(cross.signal.kind, SignalKind::Sell);
        assert!(cross.signal.reason.contains("-3.00%"));
    }

    #[test]
    fn test_aligned_averages() {
        let candle = Candle::from_close(0, 100.0).with_moving_averages(100.0, 100.0);
        let cross = analyze_cross(&candle);
        assert_eq!(cross.signal.kind, SignalKind::Neutral);
        assert_eq!(cross.spread_pct, Some(0.0));
    }

    #[test]
    fn test_missing_average() {
        let mut candle = Candle::from_close(0, 100.0);
        candle.ma20 = Some(101.0);
        let cross = analyze_cross(&candle);
        assert_eq!(cross.signal.kind, SignalKind::Neutral);
        assert_eq!(cross.signal.reason, "insufficient data");
        assert!(cross.spread_pct.is_none());
    }
}
