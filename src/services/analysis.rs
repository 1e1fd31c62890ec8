//! Technical analysis pipeline for one symbol.

use crate::config::{Config, SignalPolicy};
use crate::error::{AnalysisError, Result};
use crate::services::series_store::SeriesStore;
use crate::services::signals::{
    analyze_cross, BandPositionAnalyzer, ConfluenceInput, ConfluenceScorer,
    FibonacciPositionAnalyzer, RsiClassifier, SwingFibonacciAnalyzer,
};
use crate::types::{Candle, Quote, TechnicalAnalysis};
use std::sync::Arc;
use tracing::debug;

/// Runs every analyzer over a series and scores the result.
///
/// Holds no per-call state, so one service can be shared across tasks.
pub struct AnalysisService {
    store: Arc<dyn SeriesStore>,
    swing: SwingFibonacciAnalyzer,
    bands: BandPositionAnalyzer,
    fib_position: FibonacciPositionAnalyzer,
    rsi: RsiClassifier,
    scorer: ConfluenceScorer,
}

impl AnalysisService {
    /// Create a new analysis service.
    pub fn new(store: Arc<dyn SeriesStore>, policy: SignalPolicy, lookback: usize) -> Self {
        Self {
            store,
            swing: SwingFibonacciAnalyzer::new(lookback),
            bands: BandPositionAnalyzer::new(policy.band_lower_threshold, policy.band_upper_threshold),
            fib_position: FibonacciPositionAnalyzer::new(policy.fib_proximity),
            rsi: RsiClassifier::new(policy.rsi_oversold, policy.rsi_overbought),
            scorer: ConfluenceScorer::new(policy),
        }
    }

    pub fn from_config(store: Arc<dyn SeriesStore>, config: &Config) -> Self {
        Self::new(store, config.policy, config.fib_lookback)
    }

    /// Fetch the series for `symbol` at `timeframe` and analyze it.
    pub fn analyze(&self, symbol: &str, timeframe: &str, quote: Quote) -> Result<TechnicalAnalysis> {
        let series = self.store.fetch(symbol, timeframe);
        if series.is_empty() {
            debug!(
                "No candles for symbol {} at {} - cannot compute analysis",
                symbol, timeframe
            );
        }
        self.analyze_series(symbol, timeframe, &series, quote)
    }

    /// Analyze an already fetched series.
    pub fn analyze_series(
        &self,
        symbol: &str,
        timeframe: &str,
        series: &[Candle],
        quote: Quote,
    ) -> Result<TechnicalAnalysis> {
        let latest = series.last().ok_or_else(|| {
            AnalysisError::InsufficientData(format!("no candles for {} at {}", symbol, timeframe))
        })?;

        debug!(
            "Computing analysis for {} at {} with {} candles",
            symbol,
            timeframe,
            series.len()
        );

        let fibonacci = self.swing.compute_levels(series)?;
        let bollinger = self.bands.snapshot(latest, quote.price);
        let fibonacci_signal = self.fib_position.analyze_position(quote.price, &fibonacci);
        let key_levels = self.fib_position.key_levels(quote.price, &fibonacci);
        let rsi = self.rsi.classify(latest.rsi);

        let confluence = self.scorer.score(&ConfluenceInput {
            rsi: rsi.as_ref().map(|r| r.value),
            band_signal: Some(bollinger.signal.clone()),
            fibonacci_signal: Some(fibonacci_signal.clone()),
            change_24h: quote.change_24h,
        });

        debug!(
            "{} {}: {} ({}%), buy {} / sell {}",
            symbol,
            timeframe,
            confluence.action.label(),
            confluence.confidence,
            confluence.scores.buy,
            confluence.scores.sell
        );

        Ok(TechnicalAnalysis {
            symbol: symbol.to_uppercase(),
            timeframe: timeframe.to_string(),
            quote,
            confluence,
            rsi,
            trend_signal: fibonacci.trend.signal(),
            fibonacci,
            fibonacci_signal,
            key_levels,
            bollinger,
            moving_averages: analyze_cross(latest),
            candles: series.len(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::series_store::InMemorySeriesStore;
    use crate::types::{Action, SignalKind, Trend};

    fn service(store: Arc<InMemorySeriesStore>) -> AnalysisService {
        AnalysisService::new(store, SignalPolicy::default(), 100)
    }

    /// Rally from 100 to 200, then a pullback to 161.8 with oversold RSI at the lower band.
    fn pullback_series() -> Vec<Candle> {
        let mut candles: Vec<Candle> = (0..=10)
            .map(|i| Candle::from_close(i * 3_600_000, 100.0 + i as f64 * 10.0))
            .collect();
        candles.push(
            Candle::from_close(11 * 3_600_000, 161.8)
                .with_rsi(25.0)
                .with_bands(200.0, 180.0, 160.0)
                .with_moving_averages(170.0, 150.0),
        );
        candles
    }

    #[test]
    fn test_empty_series_is_insufficient_data() {
        let service = service(InMemorySeriesStore::new());
        let result = service.analyze("btc", "1h", Quote { price: 100.0, change_24h: 0.0 });
        assert!(result.unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_pullback_produces_buy() {
        let store = InMemorySeriesStore::new();
        store.set_series("btc", "1h", pullback_series());
        let service = service(store);

        let analysis = service
            .analyze("btc", "1h", Quote { price: 161.8, change_24h: 6.0 })
            .unwrap();

        assert_eq!(analysis.symbol, "BTC");
        assert_eq!(analysis.candles, 12);
        assert_eq!(analysis.fibonacci.trend, Trend::Uptrend);
        assert_eq!(analysis.trend_signal.kind, SignalKind::Buy);
        assert_eq!(analysis.bollinger.signal.kind, SignalKind::Buy);
        assert_eq!(analysis.fibonacci_signal.kind, SignalKind::Buy);
        assert_eq!(analysis.moving_averages.signal.kind, SignalKind::Buy);
        assert_eq!(analysis.confluence.action, Action::Buy);
        assert_eq!(analysis.confluence.confidence, 100);
        assert!(analysis.key_levels[4].near_price);
    }

    #[test]
    fn test_missing_indicators_degrade_to_hold() {
        let store = InMemorySeriesStore::new();
        store.set_series(
            "eth",
            "1h",
            vec![Candle::from_close(0, 100.0), Candle::from_close(1, 110.0), Candle::from_close(2, 105.0)],
        );
        let service = service(store);

        let analysis = service
            .analyze("eth", "1h", Quote { price: 103.0, change_24h: 1.0 })
            .unwrap();

        assert!(analysis.rsi.is_none());
        assert_eq!(analysis.bollinger.signal.reason, "insufficient data");
        assert_eq!(analysis.confluence.action, Action::Hold);
        assert_eq!(analysis.confluence.confidence, 0);
    }

    #[test]
    fn test_analysis_serializes_camel_case() {
        let service = service(InMemorySeriesStore::new());
        let analysis = service
            .analyze_series("btc", "1h", &pullback_series(), Quote { price: 161.8, change_24h: 0.0 })
            .unwrap();

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["confluence"]["action"], "BUY");
        assert_eq!(json["fibonacci"]["trend"], "UPTREND");
        assert_eq!(json["fibonacci"]["levels"].as_array().unwrap().len(), 7);
        assert!(json["keyLevels"].is_array());
        assert!(json["movingAverages"]["spreadPct"].is_number());
    }
}
