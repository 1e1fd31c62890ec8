use crate::error::Result;
use crate::types::Candle;
use dashmap::DashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of candles retained per series.
const DEFAULT_MAX_CANDLES: usize = 1_000;

/// Source of annotated candle series.
///
/// Implementations return an owned, time-ascending snapshot so the analyzers
/// never observe a series that is mutated mid-computation.
pub trait SeriesStore: Send + Sync {
    fn fetch(&self, symbol: &str, timeframe: &str) -> Vec<Candle>;
}

/// In-memory series store keyed by symbol and timeframe.
pub struct InMemorySeriesStore {
    /// Key format: "{symbol}:{timeframe}", symbol lowercased.
    data: DashMap<String, Vec<Candle>>,
    max_candles: usize,
}

impl InMemorySeriesStore {
    /// Create a new series store.
    pub fn new() -> Arc<Self> {
        Self::with_capacity(DEFAULT_MAX_CANDLES)
    }

    /// Create a store retaining at most `max_candles` per series.
    pub fn with_capacity(max_candles: usize) -> Arc<Self> {
        Arc::new(Self {
            data: DashMap::new(),
            max_candles: max_candles.max(1),
        })
    }

    fn key(symbol: &str, timeframe: &str) -> String {
        format!("{}:{}", symbol.to_lowercase(), timeframe)
    }

    /// Replace a whole series. Candles are sorted by time before storing.
    pub fn set_series(&self, symbol: &str, timeframe: &str, mut candles: Vec<Candle>) {
        candles.sort_by_key(|c| c.time);
        if candles.len() > self.max_candles {
            candles.drain(..candles.len() - self.max_candles);
        }
        debug!(
            "Stored {} candles for {} at {}",
            candles.len(),
            symbol,
            timeframe
        );
        self.data.insert(Self::key(symbol, timeframe), candles);
    }

    /// Append a candle. A candle with the same time as the last one replaces it;
    /// an older candle is dropped.
    pub fn push(&self, symbol: &str, timeframe: &str, candle: Candle) {
        let mut entry = self.data.entry(Self::key(symbol, timeframe)).or_default();
        let series = entry.value_mut();

        if let Some(last) = series.last_mut() {
            if candle.time == last.time {
                *last = candle;
                return;
            }
            if candle.time < last.time {
                warn!(
                    "Dropping out-of-order candle for {} at {} ({} < {})",
                    symbol, timeframe, candle.time, last.time
                );
                return;
            }
        }

        series.push(candle);
        while series.len() > self.max_candles {
            series.remove(0);
        }
    }

    /// Number of candles held for a series.
    pub fn len(&self, symbol: &str, timeframe: &str) -> usize {
        self.data
            .get(&Self::key(symbol, timeframe))
            .map(|s| s.len())
            .unwrap_or(0)
    }

    /// Remove a series.
    pub fn remove(&self, symbol: &str, timeframe: &str) -> Option<Vec<Candle>> {
        self.data
            .remove(&Self::key(symbol, timeframe))
            .map(|(_, series)| series)
    }

    /// Load a JSON array of candles from disk into the store.
    pub async fn load_json_file(
        &self,
        symbol: &str,
        timeframe: &str,
        path: impl AsRef<Path>,
    ) -> Result<usize> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let candles: Vec<Candle> = serde_json::from_str(&raw)?;
        let count = candles.len();
        self.set_series(symbol, timeframe, candles);
        Ok(count)
    }
}

impl SeriesStore for InMemorySeriesStore {
    fn fetch(&self, symbol: &str, timeframe: &str) -> Vec<Candle> {
        self.data
            .get(&Self::key(symbol, timeframe))
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, close: f64) -> Candle {
        Candle::from_close(time, close)
    }

    #[test]
    fn test_fetch_unknown_series_is_empty() {
        let store = InMemorySeriesStore::new();
        assert!(store.fetch("btc", "1h").is_empty());
    }

    #[test]
    fn test_symbol_lookup_is_case_insensitive() {
        let store = InMemorySeriesStore::new();
        store.set_series("BTC", "1h", vec![candle(1, 100.0)]);
        assert_eq!(store.fetch("btc", "1h").len(), 1);
        assert!(store.fetch("btc", "4h").is_empty());
    }

    #[test]
    fn test_set_series_sorts_by_time() {
        let store = InMemorySeriesStore::new();
        store.set_series("eth", "1h", vec![candle(3, 3.0), candle(1, 1.0), candle(2, 2.0)]);
        let closes: Vec<f64> = store.fetch("eth", "1h").iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_push_replaces_same_time_and_drops_older() {
        let store = InMemorySeriesStore::new();
        store.push("sol", "1h", candle(10, 1.0));
        store.push("sol", "1h", candle(10, 2.0));
        store.push("sol", "1h", candle(5, 9.0));
        store.push("sol", "1h", candle(20, 3.0));

        let series = store.fetch("sol", "1h");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].close, 2.0);
        assert_eq!(series[1].close, 3.0);
    }

    #[test]
    fn test_retention_keeps_most_recent() {
        let store = InMemorySeriesStore::with_capacity(3);
        for i in 0..5 {
            store.push("btc", "1h", candle(i, i as f64));
        }
        let series = store.fetch("btc", "1h");
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].close, 2.0);
        assert_eq!(store.len("btc", "1h"), 3);

        let long: Vec<Candle> = (0..10).map(|i| candle(i, i as f64)).collect();
        store.set_series("btc", "1h", long);
        assert_eq!(store.fetch("btc", "1h")[0].close, 7.0);
    }

    #[test]
    fn test_fetch_returns_snapshot() {
        let store = InMemorySeriesStore::new();
        store.set_series("btc", "1h", vec![candle(1, 100.0)]);
        let snapshot = store.fetch("btc", "1h");
        store.push("btc", "1h", candle(2, 200.0));
        assert_eq!(snapshot.len(), 1);
        assert!(store.remove("btc", "1h").is_some());
        assert_eq!(store.len("btc", "1h"), 0);
    }

    #[tokio::test]
    async fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("confluence-series-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"[{"time":2,"close":11.0},{"time":1,"close":10.0,"rsi":40.0}]"#)
            .await
            .unwrap();

        let store = InMemorySeriesStore::new();
        let count = store.load_json_file("btc", "1h", &path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(count, 2);
        let series = store.fetch("btc", "1h");
        assert_eq!(series[0].rsi, Some(40.0));
        assert_eq!(series[1].close, 11.0);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let store = InMemorySeriesStore::new();
        let result = store
            .load_json_file("btc", "1h", "/nonexistent/confluence/series.json")
            .await;
        assert!(matches!(result, Err(crate::error::AnalysisError::Io(_))));
    }
}
