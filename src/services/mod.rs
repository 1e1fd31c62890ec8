pub mod analysis;
pub mod series_store;
pub mod signals;

pub use analysis::AnalysisService;
pub use series_store::{InMemorySeriesStore, SeriesStore};
pub use signals::{
    BandPositionAnalyzer, ConfluenceInput, ConfluenceScorer, FibonacciPositionAnalyzer,
    RsiClassifier, SwingFibonacciAnalyzer,
};
