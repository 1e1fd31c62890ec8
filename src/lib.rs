//! Confluence - multi-indicator trading signal engine
//!
//! Combines RSI, Bollinger Band position, Fibonacci retracement position and
//! 24h momentum into a single BUY / SELL / HOLD call with a confidence score
//! and the reasons behind it.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{AnalysisError, Result};
pub use services::{AnalysisService, ConfluenceInput, ConfluenceScorer, InMemorySeriesStore, SeriesStore};
pub use types::*;
