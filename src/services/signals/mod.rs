//! Trading signal analyzers.
//!
//! Each analyzer is a pure function of the candles and quote it is handed.
//! The confluence scorer combines their outputs into a single action.

pub mod bollinger;
pub mod confluence;
pub mod fib_position;
pub mod moving_average;
pub mod rsi;
pub mod swing;

pub use bollinger::BandPositionAnalyzer;
pub use confluence::{ConfluenceInput, ConfluenceScorer, MAX_SCORE};
pub use fib_position::{is_near, FibonacciPositionAnalyzer};
pub use moving_average::analyze_cross;
pub use rsi::RsiClassifier;
pub use swing::{compute_levels, SwingFibonacciAnalyzer};
