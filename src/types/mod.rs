pub mod analysis;
pub mod candle;
pub mod signals;

pub use analysis::*;
pub use candle::*;
pub use signals::*;
