//! Domain types shared by every Strata crate: candles, column identifiers and the
//! time-series table indicators are evaluated over.

mod candle;
mod field;
mod frame;

pub use candle::Candle;
pub use field::Field;
pub use frame::{Column, Frame, FrameError};
