//! Heikin-Ashi candle derivation.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::Indicator;

/// Derives Heikin-Ashi candles; timestamp and volume are carried over unchanged.
///
/// `ha_close` averages the four prices, `ha_open` starts at the midpoint of the
/// first open/close and then averages the previous Heikin-Ashi open and close.
#[derive(Debug, Clone, Default)]
pub struct HeikinAshi {
    prev: Option<(Decimal, Decimal)>,
}

impl HeikinAshi {
    /// Create a fresh derivation pass.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for HeikinAshi {
    type Input = Candle;
    type Output = Candle;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let close = (input.open + input.high + input.low + input.close) / Decimal::from(4);
        let open = match self.prev {
            Some((prev_open, prev_close)) => (prev_open + prev_close) / Decimal::TWO,
            None => (input.open + input.close) / Decimal::TWO,
        };
        self.prev = Some((open, close));
        Some(Candle {
            timestamp: input.timestamp,
            open,
            high: input.high.max(open).max(close),
            low: input.low.min(open).min(close),
            close,
            volume: input.volume,
        })
    }

    fn reset(&mut self) {
        self.prev = None;
    }

    fn skip(&mut self) {}
}
