//! True Range, the volatility building block behind ATR, ADX and Supertrend.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::Indicator;

/// Emits `max(high − low, |high − prev close|, |low − prev close|)` per candle.
///
/// The first candle has no previous close, so its range is `high − low`.
#[derive(Debug, Clone, Default)]
pub struct TrueRange {
    prev_close: Option<Decimal>,
}

impl TrueRange {
    /// Create a fresh true-range tracker.
    pub fn new() -> Self {
        Self::default()
    }
}

/// True range of a candle against an optional previous close.
pub(crate) fn true_range(candle: &Candle, prev_close: Option<Decimal>) -> Decimal {
    let high_low = candle.high - candle.low;
    match prev_close {
        Some(prev_close) => {
            let high_close = (candle.high - prev_close).abs();
            let low_close = (candle.low - prev_close).abs();
            high_low.max(high_close).max(low_close)
        }
        None => high_low,
    }
}

impl Indicator for TrueRange {
    type Input = Candle;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let tr = true_range(&input, self.prev_close);
        self.prev_close = Some(input.close);
        Some(tr)
    }

    fn reset(&mut self) {
        self.prev_close = None;
    }
}
