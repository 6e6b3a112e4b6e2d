//! Moving Average Convergence Divergence indicator implementation.

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// MACD output (line, signal line, and histogram).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdOutput {
    /// MACD line value (fast EMA minus slow EMA).
    pub macd: Decimal,
    /// Signal line value (EMA of the MACD line).
    pub signal: Decimal,
    /// Histogram representing the distance between MACD and signal lines.
    pub histogram: Decimal,
}

/// Moving Average Convergence Divergence indicator.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a MACD indicator with custom fast/slow/signal spans.
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, IndicatorError> {
        for period in [fast_period, slow_period, signal_period] {
            if period == 0 {
                return Err(IndicatorError::invalid_period("MACD", period));
            }
        }
        Ok(Self {
            fast: Ema::new(fast_period)?,
            slow: Ema::new(slow_period)?,
            signal: Ema::new(signal_period)?,
        })
    }
}

impl Indicator for Macd {
    type Input = Decimal;
    type Output = MacdOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let macd = self.fast.next(input)? - self.slow.next(input)?;
        let signal = self.signal.next(macd)?;
        Some(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
    }

    fn skip(&mut self) {}
}
