//! Average True Range indicator implementation.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::true_range::TrueRange;
use crate::window::RollingSum;

/// Average True Range: rolling arithmetic mean of the true range.
#[derive(Debug, Clone)]
pub struct Atr {
    true_range: TrueRange,
    window: RollingSum,
}

impl Atr {
    /// Create a new ATR indicator with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let window =
            RollingSum::new(period).map_err(|_| IndicatorError::invalid_period("ATR", period))?;
        Ok(Self {
            true_range: TrueRange::new(),
            window,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.window.period()
    }
}

impl Indicator for Atr {
    type Input = Candle;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let tr = self.true_range.next(input)?;
        self.window.push(tr);
        self.window.mean()
    }

    fn reset(&mut self) {
        self.true_range.reset();
        self.window.clear();
    }
}
