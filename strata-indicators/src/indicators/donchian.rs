//! Donchian channel: rolling highest high and lowest low.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::window::RollingExtremum;

/// Channel bounds and midline for a single row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonchianOutput {
    /// Highest high over the window.
    pub upper: Decimal,
    /// Mean of the upper and lower bounds.
    pub middle: Decimal,
    /// Lowest low over the window.
    pub lower: Decimal,
}

/// Donchian channel over `period` candles.
#[derive(Debug, Clone)]
pub struct Donchian {
    highest: RollingExtremum,
    lowest: RollingExtremum,
}

impl Donchian {
    /// Create a channel over the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let invalid = |_| IndicatorError::invalid_period("Donchian", period);
        Ok(Self {
            highest: RollingExtremum::highest(period).map_err(invalid)?,
            lowest: RollingExtremum::lowest(period).map_err(invalid)?,
        })
    }

    /// Feed raw high/low values instead of a candle.
    pub fn update(&mut self, high: Decimal, low: Decimal) -> Option<DonchianOutput> {
        self.highest.push(high);
        self.lowest.push(low);
        let upper = self.highest.value()?;
        let lower = self.lowest.value()?;
        Some(DonchianOutput {
            upper,
            middle: (upper + lower) / Decimal::TWO,
            lower,
        })
    }
}

impl Indicator for Donchian {
    type Input = Candle;
    type Output = DonchianOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.update(input.high, input.low)
    }

    fn reset(&mut self) {
        self.highest.clear();
        self.lowest.clear();
    }
}
