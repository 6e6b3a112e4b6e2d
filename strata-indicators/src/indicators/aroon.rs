//! Aroon Up / Aroon Down.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{decimal_from_usize, Indicator, IndicatorError};
use crate::window::RollingExtremum;

/// Aroon values, both in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AroonOutput {
    /// `100 * (period − rows since highest high) / period`.
    pub up: Decimal,
    /// `100 * (period − rows since lowest low) / period`.
    pub down: Decimal,
}

/// Aroon indicator over `period` rows.
///
/// The extremes are searched over the current row plus the `period` rows before
/// it, so the first value appears on row `period`. When an extreme repeats, the
/// most recent occurrence counts.
#[derive(Debug, Clone)]
pub struct Aroon {
    period: Decimal,
    highest: RollingExtremum,
    lowest: RollingExtremum,
}

impl Aroon {
    /// Create an Aroon indicator.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let window = period
            .checked_add(1)
            .filter(|_| period > 0)
            .ok_or_else(|| IndicatorError::invalid_period("Aroon", period))?;
        Ok(Self {
            period: decimal_from_usize(period),
            highest: RollingExtremum::highest(window)?,
            lowest: RollingExtremum::lowest(window)?,
        })
    }

    fn score(&self, age: usize) -> Decimal {
        (self.period - decimal_from_usize(age)) * Decimal::ONE_HUNDRED / self.period
    }
}

impl Indicator for Aroon {
    type Input = Candle;
    type Output = AroonOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.highest.push(input.high);
        self.lowest.push(input.low);
        let up = self.score(self.highest.age()?);
        let down = self.score(self.lowest.age()?);
        Some(AroonOutput { up, down })
    }

    fn reset(&mut self) {
        self.highest.clear();
        self.lowest.clear();
    }
}
