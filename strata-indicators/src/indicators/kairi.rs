//! Kairi Relative Index.

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{percent_change, Indicator, IndicatorError, Input};
use crate::indicators::sma::Sma;

/// Percentage deviation of the input from its simple moving average.
/// Undefined when the average is zero.
#[derive(Debug, Clone)]
pub struct Kairi<I = Decimal> {
    sma: Sma,
    marker: PhantomData<I>,
}

impl<I> Kairi<I>
where
    I: Input,
{
    /// Create the index over `period` rows.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let sma = Sma::new(period).map_err(|_| IndicatorError::invalid_period("Kairi", period))?;
        Ok(Self {
            sma,
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for Kairi<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let average = self.sma.next(value)?;
        percent_change(value, average)
    }

    fn reset(&mut self) {
        self.sma.reset();
    }
}
