//! Simple Moving Average (SMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError, Input};
use crate::window::RollingSum;

/// Computes the arithmetic mean over a rolling window.
#[derive(Debug, Clone)]
pub struct Sma<I = Decimal> {
    window: RollingSum,
    marker: PhantomData<I>,
}

impl<I> Sma<I>
where
    I: Input,
{
    /// Creates a new SMA with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let window =
            RollingSum::new(period).map_err(|_| IndicatorError::invalid_period("SMA", period))?;
        Ok(Self {
            window,
            marker: PhantomData,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.window.period()
    }
}

impl<I> Indicator for Sma<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.window.push(input.value());
        self.window.mean()
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
