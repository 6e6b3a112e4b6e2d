//! Exponential Moving Average (EMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{ensure_period, span_alpha, Indicator, IndicatorError, Input};

/// Recursive exponential average with `alpha = 2 / (span + 1)`.
///
/// The first observation seeds the average and no bias correction is applied, so
/// a value is produced from the very first row.
#[derive(Debug, Clone)]
pub struct Ema<I = Decimal> {
    alpha: Decimal,
    state: Option<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Ema<I>
where
    I: Input,
{
    /// Creates a new EMA with the provided span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        let span = ensure_period("EMA", span)?;
        Ok(Self {
            alpha: span_alpha(span),
            state: None,
            marker: PhantomData,
        })
    }

    /// Returns the current EMA value, if the indicator has produced one.
    pub fn value(&self) -> Option<Decimal> {
        self.state
    }
}

impl<I> Indicator for Ema<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let next = match self.state {
            Some(current) => (value - current) * self.alpha + current,
            None => value,
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.state = None;
    }

    fn skip(&mut self) {}
}
