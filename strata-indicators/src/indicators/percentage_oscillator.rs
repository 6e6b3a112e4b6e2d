//! Percentage Price Oscillator.

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{percent_change, Indicator, IndicatorError, Input};
use crate::indicators::ema::Ema;

/// `(EMA_short − EMA_long) / EMA_long * 100`; undefined when the long average is zero.
#[derive(Debug, Clone)]
pub struct PercentageOscillator<I = Decimal> {
    short: Ema,
    long: Ema,
    marker: PhantomData<I>,
}

impl<I> PercentageOscillator<I>
where
    I: Input,
{
    /// Create the oscillator from two EMA spans.
    pub fn new(short_span: usize, long_span: usize) -> Result<Self, IndicatorError> {
        for span in [short_span, long_span] {
            if span == 0 {
                return Err(IndicatorError::invalid_period("PercentageOscillator", span));
            }
        }
        Ok(Self {
            short: Ema::new(short_span)?,
            long: Ema::new(long_span)?,
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for PercentageOscillator<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let short = self.short.next(value)?;
        let long = self.long.next(value)?;
        percent_change(short, long)
    }

    fn reset(&mut self) {
        self.short.reset();
        self.long.reset();
    }

    fn skip(&mut self) {}
}
