//! Linearly Weighted Moving Average (WMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError, Input};
use crate::window::RollingWeighted;

/// Weighted mean where the newest observation carries weight `period`.
#[derive(Debug, Clone)]
pub struct Wma<I = Decimal> {
    period: usize,
    window: RollingWeighted,
    marker: PhantomData<I>,
}

impl<I> Wma<I>
where
    I: Input,
{
    /// Creates a new WMA with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let window = RollingWeighted::new(period)
            .map_err(|_| IndicatorError::invalid_period("WMA", period))?;
        Ok(Self {
            period,
            window,
            marker: PhantomData,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl<I> Indicator for Wma<I>
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

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::Wma;
    use crate::Indicator;

    #[test]
    fn weights_recent_values_more() {
        let mut wma = Wma::new(2).unwrap();
        assert_eq!(wma.next(dec!(3)), None);
        // (3 * 1 + 6 * 2) / 3
        assert_eq!(wma.next(dec!(6)), Some(dec!(5)));
        assert_eq!(wma.next(dec!(9)), Some(dec!(8)));
    }
}
