//! Rolling linear-regression slope.

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError, Input};
use crate::window::RollingSlope;

/// Least-squares slope of the trailing `period` values per row. A one-row window
/// has no slope, so every output is undefined for `period == 1`.
#[derive(Debug, Clone)]
pub struct LinRegSlope<I = Decimal> {
    window: RollingSlope,
    marker: PhantomData<I>,
}

impl<I> LinRegSlope<I>
where
    I: Input,
{
    /// Create a slope estimator over `period` rows.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let window = RollingSlope::new(period)
            .map_err(|_| IndicatorError::invalid_period("LinRegSlope", period))?;
        Ok(Self {
            window,
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for LinRegSlope<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.window.push(input.value());
        self.window.slope()
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
