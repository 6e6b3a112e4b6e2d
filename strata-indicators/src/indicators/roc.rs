//! Rate of Change.

use std::collections::VecDeque;
use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{ensure_period, percent_change, Indicator, IndicatorError, Input};

/// Percentage change against the value `period` rows earlier.
///
/// Undefined while fewer than `period` earlier rows exist and whenever the
/// reference value is zero.
#[derive(Debug, Clone)]
pub struct Roc<I = Decimal> {
    period: usize,
    history: VecDeque<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Roc<I>
where
    I: Input,
{
    /// Create a rate of change over `period` rows.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let period = ensure_period("ROC", period)?;
        Ok(Self {
            period,
            history: VecDeque::new(),
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for Roc<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        self.history.push_back(value);
        if self.history.len() <= self.period {
            return None;
        }
        let reference = self.history.pop_front()?;
        percent_change(value, reference)
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}
