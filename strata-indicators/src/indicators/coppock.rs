//! Coppock curve.

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::{ema::Ema, roc::Roc};

/// Coppock values for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoppockOutput {
    /// Short rate of change.
    pub short_roc: Decimal,
    /// Long rate of change.
    pub long_roc: Decimal,
    /// Exponential smoothing of the summed rates of change.
    pub curve: Decimal,
}

/// Coppock curve: exponential smoothing of the sum of two rates of change.
///
/// The smoothing is seeded with the first row where both rates are defined; rows
/// whose reference price is zero are skipped.
#[derive(Debug, Clone)]
pub struct Coppock {
    short: Roc,
    long: Roc,
    smoothing: Ema,
}

impl Coppock {
    /// Create the curve from the two ROC lookbacks and the smoothing span.
    pub fn new(
        short_period: usize,
        long_period: usize,
        smoothing_span: usize,
    ) -> Result<Self, IndicatorError> {
        for period in [short_period, long_period, smoothing_span] {
            if period == 0 {
                return Err(IndicatorError::invalid_period("Coppock", period));
            }
        }
        Ok(Self {
            short: Roc::new(short_period)?,
            long: Roc::new(long_period)?,
            smoothing: Ema::new(smoothing_span)?,
        })
    }
}

impl Indicator for Coppock {
    type Input = Decimal;
    type Output = CoppockOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let short_roc = self.short.next(input);
        let long_roc = self.long.next(input);
        let (short_roc, long_roc) = short_roc.zip(long_roc)?;
        let curve = self.smoothing.next(short_roc + long_roc)?;
        Some(CoppockOutput {
            short_roc,
            long_roc,
            curve,
        })
    }

    fn reset(&mut self) {
        self.short.reset();
        self.long.reset();
        self.smoothing.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn waits_for_longest_rate_of_change() {
        let mut coppock = Coppock::new(1, 2, 3).unwrap();
        assert!(coppock.next(dec!(100)).is_none());
        assert!(coppock.next(dec!(110)).is_none());
        let first = coppock.next(dec!(121)).unwrap();
        assert_eq!(first.short_roc, dec!(10));
        assert_eq!(first.long_roc, dec!(21));
        assert_eq!(first.curve, dec!(31));

        // short 0%, long 10% -> sum 10, ema alpha 0.5 -> 20.5
        let second = coppock.next(dec!(121)).unwrap();
        assert_eq!(second.curve, dec!(20.5));
    }
}
