//! Mass Index.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{ratio, Indicator, IndicatorError};
use crate::indicators::ema::Ema;
use crate::window::RollingSum;

/// Rolling sum of `EMA(range) / EMA(EMA(range))` over the high/low range.
///
/// A zero double-smoothed range leaves that row's ratio undefined, and the sum
/// stays undefined until the window no longer contains it.
#[derive(Debug, Clone)]
pub struct MassIndex {
    single: Ema,
    double: Ema,
    sum: RollingSum,
}

impl MassIndex {
    /// Create a mass index with the EMA span and the summation period.
    pub fn new(ema_span: usize, sum_period: usize) -> Result<Self, IndicatorError> {
        let single =
            Ema::new(ema_span).map_err(|_| IndicatorError::invalid_period("MassIndex", ema_span))?;
        let double = Ema::new(ema_span)?;
        let sum = RollingSum::new(sum_period)
            .map_err(|_| IndicatorError::invalid_parameter("MassIndex", "sum_period", sum_period))?;
        Ok(Self {
            single,
            double,
            sum,
        })
    }

    /// Feed a raw high/low pair.
    pub fn update(&mut self, high: Decimal, low: Decimal) -> Option<Decimal> {
        let single = self.single.next(high - low)?;
        let double = self.double.next(single)?;
        match ratio(single, double) {
            Some(value) => {
                self.sum.push(value);
                self.sum.sum()
            }
            None => {
                self.sum.clear();
                None
            }
        }
    }
}

impl Indicator for MassIndex {
    type Input = Candle;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.update(input.high, input.low)
    }

    fn reset(&mut self) {
        self.single.reset();
        self.double.reset();
        self.sum.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::flat_candle;
    use rust_decimal_macros::dec;

    #[test]
    fn constant_range_sums_unit_ratios() {
        let mut mass = MassIndex::new(9, 3).unwrap();
        assert_eq!(mass.next(flat_candle(dec!(10), dec!(1))), None);
        assert_eq!(mass.next(flat_candle(dec!(11), dec!(1))), None);
        assert_eq!(mass.next(flat_candle(dec!(12), dec!(1))), Some(dec!(3)));
    }

    #[test]
    fn zero_range_is_undefined() {
        let mut mass = MassIndex::new(2, 1).unwrap();
        assert_eq!(mass.update(dec!(5), dec!(5)), None);
        let value = mass.update(dec!(6), dec!(4)).unwrap();
        assert_eq!(value.round_dp(10), dec!(1.5));
    }
}
