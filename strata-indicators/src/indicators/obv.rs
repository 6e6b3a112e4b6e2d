//! On-Balance Volume.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::Indicator;

/// Running volume total signed by the direction of each close.
#[derive(Debug, Clone, Default)]
pub struct Obv {
    prev_close: Option<Decimal>,
    total: Decimal,
}

impl Obv {
    /// Start a fresh running total at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Indicator for Obv {
    type Input = Candle;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        if let Some(prev_close) = self.prev_close {
            match input.close.cmp(&prev_close) {
                Ordering::Greater => self.total += input.volume,
                Ordering::Less => self.total -= input.volume,
                Ordering::Equal => {}
            }
        }
        self.prev_close = Some(input.close);
        Some(self.total)
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.total = Decimal::ZERO;
    }

    // The first row after a gap has no previous close to compare against.
    fn skip(&mut self) {
        self.prev_close = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candle_with_volume;
    use rust_decimal_macros::dec;

    fn bar(close: Decimal, volume: Decimal) -> Candle {
        candle_with_volume(close, close, close, close, volume)
    }

    #[test]
    fn starts_at_zero_and_signs_volume() {
        let mut obv = Obv::new();
        assert_eq!(obv.next(bar(dec!(10), dec!(100))), Some(Decimal::ZERO));
        assert_eq!(obv.next(bar(dec!(11), dec!(50))), Some(dec!(50)));
        assert_eq!(obv.next(bar(dec!(9), dec!(20))), Some(dec!(30)));
        assert_eq!(obv.next(bar(dec!(9), dec!(70))), Some(dec!(30)));
    }

    #[test]
    fn gap_keeps_the_total_but_not_the_previous_close() {
        let mut obv = Obv::new();
        obv.next(bar(dec!(10), dec!(100)));
        obv.next(bar(dec!(11), dec!(50)));
        obv.skip();
        assert_eq!(obv.next(bar(dec!(5), dec!(40))), Some(dec!(50)));
        assert_eq!(obv.next(bar(dec!(6), dec!(10))), Some(dec!(60)));
    }
}
