//! Ichimoku Kinko Hyo lines composed from three Donchian midlines.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::donchian::Donchian;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Ichimoku lines for one row; each line is defined once its own lookback is filled.
pub struct IchimokuOutput {
    /// Tenkan-sen line value.
    pub conversion_line: Option<Decimal>,
    /// Kijun-sen line value.
    pub base_line: Option<Decimal>,
    /// Senkou Span A, the mean of the conversion and base lines.
    pub span_a: Option<Decimal>,
    /// Senkou Span B, the midline over the longest lookback.
    pub span_b: Option<Decimal>,
}

/// Ichimoku Cloud indicator implementation.
#[derive(Debug, Clone)]
pub struct Ichimoku {
    conversion: Donchian,
    base: Donchian,
    span_b: Donchian,
}

impl Ichimoku {
    /// Build a new Ichimoku indicator with custom periods.
    pub fn new(
        conversion_period: usize,
        base_period: usize,
        span_b_period: usize,
    ) -> Result<Self, IndicatorError> {
        for period in [conversion_period, base_period, span_b_period] {
            if period == 0 {
                return Err(IndicatorError::invalid_period("Ichimoku", period));
            }
        }
        Ok(Self {
            conversion: Donchian::new(conversion_period)?,
            base: Donchian::new(base_period)?,
            span_b: Donchian::new(span_b_period)?,
        })
    }
}

impl Indicator for Ichimoku {
    type Input = Candle;
    type Output = IchimokuOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let conversion = self.conversion.next(input).map(|out| out.middle);
        let base = self.base.next(input).map(|out| out.middle);
        let span_b = self.span_b.next(input).map(|out| out.middle);
        if conversion.is_none() && base.is_none() && span_b.is_none() {
            return None;
        }
        let span_a = conversion
            .zip(base)
            .map(|(conversion, base)| (conversion + base) / Decimal::TWO);

        Some(IchimokuOutput {
            conversion_line: conversion,
            base_line: base,
            span_a,
            span_b,
        })
    }

    fn reset(&mut self) {
        self.conversion.reset();
        self.base.reset();
        self.span_b.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::flat_candle;
    use rust_decimal_macros::dec;

    #[test]
    fn lines_warm_up_independently() {
        let mut ichi = Ichimoku::new(2, 4, 4).unwrap();
        assert!(ichi.next(flat_candle(dec!(1), dec!(1))).is_none());

        let out = ichi.next(flat_candle(dec!(2), dec!(1))).unwrap();
        // highs 2, 3 / lows 0, 1
        assert_eq!(out.conversion_line, Some(dec!(1.5)));
        assert_eq!(out.base_line, None);
        assert_eq!(out.span_a, None);

        ichi.next(flat_candle(dec!(3), dec!(1)));
        let out = ichi.next(flat_candle(dec!(4), dec!(1))).unwrap();
        assert_eq!(out.conversion_line, Some(dec!(3.5)));
        assert_eq!(out.base_line, Some(dec!(2.5)));
        assert_eq!(out.span_a, Some(dec!(3)));
        assert_eq!(out.span_b, Some(dec!(2.5)));
    }

    #[test]
    fn rejects_zero_periods() {
        assert!(Ichimoku::new(9, 0, 52).is_err());
    }
}
