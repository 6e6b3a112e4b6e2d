//! Klinger Volume Oscillator.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// Per-row KVO values together with the money-flow terms they derive from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KvoOutput {
    /// `((close − low) − (high − close)) / (high − low)`, zero for a flat bar.
    pub money_flow_multiplier: Decimal,
    /// Multiplier times volume.
    pub money_flow_volume: Decimal,
    /// Short EMA minus long EMA of the money-flow volume.
    pub kvo: Decimal,
}

/// Klinger Volume Oscillator over short/long exponential spans.
#[derive(Debug, Clone)]
pub struct Kvo {
    short: Ema,
    long: Ema,
}

impl Kvo {
    /// Create the oscillator with the provided short and long spans.
    pub fn new(short_period: usize, long_period: usize) -> Result<Self, IndicatorError> {
        for period in [short_period, long_period] {
            if period == 0 {
                return Err(IndicatorError::invalid_period("KVO", period));
            }
        }
        Ok(Self {
            short: Ema::new(short_period)?,
            long: Ema::new(long_period)?,
        })
    }

    /// Money-flow multiplier of a candle; a bar with no range carries no flow.
    pub fn money_flow_multiplier(candle: &Candle) -> Decimal {
        let range = candle.high - candle.low;
        if range.is_zero() {
            return Decimal::ZERO;
        }
        ((candle.close - candle.low) - (candle.high - candle.close)) / range
    }
}

impl Indicator for Kvo {
    type Input = Candle;
    type Output = KvoOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let multiplier = Self::money_flow_multiplier(&input);
        let flow = multiplier * input.volume;
        let kvo = self.short.next(flow)? - self.long.next(flow)?;
        Some(KvoOutput {
            money_flow_multiplier: multiplier,
            money_flow_volume: flow,
            kvo,
        })
    }

    fn reset(&mut self) {
        self.short.reset();
        self.long.reset();
    }

    fn skip(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candle_with_volume;
    use rust_decimal_macros::dec;

    #[test]
    fn flat_bar_has_zero_flow() {
        let mut kvo = Kvo::new(34, 55).unwrap();
        let out = kvo
            .next(candle_with_volume(dec!(5), dec!(5), dec!(5), dec!(5), dec!(1000)))
            .unwrap();
        assert_eq!(out.money_flow_multiplier, Decimal::ZERO);
        assert_eq!(out.money_flow_volume, Decimal::ZERO);
        assert_eq!(out.kvo, Decimal::ZERO);
    }

    #[test]
    fn close_at_high_is_full_buying_pressure() {
        let mut kvo = Kvo::new(1, 3).unwrap();
        let first = kvo
            .next(candle_with_volume(dec!(1), dec!(2), dec!(0), dec!(1), dec!(10)))
            .unwrap();
        assert_eq!(first.money_flow_multiplier, Decimal::ZERO);

        let second = kvo
            .next(candle_with_volume(dec!(1), dec!(2), dec!(0), dec!(2), dec!(10)))
            .unwrap();
        assert_eq!(second.money_flow_multiplier, Decimal::ONE);
        assert_eq!(second.money_flow_volume, dec!(10));
        // short span 1 tracks 10, long span 3 sits at 5
        assert_eq!(second.kvo, dec!(5));
    }
}
