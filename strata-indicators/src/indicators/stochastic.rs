//! Stochastic oscillator (%K) smoothed by a rolling mean.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{ratio, Indicator, IndicatorError};
use crate::indicators::donchian::Donchian;
use crate::window::RollingSum;

/// Smoothed `%K = 100 * (close − lowest low) / (highest high − lowest low)`.
///
/// A flat lookback range leaves the raw %K undefined, and any smoothing window
/// that contains an undefined raw value is undefined as well.
#[derive(Debug, Clone)]
pub struct Stochastic {
    channel: Donchian,
    smoothing: RollingSum,
}

impl Stochastic {
    /// Create a stochastic oscillator with a lookback and smoothing length.
    pub fn new(period: usize, smoothing: usize) -> Result<Self, IndicatorError> {
        let channel =
            Donchian::new(period).map_err(|_| IndicatorError::invalid_period("Stochastic", period))?;
        let smoothing = RollingSum::new(smoothing)
            .map_err(|_| IndicatorError::invalid_parameter("Stochastic", "smoothing", smoothing))?;
        Ok(Self { channel, smoothing })
    }

    fn raw_k(close: Decimal, highest: Decimal, lowest: Decimal) -> Option<Decimal> {
        ratio(close - lowest, highest - lowest).map(|k| k * Decimal::ONE_HUNDRED)
    }
}

impl Indicator for Stochastic {
    type Input = Candle;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let channel = self.channel.next(input)?;
        match Self::raw_k(input.close, channel.upper, channel.lower) {
            Some(k) => {
                self.smoothing.push(k);
                self.smoothing.mean()
            }
            None => {
                self.smoothing.clear();
                None
            }
        }
    }

    fn reset(&mut self) {
        self.channel.reset();
        self.smoothing.clear();
    }
}
