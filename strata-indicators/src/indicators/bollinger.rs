//! Bollinger Bands indicator built on top of SMA and standard deviation.

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError, Input};
use crate::window::RollingVariance;

/// Output value of the Bollinger Bands indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBandsOutput {
    /// Upper band (mean + k * std dev).
    pub upper: Decimal,
    /// Middle band (rolling mean).
    pub middle: Decimal,
    /// Lower band (mean - k * std dev).
    pub lower: Decimal,
}

/// Produces Bollinger Bands from a rolling window.
///
/// The deviation is the sample standard deviation (N − 1 divisor), so a
/// single-row window never produces bands.
#[derive(Debug, Clone)]
pub struct BollingerBands<I = Decimal> {
    std_multiplier: Decimal,
    window: RollingVariance,
    marker: PhantomData<I>,
}

impl<I> BollingerBands<I>
where
    I: Input,
{
    /// Creates a new Bollinger Bands indicator.
    pub fn new(period: usize, std_multiplier: Decimal) -> Result<Self, IndicatorError> {
        let window = RollingVariance::new(period)
            .map_err(|_| IndicatorError::invalid_period("BollingerBands", period))?;
        if std_multiplier.is_sign_negative() {
            return Err(IndicatorError::invalid_parameter(
                "BollingerBands",
                "std_multiplier",
                std_multiplier,
            ));
        }

        Ok(Self {
            std_multiplier,
            window,
            marker: PhantomData,
        })
    }
}

impl<I> Indicator for BollingerBands<I>
where
    I: Input,
{
    type Input = I;
    type Output = BollingerBandsOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.window.push(input.value());
        let middle = self.window.mean()?;
        let offset = self.std_multiplier.checked_mul(self.window.sample_std_dev()?)?;
        Some(BollingerBandsOutput {
            upper: middle.checked_add(offset)?,
            middle,
            lower: middle.checked_sub(offset)?,
        })
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}
