//! Bull/Bear Power.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// Bull and bear power for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BullBearPowerOutput {
    /// High minus the close EMA.
    pub bull: Decimal,
    /// Low minus the close EMA.
    pub bear: Decimal,
    /// Sum of both powers.
    pub power: Decimal,
}

/// Distance of the candle extremes from an exponential average of the close.
#[derive(Debug, Clone)]
pub struct BullBearPower {
    ema: Ema,
}

impl BullBearPower {
    /// Create the indicator with the close EMA span.
    pub fn new(span: usize) -> Result<Self, IndicatorError> {
        let ema = Ema::new(span).map_err(|_| IndicatorError::invalid_period("BullBearPower", span))?;
        Ok(Self { ema })
    }
}

impl Indicator for BullBearPower {
    type Input = Candle;
    type Output = BullBearPowerOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let average = self.ema.next(input.close)?;
        let bull = input.high - average;
        let bear = input.low - average;
        Some(BullBearPowerOutput {
            bull,
            bear,
            power: bull + bear,
        })
    }

    fn reset(&mut self) {
        self.ema.reset();
    }

    fn skip(&mut self) {}
}
