//! Supertrend trend-following line.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::atr::Atr;

/// Supertrend values for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupertrendOutput {
    /// Average true range the bands are built from.
    pub atr: Decimal,
    /// `hl2 + factor * ATR`.
    pub upper_band: Decimal,
    /// `hl2 − factor * ATR`.
    pub lower_band: Decimal,
    /// The trend line.
    pub trend: Decimal,
}

/// Supertrend over an ATR lookback and band factor.
///
/// The trend line is a strictly sequential recurrence: the first defined row takes
/// the upper band, and every later row takes the upper band when the close is above
/// the previous trend value and the lower band otherwise.
#[derive(Debug, Clone)]
pub struct Supertrend {
    atr: Atr,
    factor: Decimal,
    prev_trend: Option<Decimal>,
}

impl Supertrend {
    /// Create a Supertrend with the ATR period and band multiplier.
    pub fn new(atr_period: usize, factor: Decimal) -> Result<Self, IndicatorError> {
        let atr = Atr::new(atr_period)
            .map_err(|_| IndicatorError::invalid_period("Supertrend", atr_period))?;
        if factor.is_sign_negative() {
            return Err(IndicatorError::invalid_parameter(
                "Supertrend",
                "factor",
                factor,
            ));
        }
        Ok(Self {
            atr,
            factor,
            prev_trend: None,
        })
    }
}

impl Indicator for Supertrend {
    type Input = Candle;
    type Output = SupertrendOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let atr = self.atr.next(input)?;
        let offset = self.factor * atr;
        let upper_band = input.hl2() + offset;
        let lower_band = input.hl2() - offset;
        let trend = match self.prev_trend {
            Some(prev) if input.close <= prev => lower_band,
            _ => upper_band,
        };
        self.prev_trend = Some(trend);
        Some(SupertrendOutput {
            atr,
            upper_band,
            lower_band,
            trend,
        })
    }

    fn reset(&mut self) {
        self.atr.reset();
        self.prev_trend = None;
    }
}
