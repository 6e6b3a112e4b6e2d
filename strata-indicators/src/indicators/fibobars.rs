//! Fibonacci-bars trend state machine.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::donchian::Donchian;

/// Direction emitted by trend-following state machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendDirection {
    /// Uptrend, reported as `+1`.
    Up,
    /// Downtrend, reported as `-1`.
    Down,
}

impl TrendDirection {
    /// `+1` for an uptrend, `-1` for a downtrend.
    pub fn signum(self) -> Decimal {
        match self {
            TrendDirection::Up => Decimal::ONE,
            TrendDirection::Down => Decimal::NEGATIVE_ONE,
        }
    }
}

/// Trend classifier over (usually Heikin-Ashi) candles using a Fibonacci
/// retracement threshold of the rolling high/low range.
///
/// Two candidate trends are evaluated per row; a bearish candle selects the one
/// that can only hold an uptrend, any other candle the one that can only hold a
/// downtrend. Before the first classification the prior trend is neutral.
#[derive(Debug, Clone)]
pub struct Fibobars {
    channel: Donchian,
    level: Decimal,
    trend: Option<TrendDirection>,
}

impl Fibobars {
    /// Create the classifier with a lookback and a retracement level in `(0, 1]`.
    pub fn new(period: usize, level: Decimal) -> Result<Self, IndicatorError> {
        let channel =
            Donchian::new(period).map_err(|_| IndicatorError::invalid_period("Fibobars", period))?;
        if level <= Decimal::ZERO || level > Decimal::ONE {
            return Err(IndicatorError::invalid_parameter(
                "Fibobars", "level", level,
            ));
        }
        Ok(Self {
            channel,
            level,
            trend: None,
        })
    }

    fn classify(
        &self,
        candle: &Candle,
        highest: Decimal,
        lowest: Decimal,
    ) -> TrendDirection {
        let threshold = (highest - lowest) * self.level;
        let not_down = self.trend != Some(TrendDirection::Down);
        let not_up = self.trend != Some(TrendDirection::Up);
        if candle.is_bearish() {
            if not_down && threshold < candle.close - lowest {
                TrendDirection::Up
            } else {
                TrendDirection::Down
            }
        } else if not_up && threshold < highest - candle.close {
            TrendDirection::Down
        } else {
            TrendDirection::Up
        }
    }
}

impl Indicator for Fibobars {
    type Input = Candle;
    type Output = TrendDirection;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let channel = self.channel.next(input)?;
        let trend = self.classify(&input, channel.upper, channel.lower);
        self.trend = Some(trend);
        Some(trend)
    }

    fn reset(&mut self) {
        self.channel.reset();
        self.trend = None;
    }
}
