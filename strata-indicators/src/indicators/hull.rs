//! Hull Moving Average and its triple-smoothed variant.

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::{sma::Sma, wma::Wma};

/// Averaging used by each stage of the Hull average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HullAverage {
    /// Arithmetic means at every stage.
    #[default]
    Simple,
    /// Linearly weighted means at every stage.
    Weighted,
}

#[derive(Debug, Clone)]
enum Stage {
    Simple(Sma),
    Weighted(Wma),
}

impl Stage {
    fn new(kind: HullAverage, period: usize) -> Result<Self, IndicatorError> {
        Ok(match kind {
            HullAverage::Simple => Stage::Simple(Sma::new(period)?),
            HullAverage::Weighted => Stage::Weighted(Wma::new(period)?),
        })
    }

    fn next(&mut self, value: Decimal) -> Option<Decimal> {
        match self {
            Stage::Simple(ma) => ma.next(value),
            Stage::Weighted(ma) => ma.next(value),
        }
    }

    fn reset(&mut self) {
        match self {
            Stage::Simple(ma) => ma.reset(),
            Stage::Weighted(ma) => ma.reset(),
        }
    }
}

/// Hull Moving Average: `MA_sqrt(2 * MA_{period/2} − MA_period)`.
///
/// The outer average only receives defined differences, so the first value
/// appears on row `period + floor(sqrt(period)) − 2`.
#[derive(Debug, Clone)]
pub struct Hma {
    period: usize,
    half: Stage,
    full: Stage,
    smooth: Stage,
}

impl Hma {
    /// Create a Hull average using simple means.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Self::with_average(period, HullAverage::Simple)
    }

    /// Create a Hull average using the given averaging.
    pub fn with_average(period: usize, average: HullAverage) -> Result<Self, IndicatorError> {
        if period < 2 {
            return Err(IndicatorError::invalid_period("HMA", period));
        }
        Ok(Self {
            period,
            half: Stage::new(average, period / 2)?,
            full: Stage::new(average, period)?,
            smooth: Stage::new(average, period.isqrt())?,
        })
    }

    /// Rows consumed before the first defined value.
    pub fn warmup(&self) -> usize {
        self.period.saturating_add(self.period.isqrt()) - 2
    }
}

impl Indicator for Hma {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let half = self.half.next(input);
        let full = self.full.next(input)?;
        let diff = half? * Decimal::TWO - full;
        self.smooth.next(diff)
    }

    fn reset(&mut self) {
        self.half.reset();
        self.full.reset();
        self.smooth.reset();
    }
}

/// Triple Hull Moving Average: `3 * (h1 − h2) + h3` where `h2 = HMA(h1)` and
/// `h3 = HMA(h2)`.
#[derive(Debug, Clone)]
pub struct Thma {
    first: Hma,
    second: Hma,
    third: Hma,
}

impl Thma {
    /// Create a triple Hull average using simple means.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Self::with_average(period, HullAverage::Simple)
    }

    /// Create a triple Hull average using the given averaging.
    pub fn with_average(period: usize, average: HullAverage) -> Result<Self, IndicatorError> {
        let stage = || {
            Hma::with_average(period, average)
                .map_err(|_| IndicatorError::invalid_period("THMA", period))
        };
        Ok(Self {
            first: stage()?,
            second: stage()?,
            third: stage()?,
        })
    }

    /// Rows consumed before the first defined value.
    pub fn warmup(&self) -> usize {
        self.first.warmup().saturating_mul(3)
    }
}

impl Indicator for Thma {
    type Input = Decimal;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let h1 = self.first.next(input)?;
        let h2 = self.second.next(h1)?;
        let h3 = self.third.next(h2)?;
        Some(Decimal::from(3) * (h1 - h2) + h3)
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
        self.third.reset();
    }
}
