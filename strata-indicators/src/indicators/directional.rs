//! Directional movement (+DI / −DI) and the Average Directional Index.

use rust_decimal::Decimal;
use strata_core::Candle;

use crate::core::{ratio, Indicator, IndicatorError};
use crate::indicators::true_range::true_range;
use crate::window::RollingSum;

/// Smoothed directional components for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalOutput {
    /// Rolling mean of the true range.
    pub true_range: Decimal,
    /// Rolling mean of +DM.
    pub plus_dm: Decimal,
    /// Rolling mean of −DM.
    pub minus_dm: Decimal,
    /// `100 * +DM / TR`, zero when the smoothed range is zero.
    pub plus_di: Decimal,
    /// `100 * −DM / TR`, zero when the smoothed range is zero.
    pub minus_di: Decimal,
}

impl DirectionalOutput {
    /// `100 * |+DI − −DI| / (+DI + −DI)`, zero when both indicators are zero.
    pub fn dx(&self) -> Decimal {
        ratio(
            (self.plus_di - self.minus_di).abs(),
            self.plus_di + self.minus_di,
        )
        .map_or(Decimal::ZERO, |dx| dx * Decimal::ONE_HUNDRED)
    }
}

/// Raw +DM / −DM of a candle against its predecessor's high and low.
fn directional_move(
    high: Decimal,
    low: Decimal,
    prev: Option<(Decimal, Decimal)>,
) -> (Decimal, Decimal) {
    let Some((prev_high, prev_low)) = prev else {
        return (Decimal::ZERO, Decimal::ZERO);
    };
    let up = high - prev_high;
    let down = prev_low - low;
    let plus = if up > down && up > Decimal::ZERO {
        up
    } else {
        Decimal::ZERO
    };
    let minus = if down > up && down > Decimal::ZERO {
        down
    } else {
        Decimal::ZERO
    };
    (plus, minus)
}

/// Positive and negative directional indicators smoothed by a rolling mean.
#[derive(Debug, Clone)]
pub struct DirectionalMovement {
    prev: Option<Candle>,
    true_range: RollingSum,
    plus_dm: RollingSum,
    minus_dm: RollingSum,
}

impl DirectionalMovement {
    /// Create the indicator with the provided lookback.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let window = || {
            RollingSum::new(period)
                .map_err(|_| IndicatorError::invalid_period("DirectionalMovement", period))
        };
        Ok(Self {
            prev: None,
            true_range: window()?,
            plus_dm: window()?,
            minus_dm: window()?,
        })
    }

    fn di(dm: Decimal, tr: Decimal) -> Decimal {
        ratio(dm, tr).map_or(Decimal::ZERO, |share| share * Decimal::ONE_HUNDRED)
    }
}

impl Indicator for DirectionalMovement {
    type Input = Candle;
    type Output = DirectionalOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let prev = self.prev.replace(input);
        let (plus, minus) = directional_move(
            input.high,
            input.low,
            prev.map(|candle| (candle.high, candle.low)),
        );
        self.true_range
            .push(true_range(&input, prev.map(|candle| candle.close)));
        self.plus_dm.push(plus);
        self.minus_dm.push(minus);

        let true_range = self.true_range.mean()?;
        let plus_dm = self.plus_dm.mean()?;
        let minus_dm = self.minus_dm.mean()?;
        Some(DirectionalOutput {
            true_range,
            plus_dm,
            minus_dm,
            plus_di: Self::di(plus_dm, true_range),
            minus_di: Self::di(minus_dm, true_range),
        })
    }

    fn reset(&mut self) {
        self.prev = None;
        self.true_range.clear();
        self.plus_dm.clear();
        self.minus_dm.clear();
    }
}

/// ADX row: the directional components, DX, and the ADX once its own window fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdxOutput {
    /// Smoothed directional components.
    pub directional: DirectionalOutput,
    /// Directional index for this row.
    pub dx: Decimal,
    /// Rolling mean of DX over the smoothing period.
    pub adx: Option<Decimal>,
}

/// Average Directional Index: DI, then DX, then a rolling mean of DX.
#[derive(Debug, Clone)]
pub struct Adx {
    directional: DirectionalMovement,
    smoothing: RollingSum,
}

impl Adx {
    /// Create an ADX with the DI lookback and the DX smoothing period.
    pub fn new(period: usize, smoothing_period: usize) -> Result<Self, IndicatorError> {
        let directional = DirectionalMovement::new(period)
            .map_err(|_| IndicatorError::invalid_period("ADX", period))?;
        let smoothing = RollingSum::new(smoothing_period).map_err(|_| {
            IndicatorError::invalid_parameter("ADX", "smoothing_period", smoothing_period)
        })?;
        Ok(Self {
            directional,
            smoothing,
        })
    }
}

impl Indicator for Adx {
    type Input = Candle;
    type Output = AdxOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let directional = self.directional.next(input)?;
        let dx = directional.dx();
        self.smoothing.push(dx);
        Some(AdxOutput {
            directional,
            dx,
            adx: self.smoothing.mean(),
        })
    }

    fn reset(&mut self) {
        self.directional.reset();
        self.smoothing.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::candle;
    use rust_decimal_macros::dec;

    fn rising(step: Decimal) -> Candle {
        candle(step, step + dec!(2), step, step + dec!(1))
    }

    #[test]
    fn directional_moves_follow_dominant_side() {
        assert_eq!(
            directional_move(dec!(12), dec!(9), Some((dec!(10), dec!(8)))),
            (dec!(2), Decimal::ZERO)
        );
        assert_eq!(
            directional_move(dec!(10), dec!(5), Some((dec!(10), dec!(8)))),
            (Decimal::ZERO, dec!(3))
        );
        // outside bar with equal moves counts for neither side
        assert_eq!(
            directional_move(dec!(11), dec!(7), Some((dec!(10), dec!(8)))),
            (Decimal::ZERO, Decimal::ZERO)
        );
    }

    #[test]
    fn steady_uptrend_has_full_dx() {
        let mut adx = Adx::new(2, 2).unwrap();
        assert!(adx.next(rising(dec!(10))).is_none());
        let first = adx.next(rising(dec!(11))).unwrap();
        assert_eq!(first.directional.minus_di, Decimal::ZERO);
        assert!(first.directional.plus_di > Decimal::ZERO);
        assert_eq!(first.dx, dec!(100));
        assert_eq!(first.adx, None);

        let second = adx.next(rising(dec!(12))).unwrap();
        assert_eq!(second.adx, Some(dec!(100)));
    }

    #[test]
    fn zero_range_resolves_to_zero() {
        let flat = candle(dec!(5), dec!(5), dec!(5), dec!(5));
        let mut adx = Adx::new(1, 1).unwrap();
        let out = adx.next(flat).unwrap();
        assert_eq!(out.directional.plus_di, Decimal::ZERO);
        assert_eq!(out.directional.minus_di, Decimal::ZERO);
        assert_eq!(out.dx, Decimal::ZERO);
        assert_eq!(out.adx, Some(Decimal::ZERO));
    }
}
