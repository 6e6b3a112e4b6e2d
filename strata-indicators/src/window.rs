//! Incremental rolling-window aggregates.
//!
//! Every aggregate is updated in amortized constant time per observation. Running
//! totals use checked arithmetic: when one overflows it is recomputed from the
//! window, and an aggregate whose window cannot be totalled at all is undefined.

use std::collections::VecDeque;

use rust_decimal::{Decimal, MathematicalOps};

use crate::core::{decimal_from_usize, ensure_period, IndicatorError};

fn checked_total(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |total, value| total?.checked_add(value))
}

/// Running sum over the trailing `period` observations.
#[derive(Debug, Clone)]
pub struct RollingSum {
    period: usize,
    divisor: Decimal,
    window: VecDeque<Decimal>,
    sum: Option<Decimal>,
}

impl RollingSum {
    /// Create an empty window of `period` observations.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let period = ensure_period("RollingSum", period)?;
        Ok(Self {
            period,
            divisor: decimal_from_usize(period),
            window: VecDeque::new(),
            sum: Some(Decimal::ZERO),
        })
    }

    /// Window length.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Push an observation, evicting the oldest once the window is full.
    /// Returns the evicted value, if any.
    pub fn push(&mut self, value: Decimal) -> Option<Decimal> {
        self.window.push_back(value);
        let evicted = if self.window.len() > self.period {
            self.window.pop_front()
        } else {
            None
        };
        self.sum = self
            .sum
            .and_then(|sum| sum.checked_add(value))
            .and_then(|sum| match evicted {
                Some(oldest) => sum.checked_sub(oldest),
                None => Some(sum),
            })
            .or_else(|| checked_total(self.window.iter().copied()));
        evicted
    }

    /// True once `period` observations are held.
    pub fn is_full(&self) -> bool {
        self.window.len() == self.period
    }

    /// Sum of the full window.
    pub fn sum(&self) -> Option<Decimal> {
        if self.is_full() {
            self.sum
        } else {
            None
        }
    }

    /// Arithmetic mean of the full window.
    pub fn mean(&self) -> Option<Decimal> {
        self.sum()?.checked_div(self.divisor)
    }

    /// Empty the window.
    pub fn clear(&mut self) {
        self.window.clear();
        self.sum = Some(Decimal::ZERO);
    }
}

/// Sums of deviations from a reference value and of their squares.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Deviations {
    linear: Decimal,
    squared: Decimal,
}

impl Deviations {
    const ZERO: Self = Self {
        linear: Decimal::ZERO,
        squared: Decimal::ZERO,
    };

    fn of(value: Decimal, shift: Decimal) -> Option<Self> {
        let linear = value.checked_sub(shift)?;
        Some(Self {
            linear,
            squared: linear.checked_mul(linear)?,
        })
    }

    fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self {
            linear: self.linear.checked_add(other.linear)?,
            squared: self.squared.checked_add(other.squared)?,
        })
    }

    fn checked_sub(self, other: Self) -> Option<Self> {
        Some(Self {
            linear: self.linear.checked_sub(other.linear)?,
            squared: self.squared.checked_sub(other.squared)?,
        })
    }
}

/// Rolling mean and sample variance (N − 1 divisor).
///
/// Deviations are accumulated relative to a reference observation rather than
/// zero, so the squared terms stay on the scale of the spread instead of the
/// scale of the values.
#[derive(Debug, Clone)]
pub struct RollingVariance {
    values: RollingSum,
    shift: Option<Decimal>,
    deviations: Option<Deviations>,
}

impl RollingVariance {
    /// Create an empty window of `period` observations.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            values: RollingSum::new(period)?,
            shift: None,
            deviations: Some(Deviations::ZERO),
        })
    }

    /// Push an observation, evicting the oldest once the window is full.
    pub fn push(&mut self, value: Decimal) {
        let shift = *self.shift.get_or_insert(value);
        let evicted = self.values.push(value);
        let updated = self
            .deviations
            .and_then(|total| total.checked_add(Deviations::of(value, shift)?))
            .and_then(|total| match evicted {
                Some(oldest) => total.checked_sub(Deviations::of(oldest, shift)?),
                None => Some(total),
            });
        self.deviations = match updated {
            Some(total) => Some(total),
            None => self.rebase(),
        };
    }

    // Re-anchor on the oldest held observation and recompute from the window.
    fn rebase(&mut self) -> Option<Deviations> {
        let shift = *self.values.window.front()?;
        self.shift = Some(shift);
        self.values
            .window
            .iter()
            .try_fold(Deviations::ZERO, |total, &value| {
                total.checked_add(Deviations::of(value, shift)?)
            })
    }

    /// Arithmetic mean of the full window.
    pub fn mean(&self) -> Option<Decimal> {
        self.values.mean()
    }

    /// Sample variance of the full window; undefined for a single-observation
    /// window.
    pub fn sample_variance(&self) -> Option<Decimal> {
        let period = self.values.period;
        if !self.values.is_full() || period < 2 {
            return None;
        }
        let deviations = self.deviations?;
        let correction = deviations
            .linear
            .checked_mul(deviations.linear)?
            .checked_div(self.values.divisor)?;
        let variance = deviations
            .squared
            .checked_sub(correction)?
            .checked_div(decimal_from_usize(period - 1))?;
        Some(variance.max(Decimal::ZERO))
    }

    /// Sample standard deviation of the full window.
    pub fn sample_std_dev(&self) -> Option<Decimal> {
        self.sample_variance()?.sqrt()
    }

    /// Empty the window.
    pub fn clear(&mut self) {
        self.values.clear();
        self.shift = None;
        self.deviations = Some(Deviations::ZERO);
    }
}

/// Which extreme a [`RollingExtremum`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Rolling maximum.
    Highest,
    /// Rolling minimum.
    Lowest,
}

/// Monotonic-deque rolling maximum or minimum that also reports how many rows ago
/// the extreme occurred. Ties resolve to the most recent occurrence.
#[derive(Debug, Clone)]
pub struct RollingExtremum {
    period: usize,
    extreme: Extreme,
    candidates: VecDeque<(usize, Decimal)>,
    seen: usize,
}

impl RollingExtremum {
    /// Create an empty tracker over `period` observations.
    pub fn new(period: usize, extreme: Extreme) -> Result<Self, IndicatorError> {
        let period = ensure_period("RollingExtremum", period)?;
        Ok(Self {
            period,
            extreme,
            candidates: VecDeque::new(),
            seen: 0,
        })
    }

    /// Rolling maximum over `period` observations.
    pub fn highest(period: usize) -> Result<Self, IndicatorError> {
        Self::new(period, Extreme::Highest)
    }

    /// Rolling minimum over `period` observations.
    pub fn lowest(period: usize) -> Result<Self, IndicatorError> {
        Self::new(period, Extreme::Lowest)
    }

    fn dominated(&self, held: Decimal, incoming: Decimal) -> bool {
        match self.extreme {
            Extreme::Highest => held <= incoming,
            Extreme::Lowest => held >= incoming,
        }
    }

    /// Push an observation.
    pub fn push(&mut self, value: Decimal) {
        let position = self.seen;
        self.seen += 1;
        while let Some(&(_, held)) = self.candidates.back() {
            if self.dominated(held, value) {
                self.candidates.pop_back();
            } else {
                break;
            }
        }
        self.candidates.push_back((position, value));
        while let Some(&(front, _)) = self.candidates.front() {
            if front + self.period <= position {
                self.candidates.pop_front();
            } else {
                break;
            }
        }
    }

    /// True once `period` observations have been pushed.
    pub fn is_full(&self) -> bool {
        self.seen >= self.period
    }

    /// Extreme value over the full window.
    pub fn value(&self) -> Option<Decimal> {
        if !self.is_full() {
            return None;
        }
        self.candidates.front().map(|&(_, value)| value)
    }

    /// Rows elapsed since the extreme (0 when the latest observation is the extreme).
    pub fn age(&self) -> Option<usize> {
        if !self.is_full() {
            return None;
        }
        self.candidates
            .front()
            .map(|&(position, _)| self.seen - 1 - position)
    }

    /// Empty the tracker.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.seen = 0;
    }
}

/// Ordinary-least-squares slope of the trailing window against positions
/// `0..period`.
#[derive(Debug, Clone)]
pub struct RollingSlope {
    values: RollingSum,
    weighted_sum: Option<Decimal>,
    sum_x: Decimal,
    denominator: Decimal,
}

impl RollingSlope {
    /// Create an empty regression window.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let values = RollingSum::new(period)?;
        let invalid = || IndicatorError::invalid_period("RollingSlope", period);
        // sum(x) = n(n-1)/2 and n*sum(x^2) - sum(x)^2 = n^2(n^2-1)/12
        let n = decimal_from_usize(period);
        let sum_x = n
            .checked_mul(n - Decimal::ONE)
            .map(|product| product / Decimal::TWO)
            .ok_or_else(invalid)?;
        let n_squared = n.checked_mul(n).ok_or_else(invalid)?;
        let denominator = n_squared
            .checked_mul(n_squared - Decimal::ONE)
            .map(|product| product / Decimal::from(12))
            .ok_or_else(invalid)?;
        Ok(Self {
            values,
            weighted_sum: Some(Decimal::ZERO),
            sum_x,
            denominator,
        })
    }

    /// Push an observation.
    pub fn push(&mut self, value: Decimal) {
        let held = self.values.window.len();
        let sum_before = self.values.sum;
        let evicted = self.values.push(value);
        let updated = match evicted {
            // Every retained point shifts one position left; the newest takes the last slot.
            Some(oldest) => self.weighted_sum.zip(sum_before).and_then(|(weighted, sum)| {
                let tail = decimal_from_usize(self.values.period - 1).checked_mul(value)?;
                weighted
                    .checked_sub(sum.checked_sub(oldest)?)?
                    .checked_add(tail)
            }),
            None => self.weighted_sum.and_then(|weighted| {
                weighted.checked_add(decimal_from_usize(held).checked_mul(value)?)
            }),
        };
        self.weighted_sum = updated.or_else(|| self.rescan());
    }

    fn rescan(&self) -> Option<Decimal> {
        self.values
            .window
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |total, (position, &value)| {
                total.checked_add(decimal_from_usize(position).checked_mul(value)?)
            })
    }

    /// Slope of the full window; undefined for windows shorter than two points.
    pub fn slope(&self) -> Option<Decimal> {
        let sum_y = self.values.sum()?;
        if self.denominator.is_zero() {
            return None;
        }
        let n = self.values.divisor;
        n.checked_mul(self.weighted_sum?)?
            .checked_sub(self.sum_x.checked_mul(sum_y)?)?
            .checked_div(self.denominator)
    }

    /// Empty the window.
    pub fn clear(&mut self) {
        self.values.clear();
        self.weighted_sum = Some(Decimal::ZERO);
    }
}

/// Linearly weighted mean: the newest observation carries weight `period`, the
/// oldest weight 1.
#[derive(Debug, Clone)]
pub struct RollingWeighted {
    values: RollingSum,
    numerator: Option<Decimal>,
    weight_total: Decimal,
}

impl RollingWeighted {
    /// Create an empty weighted window.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        let values = RollingSum::new(period)?;
        let n = decimal_from_usize(period);
        let weight_total = n
            .checked_mul(n + Decimal::ONE)
            .map(|product| product / Decimal::TWO)
            .ok_or_else(|| IndicatorError::invalid_period("RollingWeighted", period))?;
        Ok(Self {
            values,
            numerator: Some(Decimal::ZERO),
            weight_total,
        })
    }

    /// Push an observation.
    pub fn push(&mut self, value: Decimal) {
        let held = self.values.window.len();
        let sum_before = self.values.sum;
        let updated = match self.values.push(value) {
            Some(_) => self.numerator.zip(sum_before).and_then(|(numerator, sum)| {
                let newest = self.values.divisor.checked_mul(value)?;
                numerator.checked_sub(sum)?.checked_add(newest)
            }),
            None => self.numerator.and_then(|numerator| {
                numerator.checked_add(decimal_from_usize(held + 1).checked_mul(value)?)
            }),
        };
        self.numerator = updated.or_else(|| self.rescan());
    }

    fn rescan(&self) -> Option<Decimal> {
        self.values
            .window
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |total, (position, &value)| {
                total.checked_add(decimal_from_usize(position + 1).checked_mul(value)?)
            })
    }

    /// Weighted mean of the full window.
    pub fn mean(&self) -> Option<Decimal> {
        if !self.values.is_full() {
            return None;
        }
        self.numerator?.checked_div(self.weight_total)
    }

    /// Empty the window.
    pub fn clear(&mut self) {
        self.values.clear();
        self.numerator = Some(Decimal::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(lhs: Decimal, rhs: Decimal) {
        assert!((lhs - rhs).abs() <= dec!(0.00000001), "{lhs} != {rhs}");
    }

    #[test]
    fn rolling_sum_tracks_sum_and_mean() {
        let mut window = RollingSum::new(3).unwrap();
        window.push(dec!(100));
        window.push(dec!(102));
        assert_eq!(window.mean(), None);
        window.push(dec!(104));
        assert_eq!(window.mean(), Some(dec!(102)));
        assert_eq!(window.push(dec!(103)), Some(dec!(100)));
        assert_eq!(window.sum(), Some(dec!(309)));
    }

    #[test]
    fn overflowing_sum_recovers_once_the_window_moves_on() {
        let mut window = RollingSum::new(2).unwrap();
        window.push(Decimal::MAX);
        window.push(Decimal::MAX);
        assert_eq!(window.mean(), None);
        window.push(dec!(1));
        assert_eq!(window.mean(), None);
        window.push(dec!(3));
        assert_eq!(window.mean(), Some(dec!(2)));
    }

    #[test]
    fn rolling_variance_is_sample_variance() {
        let mut window = RollingVariance::new(3).unwrap();
        for value in [dec!(100), dec!(102), dec!(104)] {
            window.push(value);
        }
        assert_eq!(window.mean(), Some(dec!(102)));
        assert_eq!(window.sample_variance(), Some(dec!(4)));
        assert_close(window.sample_std_dev().unwrap(), dec!(2));
        window.push(dec!(103));
        // 102, 104, 103
        assert_eq!(window.sample_variance(), Some(dec!(1)));
    }

    #[test]
    fn single_point_window_has_no_variance() {
        let mut window = RollingVariance::new(1).unwrap();
        window.push(dec!(5));
        assert_eq!(window.mean(), Some(dec!(5)));
        assert_eq!(window.sample_variance(), None);
    }

    #[test]
    fn variance_of_large_magnitudes_stays_defined() {
        let mut window = RollingVariance::new(3).unwrap();
        let base = dec!(1000000000000000);
        for offset in [dec!(0), dec!(2), dec!(4), dec!(6)] {
            window.push(base + offset);
        }
        assert_eq!(window.mean(), Some(base + dec!(4)));
        assert_eq!(window.sample_variance(), Some(dec!(4)));
    }

    #[test]
    fn variance_rebases_after_a_wide_jump() {
        let mut window = RollingVariance::new(2).unwrap();
        window.push(dec!(0));
        window.push(dec!(1000000000000000000000000000));
        assert_eq!(window.sample_variance(), None);
        window.push(dec!(1000000000000000000000000000) + dec!(2));
        assert_eq!(window.sample_variance(), Some(dec!(2)));
    }

    #[test]
    fn extremum_evicts_stale_candidates() {
        let mut highest = RollingExtremum::highest(3).unwrap();
        for value in [dec!(5), dec!(1), dec!(2)] {
            highest.push(value);
        }
        assert_eq!(highest.value(), Some(dec!(5)));
        assert_eq!(highest.age(), Some(2));
        highest.push(dec!(1));
        assert_eq!(highest.value(), Some(dec!(2)));
        assert_eq!(highest.age(), Some(1));
    }

    #[test]
    fn extremum_prefers_latest_tie() {
        let mut lowest = RollingExtremum::lowest(4).unwrap();
        for value in [dec!(1), dec!(3), dec!(1), dec!(4)] {
            lowest.push(value);
        }
        assert_eq!(lowest.value(), Some(dec!(1)));
        assert_eq!(lowest.age(), Some(1));
    }

    #[test]
    fn slope_matches_least_squares() {
        let mut slope = RollingSlope::new(4).unwrap();
        for value in [dec!(1), dec!(3), dec!(5)] {
            slope.push(value);
            assert_eq!(slope.slope(), None);
        }
        slope.push(dec!(7));
        assert_close(slope.slope().unwrap(), dec!(2));
        // window becomes 3, 5, 7, 6 -> slope 1.1
        slope.push(dec!(6));
        assert_close(slope.slope().unwrap(), dec!(1.1));
    }

    #[test]
    fn weighted_mean_slides() {
        let mut wma = RollingWeighted::new(3).unwrap();
        wma.push(dec!(1));
        wma.push(dec!(2));
        assert_eq!(wma.mean(), None);
        wma.push(dec!(3));
        // (1*1 + 2*2 + 3*3) / 6
        assert_close(wma.mean().unwrap(), dec!(14) / dec!(6));
        wma.push(dec!(4));
        // (2*1 + 3*2 + 4*3) / 6
        assert_close(wma.mean().unwrap(), dec!(20) / dec!(6));
    }

    #[test]
    fn weighted_and_slope_windows_handle_large_magnitudes() {
        let base = dec!(1000000000000000);
        let mut wma = RollingWeighted::new(3).unwrap();
        let mut slope = RollingSlope::new(3).unwrap();
        for step in 0..5 {
            let value = base + Decimal::from(step);
            wma.push(value);
            slope.push(value);
        }
        // window base+2, base+3, base+4: (1*2 + 2*3 + 3*4) / 6 = 20/6 above base
        assert_close(wma.mean().unwrap() - base, dec!(20) / dec!(6));
        assert_eq!(slope.slope(), Some(dec!(1)));
    }

    #[test]
    fn oversized_periods_are_rejected() {
        assert!(RollingWeighted::new(usize::MAX).is_err());
        assert!(RollingSlope::new(usize::MAX).is_err());
        assert!(RollingSum::new(usize::MAX / 4).is_ok());
    }
}
