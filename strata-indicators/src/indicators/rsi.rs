//! Relative Strength Index (RSI).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, ensure_period, Indicator, IndicatorError, Input};
use crate::window::RollingSum;

/// How average gains and losses are carried from row to row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RsiSmoothing {
    /// Rolling arithmetic mean over the last `period` changes.
    #[default]
    Simple,
    /// Wilder's recursive average seeded with the first simple mean.
    Wilder,
}

#[derive(Debug, Clone)]
enum Averages {
    Simple {
        gains: RollingSum,
        losses: RollingSum,
    },
    Wilder {
        avg_gain: Option<Decimal>,
        avg_loss: Option<Decimal>,
        warmup: RollingSum,
        warmup_losses: RollingSum,
    },
}

/// Computes the RSI oscillator scaled between 0 and 100.
#[derive(Debug, Clone)]
pub struct Rsi<I = Decimal> {
    divisor: Decimal,
    decay: Decimal,
    prev_value: Option<Decimal>,
    averages: Averages,
    marker: PhantomData<I>,
}

impl<I> Rsi<I>
where
    I: Input,
{
    /// Creates a new RSI averaging gains and losses with a rolling mean.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Self::with_smoothing(period, RsiSmoothing::Simple)
    }

    /// Creates a new RSI with the chosen smoothing.
    pub fn with_smoothing(period: usize, smoothing: RsiSmoothing) -> Result<Self, IndicatorError> {
        let period = ensure_period("RSI", period)?;
        let averages = match smoothing {
            RsiSmoothing::Simple => Averages::Simple {
                gains: RollingSum::new(period)?,
                losses: RollingSum::new(period)?,
            },
            RsiSmoothing::Wilder => Averages::Wilder {
                avg_gain: None,
                avg_loss: None,
                warmup: RollingSum::new(period)?,
                warmup_losses: RollingSum::new(period)?,
            },
        };

        Ok(Self {
            divisor: decimal_from_usize(period),
            decay: decimal_from_usize(period - 1),
            prev_value: None,
            averages,
            marker: PhantomData,
        })
    }

    /// Undefined when the window saw no movement at all; a window of pure
    /// gains saturates at 100.
    fn compute_rsi(avg_gain: Decimal, avg_loss: Decimal) -> Option<Decimal> {
        match (avg_gain.is_zero(), avg_loss.is_zero()) {
            (true, true) => None,
            (false, true) => Some(Decimal::ONE_HUNDRED),
            (true, false) => Some(Decimal::ZERO),
            (false, false) => {
                let rs = avg_gain.checked_div(avg_loss)?;
                Some(Decimal::ONE_HUNDRED - (Decimal::ONE_HUNDRED / (rs + Decimal::ONE)))
            }
        }
    }

    fn update_averages(&mut self, gain: Decimal, loss: Decimal) -> Option<(Decimal, Decimal)> {
        match &mut self.averages {
            Averages::Simple { gains, losses } => {
                gains.push(gain);
                losses.push(loss);
                Some((gains.mean()?, losses.mean()?))
            }
            Averages::Wilder {
                avg_gain,
                avg_loss,
                warmup,
                warmup_losses,
            } => {
                let (gain, loss) = match (*avg_gain, *avg_loss) {
                    (Some(prev_gain), Some(prev_loss)) => (
                        (prev_gain * self.decay + gain) / self.divisor,
                        (prev_loss * self.decay + loss) / self.divisor,
                    ),
                    _ => {
                        warmup.push(gain);
                        warmup_losses.push(loss);
                        (warmup.mean()?, warmup_losses.mean()?)
                    }
                };
                *avg_gain = Some(gain);
                *avg_loss = Some(loss);
                Some((gain, loss))
            }
        }
    }
}

impl<I> Indicator for Rsi<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let prev = self.prev_value.replace(value)?;

        let change = value - prev;
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);

        let (avg_gain, avg_loss) = self.update_averages(gain, loss)?;
        Self::compute_rsi(avg_gain, avg_loss)
    }

    fn reset(&mut self) {
        self.prev_value = None;
        match &mut self.averages {
            Averages::Simple { gains, losses } => {
                gains.clear();
                losses.clear();
            }
            Averages::Wilder {
                avg_gain,
                avg_loss,
                warmup,
                warmup_losses,
            } => {
                *avg_gain = None;
                *avg_loss = None;
                warmup.clear();
                warmup_losses.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{Rsi, RsiSmoothing};
    use crate::Indicator;

    #[test]
    fn waits_for_initial_window() {
        let mut rsi = Rsi::new(3).unwrap();
        assert_eq!(rsi.next(dec!(1)), None);
        assert_eq!(rsi.next(dec!(2)), None);
        assert_eq!(rsi.next(dec!(3)), None);
        assert!(rsi.next(dec!(2)).is_some());
    }

    #[test]
    fn simple_smoothing_uses_rolling_means() {
        let mut rsi = Rsi::new(3).unwrap();
        let outputs: Vec<_> = [1, 2, 3, 2, 1, 2]
            .into_iter()
            .filter_map(|value| rsi.next(Decimal::from(value)))
            .collect();
        // gains/losses windows: (1,1,0 | 0,0,1), (1,0,0 | 0,1,1), (0,0,1 | 1,1,0)
        let expected = [
            dec!(66.66666666666666666666666667),
            dec!(33.33333333333333333333333333),
            dec!(33.33333333333333333333333333),
        ];
        assert_eq!(outputs.len(), expected.len());
        for (lhs, rhs) in outputs.iter().zip(expected.iter()) {
            assert!((lhs - rhs).abs() <= dec!(0.0000000001), "{lhs} != {rhs}");
        }
    }

    #[test]
    fn wilder_smoothing_computes_expected_values() {
        let mut rsi = Rsi::with_smoothing(3, RsiSmoothing::Wilder).unwrap();
        let series = [1, 2, 3, 2, 1, 2, 3, 4];
        let filtered: Vec<_> = series
            .into_iter()
            .filter_map(|value| rsi.next(Decimal::from(value)))
            .collect();
        let expected = [
            dec!(66.66666666666666666666666667),
            dec!(44.44444444444444444444444444),
            dec!(62.96296296296296296296296298),
            dec!(75.30864197530864197530864198),
            dec!(83.53909465020576131687242799),
        ];

        assert_eq!(filtered.len(), expected.len());
        for (lhs, rhs) in filtered.iter().zip(expected.iter()) {
            assert!((lhs - rhs).abs() <= dec!(0.0000000001));
        }
    }

    #[test]
    fn reset_clears_buffers() {
        let mut rsi = Rsi::with_smoothing(2, RsiSmoothing::Wilder).unwrap();
        rsi.next(dec!(1));
        rsi.next(dec!(2));
        assert!(rsi.next(dec!(3)).is_some());
        rsi.reset();
        assert_eq!(rsi.next(dec!(3)), None);
    }

    #[test]
    fn flat_window_is_undefined() {
        for smoothing in [RsiSmoothing::Simple, RsiSmoothing::Wilder] {
            let mut rsi = Rsi::with_smoothing(3, smoothing).unwrap();
            let outputs: Vec<_> = (0..6).map(|_| rsi.next(dec!(5))).collect();
            assert!(outputs.iter().all(Option::is_none), "{smoothing:?}");
        }
    }

    #[test]
    fn pure_gains_saturate() {
        let mut rsi = Rsi::new(3).unwrap();
        let outputs: Vec<_> = [5, 5, 5, 6]
            .into_iter()
            .map(|v| rsi.next(Decimal::from(v)))
            .collect();
        assert_eq!(outputs[3], Some(dec!(100)));
    }

    #[test]
    fn pure_losses_bottom_out() {
        let mut rsi = Rsi::new(2).unwrap();
        let outputs: Vec<_> = [9, 8, 7]
            .into_iter()
            .map(|v| rsi.next(Decimal::from(v)))
            .collect();
        assert_eq!(outputs[2], Some(Decimal::ZERO));
    }
}
