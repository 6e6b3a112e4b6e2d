//! One-dimensional Kalman smoothing filter.

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError, Input};

/// Carried filter state: posterior estimate and its error variance.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Posterior {
    estimate: Decimal,
    error: Decimal,
}

/// Random-walk Kalman filter smoothing a single series.
///
/// Every pass starts from estimate 0 with error variance 1 unless another
/// initial state is supplied with [`KalmanFilter::with_initial_state`].
#[derive(Debug, Clone)]
pub struct KalmanFilter<I = Decimal> {
    process_variance: Decimal,
    measurement_variance: Decimal,
    initial: Posterior,
    state: Posterior,
    marker: PhantomData<I>,
}

impl<I> KalmanFilter<I>
where
    I: Input,
{
    /// Create a filter; the measurement variance must be positive and the process
    /// variance non-negative.
    pub fn new(
        process_variance: Decimal,
        measurement_variance: Decimal,
    ) -> Result<Self, IndicatorError> {
        if process_variance.is_sign_negative() {
            return Err(IndicatorError::invalid_parameter(
                "KalmanFilter",
                "process_variance",
                process_variance,
            ));
        }
        if measurement_variance <= Decimal::ZERO {
            return Err(IndicatorError::invalid_parameter(
                "KalmanFilter",
                "measurement_variance",
                measurement_variance,
            ));
        }
        let initial = Posterior {
            estimate: Decimal::ZERO,
            error: Decimal::ONE,
        };
        Ok(Self {
            process_variance,
            measurement_variance,
            initial,
            state: initial,
            marker: PhantomData,
        })
    }

    /// Replace the state every pass starts from.
    pub fn with_initial_state(
        mut self,
        estimate: Decimal,
        error: Decimal,
    ) -> Result<Self, IndicatorError> {
        if error.is_sign_negative() {
            return Err(IndicatorError::invalid_parameter(
                "KalmanFilter",
                "initial_error",
                error,
            ));
        }
        self.initial = Posterior { estimate, error };
        self.state = self.initial;
        Ok(self)
    }

    /// Current posterior error variance.
    pub fn error_variance(&self) -> Decimal {
        self.state.error
    }
}

impl<I> Indicator for KalmanFilter<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let prior_estimate = self.state.estimate;
        let prior_error = self.state.error + self.process_variance;
        // measurement variance > 0 keeps the denominator positive
        let gain = prior_error / (prior_error + self.measurement_variance);
        self.state = Posterior {
            estimate: prior_estimate + gain * (input.value() - prior_estimate),
            error: (Decimal::ONE - gain) * prior_error,
        };
        Some(self.state.estimate)
    }

    fn reset(&mut self) {
        self.state = self.initial;
    }

    fn skip(&mut self) {}
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::KalmanFilter;
    use crate::Indicator;

    #[test]
    fn first_update_blends_prior_and_observation() {
        let mut filter = KalmanFilter::new(dec!(0.1), dec!(1)).unwrap();
        // prior error 1.1, gain 1.1 / 2.1
        let first = filter.next(dec!(100)).unwrap();
        assert_eq!(first.round_dp(6), dec!(52.380952));
        assert_eq!(filter.error_variance().round_dp(6), dec!(0.523810));
    }

    #[test]
    fn converges_toward_constant_signal() {
        let mut filter = KalmanFilter::new(dec!(0.1), dec!(1)).unwrap();
        let mut last = Decimal::ZERO;
        for _ in 0..60 {
            last = filter.next(dec!(50)).unwrap();
        }
        assert!((last - dec!(50)).abs() < dec!(0.001), "{last}");
    }

    #[test]
    fn custom_seed_survives_reset() {
        let mut filter = KalmanFilter::new(Decimal::ZERO, dec!(1))
            .unwrap()
            .with_initial_state(dec!(10), Decimal::ZERO)
            .unwrap();
        // zero prior error means the observation is ignored
        assert_eq!(filter.next(dec!(99)), Some(dec!(10)));
        filter.reset();
        assert_eq!(filter.next(dec!(1)), Some(dec!(10)));
    }

    #[test]
    fn rejects_non_positive_measurement_variance() {
        assert!(KalmanFilter::<Decimal>::new(dec!(0.1), Decimal::ZERO).is_err());
        assert!(KalmanFilter::<Decimal>::new(dec!(-0.1), dec!(1)).is_err());
    }
}
