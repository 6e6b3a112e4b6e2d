//! Core traits, error type and numeric helpers shared by every indicator.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use strata_core::{Candle, FrameError};
use thiserror::Error;

/// A streaming indicator: consumes one observation per row and emits the value for
/// that row, or `None` while the value is undefined (warm-up or a degenerate row).
pub trait Indicator {
    /// Observation consumed per row.
    type Input;
    /// Value produced per row.
    type Output;

    /// Feed the next observation.
    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Discard all carried state, as if no observation had been fed.
    fn reset(&mut self);

    /// Account for a row without an observation.
    ///
    /// No window may span the gap, so by default all state restarts and the
    /// indicator warms up again. Purely recursive indicators carry their state
    /// across the gap instead.
    fn skip(&mut self) {
        self.reset();
    }
}

/// Scalar source an indicator can read a single value from.
pub trait Input {
    /// The value used by single-series indicators.
    fn value(&self) -> Decimal;
}

impl Input for Decimal {
    fn value(&self) -> Decimal {
        *self
    }
}

impl Input for &Decimal {
    fn value(&self) -> Decimal {
        **self
    }
}

impl Input for Candle {
    fn value(&self) -> Decimal {
        self.close
    }
}

impl Input for &Candle {
    fn value(&self) -> Decimal {
        self.close
    }
}

/// Errors raised while configuring or evaluating indicators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The lookback period is not usable for the indicator.
    #[error("{name}: invalid period {period}")]
    InvalidPeriod {
        /// Indicator name.
        name: &'static str,
        /// Offending period.
        period: usize,
    },
    /// A non-period parameter is out of range.
    #[error("{name}: invalid {parameter} = {value}")]
    InvalidParameter {
        /// Indicator name.
        name: &'static str,
        /// Parameter name.
        parameter: &'static str,
        /// Offending value, rendered.
        value: String,
    },
    /// The input table lacks a column the indicator reads.
    #[error("missing column '{0}'")]
    MissingColumn(String),
    /// Parallel input series have different lengths.
    #[error("input series have mismatched lengths ({expected} vs {actual})")]
    LengthMismatch {
        /// Length of the first series.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },
}

impl IndicatorError {
    /// Shorthand for [`IndicatorError::InvalidPeriod`].
    pub fn invalid_period(name: &'static str, period: usize) -> Self {
        Self::InvalidPeriod { name, period }
    }

    /// Shorthand for [`IndicatorError::InvalidParameter`].
    pub fn invalid_parameter(
        name: &'static str,
        parameter: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            name,
            parameter,
            value: value.to_string(),
        }
    }
}

impl From<FrameError> for IndicatorError {
    fn from(value: FrameError) -> Self {
        match value {
            FrameError::MissingColumn(column) => Self::MissingColumn(column),
            FrameError::LengthMismatch {
                expected, actual, ..
            } => Self::LengthMismatch { expected, actual },
            FrameError::Unordered { row } => Self::InvalidParameter {
                name: "Frame",
                parameter: "index",
                value: format!("row {row} out of order"),
            },
        }
    }
}

/// Reject a zero lookback.
pub(crate) fn ensure_period(name: &'static str, period: usize) -> Result<usize, IndicatorError> {
    if period == 0 {
        Err(IndicatorError::invalid_period(name, period))
    } else {
        Ok(period)
    }
}

/// Converts a window length into a decimal divisor.
pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from_usize(value).unwrap_or(Decimal::MAX)
}

/// Smoothing factor `2 / (span + 1)` of an exponential average.
pub(crate) fn span_alpha(span: usize) -> Decimal {
    Decimal::TWO / (decimal_from_usize(span) + Decimal::ONE)
}

/// `numerator / denominator`, undefined when the denominator is zero.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        numerator.checked_div(denominator)
    }
}

/// Percentage change of `value` relative to `reference`, undefined for a zero reference.
pub(crate) fn percent_change(value: Decimal, reference: Decimal) -> Option<Decimal> {
    ratio(value - reference, reference).map(|change| change * Decimal::ONE_HUNDRED)
}
