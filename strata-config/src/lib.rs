//! Typed indicator configuration and study evaluation over Strata frames.
//!
//! A [`StudyConfig`] lists indicators by `kind` with per-indicator parameters;
//! turning it into a [`Study`] and calling [`Study::apply`] evaluates each entry
//! over a [`strata_core::Frame`] and appends the output columns.

mod error;
mod indicator;
mod source;
mod study;

pub use error::{StudyError, StudyResult};
pub use indicator::{
    AdxConfig, BbpConfig, BollingerConfig, CoppockConfig, DonchianConfig, EmaConfig,
    FibobarsConfig, HullConfig, HullMethod, IchimokuConfig, IndicatorConfig, IndicatorKind,
    KairiConfig, KalmanConfig, KvoConfig, MacdConfig, MassIndexConfig, PercentageOscillatorConfig,
    PeriodConfig, RsiConfig, RsiMethod, ScalarConfig, SmaConfig, StochasticConfig,
    SupertrendConfig, WmaConfig,
};
pub use source::CandleSource;
pub use study::{Study, StudyConfig};
