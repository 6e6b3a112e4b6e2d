//! Typed indicator settings and their evaluation over a frame.
//!
//! Every settings struct is `#[serde(default)]`, so a configuration entry only
//! needs the keys it changes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strata_core::{Column, Field, Frame};
use strata_indicators::indicators::{
    Adx, Aroon, Atr, BollingerBands, BullBearPower, Coppock, DirectionalMovement, Donchian, Ema,
    Fibobars, HeikinAshi, Hma, HullAverage, Ichimoku, Kairi, KalmanFilter, Kvo, LinRegSlope, Macd,
    MassIndex, Obv, PercentageOscillator, Roc, Rsi, RsiSmoothing, Sma, Stochastic, Supertrend,
    Thma, Wma,
};
use strata_indicators::IndicatorError;

use crate::error::StudyError;
use crate::source::{self, project, CandleSource};

/// Averaging of gains and losses in the RSI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiMethod {
    /// Rolling arithmetic mean.
    #[default]
    Simple,
    /// Wilder's recursive smoothing.
    Wilder,
}

impl From<RsiMethod> for RsiSmoothing {
    fn from(value: RsiMethod) -> Self {
        match value {
            RsiMethod::Simple => RsiSmoothing::Simple,
            RsiMethod::Wilder => RsiSmoothing::Wilder,
        }
    }
}

/// Averaging used inside the Hull averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HullMethod {
    /// Arithmetic means.
    #[default]
    Simple,
    /// Linearly weighted means.
    Weighted,
}

impl From<HullMethod> for HullAverage {
    fn from(value: HullMethod) -> Self {
        match value {
            HullMethod::Simple => HullAverage::Simple,
            HullMethod::Weighted => HullAverage::Weighted,
        }
    }
}

/// Simple moving average settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmaConfig {
    pub period: usize,
    pub source: Field,
}

impl Default for SmaConfig {
    fn default() -> Self {
        Self {
            period: 14,
            source: Field::Close,
        }
    }
}

/// Exponential moving average settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmaConfig {
    pub span: usize,
    pub source: Field,
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self {
            span: 20,
            source: Field::Close,
        }
    }
}

/// Linearly weighted moving average settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WmaConfig {
    pub period: usize,
    pub source: Field,
}

impl Default for WmaConfig {
    fn default() -> Self {
        Self {
            period: 14,
            source: Field::Close,
        }
    }
}

/// Bollinger band settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    pub std_multiplier: Decimal,
    pub source: Field,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_multiplier: Decimal::TWO,
            source: Field::Close,
        }
    }
}

/// Lookback-only settings shared by ATR, Donchian, Aroon and the directional indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConfig {
    pub period: usize,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// Donchian channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonchianConfig {
    pub period: usize,
}

impl Default for DonchianConfig {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// Stochastic %K settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StochasticConfig {
    pub period: usize,
    pub smoothing: usize,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            period: 14,
            smoothing: 3,
        }
    }
}

/// Settings for single-lookback scalar indicators (linear regression slope, ROC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalarConfig {
    pub period: usize,
    pub source: Field,
}

impl Default for ScalarConfig {
    fn default() -> Self {
        Self {
            period: 14,
            source: Field::Close,
        }
    }
}

/// MACD settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    pub source: Field,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            source: Field::Close,
        }
    }
}

/// Klinger volume oscillator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvoConfig {
    pub short_period: usize,
    pub long_period: usize,
}

impl Default for KvoConfig {
    fn default() -> Self {
        Self {
            short_period: 34,
            long_period: 55,
        }
    }
}

/// Kalman smoothing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KalmanConfig {
    pub process_variance: Decimal,
    pub measurement_variance: Decimal,
    pub source: Field,
}

impl Default for KalmanConfig {
    fn default() -> Self {
        Self {
            process_variance: dec!(0.1),
            measurement_variance: Decimal::ONE,
            source: Field::Close,
        }
    }
}

/// ADX settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdxConfig {
    pub period: usize,
    pub smoothing_period: usize,
}

impl Default for AdxConfig {
    fn default() -> Self {
        Self {
            period: 14,
            smoothing_period: 14,
        }
    }
}

/// RSI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
    pub smoothing: RsiMethod,
    pub source: Field,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            smoothing: RsiMethod::Simple,
            source: Field::Close,
        }
    }
}

/// HMA / THMA settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    pub period: usize,
    pub average: HullMethod,
    pub source: Field,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            period: 14,
            average: HullMethod::Simple,
            source: Field::Close,
        }
    }
}

/// Supertrend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupertrendConfig {
    pub atr_period: usize,
    pub factor: Decimal,
}

impl Default for SupertrendConfig {
    fn default() -> Self {
        Self {
            atr_period: 10,
            factor: dec!(3),
        }
    }
}

/// Fibonacci-bars trend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FibobarsConfig {
    pub period: usize,
    pub level: Decimal,
    pub candles: CandleSource,
}

impl Default for FibobarsConfig {
    fn default() -> Self {
        Self {
            period: 14,
            level: dec!(0.618),
            candles: CandleSource::HeikinAshi,
        }
    }
}

/// Ichimoku settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuConfig {
    pub conversion_period: usize,
    pub base_period: usize,
    pub span_b_period: usize,
}

impl Default for IchimokuConfig {
    fn default() -> Self {
        Self {
            conversion_period: 9,
            base_period: 26,
            span_b_period: 52,
        }
    }
}

/// Coppock curve settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoppockConfig {
    pub short_roc: usize,
    pub long_roc: usize,
    pub smoothing_span: usize,
    pub source: Field,
}

impl Default for CoppockConfig {
    fn default() -> Self {
        Self {
            short_roc: 11,
            long_roc: 14,
            smoothing_span: 10,
            source: Field::Close,
        }
    }
}

/// Mass index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassIndexConfig {
    pub ema_span: usize,
    pub sum_period: usize,
    pub candles: CandleSource,
}

impl Default for MassIndexConfig {
    fn default() -> Self {
        Self {
            ema_span: 9,
            sum_period: 25,
            candles: CandleSource::HeikinAshi,
        }
    }
}

/// Kairi relative index settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KairiConfig {
    pub period: usize,
    pub source: Field,
}

impl Default for KairiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            source: Field::HaClose,
        }
    }
}

/// Percentage price oscillator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentageOscillatorConfig {
    pub short_span: usize,
    pub long_span: usize,
    pub source: Field,
}

impl Default for PercentageOscillatorConfig {
    fn default() -> Self {
        Self {
            short_span: 10,
            long_span: 21,
            source: Field::Close,
        }
    }
}

/// Bull/bear power settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BbpConfig {
    pub span: usize,
}

impl Default for BbpConfig {
    fn default() -> Self {
        Self { span: 50 }
    }
}

/// One configurable indicator, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IndicatorKind {
    Sma(SmaConfig),
    Ema(EmaConfig),
    Wma(WmaConfig),
    Bollinger(BollingerConfig),
    Atr(PeriodConfig),
    Donchian(DonchianConfig),
    Stochastic(StochasticConfig),
    #[serde(rename = "linreg_slope")]
    LinRegSlope(ScalarConfig),
    Macd(MacdConfig),
    Kvo(KvoConfig),
    Obv,
    Kalman(KalmanConfig),
    Dmi(PeriodConfig),
    Adx(AdxConfig),
    Aroon(PeriodConfig),
    Rsi(RsiConfig),
    Roc(ScalarConfig),
    Hma(HullConfig),
    Thma(HullConfig),
    Supertrend(SupertrendConfig),
    Fibobars(FibobarsConfig),
    Ichimoku(IchimokuConfig),
    Coppock(CoppockConfig),
    MassIndex(MassIndexConfig),
    Kairi(KairiConfig),
    PercentageOscillator(PercentageOscillatorConfig),
    Bbp(BbpConfig),
    HeikinAshi,
}

impl IndicatorKind {
    /// The `kind` tag of this entry.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sma(_) => "sma",
            Self::Ema(_) => "ema",
            Self::Wma(_) => "wma",
            Self::Bollinger(_) => "bollinger",
            Self::Atr(_) => "atr",
            Self::Donchian(_) => "donchian",
            Self::Stochastic(_) => "stochastic",
            Self::LinRegSlope(_) => "linreg_slope",
            Self::Macd(_) => "macd",
            Self::Kvo(_) => "kvo",
            Self::Obv => "obv",
            Self::Kalman(_) => "kalman",
            Self::Dmi(_) => "dmi",
            Self::Adx(_) => "adx",
            Self::Aroon(_) => "aroon",
            Self::Rsi(_) => "rsi",
            Self::Roc(_) => "roc",
            Self::Hma(_) => "hma",
            Self::Thma(_) => "thma",
            Self::Supertrend(_) => "supertrend",
            Self::Fibobars(_) => "fibobars",
            Self::Ichimoku(_) => "ichimoku",
            Self::Coppock(_) => "coppock",
            Self::MassIndex(_) => "mass_index",
            Self::Kairi(_) => "kairi",
            Self::PercentageOscillator(_) => "percentage_oscillator",
            Self::Bbp(_) => "bbp",
            Self::HeikinAshi => "heikin_ashi",
        }
    }

    /// Default output column names, in evaluation order.
    pub fn default_columns(&self) -> Vec<String> {
        let names: &[&str] = match self {
            Self::Sma(cfg) => return vec![format!("SMA_{}", cfg.period)],
            Self::Ema(cfg) => return vec![format!("EMA_{}", cfg.span)],
            Self::Wma(cfg) => return vec![format!("WMA_{}", cfg.period)],
            Self::Roc(cfg) => return vec![format!("ROC_{}", cfg.period)],
            Self::Kalman(cfg) => return vec![format!("smoothed_{}", cfg.source)],
            Self::Bollinger(_) => &["upper_band", "lower_band"],
            Self::Atr(_) => &["ATR"],
            Self::Donchian(_) => &["Donchian_Upper", "Donchian_Channel", "Donchian_Lower"],
            Self::Stochastic(_) => &["stoch_k"],
            Self::LinRegSlope(_) => &["linreg_slope"],
            Self::Macd(_) => &["MACD", "Signal", "Histogram"],
            Self::Kvo(_) => &["MFM", "MFV", "KVO"],
            Self::Obv => &["OBV"],
            Self::Dmi(_) => &["DI+", "DI-"],
            Self::Adx(_) => &["TR", "DM+", "DM-", "DI+", "DI-", "DX", "ADX"],
            Self::Aroon(_) => &["Aroon_Up", "Aroon_Down"],
            Self::Rsi(_) => &["RSI"],
            Self::Hma(_) => &["HMA"],
            Self::Thma(_) => &["THMA"],
            Self::Supertrend(_) => &["ATR", "upper_band", "lower_band", "supertrend"],
            Self::Fibobars(_) => &["Fibobars_Trend"],
            Self::Ichimoku(_) => &["Conversion_Line", "Base_Line", "Lead_Line1", "Lead_Line2"],
            Self::Coppock(_) => &["ROC_Short", "ROC_Long", "ROC_Sum", "CoppockCurve"],
            Self::MassIndex(_) => &["Mass_Index"],
            Self::Kairi(_) => &["KRI"],
            Self::PercentageOscillator(_) => &["PO"],
            Self::Bbp(_) => &["BullPower", "BearPower", "BBP"],
            Self::HeikinAshi => &["ha_open", "ha_high", "ha_low", "ha_close"],
        };
        names.iter().map(|name| name.to_string()).collect()
    }

    /// Build the indicator, read its inputs and evaluate one pass.
    ///
    /// Parameters are validated before any column is read; the returned columns
    /// follow [`IndicatorKind::default_columns`].
    pub fn evaluate(&self, frame: &Frame) -> Result<Vec<Column>, IndicatorError> {
        let columns = match self {
            Self::Sma(cfg) => vec![source::scalar(
                frame,
                cfg.source,
                Sma::<Decimal>::new(cfg.period)?,
            )?],
            Self::Ema(cfg) => vec![source::scalar(
                frame,
                cfg.source,
                Ema::<Decimal>::new(cfg.span)?,
            )?],
            Self::Wma(cfg) => vec![source::scalar(
                frame,
                cfg.source,
                Wma::<Decimal>::new(cfg.period)?,
            )?],
            Self::Bollinger(cfg) => {
                let bands = BollingerBands::<Decimal>::new(cfg.period, cfg.std_multiplier)?;
                let out = source::scalar(frame, cfg.source, bands)?;
                vec![
                    project(&out, |row| Some(row.upper)),
                    project(&out, |row| Some(row.lower)),
                ]
            }
            Self::Atr(cfg) => vec![source::candles(
                frame,
                CandleSource::Raw,
                false,
                Atr::new(cfg.period)?,
            )?],
            Self::Donchian(cfg) => {
                let out = source::candles(frame, CandleSource::Raw, false, Donchian::new(cfg.period)?)?;
                vec![
                    project(&out, |row| Some(row.upper)),
                    project(&out, |row| Some(row.middle)),
                    project(&out, |row| Some(row.lower)),
                ]
            }
            Self::Stochastic(cfg) => vec![source::candles(
                frame,
                CandleSource::Raw,
                false,
                Stochastic::new(cfg.period, cfg.smoothing)?,
            )?],
            Self::LinRegSlope(cfg) => vec![source::scalar(
                frame,
                cfg.source,
                LinRegSlope::<Decimal>::new(cfg.period)?,
            )?],
            Self::Macd(cfg) => {
                let macd = Macd::new(cfg.fast_period, cfg.slow_period, cfg.signal_period)?;
                let out = source::scalar(frame, cfg.source, macd)?;
                vec![
                    project(&out, |row| Some(row.macd)),
                    project(&out, |row| Some(row.signal)),
                    project(&out, |row| Some(row.histogram)),
                ]
            }
            Self::Kvo(cfg) => {
                let kvo = Kvo::new(cfg.short_period, cfg.long_period)?;
                let out = source::candles(frame, CandleSource::Raw, true, kvo)?;
                vec![
                    project(&out, |row| Some(row.money_flow_multiplier)),
                    project(&out, |row| Some(row.money_flow_volume)),
                    project(&out, |row| Some(row.kvo)),
                ]
            }
            Self::Obv => vec![source::candles(frame, CandleSource::Raw, true, Obv::new())?],
            Self::Kalman(cfg) => {
                let filter =
                    KalmanFilter::<Decimal>::new(cfg.process_variance, cfg.measurement_variance)?;
                vec![source::scalar(frame, cfg.source, filter)?]
            }
            Self::Dmi(cfg) => {
                let dmi = DirectionalMovement::new(cfg.period)?;
                let out = source::candles(frame, CandleSource::Raw, false, dmi)?;
                vec![
                    project(&out, |row| Some(row.plus_di)),
                    project(&out, |row| Some(row.minus_di)),
                ]
            }
            Self::Adx(cfg) => {
                let adx = Adx::new(cfg.period, cfg.smoothing_period)?;
                let out = source::candles(frame, CandleSource::Raw, false, adx)?;
                vec![
                    project(&out, |row| Some(row.directional.true_range)),
                    project(&out, |row| Some(row.directional.plus_dm)),
                    project(&out, |row| Some(row.directional.minus_dm)),
                    project(&out, |row| Some(row.directional.plus_di)),
                    project(&out, |row| Some(row.directional.minus_di)),
                    project(&out, |row| Some(row.dx)),
                    project(&out, |row| row.adx),
                ]
            }
            Self::Aroon(cfg) => {
                let out = source::candles(frame, CandleSource::Raw, false, Aroon::new(cfg.period)?)?;
                vec![
                    project(&out, |row| Some(row.up)),
                    project(&out, |row| Some(row.down)),
                ]
            }
            Self::Rsi(cfg) => {
                let rsi = Rsi::<Decimal>::with_smoothing(cfg.period, cfg.smoothing.into())?;
                vec![source::scalar(frame, cfg.source, rsi)?]
            }
            Self::Roc(cfg) => vec![source::scalar(
                frame,
                cfg.source,
                Roc::<Decimal>::new(cfg.period)?,
            )?],
            Self::Hma(cfg) => {
                let hma = Hma::with_average(cfg.period, cfg.average.into())?;
                vec![source::scalar(frame, cfg.source, hma)?]
            }
            Self::Thma(cfg) => {
                let thma = Thma::with_average(cfg.period, cfg.average.into())?;
                vec![source::scalar(frame, cfg.source, thma)?]
            }
            Self::Supertrend(cfg) => {
                let supertrend = Supertrend::new(cfg.atr_period, cfg.factor)?;
                let out = source::candles(frame, CandleSource::Raw, false, supertrend)?;
                vec![
                    project(&out, |row| Some(row.atr)),
                    project(&out, |row| Some(row.upper_band)),
                    project(&out, |row| Some(row.lower_band)),
                    project(&out, |row| Some(row.trend)),
                ]
            }
            Self::Fibobars(cfg) => {
                let fibobars = Fibobars::new(cfg.period, cfg.level)?;
                let out = source::candles(frame, cfg.candles, false, fibobars)?;
                vec![project(&out, |trend| Some(trend.signum()))]
            }
            Self::Ichimoku(cfg) => {
                let ichimoku =
                    Ichimoku::new(cfg.conversion_period, cfg.base_period, cfg.span_b_period)?;
                let out = source::candles(frame, CandleSource::Raw, false, ichimoku)?;
                vec![
                    project(&out, |row| row.conversion_line),
                    project(&out, |row| row.base_line),
                    project(&out, |row| row.span_a),
                    project(&out, |row| row.span_b),
                ]
            }
            Self::Coppock(cfg) => {
                let coppock = Coppock::new(cfg.short_roc, cfg.long_roc, cfg.smoothing_span)?;
                let out = source::scalar(frame, cfg.source, coppock)?;
                vec![
                    project(&out, |row| Some(row.short_roc)),
                    project(&out, |row| Some(row.long_roc)),
                    project(&out, |row| Some(row.short_roc + row.long_roc)),
                    project(&out, |row| Some(row.curve)),
                ]
            }
            Self::MassIndex(cfg) => {
                let mass = MassIndex::new(cfg.ema_span, cfg.sum_period)?;
                vec![source::candles(frame, cfg.candles, false, mass)?]
            }
            Self::Kairi(cfg) => vec![source::scalar(
                frame,
                cfg.source,
                Kairi::<Decimal>::new(cfg.period)?,
            )?],
            Self::PercentageOscillator(cfg) => {
                let po = PercentageOscillator::<Decimal>::new(cfg.short_span, cfg.long_span)?;
                vec![source::scalar(frame, cfg.source, po)?]
            }
            Self::Bbp(cfg) => {
                let bbp = BullBearPower::new(cfg.span)?;
                let out = source::candles(frame, CandleSource::Raw, false, bbp)?;
                vec![
                    project(&out, |row| Some(row.bull)),
                    project(&out, |row| Some(row.bear)),
                    project(&out, |row| Some(row.power)),
                ]
            }
            Self::HeikinAshi => {
                let out = source::candles(frame, CandleSource::Raw, false, HeikinAshi::new())?;
                vec![
                    project(&out, |candle| Some(candle.open)),
                    project(&out, |candle| Some(candle.high)),
                    project(&out, |candle| Some(candle.low)),
                    project(&out, |candle| Some(candle.close)),
                ]
            }
        };
        Ok(columns)
    }
}

/// A configured indicator plus optional output naming.
///
/// `prefix` is prepended to every output column. `name` replaces the column name
/// outright and is only accepted for indicators with a single output column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    #[serde(flatten)]
    pub kind: IndicatorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl From<IndicatorKind> for IndicatorConfig {
    fn from(kind: IndicatorKind) -> Self {
        Self {
            kind,
            name: None,
            prefix: None,
        }
    }
}

impl IndicatorConfig {
    /// Replace the single output column name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Prefix every output column name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Output column names after applying `name` and `prefix`.
    pub fn column_names(&self) -> Result<Vec<String>, StudyError> {
        let mut columns = self.kind.default_columns();
        if let Some(name) = &self.name {
            if columns.len() != 1 {
                return Err(StudyError::AmbiguousName {
                    kind: self.kind.label(),
                    columns: columns.len(),
                });
            }
            columns = vec![name.clone()];
        }
        if let Some(prefix) = &self.prefix {
            for column in &mut columns {
                column.insert_str(0, prefix);
            }
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_indicator_collection() {
        let adx = AdxConfig::default();
        assert_eq!((adx.period, adx.smoothing_period), (14, 14));
        let macd = MacdConfig::default();
        assert_eq!(
            (macd.fast_period, macd.slow_period, macd.signal_period),
            (12, 26, 9)
        );
        assert_eq!(BollingerConfig::default().std_multiplier, dec!(2));
        assert_eq!(FibobarsConfig::default().level, dec!(0.618));
        assert_eq!(KairiConfig::default().source, Field::HaClose);
        assert_eq!(SupertrendConfig::default().factor, dec!(3));
    }

    #[test]
    fn parameterised_columns_carry_their_lookback() {
        let sma = IndicatorKind::Sma(SmaConfig {
            period: 50,
            ..Default::default()
        });
        assert_eq!(sma.default_columns(), vec!["SMA_50"]);
        let kalman = IndicatorKind::Kalman(KalmanConfig {
            source: Field::Open,
            ..Default::default()
        });
        assert_eq!(kalman.default_columns(), vec!["smoothed_open"]);
    }

    #[test]
    fn name_requires_single_column() {
        let renamed = IndicatorConfig::from(IndicatorKind::Obv).with_name("obv_total");
        assert_eq!(renamed.column_names().unwrap(), vec!["obv_total"]);

        let err = IndicatorConfig::from(IndicatorKind::Macd(MacdConfig::default()))
            .with_name("macd")
            .column_names()
            .unwrap_err();
        assert!(matches!(err, StudyError::AmbiguousName { columns: 3, .. }));
    }

    #[test]
    fn prefix_applies_to_every_column() {
        let config = IndicatorConfig::from(IndicatorKind::Aroon(PeriodConfig::default()))
            .with_prefix("btc_");
        assert_eq!(
            config.column_names().unwrap(),
            vec!["btc_Aroon_Up", "btc_Aroon_Down"]
        );
    }
}
