//! Input extraction for configured indicators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_core::{Candle, Column, Field, Frame};
use strata_indicators::indicators::HeikinAshi;
use strata_indicators::series::{self, CandleColumns};
use strata_indicators::{Indicator, IndicatorError, IndicatorExt};

/// Which candles a candle-driven indicator reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandleSource {
    /// The `open`/`high`/`low`/`close` columns.
    #[default]
    Raw,
    /// The `ha_*` columns, derived from the raw columns when the frame lacks them.
    HeikinAshi,
}

fn has_heikin_ashi(frame: &Frame) -> bool {
    Field::HEIKIN_ASHI
        .iter()
        .all(|field| frame.contains(field.as_str()))
}

fn heikin_ashi_value(candle: &Candle, field: Field) -> Option<Decimal> {
    match field {
        Field::HaOpen => Some(candle.open),
        Field::HaHigh => Some(candle.high),
        Field::HaLow => Some(candle.low),
        Field::HaClose => Some(candle.close),
        _ => None,
    }
}

/// Values of `field`, deriving Heikin-Ashi fields from the raw prices when absent.
pub(crate) fn values(frame: &Frame, field: Field) -> Result<Column, IndicatorError> {
    if frame.contains(field.as_str()) {
        return Ok(frame.field(field)?.to_vec());
    }
    if !Field::HEIKIN_ASHI.contains(&field) {
        return Err(IndicatorError::MissingColumn(field.as_str().to_string()));
    }
    let raw = series::candles(frame, CandleColumns::Prices)?;
    let derived = series::evaluate_sparse(HeikinAshi::new(), raw);
    Ok(derived
        .iter()
        .map(|candle| candle.as_ref().and_then(|c| heikin_ashi_value(c, field)))
        .collect())
}

/// Evaluate a scalar indicator over one source field.
pub(crate) fn scalar<T>(
    frame: &Frame,
    field: Field,
    indicator: T,
) -> Result<Vec<Option<T::Output>>, IndicatorError>
where
    T: Indicator<Input = Decimal>,
{
    let inputs = values(frame, field)?;
    Ok(series::evaluate_sparse(indicator, inputs))
}

/// Evaluate a candle indicator; `volume` adds the volume column to the requirements.
pub(crate) fn candles<T>(
    frame: &Frame,
    source: CandleSource,
    volume: bool,
    indicator: T,
) -> Result<Vec<Option<T::Output>>, IndicatorError>
where
    T: Indicator<Input = Candle>,
{
    let raw = if volume {
        CandleColumns::PricesAndVolume
    } else {
        CandleColumns::Prices
    };
    let outputs = match source {
        CandleSource::Raw => series::evaluate_sparse(indicator, series::candles(frame, raw)?),
        CandleSource::HeikinAshi if has_heikin_ashi(frame) => series::evaluate_sparse(
            indicator,
            series::candles(frame, CandleColumns::HeikinAshi)?,
        ),
        CandleSource::HeikinAshi => series::evaluate_sparse(
            HeikinAshi::new().pipe(indicator),
            series::candles(frame, raw)?,
        ),
    };
    Ok(outputs)
}

/// Turn per-row outputs into one column.
pub(crate) fn project<T>(outputs: &[Option<T>], line: impl Fn(&T) -> Option<Decimal>) -> Column {
    outputs
        .iter()
        .map(|output| output.as_ref().and_then(&line))
        .collect()
}
