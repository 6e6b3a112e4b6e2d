//! One-pass evaluation of an indicator over a whole series.
//!
//! Every helper starts from fresh state and returns one entry per input row, so
//! outputs stay aligned with the frame they were read from.

use rust_decimal::Decimal;
use strata_core::{Candle, Field, Frame};

use crate::core::{Indicator, IndicatorError};

/// Evaluate `indicator` over `inputs` from a clean state.
pub fn evaluate<T, I>(mut indicator: T, inputs: I) -> Vec<Option<T::Output>>
where
    T: Indicator,
    I: IntoIterator<Item = T::Input>,
{
    indicator.reset();
    inputs
        .into_iter()
        .map(|input| indicator.next(input))
        .collect()
}

/// Like [`evaluate`], but rows whose input is missing produce `None` and are
/// reported to the indicator through [`Indicator::skip`]. Windowed indicators
/// therefore warm up again after a gap, while recursive ones resume from the
/// state they held before it.
pub fn evaluate_sparse<T, I>(mut indicator: T, inputs: I) -> Vec<Option<T::Output>>
where
    T: Indicator,
    I: IntoIterator<Item = Option<T::Input>>,
{
    indicator.reset();
    inputs
        .into_iter()
        .map(|input| match input {
            Some(value) => indicator.next(value),
            None => {
                indicator.skip();
                None
            }
        })
        .collect()
}

/// Borrow a scalar input column.
pub fn values<'a>(frame: &'a Frame, column: &str) -> Result<&'a [Option<Decimal>], IndicatorError> {
    Ok(frame.column(column)?)
}

/// Which candle columns a row extraction reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleColumns {
    /// `open`/`high`/`low`/`close`; volume is read as zero.
    Prices,
    /// `open`/`high`/`low`/`close`/`volume`.
    PricesAndVolume,
    /// `ha_open`/`ha_high`/`ha_low`/`ha_close`; volume is read as zero.
    HeikinAshi,
}

impl CandleColumns {
    fn fields(self) -> &'static [Field] {
        const PRICES: [Field; 4] = [Field::Open, Field::High, Field::Low, Field::Close];
        match self {
            Self::Prices => &PRICES,
            Self::PricesAndVolume => &Field::OHLCV,
            Self::HeikinAshi => &Field::HEIKIN_ASHI,
        }
    }
}

/// Assemble one candle per frame row.
///
/// All required columns are validated before any row is read. A row with any
/// missing cell yields `None`.
pub fn candles(frame: &Frame, columns: CandleColumns) -> Result<Vec<Option<Candle>>, IndicatorError> {
    let fields = columns.fields();
    frame.require(fields.iter().map(|field| field.as_str()))?;
    let series = fields
        .iter()
        .map(|field| frame.field(*field))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = frame
        .timestamps()
        .iter()
        .enumerate()
        .map(|(row, timestamp)| {
            let open = series[0][row]?;
            let high = series[1][row]?;
            let low = series[2][row]?;
            let close = series[3][row]?;
            let volume = match series.get(4) {
                Some(volume) => volume[row]?,
                None => Decimal::ZERO,
            };
            Some(Candle {
                timestamp: *timestamp,
                open,
                high,
                low,
                close,
                volume,
            })
        })
        .collect();
    Ok(rows)
}
