use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{Candle, Field};

/// A named numeric column; `None` marks an undefined cell.
pub type Column = Vec<Option<Decimal>>;

/// Failures raised while building or querying a [`Frame`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A column required by the caller is absent.
    #[error("missing column '{0}'")]
    MissingColumn(String),
    /// A column does not have one cell per row.
    #[error("column '{column}' has {actual} rows, frame has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
    /// Timestamps are not strictly increasing.
    #[error("row {row} is not later than the previous row")]
    Unordered { row: usize },
}

/// Chronologically ordered table of named numeric columns.
///
/// Rows are never reordered once the frame exists; columns can only be appended or
/// replaced with a column of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    index: Vec<DateTime<Utc>>,
    columns: BTreeMap<String, Column>,
}

impl Frame {
    /// Build an empty-column frame over the given index.
    pub fn new(index: Vec<DateTime<Utc>>) -> Result<Self, FrameError> {
        if let Some(row) = index
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
            .map(|pos| pos + 1)
        {
            return Err(FrameError::Unordered { row });
        }
        Ok(Self {
            index,
            columns: BTreeMap::new(),
        })
    }

    /// Build a frame holding the OHLCV columns of the provided candles.
    pub fn from_candles(candles: &[Candle]) -> Result<Self, FrameError> {
        let mut frame = Self::new(candles.iter().map(|c| c.timestamp).collect())?;
        let extractors: [(Field, fn(&Candle) -> Decimal); 5] = [
            (Field::Open, |c| c.open),
            (Field::High, |c| c.high),
            (Field::Low, |c| c.low),
            (Field::Close, |c| c.close),
            (Field::Volume, |c| c.volume),
        ];
        for (field, extract) in extractors {
            let column = candles.iter().map(|c| Some(extract(c))).collect();
            frame.insert(field.as_str(), column)?;
        }
        Ok(frame)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Row timestamps in chronological order.
    #[must_use]
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Names of every column, sorted.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// True when the named column exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&[Option<Decimal>], FrameError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| FrameError::MissingColumn(name.to_string()))
    }

    /// Borrow one of the well-known input columns.
    pub fn field(&self, field: Field) -> Result<&[Option<Decimal>], FrameError> {
        self.column(field.as_str())
    }

    /// Fail with the first absent column among `names`.
    pub fn require<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), FrameError> {
        match names.into_iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(FrameError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }

    /// Append a column, replacing (and returning) any column with the same name.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<Option<Column>, FrameError> {
        let name = name.into();
        if column.len() != self.len() {
            return Err(FrameError::LengthMismatch {
                column: name,
                expected: self.len(),
                actual: column.len(),
            });
        }
        Ok(self.columns.insert(name, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ts(minute: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(minute * 60, 0).unwrap()
    }

    fn candle(minute: i64, close: Decimal) -> Candle {
        Candle {
            timestamp: ts(minute),
            open: close,
            high: close + dec!(1),
            low: close - dec!(1),
            close,
            volume: dec!(10),
        }
    }

    #[test]
    fn rejects_out_of_order_index() {
        let err = Frame::new(vec![ts(0), ts(2), ts(1)]).unwrap_err();
        assert_eq!(err, FrameError::Unordered { row: 2 });
        assert!(Frame::new(vec![ts(0), ts(0)]).is_err());
    }

    #[test]
    fn loads_ohlcv_columns_from_candles() {
        let frame = Frame::from_candles(&[candle(0, dec!(5)), candle(1, dec!(6))]).unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.field(Field::High).unwrap(), &[Some(dec!(6)), Some(dec!(7))]);
        assert_eq!(
            frame.column_names().collect::<Vec<_>>(),
            vec!["close", "high", "low", "open", "volume"]
        );
    }

    #[test]
    fn require_reports_first_missing_column() {
        let frame = Frame::from_candles(&[candle(0, dec!(5))]).unwrap();
        assert!(frame.require(["high", "low"]).is_ok());
        assert_eq!(
            frame.require(["high", "ha_close", "ha_open"]).unwrap_err(),
            FrameError::MissingColumn("ha_close".into())
        );
    }

    #[test]
    fn insert_checks_length_and_replaces() {
        let mut frame = Frame::new(vec![ts(0), ts(1)]).unwrap();
        let err = frame.insert("x", vec![None]).unwrap_err();
        assert!(matches!(err, FrameError::LengthMismatch { expected: 2, actual: 1, .. }));

        assert_eq!(frame.insert("x", vec![None, Some(dec!(1))]).unwrap(), None);
        let replaced = frame.insert("x", vec![Some(dec!(2)), None]).unwrap();
        assert_eq!(replaced, Some(vec![None, Some(dec!(1))]));
        assert_eq!(frame.column("x").unwrap(), &[Some(dec!(2)), None]);
    }
}
