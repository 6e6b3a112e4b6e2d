use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    /// Midpoint of the high/low range.
    #[must_use]
    pub fn hl2(&self) -> Decimal {
        (self.high + self.low) / Decimal::TWO
    }

    /// Distance between high and low.
    #[must_use]
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// True when the candle closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.open > self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle() -> Candle {
        Candle {
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            open: dec!(11),
            high: dec!(12),
            low: dec!(9),
            close: dec!(10),
            volume: dec!(100),
        }
    }

    #[test]
    fn derives_range_helpers() {
        let candle = candle();
        assert_eq!(candle.hl2(), dec!(10.5));
        assert_eq!(candle.range(), dec!(3));
        assert!(candle.is_bearish());
    }

    #[test]
    fn serializes_prices_as_strings() {
        let json = serde_json::to_value(candle()).unwrap();
        assert_eq!(json["close"], "10");
    }
}
