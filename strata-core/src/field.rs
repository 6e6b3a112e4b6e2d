use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Well-known input columns of a [`Frame`](crate::Frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
    HaOpen,
    HaHigh,
    HaLow,
    HaClose,
}

impl Field {
    /// The raw OHLCV columns, in the order candles carry them.
    pub const OHLCV: [Field; 5] = [
        Field::Open,
        Field::High,
        Field::Low,
        Field::Close,
        Field::Volume,
    ];

    /// The Heikin-Ashi columns derived from the raw candles.
    pub const HEIKIN_ASHI: [Field; 4] = [
        Field::HaOpen,
        Field::HaHigh,
        Field::HaLow,
        Field::HaClose,
    ];

    /// Column name used inside a frame.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Open => "open",
            Field::High => "high",
            Field::Low => "low",
            Field::Close => "close",
            Field::Volume => "volume",
            Field::HaOpen => "ha_open",
            Field::HaHigh => "ha_high",
            Field::HaLow => "ha_low",
            Field::HaClose => "ha_close",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::OHLCV
            .into_iter()
            .chain(Self::HEIKIN_ASHI)
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| format!("unknown field: {value}"))
    }
}
