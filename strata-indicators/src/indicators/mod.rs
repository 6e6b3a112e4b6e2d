//! Built-in indicator implementations provided by the crate.

pub mod aroon;
pub mod atr;
pub mod bbp;
pub mod bollinger;
pub mod coppock;
pub mod directional;
pub mod donchian;
pub mod ema;
pub mod fibobars;
pub mod heikin_ashi;
pub mod hull;
pub mod ichimoku;
pub mod kairi;
pub mod kalman;
pub mod kvo;
pub mod linreg;
pub mod macd;
pub mod mass_index;
pub mod obv;
pub mod percentage_oscillator;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod supertrend;
pub mod true_range;
pub mod wma;

pub use aroon::{Aroon, AroonOutput};
pub use atr::Atr;
pub use bbp::{BullBearPower, BullBearPowerOutput};
pub use bollinger::{BollingerBands, BollingerBandsOutput};
pub use coppock::{Coppock, CoppockOutput};
pub use directional::{Adx, AdxOutput, DirectionalMovement, DirectionalOutput};
pub use donchian::{Donchian, DonchianOutput};
pub use ema::Ema;
pub use fibobars::{Fibobars, TrendDirection};
pub use heikin_ashi::HeikinAshi;
pub use hull::{Hma, HullAverage, Thma};
pub use ichimoku::{Ichimoku, IchimokuOutput};
pub use kairi::Kairi;
pub use kalman::KalmanFilter;
pub use kvo::{Kvo, KvoOutput};
pub use linreg::LinRegSlope;
pub use macd::{Macd, MacdOutput};
pub use mass_index::MassIndex;
pub use obv::Obv;
pub use percentage_oscillator::PercentageOscillator;
pub use roc::Roc;
pub use rsi::{Rsi, RsiSmoothing};
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use supertrend::{Supertrend, SupertrendOutput};
pub use true_range::TrueRange;
pub use wma::Wma;
