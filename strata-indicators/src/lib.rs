#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Streaming technical indicators built on decimal arithmetic.

/// Indicator composition helpers such as `PipedIndicator`.
pub mod combinators;
/// Foundational traits, the error type and shared numeric helpers.
pub mod core;
/// Built-in indicator implementations.
pub mod indicators;
/// Whole-series evaluation and frame row extraction.
pub mod series;
/// Incremental rolling-window statistics.
pub mod window;

/// Re-export of the combinators for convenience.
pub use crate::combinators::{IndicatorExt, PipedIndicator};
/// Re-export of the core traits and error type to make the crate easy to consume.
pub use crate::core::{Indicator, IndicatorError, Input};
