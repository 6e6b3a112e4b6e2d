use strata_core::FrameError;
use strata_indicators::IndicatorError;
use thiserror::Error;

/// Result alias for study evaluation.
pub type StudyResult<T> = Result<T, StudyError>;

/// Error type surfaced while applying a study to a frame.
#[derive(Debug, Error)]
pub enum StudyError {
    /// An indicator rejected its parameters or its input columns.
    #[error("indicator #{index} ({kind}) failed: {source}")]
    Indicator {
        index: usize,
        kind: &'static str,
        #[source]
        source: IndicatorError,
    },
    /// The frame refused an output column.
    #[error("indicator #{index} ({kind}) produced an unusable column: {source}")]
    Frame {
        index: usize,
        kind: &'static str,
        #[source]
        source: FrameError,
    },
    /// `name` was set on an indicator with several output columns.
    #[error("{kind} writes {columns} columns; use `prefix` instead of `name`")]
    AmbiguousName { kind: &'static str, columns: usize },
}
