//! Study configuration loading and evaluation.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use strata_core::Frame;
use tracing::{debug, info, warn};

use crate::error::{StudyError, StudyResult};
use crate::indicator::IndicatorConfig;

/// Serialized form of a study: an ordered list of indicator entries.
///
/// ```toml
/// [[indicators]]
/// kind = "bollinger"
/// period = 20
/// std_multiplier = 2
///
/// [[indicators]]
/// kind = "sma"
/// period = 50
/// name = "slow"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    pub indicators: Vec<IndicatorConfig>,
}

impl StudyConfig {
    /// Parse a study from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("failed to parse study configuration")
    }

    /// Load a study from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()
            .with_context(|| format!("failed to read study configuration {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid study configuration in {}", path.display()))
    }
}

impl TryFrom<toml::Value> for StudyConfig {
    type Error = anyhow::Error;

    fn try_from(value: toml::Value) -> Result<Self, Self::Error> {
        value
            .try_into()
            .context("failed to parse study configuration")
    }
}

/// Ordered set of indicators evaluated over a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Study {
    entries: Vec<IndicatorConfig>,
}

impl From<StudyConfig> for Study {
    fn from(config: StudyConfig) -> Self {
        Self::new(config.indicators)
    }
}

impl Study {
    /// Create a study from its entries.
    pub fn new(entries: Vec<IndicatorConfig>) -> Self {
        Self { entries }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<IndicatorConfig>) {
        self.entries.push(entry.into());
    }

    /// Configured entries, in evaluation order.
    pub fn entries(&self) -> &[IndicatorConfig] {
        &self.entries
    }

    /// Evaluate every entry in order and append its output columns to `frame`.
    ///
    /// Later entries see the columns written by earlier ones. An entry that fails
    /// stops the study before any of its own columns are written; columns from
    /// entries that already succeeded stay in the frame.
    pub fn apply(&self, frame: &mut Frame) -> StudyResult<()> {
        info!(
            indicators = self.entries.len(),
            rows = frame.len(),
            "applying study"
        );
        for (index, entry) in self.entries.iter().enumerate() {
            let kind = entry.kind.label();
            let names = entry.column_names()?;
            let columns = entry
                .kind
                .evaluate(frame)
                .map_err(|source| StudyError::Indicator {
                    index,
                    kind,
                    source,
                })?;
            debug!(indicator = kind, columns = ?names, rows = frame.len(), "indicator evaluated");

            for (name, column) in names.into_iter().zip(columns) {
                if frame.contains(&name) {
                    warn!(indicator = kind, column = %name, "overwriting existing column");
                }
                frame
                    .insert(name, column)
                    .map_err(|source| StudyError::Frame {
                        index,
                        kind,
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::{IndicatorKind, SmaConfig};

    #[test]
    fn toml_entries_fill_defaults() {
        let config = StudyConfig::from_toml_str(
            r#"
            [[indicators]]
            kind = "sma"

            [[indicators]]
            kind = "obv"
            prefix = "spot_"
            "#,
        )
        .unwrap();
        assert_eq!(config.indicators.len(), 2);
        assert_eq!(
            config.indicators[0].kind,
            IndicatorKind::Sma(SmaConfig::default())
        );
        assert_eq!(config.indicators[1].prefix.as_deref(), Some("spot_"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = StudyConfig::from_toml_str("[[indicators]]\nkind = \"vwap\"\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse study configuration"));
    }

    #[test]
    fn toml_values_convert() {
        let value: toml::Value = toml::from_str("[[indicators]]\nkind = \"rsi\"\nperiod = 7\n").unwrap();
        let config = StudyConfig::try_from(value).unwrap();
        let study = Study::from(config);
        assert_eq!(study.entries().len(), 1);
    }
}
