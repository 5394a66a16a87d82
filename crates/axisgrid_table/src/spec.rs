//! Merge specification models and top-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::conf::{C_AXIS_FILE_NAME, C_SERIES_PATTERN_DEFAULT};

////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// One table cell.
///
/// `Missing` marks a row the series never reached; an empty input line is
/// `Text("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EnumCellValue {
    /// No value: the series was shorter than the axis.
    #[default]
    Missing,
    /// Raw text exactly as read from the series file.
    Text(String),
}

impl EnumCellValue {
    /// Whether this cell is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Borrow the text, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Pattern interpretation for series file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumSeriesPatternMode {
    /// Shell-like wildcards matched against the file name.
    #[default]
    Glob,
    /// Regular expression searched in the file name.
    Regex,
}

/// Input options for [`crate::merge::merge_series`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeOptions {
    /// Axis file name; always excluded from the series set.
    pub axis_file_name: String,
    /// Pattern selecting series files by name.
    pub pattern_series: String,
    /// How `pattern_series` is interpreted.
    pub rule_pattern: EnumSeriesPatternMode,
    /// Worker threads used to read series files. `1` reads serially.
    pub num_workers_max: usize,
}

impl Default for SpecMergeOptions {
    fn default() -> Self {
        Self {
            axis_file_name: C_AXIS_FILE_NAME.to_string(),
            pattern_series: C_SERIES_PATTERN_DEFAULT.to_string(),
            rule_pattern: EnumSeriesPatternMode::Glob,
            num_workers_max: 1,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures raised while loading the axis or merging series.
#[derive(Debug, Error)]
pub enum TableError {
    /// Filesystem read failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// An axis line is not numeric.
    #[error("could not convert axis label to float: '{label}' (line {line_no})")]
    ParseAxisLabel {
        /// Offending label text.
        label: String,
        /// One-based line number in the axis file.
        line_no: usize,
    },
    /// A table row label is not numeric.
    #[error("could not convert row label to float: '{label}' (row {row_idx})")]
    ParseRowLabel {
        /// Offending label text.
        label: String,
        /// Zero-based row position in the table.
        row_idx: usize,
    },
    /// A series column identifier is not numeric.
    #[error("could not convert column name to float: '{name}'")]
    ParseColumnName {
        /// Offending column identifier.
        name: String,
    },
    /// A series holds more values than the axis has labels.
    #[error(
        "Length of values ({n_values}) does not match length of index ({n_axis}) for series '{name}'"
    )]
    SeriesTooLong {
        /// Column identifier of the series.
        name: String,
        /// Number of values read.
        n_values: usize,
        /// Number of axis labels.
        n_axis: usize,
    },
    /// Column length differs from the table height.
    #[error("Column '{name}' has {n_values} values, expected {n_rows}")]
    ColumnLengthMismatch {
        /// Column identifier.
        name: String,
        /// Number of values supplied.
        n_values: usize,
        /// Table height.
        n_rows: usize,
    },
    /// Row label not present in the table.
    #[error("Row not found: {0:?}")]
    RowNotFound(String),
    /// Column identifier not present in the table.
    #[error("Column not found: {0:?}")]
    ColumnNotFound(String),
    /// Invalid series selection pattern.
    #[error("Invalid series pattern: {0}")]
    InvalidPattern(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
