//! Shared XLSX specification models.

use std::path::PathBuf;

use thiserror::Error;

use crate::conf::{
    C_FILE_PART_PREFIX, C_SHEET_NAME_DEFAULT, N_NCOLS_CHUNK_MAX, derive_default_xlsx_formats,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
        }
    }
}

/// Format presets for one workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxFormats {
    /// Body cells.
    pub text: SpecCellFormat,
    /// Header row.
    pub header: SpecCellFormat,
    /// Row-label column.
    pub index: SpecCellFormat,
}

impl Default for SpecXlsxFormats {
    fn default() -> Self {
        derive_default_xlsx_formats()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AutofitPolicy

/// Column autofit policy; widths are inferred from header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportOptions

/// How many chunk files a table of `n` columns produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumChunkCountRule {
    /// `n / ceiling + 1`: an exact multiple of the ceiling gets a trailing
    /// chunk with no data columns.
    #[default]
    Legacy,
    /// `ceil(n / ceiling)`, at least one chunk.
    Exact,
}

/// Input options for [`crate::export::export_table_chunks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportOptions {
    /// Data columns per chunk file.
    pub n_cols_chunk_max: usize,
    /// Chunk count rule.
    pub rule_chunk_count: EnumChunkCountRule,
    /// File name prefix; the chunk index and `.xlsx` are appended.
    pub file_name_prefix: String,
    /// Worksheet name inside each chunk file.
    pub sheet_name: String,
    /// Header text above the row-label column.
    pub index_header: String,
    /// Format presets.
    pub formats: SpecXlsxFormats,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            n_cols_chunk_max: N_NCOLS_CHUNK_MAX,
            rule_chunk_count: EnumChunkCountRule::Legacy,
            file_name_prefix: C_FILE_PART_PREFIX.to_string(),
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            index_header: String::new(),
            formats: SpecXlsxFormats::default(),
            policy_autofit: SpecAutofitCellsPolicy::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSpecification

/// Concrete sheet part emitted to workbook (after Excel-limit slicing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSlice {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Inclusive source row start.
    pub row_start_inclusive: usize,
    /// Exclusive source row end.
    pub row_end_exclusive: usize,
    /// Inclusive source data-column start.
    pub col_start_inclusive: usize,
    /// Exclusive source data-column end.
    pub col_end_exclusive: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheet slices produced by the write call.
    pub sheets: Vec<SpecSheetSlice>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// One chunk file written by the exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecChunkFile {
    /// Written file path.
    pub path: PathBuf,
    /// Inclusive table column start.
    pub col_start_inclusive: usize,
    /// Exclusive table column end.
    pub col_end_exclusive: usize,
    /// Worksheets inside the file.
    pub sheets: Vec<SpecSheetSlice>,
}

impl SpecChunkFile {
    /// Number of data columns in this chunk.
    pub fn width(&self) -> usize {
        self.col_end_exclusive - self.col_start_inclusive
    }
}

/// Result of one `export_table_chunks` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportExport {
    /// Chunk files in index order.
    pub files: Vec<SpecChunkFile>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportExport {
    /// Total data columns written across all chunk files.
    pub fn cols_written(&self) -> usize {
        self.files.iter().map(SpecChunkFile::width).sum()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} files={} columns={} warnings={}",
            self.files.len(),
            self.cols_written(),
            self.warnings.len()
        )
    }
}

impl std::fmt::Display for ReportExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format("[EXPORT]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures raised while exporting chunk files.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid export options.
    #[error("{0}")]
    InvalidOptions(String),
    /// Destination directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    DestinationInitFailed {
        /// Destination directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Building the chunk dataframe failed.
    #[error("Failed to build chunk {chunk_idx}: {message}")]
    Frame {
        /// Chunk index.
        chunk_idx: usize,
        /// Error text.
        message: String,
    },
    /// Workbook write or save failed.
    #[error("Failed to write {}: {message}", path.display())]
    Xlsx {
        /// Chunk file path.
        path: PathBuf,
        /// Error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
