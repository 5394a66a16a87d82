//! XLSX constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecXlsxFormats};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Data columns per exported chunk file.
pub const N_NCOLS_CHUNK_MAX: usize = 16_384;
/// Chunk file name prefix; files are `file_part_{i}.xlsx`.
pub const C_FILE_PART_PREFIX: &str = "file_part_";
/// Chunk file extension.
pub const C_FILE_PART_EXT: &str = "xlsx";
/// Worksheet name used for every chunk file.
pub const C_SHEET_NAME_DEFAULT: &str = "Sheet1";
/// Name of the row-label column inside chunk dataframes.
///
/// Never numeric, so it cannot collide with a series column.
pub const C_INDEX_COLUMN_NAME: &str = "__axis__";

/// Build default format presets used by [`crate::writer::XlsxWriter`].
pub fn derive_default_xlsx_formats() -> SpecXlsxFormats {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        ..Default::default()
    };

    SpecXlsxFormats {
        text: cfg_base_fmt_spec.clone(),
        header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            border: Some(1),
            align: Some("center".to_string()),
            valign: Some("top".to_string()),
            ..Default::default()
        }),
        index: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            border: Some(1),
            valign: Some("top".to_string()),
            ..Default::default()
        }),
    }
}
