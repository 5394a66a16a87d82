//! `axisgrid_io_xlsx` v1:
//! Column-chunked XLSX export of merged series tables.
//!
//! Layout:
//! - `conf`   : Excel limits, chunk naming and default presets
//! - `spec`   : formats, options, reports and errors
//! - `util`   : pure helper functions
//! - `writer` : pure-Rust workbook writer kernel
//! - `export` : table to `file_part_{i}.xlsx` chunk files
pub mod conf;
pub mod export;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_FILE_PART_PREFIX, C_INDEX_COLUMN_NAME, C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX,
    N_NCOLS_CHUNK_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use export::export_table_chunks;
pub use spec::{
    EnumChunkCountRule, ExportError, ReportExport, SpecAutofitCellsPolicy, SpecCellFormat,
    SpecChunkFile, SpecExportOptions, SpecSheetSlice, SpecXlsxFormats, SpecXlsxReport,
};
pub use util::{
    calculate_chunk_count, derive_chunk_file_name, plan_column_chunks, plan_sheet_slices,
    sanitize_sheet_name,
};
pub use writer::{SpecXlsxSheetWriteOptions, XlsxWriter};
