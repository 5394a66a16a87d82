//! Column-chunked export of a merged table into `file_part_{i}.xlsx` files.

use std::fs;
use std::path::Path;

use axisgrid_table::Table;
use polars::prelude::{Column, DataFrame};

use crate::conf::C_INDEX_COLUMN_NAME;
use crate::spec::{ExportError, ReportExport, SpecChunkFile, SpecExportOptions};
use crate::util::{derive_chunk_file_name, plan_column_chunks};
use crate::writer::{SpecXlsxSheetWriteOptions, XlsxWriter};

/// Write `table` into consecutive column chunks under `dir_destination`.
///
/// Every chunk file carries the full row-label column and the columns
/// `[i * n_cols_chunk_max, (i + 1) * n_cols_chunk_max)` of the table. The
/// destination directory is created when missing; existing chunk files are
/// overwritten.
pub fn export_table_chunks<P: AsRef<Path>>(
    table: &Table,
    dir_destination: P,
    options: &SpecExportOptions,
) -> Result<ReportExport, ExportError> {
    let dir_destination = dir_destination.as_ref();
    let l_chunks = plan_column_chunks(
        table.width(),
        options.n_cols_chunk_max,
        options.rule_chunk_count,
    )
    .map_err(ExportError::InvalidOptions)?;

    fs::create_dir_all(dir_destination).map_err(|source| ExportError::DestinationInitFailed {
        path: dir_destination.to_path_buf(),
        source,
    })?;

    let options_sheet = SpecXlsxSheetWriteOptions {
        col_index: Some(C_INDEX_COLUMN_NAME.to_string()),
        index_header: options.index_header.clone(),
        policy_autofit: options.policy_autofit.clone(),
    };

    let mut report = ReportExport::default();
    for (n_idx_chunk, (n_col_start, n_col_end)) in l_chunks.into_iter().enumerate() {
        let table_chunk = table.slice_columns(n_col_start..n_col_end);
        let df_chunk = derive_chunk_dataframe(&table_chunk).map_err(|message| {
            ExportError::Frame {
                chunk_idx: n_idx_chunk,
                message,
            }
        })?;

        let path_file_out =
            dir_destination.join(derive_chunk_file_name(&options.file_name_prefix, n_idx_chunk));
        let mut writer = XlsxWriter::new(path_file_out.clone(), options.formats.clone());
        let report_sheet = writer
            .write_sheet_from_dataframe(&df_chunk, &options.sheet_name, &options_sheet)
            .and_then(|report_sheet| writer.close().map(|_| report_sheet))
            .map_err(|message| ExportError::Xlsx {
                path: path_file_out.clone(),
                message,
            })?;

        log::info!(
            "Data chunk {n_idx_chunk} has been successfully written to {}",
            path_file_out.display()
        );
        if n_col_start == n_col_end && table.width() > 0 {
            log::debug!("Chunk {n_idx_chunk} carries no data columns.");
        }

        report.warnings.extend(report_sheet.warnings);
        report.files.push(SpecChunkFile {
            path: path_file_out,
            col_start_inclusive: n_col_start,
            col_end_exclusive: n_col_end,
            sheets: report_sheet.sheets,
        });
    }

    Ok(report)
}

/// Build the chunk frame: row labels first, then one string column per series.
fn derive_chunk_dataframe(table: &Table) -> Result<DataFrame, String> {
    let mut l_columns = Vec::with_capacity(table.width() + 1);
    l_columns.push(Column::new(
        C_INDEX_COLUMN_NAME.into(),
        table.row_labels().to_vec(),
    ));

    for (n_idx_col, c_name) in table.col_names().iter().enumerate() {
        let l_values: Vec<Option<&str>> = table
            .column(n_idx_col)
            .ok_or_else(|| format!("Column index out of range: {n_idx_col}"))?
            .iter()
            .map(|value| value.as_text())
            .collect();
        l_columns.push(Column::new(c_name.as_str().into(), l_values));
    }

    DataFrame::new(l_columns).map_err(|err| err.to_string())
}
