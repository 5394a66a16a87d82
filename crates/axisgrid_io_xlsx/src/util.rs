//! Stateless helper utilities used by the exporter and writer kernel.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{
    C_FILE_PART_EXT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumChunkCountRule, SpecSheetSlice, SpecXlsxReport};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnChunking

/// Number of chunk files for `width_table` columns.
pub fn calculate_chunk_count(
    width_table: usize,
    n_cols_chunk_max: usize,
    rule_chunk_count: EnumChunkCountRule,
) -> usize {
    match rule_chunk_count {
        EnumChunkCountRule::Legacy => width_table / n_cols_chunk_max + 1,
        EnumChunkCountRule::Exact => usize::max(1, width_table.div_ceil(n_cols_chunk_max)),
    }
}

/// Plan `(col_start, col_end)` ranges for each chunk file.
///
/// Ranges are clamped to `width_table`; the legacy rule can yield a trailing
/// empty range.
pub fn plan_column_chunks(
    width_table: usize,
    n_cols_chunk_max: usize,
    rule_chunk_count: EnumChunkCountRule,
) -> Result<Vec<(usize, usize)>, String> {
    if n_cols_chunk_max == 0 {
        return Err("n_cols_chunk_max must be >= 1.".to_string());
    }

    let n_chunks = calculate_chunk_count(width_table, n_cols_chunk_max, rule_chunk_count);
    Ok((0..n_chunks)
        .map(|n_idx_chunk| {
            let n_col_start = usize::min(width_table, n_idx_chunk * n_cols_chunk_max);
            let n_col_end = usize::min(width_table, n_col_start + n_cols_chunk_max);
            (n_col_start, n_col_end)
        })
        .collect())
}

/// File name for chunk `chunk_idx`, e.g. `file_part_0.xlsx`.
pub fn derive_chunk_file_name(prefix: &str, chunk_idx: usize) -> String {
    format!("{prefix}{chunk_idx}.{C_FILE_PART_EXT}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DataFrameLikeUtils

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> Result<(), String> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter_map(|(c_name, l_pos)| {
            if l_pos.len() > 1 {
                Some(format!(
                    "{c_name:?} x{} at indices {:?}",
                    l_pos.len(),
                    l_pos
                ))
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    Err(format!("Duplicate column names detected: {c_msg}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Split a logical sheet into Excel-compliant sheet slices.
///
/// `width_data` excludes the `width_index` leading columns that every slice
/// repeats. A sheet with no data rows or columns still yields one slice.
pub fn plan_sheet_slices(
    height_data: usize,
    width_data: usize,
    height_header: usize,
    width_index: usize,
    sheet_name: &str,
    report: &mut SpecXlsxReport,
) -> Result<Vec<SpecSheetSlice>, String> {
    if height_header == 0 {
        return Err("height_header must be >= 1.".to_string());
    }

    let n_rows_data_max = N_NROWS_EXCEL_MAX.saturating_sub(height_header);
    if n_rows_data_max == 0 {
        return Err(format!(
            "Header too tall: height_header={height_header} exceeds Excel limit."
        ));
    }
    let n_cols_data_max = N_NCOLS_EXCEL_MAX.saturating_sub(width_index);
    if n_cols_data_max == 0 {
        return Err(format!(
            "Index too wide: width_index={width_index} exceeds Excel limit."
        ));
    }

    let l_col_slices = derive_contiguous_slices(width_data, n_cols_data_max);
    let l_row_slices = derive_contiguous_slices(height_data, n_rows_data_max);
    let n_parts_total = l_col_slices.len() * l_row_slices.len();

    let mut l_sheet_parts = Vec::with_capacity(n_parts_total);
    let mut n_idx_part = 1;
    for (col_start, col_end) in &l_col_slices {
        for (row_start, row_end) in &l_row_slices {
            let c_part_sheet_name = if n_parts_total == 1 {
                sheet_name.to_string()
            } else {
                create_sheet_identifier(sheet_name, n_idx_part)
            };

            l_sheet_parts.push(SpecSheetSlice {
                sheet_name: c_part_sheet_name,
                row_start_inclusive: *row_start,
                row_end_exclusive: *row_end,
                col_start_inclusive: *col_start,
                col_end_exclusive: *col_end,
            });
            n_idx_part += 1;
        }
    }

    if n_parts_total > 1 {
        report.warn(format!(
            "Excel limit overflow: split into {} sheets (columns-first, then rows).",
            l_sheet_parts.len()
        ));
    }

    Ok(l_sheet_parts)
}

fn derive_contiguous_slices(n_total: usize, n_max: usize) -> Vec<(usize, usize)> {
    let mut l_slices = Vec::new();
    let mut n_start = 0;
    while n_start < n_total {
        let n_end = usize::min(n_total, n_start + n_max);
        l_slices.push((n_start, n_end));
        n_start = n_end;
    }
    if l_slices.is_empty() {
        l_slices.push((0, 0));
    }
    l_slices
}

/// Create suffixed sheet name (`base_1`, `base_2`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_column_chunks_legacy_adds_trailing_empty_chunk_on_exact_multiple() {
        assert_eq!(
            plan_column_chunks(16_384, 16_384, EnumChunkCountRule::Legacy).expect("plan"),
            vec![(0, 16_384), (16_384, 16_384)]
        );
        assert_eq!(
            plan_column_chunks(0, 16_384, EnumChunkCountRule::Legacy).expect("plan"),
            vec![(0, 0)]
        );
        assert_eq!(
            plan_column_chunks(5, 2, EnumChunkCountRule::Legacy).expect("plan"),
            vec![(0, 2), (2, 4), (4, 5)]
        );
    }

    #[test]
    fn plan_column_chunks_exact_rule() {
        assert_eq!(
            plan_column_chunks(4, 2, EnumChunkCountRule::Exact).expect("plan"),
            vec![(0, 2), (2, 4)]
        );
        assert_eq!(
            plan_column_chunks(0, 2, EnumChunkCountRule::Exact).expect("plan"),
            vec![(0, 0)]
        );
        assert!(plan_column_chunks(4, 0, EnumChunkCountRule::Exact).is_err());
    }

    #[test]
    fn plan_column_chunks_covers_every_column_once() {
        for width in [1usize, 7, 16_383, 16_384, 16_385, 40_000] {
            let l_chunks =
                plan_column_chunks(width, 16_384, EnumChunkCountRule::Legacy).expect("plan");
            let n_total: usize = l_chunks.iter().map(|(s, e)| e - s).sum();
            assert_eq!(n_total, width);
            for (n_idx, (n_start, _)) in l_chunks.iter().enumerate() {
                assert_eq!(*n_start, usize::min(width, n_idx * 16_384));
            }
        }
    }

    #[test]
    fn derive_chunk_file_name_uses_index() {
        assert_eq!(derive_chunk_file_name("file_part_", 0), "file_part_0.xlsx");
        assert_eq!(derive_chunk_file_name("file_part_", 12), "file_part_12.xlsx");
    }

    #[test]
    fn plan_sheet_slices_reserves_index_column() {
        let mut report = SpecXlsxReport::default();
        let l_slices =
            plan_sheet_slices(3, 16_384, 1, 1, "Sheet1", &mut report).expect("plan slices");

        assert_eq!(l_slices.len(), 2);
        assert_eq!(l_slices[0].sheet_name, "Sheet1_1");
        assert_eq!(
            (l_slices[0].col_start_inclusive, l_slices[0].col_end_exclusive),
            (0, 16_383)
        );
        assert_eq!(
            (l_slices[1].col_start_inclusive, l_slices[1].col_end_exclusive),
            (16_383, 16_384)
        );
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn plan_sheet_slices_empty_sheet_yields_one_slice() {
        let mut report = SpecXlsxReport::default();
        let l_slices = plan_sheet_slices(3, 0, 1, 1, "Sheet1", &mut report).expect("plan");
        assert_eq!(l_slices.len(), 1);
        assert_eq!(l_slices[0].sheet_name, "Sheet1");
        assert_eq!(l_slices[0].row_end_exclusive, 3);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn sanitize_sheet_name_strips_illegal_chars() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
    }

    #[test]
    fn validate_unique_columns_reports_duplicates() {
        let l_cols = vec!["1".to_string(), "2".to_string(), "1".to_string()];
        let err = validate_unique_columns(&l_cols).expect_err("duplicates");
        assert!(err.contains("\"1\" x2 at indices [0, 2]"));
    }
}
