//! XLSX writer kernel that converts a DataFrame into workbook output.

use std::collections::BTreeSet;
use std::path::PathBuf;

use polars::prelude::{AnyValue, Column, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::conf::N_LEN_EXCEL_SHEET_NAME_MAX;
use crate::spec::{
    SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetSlice, SpecXlsxFormats, SpecXlsxReport,
};
use crate::util::{plan_sheet_slices, sanitize_sheet_name, validate_unique_columns};

const N_ROWS_HEADER: usize = 1;

/// Per-sheet call options.
#[derive(Debug, Clone)]
pub struct SpecXlsxSheetWriteOptions {
    /// Dataframe column written leftmost as the row-label column.
    pub col_index: Option<String>,
    /// Header text above the row-label column.
    pub index_header: String,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecXlsxSheetWriteOptions {
    fn default() -> Self {
        Self {
            col_index: None,
            index_header: String::new(),
            policy_autofit: SpecAutofitCellsPolicy::default(),
        }
    }
}

/// Stateful workbook writer.
///
/// The header row and the row-label column are frozen on every worksheet.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    formats: SpecXlsxFormats,
    set_sheet_names_existing: BTreeSet<String>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and format presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf, formats: SpecXlsxFormats) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            formats,
            set_sheet_names_existing: BTreeSet::new(),
            if_closed: false,
        }
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one logical sheet from an in-memory dataframe.
    ///
    /// Splits into several worksheets when the frame exceeds Excel limits;
    /// each part repeats the row-label column.
    pub fn write_sheet_from_dataframe(
        &mut self,
        df_data: &DataFrame,
        sheet_name: &str,
        options: &SpecXlsxSheetWriteOptions,
    ) -> Result<SpecXlsxReport, String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }
        validate_policy_autofit(&options.policy_autofit)?;

        let l_colnames_df: Vec<String> = df_data
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_colnames_df)?;

        let n_idx_col_index = match &options.col_index {
            Some(c_name) => Some(
                l_colnames_df
                    .iter()
                    .position(|c| c == c_name)
                    .ok_or_else(|| format!("Index column not found: {c_name:?}"))?,
            ),
            None => None,
        };
        let l_cols_idx_data: Vec<usize> = (0..l_colnames_df.len())
            .filter(|n_idx| Some(*n_idx) != n_idx_col_index)
            .collect();
        let n_width_index = usize::from(n_idx_col_index.is_some());

        let l_cols = df_data.get_columns();
        let col_index = n_idx_col_index.map(|n_idx| &l_cols[n_idx]);
        let l_cols_data: Vec<&Column> = l_cols_idx_data.iter().map(|n| &l_cols[*n]).collect();
        let l_header_data: Vec<&str> = l_cols_idx_data
            .iter()
            .map(|n| l_colnames_df[*n].as_str())
            .collect();

        let mut report = SpecXlsxReport::default();
        let l_sheet_parts = plan_sheet_slices(
            df_data.height(),
            l_cols_data.len(),
            N_ROWS_HEADER,
            n_width_index,
            &sanitize_sheet_name(sheet_name, "_"),
            &mut report,
        )?;

        let fmt_text = derive_rust_xlsx_format(&self.formats.text);
        let fmt_header = derive_rust_xlsx_format(&self.formats.header);
        let fmt_index = derive_rust_xlsx_format(&self.formats.index);

        for sheet_slice in l_sheet_parts {
            let sheet_name_unique = self.derive_unique_sheet_name(&sheet_slice.sheet_name);
            let worksheet = self.workbook.add_worksheet();
            worksheet
                .set_name(&sheet_name_unique)
                .map_err(derive_xlsx_error_text)?;

            let n_width_sheet =
                n_width_index + sheet_slice.col_end_exclusive - sheet_slice.col_start_inclusive;
            let mut tracker_width = SpecColumnWidthTracker::new(n_width_sheet, &options.policy_autofit);

            if n_width_index == 1 {
                write_text_cell(worksheet, 0, 0, Some(&options.index_header), &fmt_header)?;
                tracker_width.observe_header(0, &options.index_header);
            }
            for n_idx_col_abs in sheet_slice.col_start_inclusive..sheet_slice.col_end_exclusive {
                let n_idx_col_sheet = n_width_index + n_idx_col_abs - sheet_slice.col_start_inclusive;
                let c_header = l_header_data[n_idx_col_abs];
                write_text_cell(worksheet, 0, n_idx_col_sheet, Some(c_header), &fmt_header)?;
                tracker_width.observe_header(n_idx_col_sheet, c_header);
            }

            worksheet
                .set_freeze_panes(cast_row_num(N_ROWS_HEADER)?, cast_col_num(n_width_index)?)
                .map_err(derive_xlsx_error_text)?;

            for n_row_abs in sheet_slice.row_start_inclusive..sheet_slice.row_end_exclusive {
                let n_row_sheet = N_ROWS_HEADER + n_row_abs - sheet_slice.row_start_inclusive;

                if let Some(col) = col_index {
                    let c_label = derive_text_from_any_value(
                        col.get(n_row_abs)
                            .map_err(|err| format!("Failed to access index value: {err}"))?,
                    );
                    write_text_cell(worksheet, n_row_sheet, 0, c_label.as_deref(), &fmt_index)?;
                }

                for n_idx_col_abs in sheet_slice.col_start_inclusive..sheet_slice.col_end_exclusive
                {
                    let n_idx_col_sheet =
                        n_width_index + n_idx_col_abs - sheet_slice.col_start_inclusive;
                    let c_value = derive_text_from_any_value(
                        l_cols_data[n_idx_col_abs]
                            .get(n_row_abs)
                            .map_err(|err| format!("Failed to access cell value: {err}"))?,
                    );
                    write_text_cell(
                        worksheet,
                        n_row_sheet,
                        n_idx_col_sheet,
                        c_value.as_deref(),
                        &fmt_text,
                    )?;
                }
            }

            tracker_width.apply(worksheet)?;

            report.sheets.push(SpecSheetSlice {
                sheet_name: sheet_name_unique,
                ..sheet_slice
            });
        }

        Ok(report)
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Header-based column width accumulator for one worksheet.
struct SpecColumnWidthTracker<'a> {
    policy: &'a SpecAutofitCellsPolicy,
    l_width_by_col: Vec<usize>,
}

impl<'a> SpecColumnWidthTracker<'a> {
    fn new(width_sheet: usize, policy: &'a SpecAutofitCellsPolicy) -> Self {
        Self {
            policy,
            l_width_by_col: vec![0; width_sheet],
        }
    }

    fn observe_header(&mut self, col_idx: usize, value: &str) {
        self.l_width_by_col[col_idx] = usize::max(
            self.l_width_by_col[col_idx],
            estimate_unicode_string_width(value),
        );
    }

    fn apply(&self, worksheet: &mut Worksheet) -> Result<(), String> {
        let n_min = usize::max(1, self.policy.width_cell_min);
        let n_max = usize::min(255, usize::max(n_min, self.policy.width_cell_max));
        let n_pad = self.policy.width_cell_padding;

        for (n_idx_col, n_width_recorded) in self.l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(n_max, usize::max(n_min, n_width_recorded + n_pad));
            worksheet
                .set_column_width(cast_col_num(n_idx_col)?, n_width_final as f64)
                .map_err(derive_xlsx_error_text)?;
        }
        Ok(())
    }
}

/// Estimate displayed width units of a text cell.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

fn validate_policy_autofit(policy_autofit: &SpecAutofitCellsPolicy) -> Result<(), String> {
    if policy_autofit.width_cell_min == 0 {
        return Err("policy_autofit.width_cell_min must be >= 1.".to_string());
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        );
    }
    Ok(())
}

fn derive_text_from_any_value(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(val) => Some(val.to_string()),
        AnyValue::StringOwned(val) => Some(val.to_string()),
        _ => Some(value.to_string()),
    }
}

fn write_text_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: Option<&str>,
    format: &Format,
) -> Result<(), String> {
    match value {
        None | Some("") => {
            worksheet
                .write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)
                .map_err(derive_xlsx_error_text)?;
        }
        Some(val) => {
            worksheet
                .write_string_with_format(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val,
                    format,
                )
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}
