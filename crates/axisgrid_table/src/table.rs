//! Ordered row/column container keyed by string labels.

use std::collections::HashMap;
use std::ops::Range;

use crate::spec::{EnumCellValue, TableError};
use crate::util::{derive_numeric_order, parse_sort_key};

/// Column-major table with ordered string row labels and column names.
///
/// Every column holds exactly one cell per row label. Column names are
/// unique and indexed by `dict_col_pos`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    row_labels: Vec<String>,
    col_names: Vec<String>,
    columns: Vec<Vec<EnumCellValue>>,
    dict_col_pos: HashMap<String, usize>,
}

impl Table {
    /// Create an empty-column table over `row_labels`.
    pub fn new(row_labels: Vec<String>) -> Self {
        Self {
            row_labels,
            col_names: Vec::new(),
            columns: Vec::new(),
            dict_col_pos: HashMap::new(),
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of data columns (row labels excluded).
    pub fn width(&self) -> usize {
        self.col_names.len()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    /// Cells of the column at `col_idx`.
    pub fn column(&self, col_idx: usize) -> Option<&[EnumCellValue]> {
        self.columns.get(col_idx).map(Vec::as_slice)
    }

    /// Cells of the column named `col_name`.
    pub fn column_by_name(&self, col_name: &str) -> Option<&[EnumCellValue]> {
        self.position_col(col_name).and_then(|idx| self.column(idx))
    }

    /// Cell at `(row_label, col_name)`; first match wins for repeated labels.
    pub fn get(&self, row_label: &str, col_name: &str) -> Option<&EnumCellValue> {
        let n_row = self.position_row(row_label)?;
        let n_col = self.position_col(col_name)?;
        self.columns[n_col].get(n_row)
    }

    /// Overwrite the cell at `(row_label, col_name)`.
    pub fn set(
        &mut self,
        row_label: &str,
        col_name: &str,
        value: EnumCellValue,
    ) -> Result<(), TableError> {
        let n_row = self
            .position_row(row_label)
            .ok_or_else(|| TableError::RowNotFound(row_label.to_string()))?;
        let n_col = self
            .position_col(col_name)
            .ok_or_else(|| TableError::ColumnNotFound(col_name.to_string()))?;
        self.columns[n_col][n_row] = value;
        Ok(())
    }

    /// Append a column, or replace the values of an existing column of the same name.
    pub fn insert_column(
        &mut self,
        col_name: impl Into<String>,
        values: Vec<EnumCellValue>,
    ) -> Result<(), TableError> {
        let c_name = col_name.into();
        if values.len() != self.height() {
            return Err(TableError::ColumnLengthMismatch {
                name: c_name,
                n_values: values.len(),
                n_rows: self.height(),
            });
        }

        match self.position_col(&c_name) {
            Some(n_col) => self.columns[n_col] = values,
            None => {
                self.dict_col_pos.insert(c_name.clone(), self.col_names.len());
                self.col_names.push(c_name);
                self.columns.push(values);
            }
        }
        Ok(())
    }

    /// Copy out the columns in `cols`, keeping every row.
    ///
    /// The range is clamped to the table width, so a range starting at or past
    /// the end yields a table with rows and no columns.
    pub fn slice_columns(&self, cols: Range<usize>) -> Table {
        let n_end = usize::min(cols.end, self.width());
        let n_start = usize::min(cols.start, n_end);
        let col_names = self.col_names[n_start..n_end].to_vec();
        Table {
            row_labels: self.row_labels.clone(),
            dict_col_pos: derive_col_positions(&col_names),
            col_names,
            columns: self.columns[n_start..n_end].to_vec(),
        }
    }

    /// Stable-sort rows ascending by the numeric value of their labels.
    pub fn sort_rows_numeric(&mut self) -> Result<(), TableError> {
        let mut l_keys = Vec::with_capacity(self.height());
        for (n_idx, label) in self.row_labels.iter().enumerate() {
            let n_key = parse_sort_key(label).ok_or_else(|| TableError::ParseRowLabel {
                label: label.clone(),
                row_idx: n_idx,
            })?;
            l_keys.push(n_key);
        }

        let l_order = derive_numeric_order(&l_keys);
        self.row_labels = l_order
            .iter()
            .map(|&n_idx| self.row_labels[n_idx].clone())
            .collect();
        for column in &mut self.columns {
            *column = l_order.iter().map(|&n_idx| column[n_idx].clone()).collect();
        }
        Ok(())
    }

    /// Stable-sort columns ascending by the numeric value of their names.
    pub fn sort_columns_numeric(&mut self) -> Result<(), TableError> {
        let mut l_keys = Vec::with_capacity(self.width());
        for name in &self.col_names {
            let n_key = parse_sort_key(name).ok_or_else(|| TableError::ParseColumnName {
                name: name.clone(),
            })?;
            l_keys.push(n_key);
        }

        let l_order = derive_numeric_order(&l_keys);
        let mut l_columns_old: Vec<Option<Vec<EnumCellValue>>> =
            std::mem::take(&mut self.columns).into_iter().map(Some).collect();
        self.col_names = l_order
            .iter()
            .map(|&n_idx| self.col_names[n_idx].clone())
            .collect();
        self.columns = l_order
            .iter()
            .filter_map(|&n_idx| l_columns_old[n_idx].take())
            .collect();
        self.dict_col_pos = derive_col_positions(&self.col_names);
        Ok(())
    }

    fn position_row(&self, row_label: &str) -> Option<usize> {
        self.row_labels.iter().position(|c| c == row_label)
    }

    fn position_col(&self, col_name: &str) -> Option<usize> {
        self.dict_col_pos.get(col_name).copied()
    }
}

fn derive_col_positions(col_names: &[String]) -> HashMap<String, usize> {
    col_names
        .iter()
        .enumerate()
        .map(|(n_idx, c_name)| (c_name.clone(), n_idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(values: &[&str]) -> Vec<EnumCellValue> {
        values.iter().map(|v| EnumCellValue::from(*v)).collect()
    }

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn table_get_set_roundtrip() {
        let mut table = Table::new(labels(&["1", "2"]));
        table
            .insert_column("7", text_column(&["a", "b"]))
            .expect("insert");

        assert_eq!(table.get("2", "7"), Some(&EnumCellValue::from("b")));
        table
            .set("2", "7", EnumCellValue::Missing)
            .expect("set existing cell");
        assert_eq!(table.get("2", "7"), Some(&EnumCellValue::Missing));

        assert!(matches!(
            table.set("3", "7", EnumCellValue::Missing),
            Err(TableError::RowNotFound(_))
        ));
        assert!(matches!(
            table.set("1", "8", EnumCellValue::Missing),
            Err(TableError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn table_insert_rejects_wrong_length_and_replaces_same_name() {
        let mut table = Table::new(labels(&["1", "2"]));
        assert!(matches!(
            table.insert_column("1", text_column(&["a"])),
            Err(TableError::ColumnLengthMismatch {
                n_values: 1,
                n_rows: 2,
                ..
            })
        ));

        table.insert_column("1", text_column(&["a", "b"])).expect("insert");
        table.insert_column("1", text_column(&["c", "d"])).expect("replace");
        assert_eq!(table.width(), 1);
        assert_eq!(table.column(0), Some(text_column(&["c", "d"]).as_slice()));
    }

    #[test]
    fn table_sorts_rows_and_columns_numerically() {
        let mut table = Table::new(labels(&["10", "2", "1.5"]));
        table.insert_column("10", text_column(&["a", "b", "c"])).expect("insert");
        table.insert_column("9", text_column(&["x", "y", "z"])).expect("insert");

        table.sort_rows_numeric().expect("sort rows");
        table.sort_columns_numeric().expect("sort cols");

        assert_eq!(table.row_labels(), labels(&["1.5", "2", "10"]).as_slice());
        assert_eq!(table.col_names(), labels(&["9", "10"]).as_slice());
        assert_eq!(table.column_by_name("10"), Some(text_column(&["c", "b", "a"]).as_slice()));
        assert_eq!(table.column_by_name("9"), Some(text_column(&["z", "y", "x"]).as_slice()));
    }

    #[test]
    fn table_sort_columns_rejects_non_numeric_name() {
        let mut table = Table::new(labels(&["1"]));
        table.insert_column("abc", text_column(&["a"])).expect("insert");
        let err = table.sort_columns_numeric().expect_err("non-numeric name");
        assert_eq!(err.to_string(), "could not convert column name to float: 'abc'");
    }

    #[test]
    fn table_slice_columns_clamps_to_width() {
        let mut table = Table::new(labels(&["1"]));
        for name in ["1", "2", "3"] {
            table.insert_column(name, text_column(&[name])).expect("insert");
        }

        let slice = table.slice_columns(1..3);
        assert_eq!(slice.col_names(), labels(&["2", "3"]).as_slice());
        assert_eq!(slice.row_labels(), table.row_labels());

        let empty = table.slice_columns(3..6);
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.height(), 1);
    }

    #[test]
    fn table_name_lookup_follows_slice_and_sort() {
        let mut table = Table::new(labels(&["1"]));
        for name in ["30", "10", "20"] {
            table.insert_column(name, text_column(&[name])).expect("insert");
        }

        let slice = table.slice_columns(1..3);
        assert_eq!(slice.column_by_name("20"), Some(text_column(&["20"]).as_slice()));
        assert_eq!(slice.column_by_name("30"), None);

        table.sort_columns_numeric().expect("sort cols");
        table.insert_column("20", text_column(&["z"])).expect("replace");
        assert_eq!(table.col_names(), labels(&["10", "20", "30"]).as_slice());
        assert_eq!(table.column(1), Some(text_column(&["z"]).as_slice()));
        assert_eq!(table.column_by_name("30"), Some(text_column(&["30"]).as_slice()));
    }

    #[test]
    fn table_wide_insert_keeps_every_name_addressable() {
        let n_cols = 40_000;
        let mut table = Table::new(labels(&["1"]));
        for n_idx in (0..n_cols).rev() {
            let c_name = n_idx.to_string();
            assert!(table.column_by_name(&c_name).is_none());
            table.insert_column(c_name, vec![EnumCellValue::Missing]).expect("insert");
        }
        table.sort_columns_numeric().expect("sort cols");

        assert_eq!(table.width(), n_cols);
        assert_eq!(table.col_names()[0], "0");
        for n_idx in [0usize, 16_383, 16_384, n_cols - 1] {
            assert!(table.column_by_name(&n_idx.to_string()).is_some());
            assert_eq!(table.col_names()[n_idx], n_idx.to_string());
        }
    }

    #[test]
    fn table_sort_rows_reports_row_position_for_bad_label() {
        let mut table = Table::new(labels(&["1", "x"]));
        let err = table.sort_rows_numeric().expect_err("non-numeric row label");
        assert!(matches!(
            err,
            TableError::ParseRowLabel { ref label, row_idx: 1 } if label == "x"
        ));
        assert_eq!(err.to_string(), "could not convert row label to float: 'x' (row 1)");
    }
}
