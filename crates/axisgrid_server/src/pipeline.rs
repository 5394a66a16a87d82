//! Load, merge and export one source directory.

use std::path::Path;

use axisgrid_io_xlsx::export_table_chunks;
use axisgrid_table::{load_axis_labels_from, merge_series};

use crate::spec::{ProcessError, SpecProcessOptions, SpecProcessOutcome};

/// Run the full pipeline from `dir_source` into `dir_destination`.
///
/// Stops at the first failure; chunk files already written stay on disk.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    dir_source: P,
    dir_destination: Q,
    options: &SpecProcessOptions,
) -> Result<SpecProcessOutcome, ProcessError> {
    let dir_source = dir_source.as_ref();
    let dir_destination = dir_destination.as_ref();

    let l_axis_labels = load_axis_labels_from(dir_source, &options.merge.axis_file_name)?;
    let (table, report_merge) = merge_series(dir_source, &l_axis_labels, &options.merge)?;
    log::info!("{report_merge}");

    let report_export = export_table_chunks(&table, dir_destination, &options.export)?;
    log::info!("{report_export}");

    Ok(SpecProcessOutcome {
        table,
        report_merge,
        report_export,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axisgrid_table::{EnumCellValue, TableError};
    use tempfile::TempDir;

    use super::*;

    fn write_source(dir: &Path) {
        fs::write(dir.join("x axis.txt"), "3\n1\n2\n").expect("axis");
        fs::write(dir.join("5.txt"), "a\nb\n").expect("series 5");
        fs::write(dir.join("2.txt"), "x\ny\nz\n").expect("series 2");
    }

    #[test]
    fn process_directory_merges_and_exports() {
        let tmp_src = TempDir::new().expect("src");
        let tmp_dst = TempDir::new().expect("dst");
        write_source(tmp_src.path());

        let outcome =
            process_directory(tmp_src.path(), tmp_dst.path(), &SpecProcessOptions::default())
                .expect("process");

        assert_eq!(outcome.table.row_labels(), ["1", "2", "3"]);
        assert_eq!(outcome.table.col_names(), ["2", "5"]);
        assert_eq!(outcome.table.get("3", "5"), Some(&EnumCellValue::Missing));
        assert_eq!(outcome.report_merge.cnt_merged, 2);
        assert_eq!(outcome.report_export.files.len(), 1);
        assert!(tmp_dst.path().join("file_part_0.xlsx").is_file());
    }

    #[test]
    fn process_directory_fails_on_missing_axis_file() {
        let tmp_src = TempDir::new().expect("src");
        let tmp_dst = TempDir::new().expect("dst");

        let err = process_directory(tmp_src.path(), tmp_dst.path(), &SpecProcessOptions::default())
            .expect_err("no axis");
        assert!(matches!(err, ProcessError::Table(TableError::Io { .. })));
        assert!(!tmp_dst.path().join("file_part_0.xlsx").exists());
    }
}
