//! Series discovery, padding and table assembly.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::report::{ReportMerge, ReportMergeBuilder};
use crate::spec::{EnumCellValue, SpecMergeOptions, TableError};
use crate::table::Table;
use crate::util::{
    TypeSeriesPattern, calculate_worker_limit, derive_column_name, split_lines,
};

#[derive(Debug, Clone)]
struct SpecSeriesFile {
    path_file: PathBuf,
    name_file: String,
}

type TypeSeriesRead = (SpecSeriesFile, Result<Vec<String>, TableError>);

/// Merge every series file in `dir_source` into one table over `axis_labels`.
///
/// Series files are selected by `options.pattern_series` (the axis file is
/// always skipped) and processed in file-name order. Each series is mapped
/// positionally onto `axis_labels`; a shorter series is padded with
/// [`EnumCellValue::Missing`], a longer one fails with
/// [`TableError::SeriesTooLong`].
///
/// The result has rows sorted by numeric axis value and columns sorted by the
/// numeric value of their names.
pub fn merge_series<P: AsRef<Path>>(
    dir_source: P,
    axis_labels: &[String],
    options: &SpecMergeOptions,
) -> Result<(Table, ReportMerge), TableError> {
    let path_dir_src = dir_source.as_ref();
    let pattern_series = TypeSeriesPattern::from_raw(&options.pattern_series, options.rule_pattern)?;
    let mut builder_report = ReportMergeBuilder::default();

    let l_series_files = scan_series_files(
        path_dir_src,
        &options.axis_file_name,
        &pattern_series,
        &mut builder_report,
    )?;
    let l_series_read = read_series_files(
        l_series_files,
        calculate_worker_limit(options.num_workers_max),
        &mut builder_report,
    );

    let n_axis = axis_labels.len();
    let mut table = Table::new(axis_labels.to_vec());
    for (spec_file, res_values) in l_series_read {
        let l_values = res_values?;
        let c_col_name = derive_column_name(&spec_file.name_file);

        if l_values.len() > n_axis {
            return Err(TableError::SeriesTooLong {
                name: c_col_name,
                n_values: l_values.len(),
                n_axis,
            });
        }

        let mut l_cells: Vec<EnumCellValue> =
            l_values.into_iter().map(EnumCellValue::Text).collect();
        if l_cells.len() < n_axis {
            builder_report.add_padded();
            l_cells.resize(n_axis, EnumCellValue::Missing);
        }

        if table.column_by_name(&c_col_name).is_some() {
            builder_report.add_warning(format!(
                "Series {} replaces an earlier column named {c_col_name:?}",
                spec_file.path_file.display()
            ));
        }
        table.insert_column(c_col_name, l_cells)?;
        builder_report.add_merged();
    }

    table.sort_rows_numeric()?;
    table.sort_columns_numeric()?;
    Ok((table, builder_report.build()))
}

fn scan_series_files(
    path_dir_src: &Path,
    axis_file_name: &str,
    pattern_series: &TypeSeriesPattern,
    builder_report: &mut ReportMergeBuilder,
) -> Result<Vec<SpecSeriesFile>, TableError> {
    let iter_entries = fs::read_dir(path_dir_src).map_err(|source| TableError::Io {
        path: path_dir_src.to_path_buf(),
        source,
    })?;

    let mut l_files = Vec::new();
    for _entry_res in iter_entries {
        let entry = _entry_res.map_err(|source| TableError::Io {
            path: path_dir_src.to_path_buf(),
            source,
        })?;
        builder_report.add_scanned();

        let path_entry = entry.path();
        let c_name = entry.file_name().to_string_lossy().to_string();
        if c_name == axis_file_name || !pattern_series.is_match(&c_name) {
            builder_report.add_ignored();
            continue;
        }
        if !path_entry.is_file() {
            builder_report.add_ignored();
            builder_report.add_warning(format!(
                "Skipped non-file entry matching series pattern: {}",
                path_entry.display()
            ));
            continue;
        }

        l_files.push(SpecSeriesFile {
            path_file: path_entry,
            name_file: c_name,
        });
    }

    l_files.sort_by(|a, b| a.name_file.cmp(&b.name_file));
    Ok(l_files)
}

fn read_series_file(path_file: &Path) -> Result<Vec<String>, TableError> {
    let text = fs::read_to_string(path_file).map_err(|source| TableError::Io {
        path: path_file.to_path_buf(),
        source,
    })?;
    let l_values = split_lines(&text);
    log::debug!("Read {} values from {}", l_values.len(), path_file.display());
    Ok(l_values)
}

fn read_series_files_serial(l_series_files: Vec<SpecSeriesFile>) -> Vec<TypeSeriesRead> {
    l_series_files
        .into_iter()
        .map(|spec_file| {
            let res_values = read_series_file(&spec_file.path_file);
            (spec_file, res_values)
        })
        .collect()
}

fn read_series_files(
    l_series_files: Vec<SpecSeriesFile>,
    n_workers_max: usize,
    builder_report: &mut ReportMergeBuilder,
) -> Vec<TypeSeriesRead> {
    if n_workers_max <= 1 || l_series_files.len() <= 1 {
        return read_series_files_serial(l_series_files);
    }

    let thread_pool = ThreadPoolBuilder::new().num_threads(n_workers_max).build();
    let Ok(thread_pool) = thread_pool else {
        builder_report.add_warning(format!(
            "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial read."
        ));
        return read_series_files_serial(l_series_files);
    };

    // `collect` on an indexed parallel iterator keeps input order.
    thread_pool.install(|| {
        l_series_files
            .into_par_iter()
            .map(|spec_file| {
                let res_values = read_series_file(&spec_file.path_file);
                (spec_file, res_values)
            })
            .collect::<Vec<_>>()
    })
}
