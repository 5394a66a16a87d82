//! Axis label loading.

use std::fs;
use std::path::Path;

use crate::conf::C_AXIS_FILE_NAME;
use crate::spec::TableError;
use crate::util::{derive_numeric_order, parse_sort_key, split_lines};

/// Load the x-axis labels from `x axis.txt` in `dir_source`.
///
/// Labels come back sorted ascending by numeric value, in their original text
/// form. Equal values keep file order.
pub fn load_axis_labels<P: AsRef<Path>>(dir_source: P) -> Result<Vec<String>, TableError> {
    load_axis_labels_from(dir_source.as_ref(), C_AXIS_FILE_NAME)
}

/// Load axis labels from `axis_file_name` in `dir_source`.
pub fn load_axis_labels_from<P: AsRef<Path>>(
    dir_source: P,
    axis_file_name: &str,
) -> Result<Vec<String>, TableError> {
    let path_axis = dir_source.as_ref().join(axis_file_name);
    let text = fs::read_to_string(&path_axis).map_err(|source| TableError::Io {
        path: path_axis.clone(),
        source,
    })?;

    let l_labels = split_lines(&text);
    let mut l_keys = Vec::with_capacity(l_labels.len());
    for (n_idx, label) in l_labels.iter().enumerate() {
        let n_key = parse_sort_key(label).ok_or_else(|| TableError::ParseAxisLabel {
            label: label.clone(),
            line_no: n_idx + 1,
        })?;
        l_keys.push(n_key);
    }

    let l_sorted = derive_numeric_order(&l_keys)
        .into_iter()
        .map(|n_idx| l_labels[n_idx].clone())
        .collect::<Vec<_>>();
    log::debug!(
        "Loaded {} axis labels from {}",
        l_sorted.len(),
        path_axis.display()
    );
    Ok(l_sorted)
}
