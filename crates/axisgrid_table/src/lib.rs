//! `axisgrid_table` v1:
//! Series-merge kernel that aligns per-series text files onto a shared x-axis.
//!
//! Layout:
//! - `conf`   : fixed file names and patterns
//! - `spec`   : cell values, options and errors
//! - `table`  : ordered row/column container
//! - `axis`   : axis label loading
//! - `merge`  : series discovery, padding and table assembly
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod axis;
pub mod conf;
pub mod merge;
pub mod report;
pub mod spec;
pub mod table;
mod util;

pub use axis::{load_axis_labels, load_axis_labels_from};
pub use conf::{C_AXIS_FILE_NAME, C_SERIES_PATTERN_DEFAULT};
pub use merge::merge_series;
pub use report::{ReportMerge, ReportMergeBuilder};
pub use spec::{EnumCellValue, EnumSeriesPatternMode, SpecMergeOptions, TableError};
pub use table::Table;
pub use util::parse_sort_key;
