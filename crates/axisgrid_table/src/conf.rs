//! Fixed names shared by the axis loader and the series merger.

/// Name of the file holding the canonical x-axis labels.
pub const C_AXIS_FILE_NAME: &str = "x axis.txt";
/// Default glob selecting series files in the source directory.
pub const C_SERIES_PATTERN_DEFAULT: &str = "*.txt";
