//! Merge report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

/// Aggregate counters and diagnostics for one `merge_series` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMerge {
    /// Directory entries inspected.
    pub cnt_scanned: u64,
    /// Series files merged into the table.
    pub cnt_merged: u64,
    /// Series shorter than the axis that received missing markers.
    pub cnt_padded: u64,
    /// Entries skipped (axis file, non-matching names, directories).
    pub cnt_ignored: u64,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportMerge {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_merged".to_string(), self.cnt_merged);
        dict_counts.insert("cnt_padded".to_string(), self.cnt_padded);
        dict_counts.insert("cnt_ignored".to_string(), self.cnt_ignored);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} merged={} padded={} ignored={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_merged"],
            dict_counts["cnt_padded"],
            dict_counts["cnt_ignored"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MERGE]"))
    }
}

/// Mutable accumulator for merge statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportMergeBuilder {
    cnt_scanned: u64,
    cnt_merged: u64,
    cnt_padded: u64,
    cnt_ignored: u64,
    warnings: Vec<String>,
}

impl ReportMergeBuilder {
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    pub fn add_merged(&mut self) {
        self.cnt_merged += 1;
    }

    pub fn add_padded(&mut self) {
        self.cnt_padded += 1;
    }

    pub fn add_ignored(&mut self) {
        self.cnt_ignored += 1;
    }

    /// Add warning message and forward it to the log.
    pub fn add_warning(&mut self, warning: String) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportMerge {
        ReportMerge {
            cnt_scanned: self.cnt_scanned,
            cnt_merged: self.cnt_merged,
            cnt_padded: self.cnt_padded,
            cnt_ignored: self.cnt_ignored,
            warnings: self.warnings,
        }
    }
}
