use std::path::Path;

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::spec::{EnumSeriesPatternMode, TableError};

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

#[derive(Debug, Clone)]
pub(crate) enum TypeSeriesPattern {
    Glob(GlobMatcher),
    Regex(Regex),
}

impl TypeSeriesPattern {
    pub(crate) fn from_raw(
        pattern: &str,
        rule_pattern: EnumSeriesPatternMode,
    ) -> Result<Self, TableError> {
        match rule_pattern {
            EnumSeriesPatternMode::Glob => {
                let matcher = Glob::new(pattern)
                    .map_err(|e| TableError::InvalidPattern(e.to_string()))?
                    .compile_matcher();
                Ok(Self::Glob(matcher))
            }
            EnumSeriesPatternMode::Regex => {
                let regex =
                    Regex::new(pattern).map_err(|e| TableError::InvalidPattern(e.to_string()))?;
                Ok(Self::Regex(regex))
            }
        }
    }

    pub(crate) fn is_match(&self, file_name: &str) -> bool {
        match self {
            Self::Glob(matcher) => matcher.is_match(file_name),
            Self::Regex(regex) => regex.is_match(file_name),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TextParsing

/// Split text into lines on `\r\n` or any single line boundary: `\n`, `\r`,
/// `\x0b`, `\x0c`, `\x1c`..`\x1e`, `\u{85}`, `\u{2028}`, `\u{2029}`.
///
/// A trailing terminator does not produce an extra empty line; empty lines in
/// the middle are kept.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    let mut l_lines = Vec::new();
    let mut c_current = String::new();
    let mut iter_chars = text.chars().peekable();

    while let Some(chr) = iter_chars.next() {
        match chr {
            '\r' => {
                if iter_chars.peek() == Some(&'\n') {
                    iter_chars.next();
                }
                l_lines.push(std::mem::take(&mut c_current));
            }
            '\n' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}'
            | '\u{2029}' => l_lines.push(std::mem::take(&mut c_current)),
            _ => c_current.push(chr),
        }
    }
    if !c_current.is_empty() {
        l_lines.push(c_current);
    }
    l_lines
}

/// Interpret `value` as a float sort key. Surrounding whitespace is ignored.
pub fn parse_sort_key(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Indices that visit `keys` in ascending order; ties keep input order.
pub(crate) fn derive_numeric_order(keys: &[f64]) -> Vec<usize> {
    let mut l_order: Vec<usize> = (0..keys.len()).collect();
    l_order.sort_by(|a, b| keys[*a].total_cmp(&keys[*b]));
    l_order
}

/// Column identifier of a series file: its name without the extension.
pub(crate) fn derive_column_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workers

pub(crate) fn calculate_worker_limit(num_workers_max: usize) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);
    num_workers_max.clamp(1, n_cpu)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
