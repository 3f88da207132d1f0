//! Month labels recovered from monthly archive file names.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::{ReportError, Result};

const LABEL_LEN: usize = 7;

/// A reporting period in `YYYY_MM` form, e.g. `2019_06`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthLabel {
    year: i32,
    month: u32,
}

impl MonthLabel {
    /// Parses a bare `YYYY_MM` label. Returns `None` unless the year and
    /// month form a real calendar month.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.split_once('_')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)?;

        Some(Self { year, month })
    }

    /// Extracts the label from the last seven characters of the file stem,
    /// so `performancearchive/2019_06.csv` yields `2019_06`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let invalid = || ReportError::InvalidFileName {
            path: path.to_path_buf(),
        };

        let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;
        let tail = stem
            .len()
            .checked_sub(LABEL_LEN)
            .and_then(|start| stem.get(start..))
            .ok_or_else(invalid)?;

        Self::parse(tail).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}_{:02}", self.year, self.month)
    }
}

impl Serialize for MonthLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_plain_file_name() {
        let label = MonthLabel::from_path(Path::new("2019_06.csv")).unwrap();
        assert_eq!(label.to_string(), "2019_06");
    }

    #[test]
    fn test_label_from_nested_path() {
        let label = MonthLabel::from_path(Path::new("data/archive/2020_12.csv")).unwrap();
        assert_eq!(label.to_string(), "2020_12");
        assert_eq!(label.year(), 2020);
        assert_eq!(label.month(), 12);
    }

    #[test]
    fn test_label_uses_trailing_characters_of_stem() {
        let label = MonthLabel::from_path(Path::new("njt_perf_2019_03.csv")).unwrap();
        assert_eq!(label.to_string(), "2019_03");
    }

    #[test]
    fn test_label_rejects_short_stem() {
        let err = MonthLabel::from_path(Path::new("2019.csv")).unwrap_err();
        assert!(matches!(err, ReportError::InvalidFileName { .. }));
    }

    #[test]
    fn test_label_rejects_impossible_month() {
        assert!(MonthLabel::parse("2019_13").is_none());
        assert!(MonthLabel::parse("2019_00").is_none());
        assert!(MonthLabel::from_path(Path::new("2019_13.csv")).is_err());
    }

    #[test]
    fn test_label_rejects_non_digits() {
        assert!(MonthLabel::parse("20x9_01").is_none());
        assert!(MonthLabel::parse("2019-01").is_none());
    }

    #[test]
    fn test_labels_order_chronologically() {
        let jan = MonthLabel::parse("2019_01").unwrap();
        let dec = MonthLabel::parse("2018_12").unwrap();
        assert!(dec < jan);
    }

    #[test]
    fn test_label_serializes_as_string() {
        let label = MonthLabel::parse("2019_07").unwrap();
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"2019_07\"");
    }
}
