//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::month::MonthLabel;

/// Mean delay in minutes per line for a single month.
pub type LineAverage = BTreeMap<String, f64>;

/// One row projected down to the two columns the report uses.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub line: Option<String>,
    pub delay_minutes: Option<f64>,
}

impl RawRecord {
    /// Returns the `(line, delay)` pair when both fields are present and
    /// the delay is a finite number.
    pub fn into_valid(self) -> Option<(String, f64)> {
        let line = self.line.filter(|l| !l.is_empty())?;
        let delay = self.delay_minutes.filter(|d| d.is_finite())?;
        Some((line, delay))
    }
}

/// Aggregator output for one monthly file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverage {
    pub label: MonthLabel,
    pub averages: LineAverage,
    pub rows_read: usize,
    pub rows_kept: usize,
}

impl MonthlyAverage {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read.saturating_sub(self.rows_kept)
    }

    pub fn get(&self, line: &str) -> Option<f64> {
        self.averages.get(line).copied()
    }
}

/// Monthly values for one line, index-aligned with [`DelaySeries::months`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub line: String,
    pub values: Vec<f64>,
}

/// Everything a chart needs for one run: the month axis, one series per
/// tracked line, and the cross-line average.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DelaySeries {
    pub months: Vec<MonthLabel>,
    pub lines: Vec<LineSeries>,
    pub average: Vec<f64>,
}

impl DelaySeries {
    /// Values for a tracked line, looked up by name.
    pub fn line(&self, name: &str) -> Option<&[f64]> {
        self.lines
            .iter()
            .find(|s| s.line == name)
            .map(|s| s.values.as_slice())
    }

    /// `(month, delay)` pairs for a tracked line, in input order.
    pub fn points(&self, name: &str) -> Option<Vec<(&MonthLabel, f64)>> {
        let values = self.line(name)?;
        Some(self.months.iter().zip(values.iter().copied()).collect())
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_requires_both_fields() {
        let ok = RawRecord {
            line: Some("Main Line".into()),
            delay_minutes: Some(3.5),
        };
        assert_eq!(ok.into_valid(), Some(("Main Line".to_string(), 3.5)));

        let no_delay = RawRecord {
            line: Some("Main Line".into()),
            delay_minutes: None,
        };
        assert_eq!(no_delay.into_valid(), None);

        let blank_line = RawRecord {
            line: Some(String::new()),
            delay_minutes: Some(1.0),
        };
        assert_eq!(blank_line.into_valid(), None);
    }

    #[test]
    fn test_raw_record_rejects_nan_delay() {
        let nan = RawRecord {
            line: Some("Main Line".into()),
            delay_minutes: Some(f64::NAN),
        };
        assert_eq!(nan.into_valid(), None);
    }

    #[test]
    fn test_rows_dropped_never_underflows() {
        let month = MonthlyAverage {
            label: MonthLabel::parse("2019_01").unwrap(),
            averages: LineAverage::new(),
            rows_read: 1,
            rows_kept: 3,
        };
        assert_eq!(month.rows_dropped(), 0);
    }

    #[test]
    fn test_series_points_follow_months() {
        let series = DelaySeries {
            months: vec![
                MonthLabel::parse("2019_01").unwrap(),
                MonthLabel::parse("2019_02").unwrap(),
            ],
            lines: vec![LineSeries {
                line: "Main Line".into(),
                values: vec![4.0, 2.0],
            }],
            average: vec![4.0, 2.0],
        };

        let points = series.points("Main Line").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].0.to_string(), "2019_02");
        assert_eq!(points[1].1, 2.0);
        assert!(series.points("Gladstone Branch").is_none());
    }
}
