use crate::analyzers::aggregate::aggregate_month;
use crate::analyzers::types::{DelaySeries, LineSeries, MonthlyAverage};
use crate::error::{ReportError, Result};
use crate::lines::TRACKED_LINES;
use crate::month::MonthLabel;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What to do when an input file cannot be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFilePolicy {
    /// Stop the run with the error.
    #[default]
    Abort,
    /// Leave the month out of every series.
    Skip,
}

/// What to do when two input files carry the same month label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    /// Keep the first file for the month and warn about the rest.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesOptions {
    pub missing: MissingFilePolicy,
    pub duplicates: DuplicatePolicy,
}

/// Runs the aggregator over `paths` in the given order and assembles one
/// series per tracked line plus the cross-line average.
///
/// Tracked lines are looked up by name in each month's result. A tracked
/// line with no valid rows in some month stops the run with
/// [`ReportError::NoDataForLine`]; the series are never padded.
#[tracing::instrument(skip_all, fields(files = paths.len()))]
pub fn build_series<P: AsRef<Path>>(paths: &[P], options: SeriesOptions) -> Result<DelaySeries> {
    let inputs = dedupe_months(paths, options.duplicates)?;

    let mut months = Vec::with_capacity(inputs.len());
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(inputs.len()); TRACKED_LINES.len()];
    let mut average = Vec::with_capacity(inputs.len());

    for path in inputs {
        let month = match aggregate_month(path) {
            Ok(month) => month,
            Err(ReportError::MissingFile { path, source })
                if options.missing == MissingFilePolicy::Skip =>
            {
                warn!(path = %path.display(), error = %source, "Skipping unreadable month");
                continue;
            }
            Err(e) => return Err(e),
        };

        let values = tracked_values(path, &month)?;
        for (column, value) in columns.iter_mut().zip(values) {
            column.push(value);
        }
        average.push(values.iter().sum::<f64>() / values.len() as f64);
        months.push(month.label);
    }

    if months.is_empty() {
        return Err(ReportError::NoMonths);
    }

    info!(months = months.len(), "Series assembled");

    let lines = TRACKED_LINES
        .iter()
        .zip(columns)
        .map(|(line, values)| LineSeries {
            line: line.to_string(),
            values,
        })
        .collect();

    Ok(DelaySeries {
        months,
        lines,
        average,
    })
}

/// Looks up every tracked line in one month's result.
fn tracked_values(path: &Path, month: &MonthlyAverage) -> Result<[f64; TRACKED_LINES.len()]> {
    let mut values = [0.0; TRACKED_LINES.len()];
    for (slot, line) in values.iter_mut().zip(TRACKED_LINES) {
        *slot = month.get(line).ok_or_else(|| ReportError::NoDataForLine {
            path: path.to_path_buf(),
            month: month.label.clone(),
            line,
        })?;
    }
    Ok(values)
}

/// Checks month labels up front so a repeated month is flagged before any
/// file is aggregated.
fn dedupe_months<P: AsRef<Path>>(paths: &[P], policy: DuplicatePolicy) -> Result<Vec<&Path>> {
    let mut seen: HashMap<MonthLabel, PathBuf> = HashMap::new();
    let mut kept = Vec::with_capacity(paths.len());

    for path in paths.iter().map(|p| p.as_ref()) {
        let label = MonthLabel::from_path(path)?;

        if let Some(first) = seen.get(&label) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(ReportError::DuplicateMonth {
                        month: label,
                        first: first.clone(),
                        second: path.to_path_buf(),
                    });
                }
                DuplicatePolicy::Skip => {
                    warn!(
                        month = %label,
                        first = %first.display(),
                        second = %path.display(),
                        "Duplicate month ignored"
                    );
                    continue;
                }
            }
        }

        seen.insert(label, path.to_path_buf());
        kept.push(path);
    }

    Ok(kept)
}
