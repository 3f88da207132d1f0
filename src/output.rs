//! Rendering of assembled delay series.
//!
//! A chart only needs the month axis plus one value list per series, so
//! renderers are interchangeable: CSV export, JSON export, or a log table.

use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{DelaySeries, MonthlyAverage};
use crate::lines::FOCUSED_LINES;
use crate::month::MonthLabel;
use csv::Writer;
use std::fs::File;
use std::path::PathBuf;

/// Name used for the cross-line average series.
pub const AVERAGE_SERIES: &str = "Average";

/// Which series a chart shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    /// Every tracked line.
    #[default]
    Full,
    /// The cross-line average next to the two focus lines.
    Focused,
}

impl ChartView {
    /// `(series name, values)` pairs for this view, in plotting order.
    pub fn columns<'a>(&self, series: &'a DelaySeries) -> Vec<(&'a str, &'a [f64])> {
        match self {
            ChartView::Full => series
                .lines
                .iter()
                .map(|s| (s.line.as_str(), s.values.as_slice()))
                .collect(),
            ChartView::Focused => {
                let mut cols = vec![(AVERAGE_SERIES, series.average.as_slice())];
                cols.extend(
                    FOCUSED_LINES
                        .iter()
                        .filter_map(|line| series.line(line).map(|values| (*line, values))),
                );
                cols
            }
        }
    }

    /// Same as [`ChartView::columns`], but fails unless every series has
    /// one value per month.
    pub fn checked_columns<'a>(&self, series: &'a DelaySeries) -> Result<Vec<(&'a str, &'a [f64])>> {
        let columns = self.columns(series);
        for (name, values) in &columns {
            if values.len() != series.months.len() {
                let month = series
                    .months
                    .get(values.len())
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "end of axis".to_string());
                bail!(
                    "series '{name}' has {} values for {} months (first mismatch at {month})",
                    values.len(),
                    series.months.len()
                );
            }
        }
        Ok(columns)
    }
}

/// Consumer of a finished run.
pub trait Renderer {
    fn render(&self, series: &DelaySeries) -> Result<()>;
}

/// Writes one CSV row per month: `month`, then one column per series.
pub struct CsvRenderer {
    path: PathBuf,
    view: ChartView,
}

impl CsvRenderer {
    pub fn new(path: impl Into<PathBuf>, view: ChartView) -> Self {
        Self {
            path: path.into(),
            view,
        }
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, series: &DelaySeries) -> Result<()> {
        let file = File::create(&self.path)?;
        write_csv(file, series, self.view)?;
        info!(path = %self.path.display(), months = series.len(), "CSV report written");
        Ok(())
    }
}

/// Writes `series` as CSV into any writer.
pub fn write_csv<W: std::io::Write>(out: W, series: &DelaySeries, view: ChartView) -> Result<()> {
    let columns = view.checked_columns(series)?;
    let mut writer = Writer::from_writer(out);

    let mut header = vec!["month"];
    header.extend(columns.iter().map(|(name, _)| *name));
    writer.write_record(&header)?;

    for (idx, month) in series.months.iter().enumerate() {
        let mut record = vec![month.to_string()];
        record.extend(columns.iter().map(|(_, values)| values[idx].to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SeriesJson<'a> {
    name: &'a str,
    values: &'a [f64],
}

#[derive(Serialize)]
struct ViewJson<'a> {
    view: ChartView,
    months: &'a [MonthLabel],
    series: Vec<SeriesJson<'a>>,
}

/// Writes the selected view as pretty-printed JSON.
pub struct JsonRenderer {
    path: PathBuf,
    view: ChartView,
}

impl JsonRenderer {
    pub fn new(path: impl Into<PathBuf>, view: ChartView) -> Self {
        Self {
            path: path.into(),
            view,
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, series: &DelaySeries) -> Result<()> {
        let body = to_json(series, self.view)?;
        std::fs::write(&self.path, body)?;
        info!(path = %self.path.display(), months = series.len(), "JSON report written");
        Ok(())
    }
}

pub fn to_json(series: &DelaySeries, view: ChartView) -> Result<String> {
    let doc = ViewJson {
        view,
        months: &series.months,
        series: view
            .checked_columns(series)?
            .into_iter()
            .map(|(name, values)| SeriesJson { name, values })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Logs one event per month with the view's values.
pub struct LogRenderer {
    pub view: ChartView,
}

impl Renderer for LogRenderer {
    fn render(&self, series: &DelaySeries) -> Result<()> {
        let columns = self.view.checked_columns(series)?;
        for (idx, month) in series.months.iter().enumerate() {
            let values = columns
                .iter()
                .map(|(name, values)| format!("{name}={:.2}", values[idx]))
                .collect::<Vec<_>>()
                .join(", ");
            info!(month = %month, "{}", values);
        }
        Ok(())
    }
}

/// Logs a single month's per-line averages.
pub fn print_month(month: &MonthlyAverage) {
    debug!("{:#?}", month);
    for (line, avg) in &month.averages {
        info!(month = %month.label, line = %line, avg_delay = *avg, "Line average");
    }
}
