use crate::analyzers::types::{LineAverage, MonthlyAverage, RawRecord};
use crate::analyzers::utility::mean;
use crate::error::{ReportError, Result};
use crate::lines::is_denylisted;
use crate::month::MonthLabel;
use csv::StringRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

const LINE_COLUMN: &str = "line";
const DELAY_COLUMN: &str = "delay_minutes";

/// Header positions of the two columns kept from each row.
struct Columns {
    line: usize,
    delay: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| ReportError::Schema {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            line: find(LINE_COLUMN)?,
            delay: find(DELAY_COLUMN)?,
        })
    }

    fn project(&self, record: &StringRecord) -> RawRecord {
        let field = |idx: usize| record.get(idx).map(str::trim).filter(|v| !v.is_empty());

        RawRecord {
            line: field(self.line).map(str::to_string),
            delay_minutes: field(self.delay).and_then(|v| v.parse::<f64>().ok()),
        }
    }
}

/// Loads one monthly performance file and returns the mean delay per line.
///
/// Rows missing a line name or a usable delay are dropped before grouping,
/// so a line whose rows all lack a delay is absent from the result rather
/// than averaged to zero. Denylisted lines are removed last.
///
/// # Errors
///
/// Fails if the file name carries no month label, the file cannot be
/// opened, a required column is missing, or the CSV is malformed.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn aggregate_month(path: &Path) -> Result<MonthlyAverage> {
    let label = MonthLabel::from_path(path)?;

    let file = File::open(path).map_err(|source| ReportError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;

    aggregate_reader(path, label, BufReader::new(file))
}

/// Same as [`aggregate_month`] over an already opened source. `path` is
/// only used to label errors.
pub fn aggregate_reader<R: Read>(
    path: &Path,
    label: MonthLabel,
    reader: R,
) -> Result<MonthlyAverage> {
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().map_err(csv_error)?.clone();
    let columns = Columns::locate(&headers, path)?;

    let mut rows_read = 0usize;
    let mut rows_kept = 0usize;
    let mut delays_by_line: HashMap<String, Vec<f64>> = HashMap::new();

    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        rows_read += 1;

        if let Some((line, delay)) = columns.project(&record).into_valid() {
            rows_kept += 1;
            delays_by_line.entry(line).or_default().push(delay);
        }
    }

    let mut averages = LineAverage::new();
    for (line, delays) in delays_by_line {
        if is_denylisted(&line) {
            debug!(line = %line, rows = delays.len(), "Dropping denylisted line");
            continue;
        }
        if let Some(avg) = mean(&delays) {
            averages.insert(line, avg);
        }
    }

    info!(
        month = %label,
        rows_read,
        rows_dropped = rows_read.saturating_sub(rows_kept),
        lines = averages.len(),
        "Month aggregated"
    );

    Ok(MonthlyAverage {
        label,
        averages,
        rows_read,
        rows_kept,
    })
}
