use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analyzers::series::{DuplicatePolicy, MissingFilePolicy, SeriesOptions};

const DEFAULT_ARCHIVE_DIR: &str = "performancearchive";
const DEFAULT_YEAR: i32 = 2019;

/// Report inputs and policies.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "files": ["performancearchive/2019_01.csv", "performancearchive/2019_02.csv"],
///   "on_missing": "skip",
///   "on_duplicate": "reject"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_files")]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub on_missing: MissingFilePolicy,
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            files: default_files(),
            on_missing: MissingFilePolicy::default(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config '{}'", path.display()))?;
        Ok(config)
    }

    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions {
            missing: self.on_missing,
            duplicates: self.on_duplicate,
        }
    }
}

/// One file per month of the default reporting year.
pub fn default_files() -> Vec<PathBuf> {
    (1..=12)
        .map(|m| PathBuf::from(format!("{DEFAULT_ARCHIVE_DIR}/{DEFAULT_YEAR}_{m:02}.csv")))
        .collect()
}
