pub mod analyzers;
pub mod config;
pub mod error;
pub mod lines;
pub mod month;
pub mod output;

pub use error::{ReportError, Result};
