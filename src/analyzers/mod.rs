//! Monthly delay aggregation and series assembly.
//!
//! [`aggregate::aggregate_month`] cleans one monthly CSV and averages delay
//! per line. [`series::build_series`] runs it over a year of files and lines
//! the tracked lines up into chartable series.

pub mod aggregate;
pub mod series;
pub mod types;
pub mod utility;
