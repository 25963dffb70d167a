//! Run report export
//!
//! This module serializes the outcome of a pipeline run for consumption by
//! wrapper scripts and CI. Currently supports a plain JSON document.

pub mod run_report;

pub use run_report::RunReportExporter;
