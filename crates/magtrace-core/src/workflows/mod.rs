//! # Workflows Module
//!
//! High-level entry points for extracting time series from ionic-step logs.
//!
//! - **Extraction Workflow** ([`extract`]) - Reads a log from a path or stream once, scans it
//!   with the configured block layout, and returns the series plus a scan report.

pub mod extract;
