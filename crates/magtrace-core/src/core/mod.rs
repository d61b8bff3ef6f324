//! # Core Module
//!
//! Stateless building blocks for reading ionic-step logs and representing the extracted data.
//!
//! - **Log input and export** ([`io`]) - One-shot reading of a log into memory, CSV export
//! - **Block scanning** ([`scan`]) - Marker detection, header skipping, and record decoding
//! - **Data models** ([`models`]) - Records, the accumulated series, and per-entity summaries

pub mod io;
pub mod models;
pub mod scan;
