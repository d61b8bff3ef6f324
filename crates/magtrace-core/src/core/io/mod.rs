//! Provides input/output functionality for ionic-step logs and extracted series.
//!
//! Logs are read exactly once into an immutable [`source::LogSource`]; scanning then works on
//! borrowed line slices. Extracted series can be written out as CSV for plotting tools.

pub mod export;
pub mod source;
