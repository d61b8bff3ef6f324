//! Block detection and decoding for per-ion scalar reports.
//!
//! A block is introduced by a marker line (e.g. ` magnetization (x)`), followed by a fixed
//! number of header lines and then one data line per ion:
//!
//! ```text
//!  magnetization (x)
//!
//! # of ion       s       p       d       tot
//! ------------------------------------------
//!     1       -0.001  -0.003   0.012   0.008
//!     2        0.000   0.001   3.542   3.543
//! ```
//!
//! [`scanner::BlockScanner`] yields the raw line windows, [`decoder::RecordDecoder`] turns each
//! window into at most one record, and [`presets`] names the known block layouts.

pub mod decoder;
pub mod presets;
pub mod scanner;
