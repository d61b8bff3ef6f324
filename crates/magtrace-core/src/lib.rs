//! # magtrace Core Library
//!
//! A fast, fault-tolerant extractor that turns VASP OUTCAR-style ionic-step logs into dense
//! per-ion scalar time series (one row per accepted ionic step, one column per ion).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that each piece of the pipeline can be tested
//! in isolation:
//!
//! - **[`core`]: The Foundation.** Stateless building blocks: the in-memory
//!   [`core::io::source::LogSource`], the block-scanning state machine, the per-block record
//!   decoder, and the `Series` model.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting, and the
//!   `SeriesAccumulator` that drives scanner and decoder in a single linear pass.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that read a log once and return
//!   the extracted series together with a scan report.

pub mod core;
pub mod engine;
pub mod workflows;
