//! # Engine Module
//!
//! Drives the scan pipeline: configuration, error handling, progress reporting, and the
//! accumulator that assembles accepted records into a [`crate::core::models::series::Series`].

pub mod accumulator;
pub mod config;
pub mod error;
pub mod progress;
