use super::config::ScanConfig;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::source::LogSource;
use crate::core::models::record::Record;
use crate::core::models::series::Series;
use crate::core::scan::decoder::DecodeOutcome;
use crate::core::scan::scanner::BlockScanner;
use tracing::{debug, trace};

/// Counters describing one scan. Data-quality problems end up here, never as errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub markers_found: usize,
    pub records_accepted: usize,
    pub blocks_discarded: usize,
    pub malformed_lines: usize,
    pub lines_scanned: usize,
}

/// Collects accepted records, in scan order, into a [`Series`] of fixed width.
#[derive(Debug, Clone)]
pub struct SeriesAccumulator {
    series: Series,
    report: ScanReport,
}

impl SeriesAccumulator {
    pub fn new(entity_count: usize) -> Self {
        Self {
            series: Series::new(entity_count),
            report: ScanReport::default(),
        }
    }

    /// Appends `record` if its length equals the entity count. Returns whether it was kept.
    pub fn accept(&mut self, record: Record) -> bool {
        let len = record.len();
        if self.series.push(record) {
            self.report.records_accepted += 1;
            true
        } else {
            debug!(
                expected = self.series.entities(),
                found = len,
                "Dropping record with mismatched length."
            );
            self.report.blocks_discarded += 1;
            false
        }
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    pub fn finish(self) -> (Series, ScanReport) {
        (self.series, self.report)
    }

    /// Runs the whole scan over `source` and returns the accumulated series.
    ///
    /// The configuration is assumed to be valid; see [`ScanConfig::validate`].
    pub fn build(source: &LogSource, config: &ScanConfig) -> Series {
        Self::build_with_report(source, config, &ProgressReporter::new()).0
    }

    /// Like [`SeriesAccumulator::build`], but also returns the scan counters and reports
    /// progress in source bytes.
    pub fn build_with_report(
        source: &LogSource,
        config: &ScanConfig,
        reporter: &ProgressReporter,
    ) -> (Series, ScanReport) {
        let decoder = config.decoder();
        let mut scanner = BlockScanner::new(
            source.raw_lines(),
            &config.marker,
            config.header_skip,
            config.entity_count,
        );
        let mut acc = Self::new(config.entity_count);

        reporter.report(Progress::TaskStart {
            total_steps: source.as_str().len() as u64,
        });

        while let Some(window) = scanner.next() {
            acc.report.markers_found += 1;
            let outcome = decoder.decode(&window.lines);
            acc.report.malformed_lines += outcome.malformed_lines();

            match outcome {
                DecodeOutcome::Accepted { record, .. } => {
                    acc.accept(record);
                }
                DecodeOutcome::Discarded { collected, .. } => {
                    trace!(
                        marker_line = window.marker_line,
                        window_lines = window.len(),
                        collected,
                        "Discarding short block."
                    );
                    acc.report.blocks_discarded += 1;
                }
            }

            reporter.report(Progress::TaskAdvance {
                position: scanner.consumed_bytes() as u64,
            });
        }

        acc.report.lines_scanned = scanner.position();
        reporter.report(Progress::TaskFinish);

        debug!(
            markers = acc.report.markers_found,
            accepted = acc.report.records_accepted,
            discarded = acc.report.blocks_discarded,
            malformed_lines = acc.report.malformed_lines,
            "Block scan finished."
        );
        acc.finish()
    }
}
