use crate::core::io::source::LogSource;
use crate::core::models::series::Series;
use crate::engine::accumulator::{ScanReport, SeriesAccumulator};
use crate::engine::config::ScanConfig;
use crate::engine::error::ExtractError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument, warn};

/// The extracted time series together with the counters of the scan that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub series: Series,
    pub report: ScanReport,
}

/// Reads the log at `path` once and extracts the configured per-entity series.
///
/// # Errors
///
/// Returns [`ExtractError::Config`] for an invalid configuration and
/// [`ExtractError::SourceUnreadable`] if the file cannot be opened or read. Malformed lines,
/// truncated blocks, and logs without any marker are not errors.
#[instrument(skip_all, name = "extract_workflow")]
pub fn run<P: AsRef<Path>>(
    path: P,
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Result<Extraction, ExtractError> {
    config.validate()?;
    let path = path.as_ref();

    reporter.report(Progress::PhaseStart {
        name: "Reading log",
    });
    info!("Reading log from {:?}", path);
    let source = LogSource::from_path(path).map_err(|e| ExtractError::SourceUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;
    reporter.report(Progress::PhaseFinish);

    Ok(run_on_source(&source, config, reporter))
}

/// Same as [`run`], for an already-opened stream.
#[instrument(skip_all, name = "extract_workflow")]
pub fn run_from_reader(
    reader: &mut impl Read,
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Result<Extraction, ExtractError> {
    config.validate()?;
    reporter.report(Progress::PhaseStart {
        name: "Reading log",
    });
    let source = LogSource::from_reader(reader)?;
    reporter.report(Progress::PhaseFinish);

    Ok(run_on_source(&source, config, reporter))
}

/// Scans an in-memory source. The configuration must already be valid.
pub fn run_on_source(
    source: &LogSource,
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Extraction {
    reporter.report(Progress::PhaseStart {
        name: "Scanning blocks",
    });
    info!(
        marker = %config.marker,
        entities = config.entity_count,
        "Scanning for per-entity blocks."
    );
    let (series, report) = SeriesAccumulator::build_with_report(source, config, reporter);
    reporter.report(Progress::PhaseFinish);

    if report.markers_found == 0 {
        warn!(
            "No '{}' blocks found; returning an empty series.",
            config.marker
        );
    } else if report.blocks_discarded > 0 {
        reporter.report(Progress::Message(format!(
            "{} of {} blocks were incomplete and skipped",
            report.blocks_discarded, report.markers_found
        )));
    }
    let (steps, entities) = series.shape();
    info!(steps, entities, "Extraction finished.");

    Extraction { series, report }
}
