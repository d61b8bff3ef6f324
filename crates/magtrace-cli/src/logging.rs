use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
    registry::LookupSpan,
};

/// Maps `-q` and the `-v` count to a level. Quiet still lets failed extractions through.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Plain-text layer for `--log-file`: no ANSI escapes, with thread ids and targets.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(&path).map_err(CliError::Io)?;
            subscriber.with(file_layer(file)).init();
        }
        None => subscriber.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use magtrace::core::io::source::LogSource;
    use magtrace::engine::config::ScanConfigBuilder;
    use magtrace::engine::progress::ProgressReporter;
    use magtrace::workflows::extract;
    use serial_test::serial;

    #[test]
    fn verbosity_flags_map_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    #[serial]
    fn log_file_records_extraction_events() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("magtrace.log");
        let file = File::create(&log_path).unwrap();

        let subscriber = tracing_subscriber::registry()
            .with(level_filter(2, false))
            .with(file_layer(file));

        let source = LogSource::from_text("MARK\n\nhdr\n---\nA B C D 1.5\nA B C D 2.5\n");
        let config = ScanConfigBuilder::new()
            .marker("MARK")
            .entity_count(2)
            .build()
            .unwrap();
        tracing::subscriber::with_default(subscriber, || {
            extract::run_on_source(&source, &config, &ProgressReporter::new());
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Block scan finished."));
        assert!(content.contains("markers=1"));
        assert!(content.contains("magtrace::engine::accumulator"));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    #[serial]
    fn quiet_file_log_drops_scan_details() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("quiet.log");
        let file = File::create(&log_path).unwrap();

        let subscriber = tracing_subscriber::registry()
            .with(level_filter(3, true))
            .with(file_layer(file));

        let source = LogSource::from_text("no blocks here\n");
        let config = ScanConfigBuilder::new().entity_count(2).build().unwrap();
        tracing::subscriber::with_default(subscriber, || {
            extract::run_on_source(&source, &config, &ProgressReporter::new());
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
