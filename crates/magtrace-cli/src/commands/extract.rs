use crate::cli::ExtractArgs;
use crate::config::{ExtractConfig, PartialExtractConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use magtrace::{
    core::io::export,
    engine::{error::ExtractError, progress::ProgressReporter},
    workflows::extract::{self, Extraction},
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug)]
struct LogOutcome {
    series_path: PathBuf,
    summary_path: Option<PathBuf>,
    extraction: Extraction,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialExtractConfig::from_file(path)?,
        None => PartialExtractConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let outputs = plan_outputs(&args.inputs, &config.output_dir)?;
    std::fs::create_dir_all(&config.output_dir)?;

    let results: Vec<(PathBuf, Result<LogOutcome>)> = if args.inputs.len() == 1 {
        let progress_handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        let input = args.inputs[0].clone();
        let outcome = process_log(&input, &outputs[0], &config, &reporter);
        vec![(input, outcome)]
    } else {
        info!("Extracting {} logs in parallel.", args.inputs.len());
        args.inputs
            .par_iter()
            .zip(outputs.par_iter())
            .map(|(input, output)| {
                let outcome = process_log(input, output, &config, &ProgressReporter::new());
                (input.clone(), outcome)
            })
            .collect()
    };

    let mut failures = 0;
    for (input, result) in &results {
        match result {
            Ok(outcome) => print_outcome(input, outcome, config.summary),
            Err(e) => {
                failures += 1;
                error!("Extraction failed for {:?}: {}", input, e);
                eprintln!("✗ {}: {}", input.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(CliError::Other(anyhow::anyhow!(
            "{} of {} log(s) could not be processed",
            failures,
            results.len()
        )));
    }
    Ok(())
}

fn process_log(
    input: &Path,
    series_path: &Path,
    config: &ExtractConfig,
    reporter: &ProgressReporter,
) -> Result<LogOutcome> {
    let extraction = extract::run(input, &config.scan, reporter)?;

    info!("Writing series to {:?}", series_path);
    export::write_series_to_path(&extraction.series, series_path).map_err(ExtractError::from)?;

    let summary_path = if config.summary {
        let path = summary_path_for(series_path);
        let file = std::fs::File::create(&path)?;
        export::write_summary(&extraction.series.summarize(), std::io::BufWriter::new(file))
            .map_err(ExtractError::from)?;
        Some(path)
    } else {
        None
    };

    Ok(LogOutcome {
        series_path: series_path.to_path_buf(),
        summary_path,
        extraction,
    })
}

/// Derives one CSV path per input from its full file name, so restart logs such as `OUTCAR.1`
/// and `OUTCAR.2` stay distinct. Inputs named alike (every run writes an `OUTCAR`) are told apart
/// by their parent directory name.
fn plan_outputs(inputs: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut outputs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let file_name = input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CliError::Argument(format!("Input path has no file name: {:?}", input))
            })?;
        let parent = input
            .parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().into_owned());
        let name = match parent {
            Some(parent) => format!("{}_{}.csv", parent, file_name),
            None => format!("{}.csv", file_name),
        };
        let output = output_dir.join(name);
        if !seen.insert(output.clone()) {
            return Err(CliError::Argument(format!(
                "Several inputs would be written to the same file: {:?}",
                output
            )));
        }
        outputs.push(output);
    }
    Ok(outputs)
}

fn summary_path_for(series_path: &Path) -> PathBuf {
    let stem = series_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    series_path.with_file_name(format!("{}_summary.csv", stem))
}

fn print_outcome(input: &Path, outcome: &LogOutcome, show_summary: bool) {
    let series = &outcome.extraction.series;
    let report = &outcome.extraction.report;
    let (steps, entities) = series.shape();

    if report.markers_found == 0 {
        warn!("No blocks found in {:?}.", input);
        println!(
            "⚠ {}: no matching blocks found; wrote an empty series to {}",
            input.display(),
            outcome.series_path.display()
        );
        return;
    }

    println!(
        "✓ {}: {} step(s) × {} ion(s) written to {}",
        input.display(),
        steps,
        entities,
        outcome.series_path.display()
    );
    if report.blocks_discarded > 0 {
        println!(
            "  {} of {} block(s) skipped as incomplete ({} malformed line(s))",
            report.blocks_discarded, report.markers_found, report.malformed_lines
        );
    }

    if show_summary {
        if let Some(path) = &outcome.summary_path {
            println!("  Summary written to {}", path.display());
        }
        println!(
            "  {:>6} {:>12} {:>12} {:>12} {:>12}",
            "ion", "mean", "min", "max", "final"
        );
        for s in series.summarize() {
            println!(
                "  {:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                s.entity, s.mean, s.min, s.max, s.final_value
            );
        }
    }
}
