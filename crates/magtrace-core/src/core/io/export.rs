use crate::core::models::series::{EntitySummary, Series};
use std::io::Write;
use std::path::Path;

/// Writes a series as CSV: a `step,ion_1,...,ion_n` header, then one row per accepted step.
///
/// Step numbers are 1-based and count accepted records, not raw blocks in the log. Values are
/// formatted the same way as in [`write_summary`] (`1.0`, not `1`).
pub fn write_series<W: Write>(series: &Series, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header = Vec::with_capacity(series.entities() + 1);
    header.push("step".to_string());
    header.extend((1..=series.entities()).map(|i| format!("ion_{}", i)));
    wtr.write_record(&header)?;

    for (step, row) in series.rows().enumerate() {
        wtr.serialize((step + 1, row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_series_to_path<P: AsRef<Path>>(series: &Series, path: P) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_series(series, std::io::BufWriter::new(file))
}

/// Writes one CSV row per entity with its mean, min, max, and final value.
pub fn write_summary<W: Write>(summaries: &[EntitySummary], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for summary in summaries {
        wtr.serialize(summary)?;
    }
    wtr.flush()?;
    Ok(())
}
