//! CSV and JSON export of evaluation results

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::error::{BenchError, Result};

/// Writes numeric series as columns.
///
/// The header is `index` followed by `names` in the given order; row `i`
/// holds the `i`-th value of every series. Series shorter than the longest
/// one leave empty cells.
pub fn write_series_csv<P, S>(path: P, names: &[S], series: &[Vec<f64>]) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    if names.len() != series.len() {
        return Err(BenchError::InvalidConfiguration(format!(
            "{} series names for {} series",
            names.len(),
            series.len()
        )));
    }

    let mut wtr = csv::Writer::from_path(path.as_ref())?;

    let mut header = Vec::with_capacity(names.len() + 1);
    header.push("index");
    header.extend(names.iter().map(|name| name.as_ref()));
    wtr.write_record(&header)?;

    let rows = series.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..rows {
        let mut record = Vec::with_capacity(series.len() + 1);
        record.push(i.to_string());
        for values in series {
            record.push(values.get(i).map(|v| v.to_string()).unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    log::debug!("wrote {} rows x {} series to {}", rows, series.len(), path.as_ref().display());
    Ok(())
}

/// Pretty-printed JSON summary
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}
