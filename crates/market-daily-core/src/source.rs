//! Tabular instrument source.
//!
//! Reads a headed CSV (`category,symbol,name,price,change,change_pct,unit`)
//! into [`RawInstrumentRow`] values in file order. Cells are trimmed, missing
//! columns and short rows load as `None`, unknown columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::info;

use crate::{PipelineError, RawInstrumentRow};

/// Load every row of the source file at `path`.
pub fn load_sources(path: &Path) -> Result<Vec<RawInstrumentRow>, PipelineError> {
    info!("loading sources from {}", path.display());
    let file = File::open(path).map_err(|error| PipelineError::source_io(path, error))?;

    let rows = read_sources(file).map_err(|source| PipelineError::SourceMalformed {
        path: path.to_path_buf(),
        source,
    })?;

    info!("loaded {} source rows", rows.len());
    Ok(rows)
}

/// Parse source rows from any reader.
pub fn read_sources<R: Read>(reader: R) -> Result<Vec<RawInstrumentRow>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: RawInstrumentRow = record.deserialize(Some(&headers))?;
        row.line = record.position().map(|position| position.line()).unwrap_or_default();
        rows.push(row);
    }

    Ok(rows)
}
