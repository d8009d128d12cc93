use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::error::FileError;
use crate::types::{BreweryRecord, RawRow};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub missing_coordinates: usize,
}

/// Load a record set from `.json` (an array of brewery objects) or `.csv`.
pub fn load_records(
    path: impl AsRef<Path>,
) -> Result<(Vec<BreweryRecord>, LoadReport), FileError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let (records, mut report) = match ext.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        _ => return Err(FileError::UnsupportedFormat(path.to_path_buf())),
    };
    report.missing_coordinates = records.iter().filter(|r| !r.has_coordinates()).count();
    info!(
        path = %path.display(),
        loaded = report.loaded_rows,
        skipped = report.parse_errors,
        "loaded brewery records"
    );
    Ok((records, report))
}

fn load_json(path: &Path) -> Result<(Vec<BreweryRecord>, LoadReport), FileError> {
    let reader = BufReader::new(File::open(path)?);
    let rows: Vec<RawRow> = serde_json::from_reader(reader)?;
    let records: Vec<BreweryRecord> = rows.into_iter().map(BreweryRecord::from).collect();
    let report = LoadReport {
        total_rows: records.len(),
        loaded_rows: records.len(),
        ..Default::default()
    };
    Ok((records, report))
}

fn load_csv(path: &Path) -> Result<(Vec<BreweryRecord>, LoadReport), FileError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        total_rows += 1;
        match result {
            Ok(row) => records.push(BreweryRecord::from(row)),
            Err(e) => {
                warn!(row = total_rows, error = %e, "skipping unreadable row");
                parse_errors += 1;
            }
        }
    }

    let report = LoadReport {
        total_rows,
        loaded_rows: records.len(),
        parse_errors,
        ..Default::default()
    };
    Ok((records, report))
}
