//! Company list loading from delimited text files
//!
//! The input must have a header row naming every required column. Header
//! names are trimmed before matching; cell values are kept verbatim. Any
//! problem aborts the whole load, so callers never see a partial list.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::company::Company;

/// Header of the free-text contact column as it appears in the source sheets
pub const OTHER_CONTACT_COLUMN: &str = "Thông tin liên lạc khác";
/// Accepted English spelling of the same column
pub const OTHER_CONTACT_COLUMN_ALIAS: &str = "Other contact info";

/// Required input columns, in `Company` field order. Each entry lists the
/// accepted spellings; the first is the one reported when missing.
const REQUIRED_COLUMNS: [&[&str]; 13] = [
    &["Tax code"],
    &["Company name"],
    &["Address number"],
    &["Street"],
    &["Ward"],
    &["District"],
    &["Province"],
    &["Website"],
    &["Facebook"],
    &["Linkedin"],
    &["Email"],
    &["Phone number"],
    &[OTHER_CONTACT_COLUMN, OTHER_CONTACT_COLUMN_ALIAS],
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row} has an empty '{column}' value")]
    MissingIdentity { row: usize, column: &'static str },
}

/// Load companies from a file on disk
pub fn load_companies(path: &Path, delimiter: u8) -> Result<Vec<Company>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let companies = parse_companies(file, delimiter)?;
    debug!("Loaded {} companies from {}", companies.len(), path.display());
    Ok(companies)
}

/// Parse companies from any reader
pub fn parse_companies<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Company>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let indices = resolve_columns(&headers)?;

    let mut companies = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or_default().to_string();

        let company = Company {
            tax_code: cell(indices[0]),
            name: cell(indices[1]),
            address_number: cell(indices[2]),
            street: cell(indices[3]),
            ward: cell(indices[4]),
            district: cell(indices[5]),
            province: cell(indices[6]),
            website: cell(indices[7]),
            facebook: cell(indices[8]),
            linkedin: cell(indices[9]),
            email: cell(indices[10]),
            phone_number: cell(indices[11]),
            other_contact_info: cell(indices[12]),
        };

        let row = i + 1;
        if company.tax_code.trim().is_empty() {
            return Err(LoadError::MissingIdentity { row, column: "Tax code" });
        }
        if company.name.trim().is_empty() {
            return Err(LoadError::MissingIdentity { row, column: "Company name" });
        }

        debug!("Row {}: {:?}", row, company);
        companies.push(company);
    }

    Ok(companies)
}

/// Map every required column to its header index
fn resolve_columns(headers: &[String]) -> Result<[usize; 13], LoadError> {
    let mut indices = [0usize; 13];
    let mut missing = Vec::new();

    for (slot, names) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| names.contains(&h.as_str())) {
            Some(idx) => indices[slot] = idx,
            None => missing.push(names[0].to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}
