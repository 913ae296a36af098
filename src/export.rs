use crate::company::{Company, FIELD_NAMES};
use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use tracing::{debug, info};

/// Write companies to `output_path`, replacing any existing file
pub fn export_csv(companies: &[Company], output_path: &str) -> Result<()> {
    debug!("Exporting {} companies to CSV: {}", companies.len(), output_path);

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    write_companies_csv(companies, file)
        .with_context(|| format!("Failed to write output file: {}", output_path))?;

    info!("Successfully exported {} companies to CSV: {}", companies.len(), output_path);
    Ok(())
}

/// Write the header and one indexed row per company.
///
/// The first column is an unnamed row index counting from 0.
pub fn write_companies_csv<W: Write>(companies: &[Company], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = Vec::with_capacity(FIELD_NAMES.len() + 1);
    header.push("");
    header.extend_from_slice(&FIELD_NAMES);
    wtr.write_record(&header)?;

    for (index, company) in companies.iter().enumerate() {
        let index = index.to_string();
        let mut row = Vec::with_capacity(FIELD_NAMES.len() + 1);
        row.push(index.as_str());
        row.extend_from_slice(&company.fields());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn print_run_summary(summary: &crate::pipeline::RunSummary) {
    println!("\n=== Enrichment Summary ===");
    println!("Companies processed: {}", summary.total_companies);
    println!("Phone numbers found: {}", summary.phones_found);
    println!("Other contact info found: {}", summary.other_contact_found);
    println!("Pages not found (non-2xx): {}", summary.status_misses);
    println!("Fetch failures: {}", summary.fetch_failures);
    println!("Duration: {:.2}s", summary.duration_secs);
    println!("==========================\n");
}
