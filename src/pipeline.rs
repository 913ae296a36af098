//! Sequential enrichment of a loaded company list
//!
//! Each company is looked up and enriched strictly one after another; the
//! next request is only sent once the previous page has been processed.
//! The returned list keeps input order.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::company::Company;
use crate::config::FetchErrorPolicy;
use crate::logger::EnrichmentLogger;
use crate::lookup::{enrich, EnrichPolicy, FieldLookup, LookupClient};

/// Settings for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub enrich: EnrichPolicy,
    pub on_fetch_error: FetchErrorPolicy,
}

/// What happened to a single company
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    /// Page fetched and scraped (fields may or may not have been found)
    Scraped,
    /// Non-2xx page, not scraped
    NotFound,
    /// Transport failure, record left unchanged
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyResult {
    pub tax_code: String,
    pub status: CompanyStatus,
    pub phone_found: bool,
    pub other_contact_found: bool,
    pub error: Option<String>,
}

/// Summary of an enrichment run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_companies: usize,
    pub phones_found: usize,
    pub other_contact_found: usize,
    pub status_misses: usize,
    pub fetch_failures: usize,
    pub results: Vec<CompanyResult>,
    pub duration_secs: f64,
    pub started_at: String,
    pub completed_at: String,
}

pub struct EnrichmentRun {
    pub companies: Vec<Company>,
    pub summary: RunSummary,
}

pub fn new_run_summary() -> RunSummary {
    RunSummary {
        total_companies: 0,
        phones_found: 0,
        other_contact_found: 0,
        status_misses: 0,
        fetch_failures: 0,
        results: Vec::new(),
        duration_secs: 0.0,
        started_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        completed_at: String::new(),
    }
}

/// Recompute the totals from the per-company results and stamp the end time
pub fn finalize_run_summary(summary: &mut RunSummary) {
    summary.completed_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    summary.total_companies = summary.results.len();
    summary.phones_found = summary.results.iter().filter(|r| r.phone_found).count();
    summary.other_contact_found = summary.results.iter().filter(|r| r.other_contact_found).count();
    summary.status_misses = summary
        .results
        .iter()
        .filter(|r| r.status == CompanyStatus::NotFound)
        .count();
    summary.fetch_failures = summary
        .results
        .iter()
        .filter(|r| r.status == CompanyStatus::Failed)
        .count();
}

/// Export a run summary to a JSON file
pub fn export_run_summary(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)
        .context("Failed to serialize run summary")?;

    fs::write(output_path, json)
        .context(format!("Failed to write run summary to: {}", output_path.display()))?;

    Ok(())
}

/// Look up every company in order.
///
/// With `FetchErrorPolicy::Abort` the first transport error is returned and
/// no results are produced. With `Skip` the failing company is kept as-is.
pub async fn enrich_all(
    companies: &[Company],
    client: &LookupClient,
    options: RunOptions,
    logger: &EnrichmentLogger,
) -> Result<EnrichmentRun> {
    let started = Instant::now();
    let mut summary = new_run_summary();
    let mut enriched = Vec::with_capacity(companies.len());

    logger.start_progress(companies.len() as u64);

    for company in companies {
        logger.set_progress_message(&company.tax_code);
        logger.log_lookup_start(&company.tax_code, &client.url_for(company));

        let page = match client.fetch(company).await {
            Ok(page) => page,
            Err(e) => {
                logger.log_fetch_failed(&company.tax_code, &e.to_string());
                match options.on_fetch_error {
                    FetchErrorPolicy::Abort => {
                        logger.finish_progress();
                        return Err(e.into());
                    }
                    FetchErrorPolicy::Skip => {
                        summary.results.push(CompanyResult {
                            tax_code: company.tax_code.clone(),
                            status: CompanyStatus::Failed,
                            phone_found: false,
                            other_contact_found: false,
                            error: Some(e.to_string()),
                        });
                        enriched.push(company.clone());
                        logger.advance_progress();
                        continue;
                    }
                }
            }
        };

        let outcome = enrich(company, &page, options.enrich);

        if let Some(status) = outcome.skipped_status {
            logger.log_status_miss(&company.tax_code, status);
        } else {
            match &outcome.phone_number {
                FieldLookup::Found(phone) => logger.log_phone_found(&company.tax_code, phone),
                FieldLookup::NotFound => logger.log_phone_missing(&company.tax_code),
            }
            match &outcome.other_contact_info {
                FieldLookup::Found(value) => logger.log_other_contact_found(&company.tax_code, value),
                FieldLookup::NotFound => logger.log_other_contact_missing(&company.tax_code),
            }
        }

        summary.results.push(CompanyResult {
            tax_code: company.tax_code.clone(),
            status: if outcome.skipped_status.is_some() {
                CompanyStatus::NotFound
            } else {
                CompanyStatus::Scraped
            },
            phone_found: outcome.phone_number.is_found(),
            other_contact_found: outcome.other_contact_info.is_found(),
            error: None,
        });
        enriched.push(outcome.company);
        logger.advance_progress();
    }

    logger.finish_progress();

    summary.duration_secs = started.elapsed().as_secs_f64();
    finalize_run_summary(&mut summary);

    Ok(EnrichmentRun {
        companies: enriched,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: CompanyStatus, phone: bool, other: bool) -> CompanyResult {
        CompanyResult {
            tax_code: "123".to_string(),
            status,
            phone_found: phone,
            other_contact_found: other,
            error: None,
        }
    }

    #[test]
    fn test_finalize_counts() {
        let mut summary = new_run_summary();
        summary.results.push(result(CompanyStatus::Scraped, true, true));
        summary.results.push(result(CompanyStatus::Scraped, true, false));
        summary.results.push(result(CompanyStatus::NotFound, false, false));
        summary.results.push(result(CompanyStatus::Failed, false, false));

        finalize_run_summary(&mut summary);

        assert_eq!(summary.total_companies, 4);
        assert_eq!(summary.phones_found, 2);
        assert_eq!(summary.other_contact_found, 1);
        assert_eq!(summary.status_misses, 1);
        assert_eq!(summary.fetch_failures, 1);
        assert!(!summary.completed_at.is_empty());
    }

    #[test]
    fn test_export_run_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        let mut summary = new_run_summary();
        summary.results.push(result(CompanyStatus::Scraped, true, false));
        finalize_run_summary(&mut summary);
        export_run_summary(&summary, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["total_companies"], 1);
        assert_eq!(json["phones_found"], 1);
        assert_eq!(json["results"][0]["tax_code"], "123");
    }

    #[test]
    fn test_summary_serializes_status_snake_case() {
        let json = serde_json::to_value(result(CompanyStatus::NotFound, false, false)).unwrap();
        assert_eq!(json["status"], "not_found");
    }
}
