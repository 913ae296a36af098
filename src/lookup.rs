//! Tax-lookup page fetching and per-record enrichment
//!
//! `LookupClient::fetch` performs exactly one GET per company. `enrich` is
//! the pure half: it turns a record and the page fetched for it into the
//! updated record plus a report of what was found.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::company::{Company, ContactPatch};
use crate::config::LookupConfig;
use crate::scrape::extract_contact;
use crate::slug::lookup_url;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A fetched lookup page
#[derive(Debug, Clone)]
pub struct LookupPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl LookupPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// How a page's content is interpreted
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichPolicy {
    /// Scrape non-2xx pages instead of treating them as a miss
    pub parse_error_pages: bool,
}

/// Whether a field was found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLookup {
    Found(String),
    NotFound,
}

impl FieldLookup {
    fn from_option(value: Option<&String>) -> Self {
        match value {
            Some(v) => FieldLookup::Found(v.clone()),
            None => FieldLookup::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldLookup::Found(_))
    }
}

/// Result of enriching one record
#[derive(Debug, Clone)]
pub struct EnrichOutcome {
    pub company: Company,
    pub phone_number: FieldLookup,
    pub other_contact_info: FieldLookup,
    /// Set when the page was a non-2xx response that was not scraped
    pub skipped_status: Option<u16>,
}

/// Apply a fetched page to a record. Absent markers leave fields unchanged.
pub fn enrich(company: &Company, page: &LookupPage, policy: EnrichPolicy) -> EnrichOutcome {
    if !page.is_success() && !policy.parse_error_pages {
        debug!("Status {} from {}, treating as not found", page.status, page.url);
        return EnrichOutcome {
            company: company.clone(),
            phone_number: FieldLookup::NotFound,
            other_contact_info: FieldLookup::NotFound,
            skipped_status: Some(page.status),
        };
    }

    let patch: ContactPatch = extract_contact(&page.body);
    if patch.is_empty() {
        debug!("No contact markers on {}", page.url);
    }
    EnrichOutcome {
        company: company.with_contact(&patch),
        phone_number: FieldLookup::from_option(patch.phone_number.as_ref()),
        other_contact_info: FieldLookup::from_option(patch.other_contact_info.as_ref()),
        skipped_status: None,
    }
}

/// HTTP client for the tax-lookup site
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::default())
            .build()
            .map_err(LookupError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Lookup page URL for a company
    pub fn url_for(&self, company: &Company) -> String {
        lookup_url(&self.base_url, company)
    }

    /// Fetch the lookup page for a company. Any HTTP status is returned as a
    /// page; only transport failures are errors.
    pub async fn fetch(&self, company: &Company) -> Result<LookupPage, LookupError> {
        let url = self.url_for(company);
        debug!("Fetching lookup page: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| LookupError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| LookupError::Body {
            url: url.clone(),
            source,
        })?;

        debug!("Fetched {} ({}, {} bytes)", url, status, body.len());
        Ok(LookupPage { url, status, body })
    }
}
