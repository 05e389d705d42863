//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl driver that:
//! - Fetches the main listing page and parses its records
//! - Discovers the monthly archive links on the main page
//! - Fetches and parses each archive page in discovery order
//! - Persists the collected batch once at the end of a run

use crate::config::Config;
use crate::crawler::parser::{parse_html_records, parse_listing, ArchiveLink};
use crate::crawler::{build_http_client, fetch_page, FetchResult};
use crate::record::{DailyLossRecord, KnownDates};
use crate::storage::{open_storage, LossStore};
use crate::AirLossError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// A page whose fetch failed during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    pub url: String,
    pub reason: String,
}

/// Outcome of one crawl over the main page and its archives
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// New records, main page first, then archives in link order
    pub records: Vec<DailyLossRecord>,

    /// Pages fetched and parsed successfully
    pub pages_fetched: usize,

    /// Archive pages that could not be fetched
    pub failed_pages: Vec<FailedPage>,

    /// True if the main page could not be fetched and the crawl stopped early
    pub main_page_failed: bool,
}

/// Outcome of a full run (read, crawl, save)
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Days already stored before the crawl
    pub existing_dates: usize,

    /// New records found by the crawl
    pub records_found: usize,

    /// Rows actually written
    pub rows_saved: usize,

    /// Archive pages that could not be fetched
    pub failed_pages: Vec<FailedPage>,

    /// True if the main page could not be fetched
    pub main_page_failed: bool,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    start_url: Url,
    base_url: Url,
    politeness_delay: Duration,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AirLossError)` - Invalid URLs or HTTP client failure
    pub fn new(config: &Config) -> Result<Self, AirLossError> {
        Ok(Self {
            client: build_http_client(config)?,
            start_url: Url::parse(&config.source.start_url)?,
            base_url: Url::parse(&config.source.base_url)?,
            politeness_delay: Duration::from_millis(config.source.politeness_delay),
        })
    }

    /// Crawls the main page and every archive page it links to
    ///
    /// `known` is shared by every parse, so a date is produced at most once
    /// per run. A failed main page ends the crawl with an empty report; a
    /// failed archive page is recorded and skipped.
    pub async fn crawl(&self, known: &mut KnownDates) -> CrawlReport {
        let mut report = CrawlReport::default();

        tracing::info!("Fetching main page {}", self.start_url);
        let body = match fetch_page(&self.client, self.start_url.as_str()).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                log_fetched(self.start_url.as_str(), &final_url, status_code);
                body
            }
            failed => {
                tracing::error!(
                    "Main page {} failed: {}",
                    self.start_url,
                    failed.failure_reason().unwrap_or_default()
                );
                report.main_page_failed = true;
                return report;
            }
        };

        let parsed = parse_listing(&body, &self.base_url, known);
        report.pages_fetched += 1;
        tracing::info!("Found {} new records on the main page", parsed.records.len());
        report.records.extend(parsed.records);

        tracing::info!("Found {} archive months", parsed.archive_links.len());
        for (index, link) in parsed.archive_links.iter().enumerate() {
            if index > 0 && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }
            self.crawl_archive(link, known, &mut report).await;
        }

        tracing::info!(
            "Crawl finished: {} new records from {} pages, {} failed",
            report.records.len(),
            report.pages_fetched,
            report.failed_pages.len()
        );

        report
    }

    /// Fetches and parses one archive page into `report`
    async fn crawl_archive(
        &self,
        link: &ArchiveLink,
        known: &mut KnownDates,
        report: &mut CrawlReport,
    ) {
        tracing::info!("Processing archive: {}", link.label);

        match fetch_page(&self.client, link.url.as_str()).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                log_fetched(link.url.as_str(), &final_url, status_code);
                let records = parse_html_records(&body, known);
                report.pages_fetched += 1;

                if records.is_empty() {
                    tracing::debug!("No new records in {}", link.label);
                } else {
                    tracing::info!("Added {} records from {}", records.len(), link.label);
                }
                report.records.extend(records);
            }
            failed => {
                let reason = failed.failure_reason().unwrap_or_default();
                tracing::warn!("Failed to load {}: {}", link.url, reason);
                report.failed_pages.push(FailedPage {
                    url: link.url.to_string(),
                    reason,
                });
            }
        }
    }
}

fn log_fetched(requested: &str, final_url: &str, status_code: u16) {
    if final_url != requested {
        tracing::debug!("{} redirected to {}", requested, final_url);
    }
    tracing::debug!("Fetched {} (HTTP {})", final_url, status_code);
}

/// Writes a batch to the store, logging instead of failing
///
/// # Returns
///
/// The number of rows inserted; 0 when the write fails.
pub fn save_records(store: &mut dyn LossStore, records: &[DailyLossRecord]) -> usize {
    if records.is_empty() {
        tracing::info!("No new records to save");
        return 0;
    }

    tracing::info!("Writing {} records to the database", records.len());
    match store.insert_new(records) {
        Ok(inserted) => {
            tracing::info!("Saved {} new rows", inserted);
            inserted
        }
        Err(e) => {
            tracing::error!("Failed to save records: {}", e);
            0
        }
    }
}

/// Runs a complete crawl operation
///
/// This function orchestrates the entire run:
///
/// 1. Open the database and make sure the table exists
/// 2. Read the dates that are already stored
/// 3. Crawl the main page and its archive pages
/// 4. Insert the new records in one transaction
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run completed (possibly with failed pages or an unsaved batch)
/// * `Err(AirLossError)` - The database could not be opened or the client built
///
/// # Example
///
/// ```no_run
/// use air_losses::config::Config;
/// use air_losses::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::default()).await?;
/// println!("Saved {} rows", summary.rows_saved);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunSummary, AirLossError> {
    let mut store = open_storage(Path::new(&config.output.database_path))?;
    tracing::info!("Database ready: {}", config.output.database_path);

    let mut known = store.existing_dates();
    let existing_dates = known.len();
    tracing::info!("Database already holds {} days", existing_dates);

    let coordinator = Coordinator::new(&config)?;
    let report = coordinator.crawl(&mut known).await;

    let rows_saved = save_records(&mut store, &report.records);

    Ok(RunSummary {
        existing_dates,
        records_found: report.records.len(),
        rows_saved,
        failed_pages: report.failed_pages,
        main_page_failed: report.main_page_failed,
    })
}
