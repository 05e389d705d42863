//! Crawler module for fetching and parsing the casualties listing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching (single attempt per page)
//! - Record and archive link extraction
//! - Casualty line classification
//! - Overall crawl coordination

mod category;
mod coordinator;
mod fetcher;
mod parser;

pub use category::{classify_casualty, classify_line, extract_count, CategoryRule, CATEGORY_RULES};
pub use coordinator::{run_crawl, save_records, Coordinator, CrawlReport, FailedPage, RunSummary};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::{
    extract_archive_links, parse_html_records, parse_listing, parse_records, ArchiveLink,
    ParsedListing,
};

use crate::config::Config;
use crate::AirLossError;

/// Runs a complete crawl operation
///
/// This is the main entry point for a run. It will:
/// 1. Open the database and create the table if needed
/// 2. Load the dates already stored
/// 3. Crawl the main page and its monthly archives
/// 4. Save the new records
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Run completed
/// * `Err(AirLossError)` - Run could not start
pub async fn crawl(config: Config) -> Result<RunSummary, AirLossError> {
    run_crawl(config).await
}
