//! HTML parser for daily loss records and archive links
//!
//! This module handles parsing a casualties listing page to extract:
//! - One [`DailyLossRecord`] per highlighted list item whose date is not yet known
//! - Links to the monthly archive pages
//!
//! # Markup
//!
//! ```text
//! <ul class="see-also">
//!   <li class="gold">
//!     <span class="black">24.02.2024</span>
//!     <div class="casualties"><ul><li>Літаки +1</li>...</ul></div>
//!   </li>
//! </ul>
//! <div class="ajaxmonth"><h4><a href="/ua/.../2024-01/">Січень 2024</a></h4></div>
//! ```

use crate::crawler::category::classify_casualty;
use crate::record::{DailyLossRecord, KnownDates};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static CONTAINER_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.see-also").expect("hardcoded selector is valid"));
static ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.gold").expect("hardcoded selector is valid"));
static DATE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.black").expect("hardcoded selector is valid"));
static CASUALTIES_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.casualties").expect("hardcoded selector is valid"));
static LINE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("hardcoded selector is valid"));
static ARCHIVE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.ajaxmonth h4 a").expect("hardcoded selector is valid"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})\.(\d{2})\.(\d{4})").expect("DATE_RE: hardcoded regex is valid")
});

/// A link to a monthly archive page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLink {
    /// Absolute URL of the archive page
    pub url: Url,

    /// Link text, e.g. the month name
    pub label: String,
}

/// Everything extracted from one listing page
#[derive(Debug, Clone)]
pub struct ParsedListing {
    /// Records for dates that were not known before
    pub records: Vec<DailyLossRecord>,

    /// Archive links in page order
    pub archive_links: Vec<ArchiveLink>,
}

/// Parses a listing page and extracts new records and archive links
///
/// Every emitted record's date is added to `known`.
///
/// # Example
///
/// ```
/// use air_losses::crawler::parse_listing;
/// use air_losses::KnownDates;
/// use url::Url;
///
/// let html = r#"<ul class="see-also"><li class="gold">
///     <span class="black">01.03.2024</span>
///     <div class="casualties"><ul><li>БПЛА +42</li></ul></div>
/// </li></ul>"#;
/// let base = Url::parse("https://example.com").unwrap();
/// let mut known = KnownDates::new();
/// let parsed = parse_listing(html, &base, &mut known);
/// assert_eq!(parsed.records.len(), 1);
/// assert_eq!(parsed.records[0].uav, 42);
/// ```
pub fn parse_listing(html: &str, base_url: &Url, known: &mut KnownDates) -> ParsedListing {
    let document = Html::parse_document(html);

    ParsedListing {
        records: parse_records(&document, known),
        archive_links: extract_archive_links(&document, base_url),
    }
}

/// Convenience function for extracting just the records from HTML
pub fn parse_html_records(html: &str, known: &mut KnownDates) -> Vec<DailyLossRecord> {
    let document = Html::parse_document(html);
    parse_records(&document, known)
}

/// Extracts the records of every highlighted item whose date is not in `known`
///
/// Items without a parseable date are skipped. An item without a casualties
/// breakdown yields an all-zero record.
pub fn parse_records(document: &Html, known: &mut KnownDates) -> Vec<DailyLossRecord> {
    let mut records = Vec::new();

    for container in document.select(&CONTAINER_SELECTOR) {
        for item in container.select(&ITEM_SELECTOR) {
            let Some(date) = extract_date(&item) else {
                tracing::debug!("Skipping item without a report date");
                continue;
            };

            if known.contains(&date) {
                tracing::trace!("Skipping known date {}", date);
                continue;
            }

            let record = build_record(date, &item);
            known.insert(date);
            records.push(record);
        }
    }

    records
}

/// Finds the `dd.mm.yyyy` date in an item's date label
fn extract_date(item: &ElementRef) -> Option<NaiveDate> {
    let label = item.select(&DATE_SELECTOR).next()?;
    let text = label.text().collect::<String>();

    let caps = DATE_RE.captures(text.trim())?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn build_record(date: NaiveDate, item: &ElementRef) -> DailyLossRecord {
    let mut record = DailyLossRecord::new(date);

    if let Some(casualties) = item.select(&CASUALTIES_SELECTOR).next() {
        for line in casualties.select(&LINE_SELECTOR) {
            if let Some((category, count)) = classify_casualty(&element_text(&line)) {
                record.set(category, count);
            }
        }
    }

    record
}

/// Text nodes of an element, trimmed and joined with single spaces
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts monthly archive links from the page navigation
///
/// Anchors without an `href`, or whose `href` cannot be resolved against
/// `base_url`, are skipped.
pub fn extract_archive_links(document: &Html, base_url: &Url) -> Vec<ArchiveLink> {
    let mut links = Vec::new();

    for anchor in document.select(&ARCHIVE_SELECTOR) {
        let href = match anchor.value().attr("href").map(str::trim) {
            Some(href) if !href.is_empty() => href,
            _ => continue,
        };

        match base_url.join(href) {
            Ok(url) => links.push(ArchiveLink {
                url,
                label: element_text(&anchor),
            }),
            Err(e) => tracing::debug!("Skipping archive link {}: {}", href, e),
        }
    }

    links
}
