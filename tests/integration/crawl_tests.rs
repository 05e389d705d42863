//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use air_losses::config::Config;
use air_losses::crawler::{run_crawl, Coordinator};
use air_losses::storage::{open_storage, LossStore};
use air_losses::KnownDates;
use chrono::NaiveDate;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAIN_PATH: &str = "/ua/casualties/";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, db_path: &str) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.source.start_url = format!("{}{}", base_url, MAIN_PATH);
    config.source.politeness_delay = 0;
    config.source.request_timeout = 5;
    config.output.database_path = db_path.to_string();
    config
}

fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// One highlighted day with a UAV count
fn day_item(date: &str, uav: u32) -> String {
    format!(
        r#"<li class="gold"><span class="black">{}</span>
           <div class="casualties"><ul>
             <li>Літаки +0</li>
             <li>БПЛА +{}</li>
             <li>Крилаті ракети +2</li>
           </ul></div></li>"#,
        date, uav
    )
}

fn listing_page(items: &[String], archive_hrefs: &[&str]) -> String {
    let nav = archive_hrefs
        .iter()
        .map(|href| {
            format!(
                r#"<div class="ajaxmonth"><h4><a href="{}">{}</a></h4></div>"#,
                href, href
            )
        })
        .collect::<String>();
    format!(
        r#"<html><head><title>Casualties</title></head><body>
           <ul class="see-also">{}</ul>
           {}
           </body></html>"#,
        items.concat(),
        nav
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Main page with two days and three archive months, the middle one broken
async fn mount_site(server: &MockServer) {
    mount_page(
        server,
        MAIN_PATH,
        listing_page(
            &[day_item("02.03.2024", 20), day_item("01.03.2024", 10)],
            &[
                "/ua/casualties/2024-02/",
                "/ua/casualties/2024-01/",
                "/ua/casualties/2023-12/",
            ],
        ),
    )
    .await;

    // Repeats 01.03 from the main page, adds 29.02; its own nav must not be followed
    mount_page(
        server,
        "/ua/casualties/2024-02/",
        listing_page(
            &[day_item("01.03.2024", 99), day_item("29.02.2024", 7)],
            &["/ua/casualties/2020-01/"],
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/ua/casualties/2024-01/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;

    mount_page(
        server,
        "/ua/casualties/2023-12/",
        listing_page(&[day_item("31.12.2023", 3)], &[]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/ua/casualties/2020-01/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_main_page_and_archives() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), "unused.db");
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::new();
    let report = coordinator.crawl(&mut known).await;

    let dates: Vec<_> = report.records.iter().map(|r| r.report_date).collect();
    assert_eq!(
        dates,
        vec![
            date(2, 3, 2024),
            date(1, 3, 2024),
            date(29, 2, 2024),
            date(31, 12, 2023),
        ]
    );

    // 01.03 came from the main page, not the archive duplicate
    assert_eq!(report.records[1].uav, 10);
    assert_eq!(report.records[1].cruise_missiles, 2);

    assert!(!report.main_page_failed);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.failed_pages.len(), 1);
    assert!(report.failed_pages[0].url.ends_with("/ua/casualties/2024-01/"));
    assert_eq!(report.failed_pages[0].reason, "HTTP 500");

    assert_eq!(known.len(), 4);
}

#[tokio::test]
async fn test_known_dates_are_not_recrawled() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), "unused.db");
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::from([date(2, 3, 2024), date(31, 12, 2023)]);
    let report = coordinator.crawl(&mut known).await;

    let dates: Vec<_> = report.records.iter().map(|r| r.report_date).collect();
    assert_eq!(dates, vec![date(1, 3, 2024), date(29, 2, 2024)]);
}

#[tokio::test]
async fn test_main_page_failure_stops_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(MAIN_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "unused.db");
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::new();
    let report = coordinator.crawl(&mut known).await;

    assert!(report.main_page_failed);
    assert!(report.records.is_empty());
    assert_eq!(report.pages_fetched, 0);
    assert!(known.is_empty());
}

#[tokio::test]
async fn test_unreachable_archive_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        MAIN_PATH,
        listing_page(
            &[day_item("05.05.2024", 1)],
            &["http://127.0.0.1:9/ua/casualties/2024-04/", "/ua/casualties/2024-03/"],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/ua/casualties/2024-03/",
        listing_page(&[day_item("31.03.2024", 4)], &[]),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), "unused.db");
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::new();
    let report = coordinator.crawl(&mut known).await;

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].report_date, date(31, 3, 2024));
    assert_eq!(report.failed_pages.len(), 1);
    assert!(report.failed_pages[0].url.starts_with("http://127.0.0.1:9/"));
}

#[tokio::test]
async fn test_politeness_delay_between_archive_requests() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let delay = Duration::from_millis(150);
    let mut config = create_test_config(&mock_server.uri(), "unused.db");
    config.source.politeness_delay = delay.as_millis() as u64;
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::new();
    let started = Instant::now();
    let report = coordinator.crawl(&mut known).await;
    let elapsed = started.elapsed();

    // Three archive links, one of them failing: two pauses
    assert!(elapsed >= delay * 2, "elapsed {:?}", elapsed);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.failed_pages.len(), 1);
    assert_eq!(report.records.len(), 4);
}

#[tokio::test]
async fn test_single_archive_link_is_not_delayed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        MAIN_PATH,
        listing_page(&[day_item("05.05.2024", 1)], &["/ua/casualties/2024-04/"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/ua/casualties/2024-04/",
        listing_page(&[day_item("30.04.2024", 2)], &[]),
    )
    .await;

    let delay = Duration::from_secs(3);
    let mut config = create_test_config(&mock_server.uri(), "unused.db");
    config.source.politeness_delay = delay.as_millis() as u64;
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::new();
    let started = Instant::now();
    let report = coordinator.crawl(&mut known).await;

    assert!(started.elapsed() < delay);
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_redirected_archive_is_parsed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        MAIN_PATH,
        listing_page(&[], &["/ua/casualties/2024-04/"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/ua/casualties/2024-04/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/ua/casualties/2024-04/page/"),
        )
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/ua/casualties/2024-04/page/",
        listing_page(&[day_item("30.04.2024", 6)], &[]),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), "unused.db");
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    let mut known = KnownDates::new();
    let report = coordinator.crawl(&mut known).await;

    assert!(report.failed_pages.is_empty());
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].uav, 6);
}

#[tokio::test]
async fn test_run_crawl_persists_and_is_idempotent() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("air_losses.db");
    let db_path = db_path.to_str().expect("Temp path is not UTF-8");

    let config = create_test_config(&mock_server.uri(), db_path);

    let first = run_crawl(config.clone()).await.expect("First run failed");
    assert_eq!(first.existing_dates, 0);
    assert_eq!(first.records_found, 4);
    assert_eq!(first.rows_saved, 4);
    assert_eq!(first.failed_pages.len(), 1);

    let second = run_crawl(config).await.expect("Second run failed");
    assert_eq!(second.existing_dates, 4);
    assert_eq!(second.records_found, 0);
    assert_eq!(second.rows_saved, 0);

    let store = open_storage(std::path::Path::new(db_path)).expect("Failed to open DB");
    assert_eq!(store.count_days().expect("Failed to count days"), 4);

    let stored = store
        .get_record(date(29, 2, 2024))
        .expect("Failed to read record")
        .expect("Record missing");
    assert_eq!(stored.uav, 7);
    assert_eq!(stored.cruise_missiles, 2);
}

#[tokio::test]
async fn test_run_crawl_with_unreachable_main_page_saves_nothing() {
    let mock_server = MockServer::start().await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("air_losses.db");
    let db_path = db_path.to_str().expect("Temp path is not UTF-8");

    // Nothing mounted: the mock server answers 404
    let config = create_test_config(&mock_server.uri(), db_path);
    let summary = run_crawl(config).await.expect("Run failed");

    assert!(summary.main_page_failed);
    assert_eq!(summary.rows_saved, 0);

    // The schema still exists after an empty run
    let store = open_storage(std::path::Path::new(db_path)).expect("Failed to open DB");
    assert!(store.load_dates().expect("Table should exist").is_empty());
}
