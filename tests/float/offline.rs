use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use edinet_rs::{FloatBatchBuilder, FloatBuilder, FloatCache, FloatingRatio};

use crate::common;

// 2024-06-20 is a Thursday.
fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

#[tokio::test]
async fn ratio_column_drives_the_estimate() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    let archive = common::mock_archive_zip(&server, "S100ABCD", "filing_annual.zip");

    let client = common::client_for(&server);
    let float = FloatBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap()
        .expect("an estimate");

    archive.assert();

    // The ratio column sums to 65%; share counts are carried but unused.
    assert!((float.floating_ratio - 0.35).abs() < 1e-9);
    assert_eq!(float.major_shareholders.len(), 2);
    assert_eq!(float.major_shareholder_shares, 1_950_000);
    assert_eq!(float.treasury_shares, 50_000);
    assert_eq!(float.fixed_shares, 2_000_000);
    assert_eq!(float.total_shares, Some(3_000_000));
    assert_eq!(float.doc_id, "S100ABCD");
    assert_eq!(float.filing_date, "2024-06-20");

    let top = &float.major_shareholders[0];
    assert_eq!(top.name, "日本マスタートラスト信託銀行株式会社（信託口）");
    assert_eq!(top.shares, 1_200_000);
    assert!((top.ratio_pct - 40.0).abs() < 1e-9);
}

#[tokio::test]
async fn share_counts_drive_the_estimate_without_a_ratio_column() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_counts.json"));
    common::mock_archive_zip(&server, "S100CNTS", "filing_counts.zip");

    let client = common::client_for(&server);
    let float = FloatBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap()
        .unwrap();

    // 800k held + 100k treasury of 1,000k issued -> 10% floating.
    assert_eq!(float.major_shareholder_shares, 800_000);
    assert_eq!(float.treasury_shares, 100_000);
    assert_eq!(float.fixed_shares, 900_000);
    assert_eq!(float.total_shares, Some(1_000_000));
    assert!((float.floating_ratio - 0.1).abs() < 1e-9);
}

#[tokio::test]
async fn json_body_on_download_means_no_file() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    common::mock_archive_no_file(&server, "S100ABCD");

    let client = common::client_for(&server);
    let float = FloatBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap();

    assert!(float.is_none());
}

struct RecordingCache {
    puts: Mutex<Vec<(String, f64)>>,
}

#[async_trait]
impl FloatCache for RecordingCache {
    async fn put(&self, symbol: &str, result: &FloatingRatio) {
        self.puts
            .lock()
            .unwrap()
            .push((symbol.to_string(), result.floating_ratio));
    }
}

#[tokio::test]
async fn successful_estimate_is_written_through_to_the_cache() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    common::mock_archive_zip(&server, "S100ABCD", "filing_annual.zip");

    let cache = Arc::new(RecordingCache {
        puts: Mutex::new(Vec::new()),
    });

    let client = common::client_for(&server);
    FloatBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .cache(Arc::clone(&cache) as Arc<dyn FloatCache>)
        .fetch()
        .await
        .unwrap()
        .unwrap();

    let puts = cache.puts.lock().unwrap();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].0, "7203.T");
    assert!((puts[0].1 - 0.35).abs() < 1e-9);
}

#[tokio::test]
async fn batch_estimates_every_discovered_symbol() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    common::mock_archive_zip(&server, "S100ABCD", "filing_annual.zip");

    let client = common::client_for(&server);
    let results = FloatBatchBuilder::new(&client, ["7203.T"])
        .search_days(1)
        .concurrency(2)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!((results["7203.T"].floating_ratio - 0.35).abs() < 1e-9);
}
