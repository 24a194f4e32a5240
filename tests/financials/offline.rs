use std::time::Duration;

use chrono::NaiveDate;
use edinet_rs::{FinancialsBuilder, Ticker};

use crate::common;

// 2024-06-20 is a Thursday.
fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

#[tokio::test]
async fn extracts_line_items_from_the_filing() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    common::mock_archive_zip(&server, "S100ABCD", "filing_annual.zip");

    let client = common::client_for(&server);
    let f = FinancialsBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap()
        .expect("extracted financials");

    assert_eq!(f.doc_id, "S100ABCD");
    assert_eq!(f.filer_name, "トヨタ自動車株式会社");
    assert_eq!(f.filing_date, "2024-06-20");
    assert_eq!(f.fiscal_year_end, "2024-03-31");

    assert_eq!(f.current_assets, Some(1_500_000_000_000));
    assert_eq!(f.investment_securities, Some(300_000_000_000));
    assert_eq!(f.total_assets, Some(4_000_000_000_000));
    assert_eq!(f.total_liabilities, Some(2_500_000_000_000));
    assert_eq!(f.net_assets, Some(1_500_000_000_000));

    assert_eq!(f.net_sales, Some(3_500_000_000_000));
    assert_eq!(f.operating_income, Some(280_000_000_000));
    assert_eq!(f.ordinary_income, Some(300_000_000_000));
    assert_eq!(f.net_income, Some(210_000_000_000));

    assert_eq!(f.operating_cash_flow, Some(320_000_000_000));
    assert_eq!(f.investing_cash_flow, Some(-120_000_000_000));
    // Derived: operating + investing.
    assert_eq!(f.free_cash_flow, Some(200_000_000_000));
    assert_eq!(f.capital_expenditure, Some(-110_000_000_000));

    assert_eq!(f.dividend_per_share, Some(75.0));
}

#[tokio::test]
async fn partial_extraction_is_still_a_result() {
    let server = common::setup_server();
    // The counts filing carries a shareholder table but no financial
    // statement facts at all.
    common::mock_index(&server, "2024-06-20", common::fixture("documents_counts.json"));
    common::mock_archive_zip(&server, "S100CNTS", "filing_counts.zip");

    let client = common::client_for(&server);
    let f = FinancialsBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap()
        .expect("metadata-only result");

    assert_eq!(f.doc_id, "S100CNTS");
    assert_eq!(f.filer_name, "サンプル工業株式会社");
    assert!(f.net_sales.is_none());
    assert!(f.total_assets.is_none());
    assert!(f.free_cash_flow.is_none());
}

#[tokio::test]
async fn no_file_download_yields_none() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    common::mock_archive_no_file(&server, "S100ABCD");

    let client = common::client_for(&server);
    let f = FinancialsBuilder::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .fetch()
        .await
        .unwrap();

    assert!(f.is_none());
}

#[tokio::test]
async fn ticker_facade_formats_a_summary() {
    let server = common::setup_server();
    common::mock_index(&server, "2024-06-20", common::fixture("documents_72030.json"));
    common::mock_archive_zip(&server, "S100ABCD", "filing_annual.zip");

    let client = common::client_for(&server);
    let summary = Ticker::new(&client, "7203.T")
        .search_days(1)
        .pause(Duration::ZERO)
        .anchor(anchor())
        .financial_summary()
        .await
        .unwrap()
        .expect("a summary");

    assert!(summary.contains("【財務データ】トヨタ自動車株式会社"));
    assert!(summary.contains("決算期: 2024-03-31"));
    assert!(summary.contains("売上高: 3.5兆円"));
    assert!(summary.contains("総資産: 4.0兆円"));
    assert!(summary.contains("投資キャッシュフロー: -1200億円"));
    assert!(summary.contains("1株配当: 75円"));
}
