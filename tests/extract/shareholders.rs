use edinet_rs::xbrl::shareholders::{
    extract_major_shareholders, extract_total_shares, extract_treasury_shares,
    parse_major_shareholder_table,
};

use crate::common;

#[test]
fn explicit_text_block_beats_a_plain_table() {
    // The fixture carries both an explicitly tagged shareholder table and
    // a decoy officers table; the tagged one must win.
    let html = common::fixture("shareholders_textblock.htm");
    let holders = extract_major_shareholders(&html);

    assert_eq!(holders.len(), 2);
    assert_eq!(holders[0].name, "田中一郎");
    assert_eq!(holders[0].shares, 320_000);
    assert!((holders[0].ratio_pct - 32.0).abs() < 1e-9);
    assert_eq!(holders[1].shares, 180_000);
}

#[test]
fn inline_fact_markup_is_parsed() {
    let html = common::fixture("annual_report.htm");
    let holders = extract_major_shareholders(&html);

    assert_eq!(holders.len(), 2);
    // Header says 千株; plain cell values are scaled up.
    assert_eq!(holders[0].shares, 1_200_000);
    assert_eq!(holders[1].shares, 750_000);
    // The 計 row is dropped.
    assert!(holders.iter().all(|h| h.name != "計"));
}

#[test]
fn continuation_blocks_are_scanned() {
    let html = r#"<html><body>
        <ix:nonNumeric name="jpcrp_cor:ShareholdingsTextBlock" contextRef="CurrentYearInstant" continuedAt="cont-1"></ix:nonNumeric>
        <ix:continuation id="cont-1">
        <p>大株主の状況（続き）</p>
        <table>
          <tr><td>氏名又は名称</td><td>所有株式数（千株）</td><td>割合</td></tr>
          <tr><td>合同会社続き商事</td><td>90</td><td>9.0</td></tr>
        </table>
        </ix:continuation>
    </body></html>"#;

    let holders = extract_major_shareholders(html);
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].name, "合同会社続き商事");
    assert_eq!(holders[0].shares, 90_000);
}

#[test]
fn keyword_table_scan_is_the_last_resort() {
    // No inline-XBRL markup at all, just a rendered page.
    let html = r#"<html><body>
        <h3>（６）【大株主の状況】</h3>
        <table>
          <tr><td>氏名又は名称</td><td>所有株式数（株）</td><td>持株比率</td></tr>
          <tr><td>山田花子</td><td>12,000株</td><td>12.0</td></tr>
          <tr><td>―</td><td>―</td><td>―</td></tr>
        </table>
    </body></html>"#;

    let holders = extract_major_shareholders(html);
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].name, "山田花子");
    assert_eq!(holders[0].shares, 12_000);
    assert!((holders[0].ratio_pct - 12.0).abs() < 1e-9);
}

#[test]
fn nothing_extractable_is_an_empty_list() {
    assert!(extract_major_shareholders("<html><body><p>本文なし</p></body></html>").is_empty());
    assert!(extract_major_shareholders("").is_empty());
}

#[test]
fn cell_units_override_the_header_multiplier() {
    // Header says 千株 but one cell spells its own unit; that cell must
    // not be scaled twice.
    let html = r#"<table>
        <tr><td>氏名又は名称</td><td>所有株式数（千株）</td></tr>
        <tr><td>甲野太郎</td><td>500</td></tr>
        <tr><td>乙野次郎</td><td>400,000株</td></tr>
    </table>"#;

    let holders = parse_major_shareholder_table(html);
    assert_eq!(holders.len(), 2);
    assert_eq!(holders[0].shares, 500_000);
    assert_eq!(holders[1].shares, 400_000);
}

#[test]
fn treasury_and_total_share_facts() {
    let html = common::fixture("annual_report.htm");
    assert_eq!(extract_treasury_shares(&html), 50_000);
    assert_eq!(extract_total_shares(&html), Some(3_000_000));

    // Scale attributes apply to share facts too.
    let scaled = r#"<html><body>
        <ix:nonFraction name="jppfs_cor:NumberOfTreasuryShares" contextRef="CurrentYearInstant" scale="3">50</ix:nonFraction>
    </body></html>"#;
    assert_eq!(extract_treasury_shares(scaled), 50_000);

    assert_eq!(extract_treasury_shares("<html><body></body></html>"), 0);
    assert_eq!(extract_total_shares("<html><body></body></html>"), None);
}
