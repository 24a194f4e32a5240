use edinet_rs::ArchiveMember;
use edinet_rs::financials::format_financial_summary;
use edinet_rs::xbrl::financials::{extract_fiscal_year_end, extract_financial_statements};

use crate::common;

fn member(name: &str, content: impl Into<String>) -> ArchiveMember {
    ArchiveMember {
        name: name.to_string(),
        content: content.into(),
    }
}

#[test]
fn strict_instance_resolves_every_tier_one_field() {
    let files = vec![member("instance.xbrl", common::fixture("annual_instance.xbrl"))];
    let f = extract_financial_statements(&files);

    assert_eq!(f.total_assets, Some(4_000_000_000_000));
    assert_eq!(f.net_sales, Some(3_500_000_000_000));
    assert_eq!(f.net_income, Some(210_000_000_000));
    assert_eq!(f.free_cash_flow, Some(200_000_000_000));
    assert_eq!(f.dividend_per_share, Some(75.0));
    assert_eq!(f.fiscal_year_end, "2024-03-31");
}

#[test]
fn prior_year_and_non_consolidated_facts_are_ignored() {
    // The fixture carries Prior1Year and NonConsolidatedMember variants
    // of Assets and NetSales with different values.
    let files = vec![member("instance.xbrl", common::fixture("annual_instance.xbrl"))];
    let f = extract_financial_statements(&files);

    assert_ne!(f.total_assets, Some(3_800_000_000_000));
    assert_ne!(f.total_assets, Some(2_100_000_000_000));
    assert_ne!(f.net_sales, Some(3_300_000_000_000));
}

#[test]
fn summary_tier_fills_what_detailed_statements_missed() {
    let detailed = r#"<?xml version="1.0" encoding="UTF-8"?>
<xbrli:xbrl xmlns:xbrli="http://www.xbrl.org/2003/instance"
            xmlns:jppfs_cor="http://example.com/jppfs_cor"
            xmlns:jpcrp_cor="http://example.com/jpcrp_cor">
  <jppfs_cor:NetSales contextRef="CurrentYearDuration">1000</jppfs_cor:NetSales>
  <jpcrp_cor:OperatingIncomeLossSummaryOfBusinessResults contextRef="CurrentYearDuration_ConsolidatedMember">200</jpcrp_cor:OperatingIncomeLossSummaryOfBusinessResults>
  <jpcrp_cor:NetSalesSummaryOfBusinessResults contextRef="CurrentYearDuration_ConsolidatedMember">9999</jpcrp_cor:NetSalesSummaryOfBusinessResults>
</xbrli:xbrl>"#;

    let f = extract_financial_statements(&[member("instance.xbrl", detailed)]);

    // The detailed fact wins over the summary-table variant of the same
    // field; the summary tier only fills the gap.
    assert_eq!(f.net_sales, Some(1_000));
    assert_eq!(f.operating_income, Some(200));
}

#[test]
fn fields_already_set_survive_later_files() {
    let first = r#"<?xml version="1.0"?>
<xbrl xmlns:jppfs_cor="http://example.com/jppfs_cor">
  <jppfs_cor:NetSales contextRef="CurrentYearDuration">1111</jppfs_cor:NetSales>
</xbrl>"#;
    let second = r#"<?xml version="1.0"?>
<xbrl xmlns:jppfs_cor="http://example.com/jppfs_cor">
  <jppfs_cor:NetSales contextRef="CurrentYearDuration">2222</jppfs_cor:NetSales>
  <jppfs_cor:OrdinaryIncome contextRef="CurrentYearDuration">50</jppfs_cor:OrdinaryIncome>
</xbrl>"#;

    let f = extract_financial_statements(&[
        member("a.xbrl", first),
        member("b.xbrl", second),
    ]);

    assert_eq!(f.net_sales, Some(1_111));
    assert_eq!(f.ordinary_income, Some(50));
}

#[test]
fn inline_facts_use_scale_and_sign_attributes() {
    let html = r#"<html><body>
        <ix:nonFraction name="jppfs_cor:NetSales" contextRef="CurrentYearDuration" scale="6" sign="-">5,283</ix:nonFraction>
    </body></html>"#;

    let f = extract_financial_statements(&[member("honbun.htm", html)]);
    assert_eq!(f.net_sales, Some(-5_283_000_000));
}

#[test]
fn fiscal_year_end_comes_from_the_instant_context() {
    assert_eq!(
        extract_fiscal_year_end(&common::fixture("annual_instance.xbrl")),
        "2024-03-31"
    );
    assert_eq!(extract_fiscal_year_end("<html><body></body></html>"), "");
}

#[test]
fn empty_results_format_as_not_available() {
    let f = extract_financial_statements(&[]);
    let summary = format_financial_summary(&f);

    assert!(summary.contains("売上高: N/A"));
    assert!(summary.contains("決算期: N/A"));
    assert!(summary.contains("1株配当: N/A"));
}
