//! Human-readable financial summary, intended for LLM prompting.

use super::FinancialStatements;

/// Render extracted financials as a Japanese text block.
///
/// Amounts of 10,000億円 and above render as 兆円 with one decimal;
/// smaller amounts as 億円 rounded to the nearest integer. Unresolved
/// fields render as `N/A`; a mostly-empty result still formats cleanly.
pub fn format_financial_summary(f: &FinancialStatements) -> String {
    let mut out = String::new();
    out.push_str(&format!("【財務データ】{}\n", f.filer_name));
    out.push_str(&format!(
        "提出日: {} / 決算期: {}\n",
        or_na(&f.filing_date),
        or_na(&f.fiscal_year_end)
    ));
    for (label, value) in [
        ("売上高", f.net_sales),
        ("営業利益", f.operating_income),
        ("経常利益", f.ordinary_income),
        ("当期純利益", f.net_income),
        ("総資産", f.total_assets),
        ("流動資産", f.current_assets),
        ("投資有価証券", f.investment_securities),
        ("負債合計", f.total_liabilities),
        ("純資産", f.net_assets),
        ("営業キャッシュフロー", f.operating_cash_flow),
        ("投資キャッシュフロー", f.investing_cash_flow),
        ("フリーキャッシュフロー", f.free_cash_flow),
        ("設備投資", f.capital_expenditure),
    ] {
        out.push_str(&format!("{label}: {}\n", format_yen(value)));
    }
    let dividend = f
        .dividend_per_share
        .map_or_else(|| "N/A".to_string(), |d| format!("{d}円"));
    out.push_str(&format!("1株配当: {dividend}\n"));
    out
}

/// Format a yen amount in 億円/兆円 units, `N/A` when unresolved.
fn format_yen(value: Option<i64>) -> String {
    let Some(yen) = value else {
        return "N/A".to_string();
    };
    let oku = yen as f64 / 1e8;
    if oku.abs() >= 10_000.0 {
        format!("{:.1}兆円", yen as f64 / 1e12)
    } else {
        format!("{}億円", oku.round() as i64)
    }
}

fn or_na(s: &str) -> &str {
    if s.is_empty() { "N/A" } else { s }
}
