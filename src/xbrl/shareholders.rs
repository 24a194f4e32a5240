//! Major-shareholder table extraction.
//!
//! The "major shareholders" section has no stable home across filings:
//! some tag it with an explicit text block, some leave it only as an
//! inline non-numeric fact, some split it across `ix:continuation`
//! blocks, and some only ever render it as a plain HTML table. Four
//! methods run in a fixed order, stopping at the first that yields at
//! least one entry.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::xbrl::dom::{self, Elem, FactKind};
use crate::xbrl::num::{apply_scale_sign, parse_number, parse_ratio, unit_multiplier};
use crate::xbrl::tag::{TagPatterns, normalize_tag_name};

/// One row of the major-shareholders table.
///
/// `shares` is an absolute count (already unit-normalized); `ratio_pct`
/// is a percentage in `[0, 100]`, `0.0` when the table has no ratio
/// column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorShareholder {
    /// Holder name as printed in the filing.
    pub name: String,
    /// Absolute share count.
    pub shares: u64,
    /// Percentage of shares held, `0.0` if absent.
    pub ratio_pct: f64,
}

/* ---------------- header keyword tables ---------------- */

const NAME_HEADER: &[&str] = &["氏名", "名称", "株主名", "株主の氏名"];
const SHARE_HEADER: &[&str] = &["所有株式数", "持株数", "株式数"];
const RATIO_HEADER: &[&str] = &["割合", "比率", "持株比率", "議決権"];

const TREASURY_TAGS: TagPatterns = TagPatterns(&[
    "numberoftreasuryshares",
    "numberoftreasurystock",
    "treasurysharesnumberofshares",
]);
const TOTAL_SHARES_TAGS: TagPatterns = TagPatterns(&[
    "totalnumberofissuedshares",
    "totalnumberofsharesissued",
]);

/// Extract the major-shareholders table from one archive member's text.
///
/// The markup flavor is guessed from the prolog and retried with the
/// opposite parser when the first yields nothing (inline-XBRL XHTML also
/// starts with an XML declaration, and strict instances can be slightly
/// malformed). Within a flavor the four fallback methods run in order.
pub fn extract_major_shareholders(xbrl_text: &str) -> Vec<MajorShareholder> {
    for mode in dom::mode_order(xbrl_text) {
        let Some(elems) = dom::parse_elements(xbrl_text, mode) else {
            continue;
        };
        let rows = first_method_hit(xbrl_text, &elems);
        if !rows.is_empty() {
            return rows;
        }
    }
    Vec::new()
}

type Method = fn(&str, &[Elem]) -> Vec<MajorShareholder>;

/// The ordered fallback chain; first method yielding ≥1 entry wins.
const METHODS: &[Method] = &[
    from_text_block_tag,
    from_inline_fact,
    from_continuation_blocks,
    from_table_scan,
];

fn first_method_hit(text: &str, elems: &[Elem]) -> Vec<MajorShareholder> {
    METHODS
        .iter()
        .map(|method| method(text, elems))
        .find(|rows| !rows.is_empty())
        .unwrap_or_default()
}

/// Method 1: explicit `MajorShareholdersTextBlock` element.
fn from_text_block_tag(_text: &str, elems: &[Elem]) -> Vec<MajorShareholder> {
    elems
        .iter()
        .filter(|e| normalize_tag_name(&e.local).contains("majorshareholderstextblock"))
        .map(|e| parse_major_shareholder_table(&e.inner))
        .find(|rows| !rows.is_empty())
        .unwrap_or_default()
}

/// Method 2: inline-XBRL non-numeric fact tagged with a
/// `MajorShareholder*` concept.
fn from_inline_fact(_text: &str, elems: &[Elem]) -> Vec<MajorShareholder> {
    elems
        .iter()
        .filter(|e| e.kind() == FactKind::NonNumeric)
        .filter(|e| {
            e.name_attr
                .as_deref()
                .is_some_and(|n| normalize_tag_name(n).contains("majorshareholder"))
        })
        .map(|e| parse_major_shareholder_table(&e.inner))
        .find(|rows| !rows.is_empty())
        .unwrap_or_default()
}

/// Method 3: `ix:continuation` blocks. EDINET splits long text blocks
/// across continuations, so the table may live outside the fact that
/// references it.
fn from_continuation_blocks(_text: &str, elems: &[Elem]) -> Vec<MajorShareholder> {
    elems
        .iter()
        .filter(|e| e.kind() == FactKind::Continuation)
        .filter(|e| {
            e.inner.contains("株式") && (e.inner.contains("名称") || e.inner.contains("氏名"))
        })
        .map(|e| parse_major_shareholder_table(&e.inner))
        .find(|rows| !rows.is_empty())
        .unwrap_or_default()
}

/// Method 4: keyword-driven scan over every `<table>` in the document.
fn from_table_scan(text: &str, _elems: &[Elem]) -> Vec<MajorShareholder> {
    let doc = Html::parse_document(text);
    let table_sel = table_selector();

    if text.contains("大株主") {
        for table in doc.select(&table_sel) {
            let table_text: String = table.text().collect();
            let has_shares = SHARE_HEADER.iter().chain(RATIO_HEADER).any(|k| table_text.contains(k));
            let has_name = NAME_HEADER.iter().any(|k| table_text.contains(k));
            if has_shares && has_name {
                let rows = parse_table(table);
                if !rows.is_empty() {
                    return rows;
                }
            }
        }
    }

    // Narrower signature for filings that omit the 大株主 heading.
    for table in doc.select(&table_sel) {
        let table_text: String = table.text().collect();
        if table_text.contains("所有株式数")
            && (table_text.contains("名称") || table_text.contains("氏名"))
        {
            let rows = parse_table(table);
            if !rows.is_empty() {
                return rows;
            }
        }
    }
    Vec::new()
}

/* ---------------- table parsing ---------------- */

/// Parse embedded HTML holding the shareholders table. The first table
/// yielding ≥1 valid row wins; later tables are never consulted.
pub fn parse_major_shareholder_table(html: &str) -> Vec<MajorShareholder> {
    let doc = Html::parse_fragment(html);
    doc.select(&table_selector())
        .map(parse_table)
        .find(|rows| !rows.is_empty())
        .unwrap_or_default()
}

fn parse_table(table: ElementRef<'_>) -> Vec<MajorShareholder> {
    let tr_sel = Selector::parse("tr").expect("tr selector");
    let cell_sel = Selector::parse("th, td").expect("cell selector");

    let rows: Vec<Vec<String>> = table
        .select(&tr_sel)
        .map(|tr| tr.select(&cell_sel).map(|c| cell_text(c)).collect())
        .collect();

    // The first 1-3 rows are header candidates; headers may span two
    // rows (name on one, unit note on the next).
    let mut name_col = None;
    let mut shares_col = None;
    let mut ratio_col = None;
    let mut header_mult = None;
    let mut header_end = 0;

    for (i, row) in rows.iter().take(3).enumerate() {
        let mut matched = false;
        for (j, cell) in row.iter().enumerate() {
            if name_col.is_none() && NAME_HEADER.iter().any(|k| cell.contains(k)) {
                name_col = Some(j);
                matched = true;
            }
            if shares_col.is_none() && SHARE_HEADER.iter().any(|k| cell.contains(k)) {
                shares_col = Some(j);
                matched = true;
            }
            if ratio_col.is_none() && RATIO_HEADER.iter().any(|k| cell.contains(k)) {
                ratio_col = Some(j);
                matched = true;
            }
            if header_mult.is_none() {
                header_mult = unit_multiplier(cell);
            }
        }
        if matched {
            header_end = i + 1;
        }
    }

    let (Some(name_col), Some(shares_col)) = (name_col, shares_col) else {
        return Vec::new();
    };
    let header_mult = header_mult.unwrap_or(1);

    let mut out = Vec::new();
    for row in rows.iter().skip(header_end) {
        let Some(name) = row.get(name_col).map(|s| s.trim()) else {
            continue;
        };
        if name.is_empty() || is_total_or_placeholder(name) {
            continue;
        }
        let Some(share_text) = row.get(shares_col) else {
            continue;
        };
        let Some(raw) = parse_number(share_text) else {
            continue;
        };
        // A unit stated in the cell itself beats the header multiplier;
        // `parse_number` already applied it, so don't scale twice.
        let cell_has_unit = share_text.contains('株');
        let shares = if cell_has_unit { raw } else { raw.saturating_mul(header_mult) };
        if shares <= 0 {
            continue;
        }
        let ratio_pct = ratio_col
            .and_then(|c| row.get(c))
            .map(|t| parse_ratio(t))
            .unwrap_or(0.0);
        out.push(MajorShareholder {
            name: name.to_string(),
            shares: shares as u64,
            ratio_pct,
        });
    }
    out
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let joined: String = cell.text().collect();
    joined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\u{3000}', "")
}

fn is_total_or_placeholder(name: &str) -> bool {
    const DASHES: &[char] = &['―', '－', '‐', '—', '–', '−', '・', 'ー'];
    name == "計"
        || name.contains("合計")
        || name.chars().all(|c| DASHES.contains(&c))
}

/* ---------------- treasury / total shares ---------------- */

/// Treasury share count, `0` when no matching fact is found.
///
/// No context filtering: treasury and issued-share counts are always
/// instant, whole-company figures.
pub fn extract_treasury_shares(xbrl_text: &str) -> u64 {
    scan_share_fact(xbrl_text, TREASURY_TAGS, |v| v >= 0).map_or(0, |v| v as u64)
}

/// Total issued shares, `None` when no matching fact is found.
pub fn extract_total_shares(xbrl_text: &str) -> Option<u64> {
    scan_share_fact(xbrl_text, TOTAL_SHARES_TAGS, |v| v > 0).map(|v| v as u64)
}

fn scan_share_fact(
    text: &str,
    patterns: TagPatterns,
    accept: fn(i64) -> bool,
) -> Option<i64> {
    for mode in dom::mode_order(text) {
        let Some(elems) = dom::parse_elements(text, mode) else {
            continue;
        };
        for e in &elems {
            let tag_hit = patterns.matches_contains(&e.local)
                || e.name_attr
                    .as_deref()
                    .is_some_and(|n| patterns.matches_contains(n));
            if !tag_hit {
                continue;
            }
            let Some(base) = parse_number(&e.text) else {
                continue;
            };
            let value = apply_scale_sign(base, e.scale.as_deref(), e.sign.as_deref());
            if accept(value) {
                return Some(value);
            }
        }
    }
    None
}

fn table_selector() -> Selector {
    Selector::parse("table").expect("table selector")
}
