//! Financial-statement line-item extraction.
//!
//! Roughly 15 line items are resolved across three tiers: direct tags in
//! the detailed statements, `*SummaryOfBusinessResults` KPI tables, and
//! one derived field (free cash flow). Each tier only runs for fields
//! still unresolved, and within a file the first matching fact wins.

use serde::Serialize;

use crate::core::models::ArchiveMember;
use crate::xbrl::context::{PeriodKind, is_current_year_context, is_summary_current_year_context};
use crate::xbrl::dom::{self, Elem, FactKind};
use crate::xbrl::num::{apply_scale_sign, parse_decimal, parse_number};
use crate::xbrl::tag::TagPatterns;

/// Extracted financial-statement line items for one filing.
///
/// Every numeric field is independently nullable: partial extraction is
/// an expected, valid outcome, not an error state. Yen amounts are `i64`;
/// `dividend_per_share` is yen with decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialStatements {
    /// EDINET document id the data came from.
    pub doc_id: String,
    /// The filer's registered company name.
    pub filer_name: String,
    /// Index date of the filing, `YYYY-MM-DD`.
    pub filing_date: String,
    /// Fiscal year end date, `YYYY-MM-DD`; empty when unknown.
    pub fiscal_year_end: String,

    // Balance sheet
    pub current_assets: Option<i64>,
    pub investment_securities: Option<i64>,
    pub total_assets: Option<i64>,
    pub total_liabilities: Option<i64>,
    pub net_assets: Option<i64>,

    // Income statement
    pub net_sales: Option<i64>,
    pub operating_income: Option<i64>,
    pub ordinary_income: Option<i64>,
    pub net_income: Option<i64>,

    // Cash flow
    pub operating_cash_flow: Option<i64>,
    pub investing_cash_flow: Option<i64>,
    /// Operating + investing cash flow; derived, never extracted.
    pub free_cash_flow: Option<i64>,
    pub capital_expenditure: Option<i64>,

    // Per share
    pub dividend_per_share: Option<f64>,
}

/* ---------------- field table ---------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    CurrentAssets,
    InvestmentSecurities,
    TotalAssets,
    TotalLiabilities,
    NetAssets,
    NetSales,
    OperatingIncome,
    OrdinaryIncome,
    NetIncome,
    OperatingCashFlow,
    InvestingCashFlow,
    CapitalExpenditure,
    DividendPerShare,
}

struct FieldSpec {
    slot: Slot,
    period: PeriodKind,
    detailed: TagPatterns,
    summary: TagPatterns,
}

const NO_SUMMARY: TagPatterns = TagPatterns(&[]);

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        slot: Slot::CurrentAssets,
        period: PeriodKind::Instant,
        detailed: TagPatterns(&["currentassets"]),
        summary: NO_SUMMARY,
    },
    FieldSpec {
        slot: Slot::InvestmentSecurities,
        period: PeriodKind::Instant,
        detailed: TagPatterns(&["investmentsecurities"]),
        summary: NO_SUMMARY,
    },
    FieldSpec {
        slot: Slot::TotalAssets,
        period: PeriodKind::Instant,
        detailed: TagPatterns(&["totalassets", "assets"]),
        summary: TagPatterns(&["totalassetssummaryofbusinessresults"]),
    },
    FieldSpec {
        slot: Slot::TotalLiabilities,
        period: PeriodKind::Instant,
        detailed: TagPatterns(&["liabilities", "totalliabilities"]),
        summary: NO_SUMMARY,
    },
    FieldSpec {
        slot: Slot::NetAssets,
        period: PeriodKind::Instant,
        detailed: TagPatterns(&["netassets", "equity", "totalequity"]),
        summary: TagPatterns(&["netassetssummaryofbusinessresults"]),
    },
    FieldSpec {
        slot: Slot::NetSales,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&["netsales", "revenue", "revenues", "operatingrevenues"]),
        summary: TagPatterns(&[
            "netsalessummaryofbusinessresults",
            "revenuessummaryofbusinessresults",
        ]),
    },
    FieldSpec {
        slot: Slot::OperatingIncome,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&["operatingincome", "operatingprofitloss", "operatingprofit"]),
        summary: TagPatterns(&["operatingincomelosssummaryofbusinessresults"]),
    },
    FieldSpec {
        slot: Slot::OrdinaryIncome,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&["ordinaryincome", "ordinaryincomeloss", "ordinaryprofitloss"]),
        summary: TagPatterns(&["ordinaryincomelosssummaryofbusinessresults"]),
    },
    FieldSpec {
        slot: Slot::NetIncome,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&[
            "profitlossattributabletoownersofparent",
            "netincome",
            "profitloss",
        ]),
        summary: TagPatterns(&[
            "profitlossattributabletoownersofparentsummaryofbusinessresults",
            "netincomelosssummaryofbusinessresults",
        ]),
    },
    FieldSpec {
        slot: Slot::OperatingCashFlow,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&[
            "netcashprovidedbyusedinoperatingactivities",
            "cashflowsfromusedinoperatingactivities",
        ]),
        summary: TagPatterns(&[
            "netcashprovidedbyusedinoperatingactivitiessummaryofbusinessresults",
        ]),
    },
    FieldSpec {
        slot: Slot::InvestingCashFlow,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&[
            "netcashprovidedbyusedininvestingactivities",
            "cashflowsfromusedininvestingactivities",
        ]),
        summary: TagPatterns(&[
            "netcashprovidedbyusedininvestingactivitiessummaryofbusinessresults",
        ]),
    },
    FieldSpec {
        slot: Slot::CapitalExpenditure,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&[
            "purchaseofpropertyplantandequipment",
            "paymentsforpropertyplantandequipment",
            "purchaseofpropertyplantandequipmentinvcf",
        ]),
        summary: NO_SUMMARY,
    },
    FieldSpec {
        slot: Slot::DividendPerShare,
        period: PeriodKind::Duration,
        detailed: TagPatterns(&["dividendpaidpershare", "dividendpaidpershareofcommonstock"]),
        summary: TagPatterns(&["dividendpaidpersharesummaryofbusinessresults"]),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Detailed,
    Summary,
}

/* ---------------- public API ---------------- */

/// Resolve financial-statement line items over a filing's archive
/// members. Metadata fields (`doc_id` etc.) are left for the caller.
pub fn extract_financial_statements(files: &[ArchiveMember]) -> FinancialStatements {
    let mut out = FinancialStatements::default();

    for tier in [Tier::Detailed, Tier::Summary] {
        for file in files {
            if is_complete(&out) {
                break;
            }
            let partial = extract_file(&file.content, tier);
            out = merge(out, partial);
            if out.fiscal_year_end.is_empty() {
                out.fiscal_year_end = extract_fiscal_year_end(&file.content);
            }
        }
    }

    // Derived, never independently extracted.
    if out.free_cash_flow.is_none()
        && let (Some(op), Some(inv)) = (out.operating_cash_flow, out.investing_cash_flow)
    {
        out.free_cash_flow = Some(op + inv);
    }

    out
}

/// The instant date of the `CurrentYearInstant` context, or `""`.
pub fn extract_fiscal_year_end(content: &str) -> String {
    for mode in dom::mode_order(content) {
        for (id, instant) in dom::contexts(content, mode) {
            if id.eq_ignore_ascii_case("currentyearinstant")
                && let Some(date) = instant
            {
                return date;
            }
        }
    }
    String::new()
}

/* ---------------- per-file extraction ---------------- */

fn extract_file(content: &str, tier: Tier) -> FinancialStatements {
    let mut partial = FinancialStatements::default();
    for mode in dom::mode_order(content) {
        let Some(elems) = dom::parse_elements(content, mode) else {
            continue;
        };
        apply_elements(&elems, tier, &mut partial);
        break;
    }
    partial
}

fn apply_elements(elems: &[Elem], tier: Tier, partial: &mut FinancialStatements) {
    // Direct tag names first (XML-mode facts), then inline-XBRL
    // nonFraction name attributes, per-field first-match-wins.
    for e in elems {
        try_element(e, &e.local, tier, partial);
    }
    for e in elems.iter().filter(|e| e.kind() == FactKind::Numeric) {
        if let Some(name) = e.name_attr.as_deref() {
            try_element(e, name, tier, partial);
        }
    }
}

fn try_element(e: &Elem, raw_name: &str, tier: Tier, partial: &mut FinancialStatements) {
    let Some(ctx) = e.context_ref.as_deref() else {
        return;
    };
    for spec in FIELDS {
        if is_set(partial, spec.slot) {
            continue;
        }
        let (patterns, ctx_ok) = match tier {
            Tier::Detailed => (
                spec.detailed,
                is_current_year_context(ctx, spec.period),
            ),
            Tier::Summary => (
                spec.summary,
                is_summary_current_year_context(ctx, spec.period),
            ),
        };
        if !ctx_ok || !patterns.matches_exact(raw_name) {
            continue;
        }
        set_from_elem(partial, spec.slot, e);
    }
}

fn set_from_elem(partial: &mut FinancialStatements, slot: Slot, e: &Elem) {
    if slot == Slot::DividendPerShare {
        if let Some(v) = parse_decimal(&e.text) {
            let v = if e.sign.as_deref() == Some("-") && v > 0.0 { -v } else { v };
            partial.dividend_per_share = Some(v);
        }
        return;
    }
    let Some(base) = parse_number(&e.text) else {
        return;
    };
    let value = apply_scale_sign(base, e.scale.as_deref(), e.sign.as_deref());
    let field = match slot {
        Slot::CurrentAssets => &mut partial.current_assets,
        Slot::InvestmentSecurities => &mut partial.investment_securities,
        Slot::TotalAssets => &mut partial.total_assets,
        Slot::TotalLiabilities => &mut partial.total_liabilities,
        Slot::NetAssets => &mut partial.net_assets,
        Slot::NetSales => &mut partial.net_sales,
        Slot::OperatingIncome => &mut partial.operating_income,
        Slot::OrdinaryIncome => &mut partial.ordinary_income,
        Slot::NetIncome => &mut partial.net_income,
        Slot::OperatingCashFlow => &mut partial.operating_cash_flow,
        Slot::InvestingCashFlow => &mut partial.investing_cash_flow,
        Slot::CapitalExpenditure => &mut partial.capital_expenditure,
        Slot::DividendPerShare => unreachable!(),
    };
    *field = Some(value);
}

fn is_set(partial: &FinancialStatements, slot: Slot) -> bool {
    match slot {
        Slot::CurrentAssets => partial.current_assets.is_some(),
        Slot::InvestmentSecurities => partial.investment_securities.is_some(),
        Slot::TotalAssets => partial.total_assets.is_some(),
        Slot::TotalLiabilities => partial.total_liabilities.is_some(),
        Slot::NetAssets => partial.net_assets.is_some(),
        Slot::NetSales => partial.net_sales.is_some(),
        Slot::OperatingIncome => partial.operating_income.is_some(),
        Slot::OrdinaryIncome => partial.ordinary_income.is_some(),
        Slot::NetIncome => partial.net_income.is_some(),
        Slot::OperatingCashFlow => partial.operating_cash_flow.is_some(),
        Slot::InvestingCashFlow => partial.investing_cash_flow.is_some(),
        Slot::CapitalExpenditure => partial.capital_expenditure.is_some(),
        Slot::DividendPerShare => partial.dividend_per_share.is_some(),
    }
}

/* ---------------- merge combinators ---------------- */

/// Merge two partials, preferring fields already set in `a`.
fn merge(a: FinancialStatements, b: FinancialStatements) -> FinancialStatements {
    FinancialStatements {
        doc_id: a.doc_id,
        filer_name: a.filer_name,
        filing_date: a.filing_date,
        fiscal_year_end: if a.fiscal_year_end.is_empty() {
            b.fiscal_year_end
        } else {
            a.fiscal_year_end
        },
        current_assets: a.current_assets.or(b.current_assets),
        investment_securities: a.investment_securities.or(b.investment_securities),
        total_assets: a.total_assets.or(b.total_assets),
        total_liabilities: a.total_liabilities.or(b.total_liabilities),
        net_assets: a.net_assets.or(b.net_assets),
        net_sales: a.net_sales.or(b.net_sales),
        operating_income: a.operating_income.or(b.operating_income),
        ordinary_income: a.ordinary_income.or(b.ordinary_income),
        net_income: a.net_income.or(b.net_income),
        operating_cash_flow: a.operating_cash_flow.or(b.operating_cash_flow),
        investing_cash_flow: a.investing_cash_flow.or(b.investing_cash_flow),
        free_cash_flow: a.free_cash_flow.or(b.free_cash_flow),
        capital_expenditure: a.capital_expenditure.or(b.capital_expenditure),
        dividend_per_share: a.dividend_per_share.or(b.dividend_per_share),
    }
}

/// Whether every extractable field is resolved (free cash flow is
/// derived and does not count).
fn is_complete(f: &FinancialStatements) -> bool {
    FIELDS.iter().all(|spec| is_set(f, spec.slot))
}
