//! XBRL reporting-context classification.
//!
//! A fact only counts when its context is the consolidated, current-year,
//! non-segment figure. Context ids follow loose conventions
//! (`CurrentYearInstant`, `CurrentYearDuration_ConsolidatedMember`,
//! `Prior1YearInstant`, ...), so classification is by token, with
//! non-consolidated and dimensional-member ids excluded first.

/// Whether a fact applies at a point in time (balance sheet) or over a
/// period (income / cash-flow statement).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    /// Point-in-time fact.
    Instant,
    /// Period-of-time fact.
    Duration,
}

impl PeriodKind {
    fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::Instant => &["currentyearinstant", "currentperiodinstant"],
            Self::Duration => &["currentyearduration", "currentperiodduration"],
        }
    }
}

/// Strict classifier used for detailed financial statements.
///
/// Accepts only ids that are exactly the current-year token for the given
/// period kind (case-insensitively), after excluding parent-only
/// (`NonConsolidated`) figures and segment-dimension members.
pub fn is_current_year_context(context_ref: &str, kind: PeriodKind) -> bool {
    let id = context_ref.to_lowercase();
    if is_excluded(&id) {
        return false;
    }
    kind.tokens().iter().any(|t| id == *t)
}

/// Loose classifier used only for the summary-table fallback tier.
///
/// Summary tables reuse a handful of contexts, so a substring match on
/// the current-year token is enough; the same exclusions apply.
pub fn is_summary_current_year_context(context_ref: &str, kind: PeriodKind) -> bool {
    let id = context_ref.to_lowercase();
    if is_excluded(&id) {
        return false;
    }
    kind.tokens().iter().any(|t| id.contains(t))
}

fn is_excluded(id: &str) -> bool {
    if id.contains("nonconsolidated") {
        return true;
    }
    // Dimensional breakdowns, unless the dimension is the consolidated
    // member itself.
    id.contains("member") && !id.contains("consolidatedmember")
}
