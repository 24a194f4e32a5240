use edinet_rs::xbrl::context::{
    PeriodKind, is_current_year_context, is_summary_current_year_context,
};

#[test]
fn strict_requires_the_exact_current_year_id() {
    assert!(is_current_year_context("CurrentYearInstant", PeriodKind::Instant));
    assert!(is_current_year_context("currentyearduration", PeriodKind::Duration));
    assert!(is_current_year_context("CurrentPeriodInstant", PeriodKind::Instant));

    // Decorated ids fail the strict classifier.
    assert!(!is_current_year_context(
        "CurrentYearInstant_ConsolidatedMember",
        PeriodKind::Instant
    ));
    // Wrong period kind.
    assert!(!is_current_year_context("CurrentYearInstant", PeriodKind::Duration));
}

#[test]
fn prior_year_never_matches() {
    assert!(!is_current_year_context("Prior1YearInstant", PeriodKind::Instant));
    assert!(!is_summary_current_year_context("Prior1YearDuration", PeriodKind::Duration));
}

#[test]
fn non_consolidated_is_always_excluded() {
    assert!(!is_current_year_context(
        "CurrentYearInstant_NonConsolidatedMember",
        PeriodKind::Instant
    ));
    assert!(!is_summary_current_year_context(
        "CurrentYearDuration_NonConsolidatedMember",
        PeriodKind::Duration
    ));
}

#[test]
fn summary_accepts_decorated_ids_by_substring() {
    assert!(is_summary_current_year_context(
        "CurrentYearDuration_ConsolidatedMember",
        PeriodKind::Duration
    ));
    assert!(is_summary_current_year_context(
        "CurrentYearInstant_jpcrp030000-asr_E02144-000",
        PeriodKind::Instant
    ));
}

#[test]
fn dimension_members_are_excluded_unless_consolidated() {
    assert!(!is_summary_current_year_context(
        "CurrentYearDuration_ReportableSegmentsMember",
        PeriodKind::Duration
    ));
    assert!(is_summary_current_year_context(
        "CurrentYearDuration_ConsolidatedMember",
        PeriodKind::Duration
    ));
}
