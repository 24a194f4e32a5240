use serde::Serialize;

use crate::xbrl::shareholders::MajorShareholder;

/// Estimated floating-share ratio for one filing.
///
/// Derived and recomputed on demand; the estimator never mutates
/// extracted data in place. `floating_ratio` is always in `[0, 1]` and
/// `fixed_shares <= total_shares` holds whenever `total_shares` is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatingRatio {
    /// Fraction of outstanding shares not held by major/fixed holders.
    pub floating_ratio: f64,
    /// The extracted major-shareholder rows the estimate is based on.
    pub major_shareholders: Vec<MajorShareholder>,
    /// Sum of the major shareholders' share counts.
    pub major_shareholder_shares: u64,
    /// Treasury shares reported in the filing, `0` when absent.
    pub treasury_shares: u64,
    /// Shares considered fixed (major holders + treasury, deduplicated
    /// and clamped to `total_shares`).
    pub fixed_shares: u64,
    /// Total issued shares, when the filing (or a caller hint) had them.
    pub total_shares: Option<u64>,
    /// EDINET document id the estimate came from.
    pub doc_id: String,
    /// The filer's registered company name.
    pub filer_name: String,
    /// Index date of the filing, `YYYY-MM-DD`.
    pub filing_date: String,
}
