//! XBRL / inline-XBRL parsing utilities.
//!
//! EDINET filings mix strict-XML instance documents (`.xbrl`) with
//! inline-XBRL embedded in XHTML (`_ixbrl.htm`), under either the
//! Japanese-GAAP or IFRS taxonomy. The submodules here deal with that
//! drift: a unified element view over both markup flavors ([`dom`]),
//! taxonomy-agnostic tag matching ([`tag`]), reporting-context
//! classification ([`context`]), localized numeric normalization
//! ([`num`]), and the two fact extractors built on top of them
//! ([`shareholders`], [`financials`]).

pub mod context;
pub(crate) mod dom;
pub mod financials;
pub mod num;
pub mod shareholders;
pub mod tag;
