use serde::Serialize;

/* ----- DISCOVERY (shared by search/, download/, float/, financials/) ----- */

/// One qualifying disclosure located on EDINET's daily index.
///
/// Immutable once discovered; `doc_type_code` is always `"120"` (annual
/// securities report) or `"130"` (corrected annual report) because all
/// other disclosure types are filtered out during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingDocument {
    /// EDINET document id (e.g., `"S100ABCD"`).
    pub doc_id: String,
    /// 5-digit EDINET security code (4-digit TSE code + trailing `0`).
    pub security_code: String,
    /// The filer's registered company name.
    pub filer_name: String,
    /// Human-readable description of the disclosure.
    pub doc_description: String,
    /// EDINET document type code (`"120"` or `"130"`).
    pub doc_type_code: String,
    /// The index date the document was found under, `YYYY-MM-DD`.
    pub filing_date: String,
}

/* ----- ARCHIVE (shared by archive.rs and the extractors) ----- */

/// One decoded member file from a filing's XBRL ZIP package.
///
/// Ephemeral: created per download and handed straight to the extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Path of the member within the archive.
    pub name: String,
    /// UTF-8 decoded file content.
    pub content: String,
}
