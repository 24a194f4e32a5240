//! Centralized constants for default endpoints and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/122.0.0.0 Safari/537.36"
);

/// EDINET daily document index (`documents.json?date=YYYY-MM-DD&type=2`).
pub(crate) const DEFAULT_BASE_DOCUMENTS: &str =
    "https://api.edinet-fsa.go.jp/api/v2/documents.json";

/// EDINET document fetch base (docId is appended; `type=1` = XBRL package).
pub(crate) const DEFAULT_BASE_ARCHIVE: &str = "https://api.edinet-fsa.go.jp/api/v2/documents/";
