//! Document discovery against EDINET's daily disclosure index.
//!
//! EDINET has no "latest filing for security X" endpoint; the index is
//! keyed by date. Discovery therefore scans a trailing window of
//! business days, newest first, in small concurrent chunks, and stops at
//! the first qualifying annual (or corrected annual) report, so the
//! most recent filing always wins.

mod api;
mod wire;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use futures::future::join_all;

use crate::core::models::FilingDocument;
use crate::core::{EdinetClient, EdinetError};
use wire::RawDocument;

/// EDINET document type code for an annual securities report.
pub const DOC_TYPE_ANNUAL: &str = "120";
/// EDINET document type code for a corrected annual report.
pub const DOC_TYPE_CORRECTED_ANNUAL: &str = "130";

/// Dates scanned concurrently per chunk.
const DATE_CHUNK: usize = 5;
/// Business days scanned when the caller doesn't override.
const DEFAULT_SEARCH_DAYS: usize = 90;
/// Blanket pause between chunks, to stay under EDINET's undocumented
/// rate limits.
const DEFAULT_CHUNK_PAUSE: Duration = Duration::from_millis(700);

/// Progress callback for batch discovery:
/// `(days_scanned, total_days, symbols_found)`.
pub type Progress = Box<dyn Fn(usize, usize, usize) + Send + Sync>;

/// Convert a `"NNNN.T"` ticker to EDINET's 5-digit security code.
///
/// ```
/// assert_eq!(edinet_rs::search::security_code_from_symbol("7203.T").unwrap(), "72030");
/// ```
///
/// # Errors
///
/// Returns [`EdinetError::InvalidSymbol`] unless the part before the
/// market suffix is exactly four ASCII digits.
pub fn security_code_from_symbol(symbol: &str) -> Result<String, EdinetError> {
    let code = symbol.split('.').next().unwrap_or_default();
    if code.len() == 4 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(format!("{code}0"))
    } else {
        Err(EdinetError::InvalidSymbol(symbol.to_string()))
    }
}

/// Descending list of up to `days` business days ending at `anchor`
/// (weekends skipped; EDINET publishes no index on them).
fn business_day_window(anchor: NaiveDate, days: usize) -> Vec<NaiveDate> {
    let mut window = Vec::with_capacity(days);
    let mut date = anchor;
    while window.len() < days {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            window.push(date);
        }
        date = date.pred_opt().expect("date underflow");
    }
    window
}

fn qualifying_document(
    raw: RawDocument,
    security_code: &str,
    date: NaiveDate,
) -> Option<FilingDocument> {
    if raw.sec_code.as_deref() != Some(security_code) {
        return None;
    }
    let doc_type_code = raw.doc_type_code?;
    if doc_type_code != DOC_TYPE_ANNUAL && doc_type_code != DOC_TYPE_CORRECTED_ANNUAL {
        return None;
    }
    Some(FilingDocument {
        doc_id: raw.doc_id?,
        security_code: security_code.to_string(),
        filer_name: raw.filer_name.unwrap_or_default(),
        doc_description: raw.doc_description.unwrap_or_default(),
        doc_type_code,
        filing_date: date.format("%Y-%m-%d").to_string(),
    })
}

/* ---------------- single-symbol search ---------------- */

/// A builder for locating the latest qualifying filing for one symbol.
pub struct SearchBuilder {
    client: EdinetClient,
    symbol: String,
    search_days: usize,
    chunk_pause: Duration,
    anchor: Option<NaiveDate>,
}

impl SearchBuilder {
    /// Creates a new `SearchBuilder` for a given symbol.
    pub fn new(client: &EdinetClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            search_days: DEFAULT_SEARCH_DAYS,
            chunk_pause: DEFAULT_CHUNK_PAUSE,
            anchor: None,
        }
    }

    /// Number of business days to scan backwards. Default: 90.
    #[must_use]
    pub const fn search_days(mut self, days: usize) -> Self {
        self.search_days = days;
        self
    }

    /// Pause inserted after every concurrent chunk of index calls.
    #[must_use]
    pub const fn chunk_pause(mut self, pause: Duration) -> Self {
        self.chunk_pause = pause;
        self
    }

    /// Anchor the scan window at a fixed date instead of today.
    /// Useful for backfills and deterministic tests.
    #[must_use]
    pub const fn anchor(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    /// Scan the window, newest dates first, and return the most recent
    /// qualifying filing.
    ///
    /// A match short-circuits all remaining (older) dates. Per-date API
    /// failures are treated as empty index days, never as errors.
    ///
    /// # Errors
    ///
    /// Only configuration problems surface as errors
    /// ([`EdinetError::InvalidSymbol`]); "nothing found" is `Ok(None)`.
    pub async fn fetch(&self) -> Result<Option<FilingDocument>, EdinetError> {
        let code = security_code_from_symbol(&self.symbol)?;
        let anchor = self.anchor.unwrap_or_else(|| Utc::now().date_naive());
        let window = business_day_window(anchor, self.search_days);

        let mut chunks = window.chunks(DATE_CHUNK).peekable();
        while let Some(chunk) = chunks.next() {
            let per_date =
                join_all(chunk.iter().map(|d| api::documents_for_date(&self.client, *d))).await;

            for (date, docs) in chunk.iter().zip(per_date) {
                for raw in docs {
                    if let Some(doc) = qualifying_document(raw, &code, *date) {
                        return Ok(Some(doc));
                    }
                }
            }

            // No pause after the final chunk.
            if chunks.peek().is_some() {
                tokio::time::sleep(self.chunk_pause).await;
            }
        }
        Ok(None)
    }
}

/* ---------------- batch search ---------------- */

/// A builder for locating filings for many symbols over one shared date
/// window.
pub struct BatchSearchBuilder {
    client: EdinetClient,
    symbols: Vec<String>,
    search_days: usize,
    chunk_pause: Duration,
    anchor: Option<NaiveDate>,
    progress: Option<Progress>,
}

impl BatchSearchBuilder {
    /// Creates a new `BatchSearchBuilder` over the given symbols.
    pub fn new<I, S>(client: &EdinetClient, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            search_days: DEFAULT_SEARCH_DAYS,
            chunk_pause: DEFAULT_CHUNK_PAUSE,
            anchor: None,
            progress: None,
        }
    }

    /// Number of business days to scan backwards. Default: 90.
    #[must_use]
    pub const fn search_days(mut self, days: usize) -> Self {
        self.search_days = days;
        self
    }

    /// Pause inserted after every concurrent chunk of index calls.
    #[must_use]
    pub const fn chunk_pause(mut self, pause: Duration) -> Self {
        self.chunk_pause = pause;
        self
    }

    /// Anchor the scan window at a fixed date instead of today.
    #[must_use]
    pub const fn anchor(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    /// Report progress after every chunk as
    /// `(days_scanned, total_days, symbols_found)`.
    #[must_use]
    pub fn progress(mut self, callback: Progress) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Scan until the window is exhausted or every symbol has a match.
    ///
    /// A symbol's match is fixed at first-found (= most recent date) and
    /// never overwritten by an older date's data.
    ///
    /// # Errors
    ///
    /// Returns [`EdinetError::InvalidSymbol`] eagerly if any symbol is
    /// malformed, before any network call.
    pub async fn fetch(&self) -> Result<HashMap<String, FilingDocument>, EdinetError> {
        let mut pending: HashMap<String, String> = HashMap::new();
        for symbol in &self.symbols {
            pending.insert(security_code_from_symbol(symbol)?, symbol.clone());
        }

        let anchor = self.anchor.unwrap_or_else(|| Utc::now().date_naive());
        let window = business_day_window(anchor, self.search_days);
        let total_days = window.len();

        let mut found: HashMap<String, FilingDocument> = HashMap::new();
        let mut days_scanned = 0;

        let mut chunks = window.chunks(DATE_CHUNK).peekable();
        while let Some(chunk) = chunks.next() {
            let per_date =
                join_all(chunk.iter().map(|d| api::documents_for_date(&self.client, *d))).await;
            days_scanned += chunk.len();

            for (date, docs) in chunk.iter().zip(per_date) {
                for raw in docs {
                    let Some(code) = raw.sec_code.clone() else {
                        continue;
                    };
                    let Some(symbol) = pending.get(&code).cloned() else {
                        continue;
                    };
                    if let Some(doc) = qualifying_document(raw, &code, *date) {
                        found.insert(symbol, doc);
                        pending.remove(&code);
                    }
                }
            }

            if let Some(progress) = &self.progress {
                progress(days_scanned, total_days, found.len());
            }
            if pending.is_empty() {
                break;
            }
            if chunks.peek().is_some() {
                tokio::time::sleep(self.chunk_pause).await;
            }
        }
        Ok(found)
    }
}
