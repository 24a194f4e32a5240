//! Financial-statement fetch surface.

mod report;

pub use crate::xbrl::financials::FinancialStatements;
pub use report::format_financial_summary;

use std::time::Duration;

use chrono::NaiveDate;

use crate::archive::find_xbrl_files;
use crate::core::{EdinetClient, EdinetError};
use crate::download::fetch_archive;
use crate::search::SearchBuilder;
use crate::xbrl::financials::extract_financial_statements;

/// Pause between the discovery and download phases.
const DEFAULT_PAUSE: Duration = Duration::from_millis(700);

/// A builder for fetching extracted financial statements for one symbol.
pub struct FinancialsBuilder {
    client: EdinetClient,
    symbol: String,
    search_days: Option<usize>,
    pause: Duration,
    anchor: Option<NaiveDate>,
}

impl FinancialsBuilder {
    /// Creates a new `FinancialsBuilder` for a given symbol.
    pub fn new(client: &EdinetClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            search_days: None,
            pause: DEFAULT_PAUSE,
            anchor: None,
        }
    }

    /// Number of business days the discovery scan covers.
    #[must_use]
    pub const fn search_days(mut self, days: usize) -> Self {
        self.search_days = Some(days);
        self
    }

    /// Pause between the discovery and download phases.
    #[must_use]
    pub const fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Anchor the discovery window at a fixed date instead of today.
    #[must_use]
    pub const fn anchor(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    /// Discover the latest annual report and extract its line items.
    ///
    /// Returns `Ok(None)` when no filing, no ZIP, or no readable XBRL is
    /// found. A result with most fields `None` is still a valid result:
    /// partial extraction is expected for some filing variants.
    ///
    /// # Errors
    ///
    /// Configuration problems ([`EdinetError::InvalidSymbol`]) and
    /// transport-level download failures.
    pub async fn fetch(&self) -> Result<Option<FinancialStatements>, EdinetError> {
        let mut search = SearchBuilder::new(&self.client, &self.symbol);
        if let Some(days) = self.search_days {
            search = search.search_days(days);
        }
        if let Some(anchor) = self.anchor {
            search = search.anchor(anchor);
        }
        let Some(doc) = search.fetch().await? else {
            return Ok(None);
        };

        tokio::time::sleep(self.pause).await;

        let Some(zip_bytes) = fetch_archive(&self.client, &doc.doc_id).await? else {
            return Ok(None);
        };
        let files = find_xbrl_files(&zip_bytes);
        if files.is_empty() {
            return Ok(None);
        }

        let mut financials = extract_financial_statements(&files);
        financials.doc_id = doc.doc_id;
        financials.filer_name = doc.filer_name;
        financials.filing_date = doc.filing_date;
        Ok(Some(financials))
    }
}
