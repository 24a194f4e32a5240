//! High-level per-symbol facade.

use std::time::Duration;

use chrono::NaiveDate;

use crate::core::models::FilingDocument;
use crate::core::{EdinetClient, EdinetError};
use crate::financials::{FinancialStatements, FinancialsBuilder, format_financial_summary};
use crate::float::{FloatBuilder, FloatingRatio};
use crate::search::SearchBuilder;

/// A convenience facade aggregating the per-surface builders for one
/// ticker symbol (`"NNNN.T"` format).
#[derive(Debug, Clone)]
pub struct Ticker {
    client: EdinetClient,
    symbol: String,
    search_days: Option<usize>,
    pause: Option<Duration>,
    anchor: Option<NaiveDate>,
}

impl Ticker {
    /// Creates a new `Ticker` for a given symbol.
    pub fn new(client: &EdinetClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            search_days: None,
            pause: None,
            anchor: None,
        }
    }

    /// Number of business days discovery scans for every method on this
    /// facade.
    #[must_use]
    pub const fn search_days(mut self, days: usize) -> Self {
        self.search_days = Some(days);
        self
    }

    /// Pause between pipeline phases for every method on this facade.
    #[must_use]
    pub const fn pause(mut self, pause: Duration) -> Self {
        self.pause = Some(pause);
        self
    }

    /// Anchor every discovery scan at a fixed date instead of today.
    #[must_use]
    pub const fn anchor(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    /// The ticker symbol this facade queries.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns a `SearchBuilder` for this symbol.
    #[must_use]
    pub fn search_builder(&self) -> SearchBuilder {
        let mut b = SearchBuilder::new(&self.client, &self.symbol);
        if let Some(days) = self.search_days {
            b = b.search_days(days);
        }
        if let Some(anchor) = self.anchor {
            b = b.anchor(anchor);
        }
        b
    }

    /// Locates the most recent qualifying annual report.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed symbol; "no filing found" is
    /// `Ok(None)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn latest_filing(&self) -> Result<Option<FilingDocument>, EdinetError> {
        self.search_builder().fetch().await
    }

    /// Returns a `FloatBuilder` for this symbol.
    #[must_use]
    pub fn float_builder(&self) -> FloatBuilder {
        let mut b = FloatBuilder::new(&self.client, &self.symbol);
        if let Some(days) = self.search_days {
            b = b.search_days(days);
        }
        if let Some(pause) = self.pause {
            b = b.pause(pause);
        }
        if let Some(anchor) = self.anchor {
            b = b.anchor(anchor);
        }
        b
    }

    /// Estimates the floating-share ratio from the latest annual report.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed symbol or a transport failure;
    /// "nothing extractable" is `Ok(None)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn floating_ratio(&self) -> Result<Option<FloatingRatio>, EdinetError> {
        self.float_builder().fetch().await
    }

    /// Returns a `FinancialsBuilder` for this symbol.
    #[must_use]
    pub fn financials_builder(&self) -> FinancialsBuilder {
        let mut b = FinancialsBuilder::new(&self.client, &self.symbol);
        if let Some(days) = self.search_days {
            b = b.search_days(days);
        }
        if let Some(pause) = self.pause {
            b = b.pause(pause);
        }
        if let Some(anchor) = self.anchor {
            b = b.anchor(anchor);
        }
        b
    }

    /// Extracts financial-statement line items from the latest annual
    /// report.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed symbol or a transport failure;
    /// "nothing extractable" is `Ok(None)`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn financials(&self) -> Result<Option<FinancialStatements>, EdinetError> {
        self.financials_builder().fetch().await
    }

    /// Extracts financials and renders the Japanese summary text block.
    ///
    /// # Errors
    ///
    /// Same conditions as [`financials`](Self::financials).
    pub async fn financial_summary(&self) -> Result<Option<String>, EdinetError> {
        Ok(self
            .financials()
            .await?
            .map(|f| format_financial_summary(&f)))
    }
}
