//! Floating-share-ratio estimation.
//!
//! Orchestrates discover, download, extract, and ratio computation. Two
//! independent algorithms are tried in order: the published ratio column
//! first (EDINET's "percentage of shares" is typically already net of
//! treasury shares, so no unit reconciliation is needed), then a
//! share-count fallback when the ratio column is unusable.

mod model;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use tokio::sync::Mutex;

pub use model::FloatingRatio;

use crate::archive::find_xbrl_files;
use crate::core::models::FilingDocument;
use crate::core::{EdinetClient, EdinetError};
use crate::download::fetch_archive;
use crate::search::{BatchSearchBuilder, Progress, SearchBuilder};
use crate::xbrl::shareholders::{
    MajorShareholder, extract_major_shareholders, extract_total_shares, extract_treasury_shares,
};

/// Pause between discovery and download, and between batch downloads.
const DEFAULT_PAUSE: Duration = Duration::from_millis(700);
/// Concurrent downloads in a batch run.
const DEFAULT_DOWNLOAD_CONCURRENCY: usize = 3;

/// Write-through sink for computed results.
///
/// The crate owns no persistence; external TTL caches (file, database)
/// implement this and receive every successful computation. Failures to
/// persist are the implementor's concern; the estimator does not depend
/// on cache state for correctness.
#[async_trait]
pub trait FloatCache: Send + Sync {
    /// Store one computed result.
    async fn put(&self, symbol: &str, result: &FloatingRatio);
}

/* ---------------- single-symbol estimator ---------------- */

/// A builder for estimating the floating-share ratio of one symbol.
pub struct FloatBuilder {
    client: EdinetClient,
    symbol: String,
    search_days: Option<usize>,
    pause: Duration,
    anchor: Option<NaiveDate>,
    total_shares_hint: Option<u64>,
    cache: Option<Arc<dyn FloatCache>>,
}

impl FloatBuilder {
    /// Creates a new `FloatBuilder` for a given symbol.
    pub fn new(client: &EdinetClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            search_days: None,
            pause: DEFAULT_PAUSE,
            anchor: None,
            total_shares_hint: None,
            cache: None,
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

    /// Total issued shares from an external source (e.g., a market-data
    /// provider), used by the share-count method when the filing itself
    /// doesn't yield a total.
    #[must_use]
    pub const fn total_shares_hint(mut self, total: u64) -> Self {
        self.total_shares_hint = Some(total);
        self
    }

    /// Write every successful computation through to an external cache.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn FloatCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Run the full pipeline.
    ///
    /// Any stage finding nothing (no filing, no ZIP, no XBRL members, no
    /// shareholder table, no usable total) short-circuits to `Ok(None)`;
    /// there is no partial-success result at this level.
    ///
    /// # Errors
    ///
    /// Configuration problems ([`EdinetError::InvalidSymbol`]) and
    /// transport-level failures outside the swallowed discovery scan.
    pub async fn fetch(&self) -> Result<Option<FloatingRatio>, EdinetError> {
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

        let result = estimate_for_document(&self.client, &doc, self.total_shares_hint).await?;
        if let (Some(cache), Some(result)) = (&self.cache, &result) {
            cache.put(&self.symbol, result).await;
        }
        Ok(result)
    }
}

/* ---------------- batch estimator ---------------- */

/// A builder for estimating floating-share ratios for many symbols with
/// one shared discovery window and a bounded download pool.
pub struct FloatBatchBuilder {
    client: EdinetClient,
    symbols: Vec<String>,
    search_days: Option<usize>,
    concurrency: usize,
    pause: Duration,
    anchor: Option<NaiveDate>,
    cache: Option<Arc<dyn FloatCache>>,
    progress: Option<Progress>,
}

impl FloatBatchBuilder {
    /// Creates a new `FloatBatchBuilder` over the given symbols.
    pub fn new<I, S>(client: &EdinetClient, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            search_days: None,
            concurrency: DEFAULT_DOWNLOAD_CONCURRENCY,
            pause: DEFAULT_PAUSE,
            anchor: None,
            cache: None,
            progress: None,
        }
    }

    /// Number of business days the discovery scan covers.
    #[must_use]
    pub const fn search_days(mut self, days: usize) -> Self {
        self.search_days = Some(days);
        self
    }

    /// Concurrent archive downloads. Default: 3.
    #[must_use]
    pub const fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = workers;
        self
    }

    /// Pause each worker takes before every download.
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

    /// Write every successful computation through to an external cache.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn FloatCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Report discovery progress as `(days_scanned, total_days,
    /// symbols_found)`.
    #[must_use]
    pub fn progress(mut self, callback: Progress) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Discover all symbols, then download and extract with a bounded
    /// worker pool. Symbols with no filing or no extractable table are
    /// simply absent from the result map.
    ///
    /// # Errors
    ///
    /// Returns [`EdinetError::InvalidSymbol`] eagerly if any symbol is
    /// malformed. Per-symbol download/extraction failures are swallowed.
    pub async fn fetch(self) -> Result<HashMap<String, FloatingRatio>, EdinetError> {
        let mut search = BatchSearchBuilder::new(&self.client, self.symbols.clone());
        if let Some(days) = self.search_days {
            search = search.search_days(days);
        }
        if let Some(anchor) = self.anchor {
            search = search.anchor(anchor);
        }
        if let Some(progress) = self.progress {
            search = search.progress(progress);
        }
        let discovered = search.fetch().await?;

        // Workers pull jobs from a shared queue; each owns its own
        // result slot, merged at the end.
        let queue: Arc<Mutex<VecDeque<(String, FilingDocument)>>> =
            Arc::new(Mutex::new(discovered.into_iter().collect()));

        let workers = (0..self.concurrency.max(1)).map(|_| {
            let queue = Arc::clone(&queue);
            let client = self.client.clone();
            let cache = self.cache.clone();
            let pause = self.pause;
            async move {
                let mut slot = Vec::new();
                loop {
                    let job = queue.lock().await.pop_front();
                    let Some((symbol, doc)) = job else { break };
                    tokio::time::sleep(pause).await;
                    match estimate_for_document(&client, &doc, None).await {
                        Ok(Some(result)) => {
                            if let Some(cache) = &cache {
                                cache.put(&symbol, &result).await;
                            }
                            slot.push((symbol, result));
                        }
                        Ok(None) => {}
                        Err(_e) => {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(symbol, error = %_e, "float batch: download failed");
                        }
                    }
                }
                slot
            }
        });

        Ok(join_all(workers).await.into_iter().flatten().collect())
    }
}

/* ---------------- extraction + ratio computation ---------------- */

async fn estimate_for_document(
    client: &EdinetClient,
    doc: &FilingDocument,
    total_shares_hint: Option<u64>,
) -> Result<Option<FloatingRatio>, EdinetError> {
    let Some(zip_bytes) = fetch_archive(client, &doc.doc_id).await? else {
        return Ok(None);
    };
    let files = find_xbrl_files(&zip_bytes);
    if files.is_empty() {
        return Ok(None);
    }

    let mut holders = Vec::new();
    let mut treasury = 0;
    let mut total = None;
    for file in &files {
        if holders.is_empty() {
            holders = extract_major_shareholders(&file.content);
        }
        if treasury == 0 {
            treasury = extract_treasury_shares(&file.content);
        }
        if total.is_none() {
            total = extract_total_shares(&file.content);
        }
    }
    if holders.is_empty() {
        return Ok(None);
    }

    Ok(compute_ratio(doc, holders, treasury, total.or(total_shares_hint)))
}

/// The dual ratio algorithm: published-ratio sum first, share-count
/// fallback second.
fn compute_ratio(
    doc: &FilingDocument,
    holders: Vec<MajorShareholder>,
    treasury_shares: u64,
    total_shares: Option<u64>,
) -> Option<FloatingRatio> {
    let major_shareholder_shares: u64 = holders.iter().map(|h| h.shares).sum();

    // Treasury counts as fixed unless a shareholder row already names
    // the filer itself (self-holding listed as a major shareholder).
    let filer = doc.filer_name.to_lowercase();
    let self_listed = !filer.is_empty()
        && holders.iter().any(|h| h.name.to_lowercase().contains(&filer));
    let fixed_raw =
        major_shareholder_shares.saturating_add(if self_listed { 0 } else { treasury_shares });
    let fixed_shares = total_shares.map_or(fixed_raw, |t| fixed_raw.min(t));

    let ratio_sum: f64 = holders.iter().map(|h| h.ratio_pct).sum();
    let floating_ratio = if ratio_sum > 1.0 && ratio_sum <= 100.0 {
        (1.0 - ratio_sum / 100.0).max(0.0)
    } else {
        let total = total_shares.filter(|t| *t > 0)?;
        1.0 - fixed_shares as f64 / total as f64
    };

    Some(FloatingRatio {
        floating_ratio,
        major_shareholders: holders,
        major_shareholder_shares,
        treasury_shares,
        fixed_shares,
        total_shares,
        doc_id: doc.doc_id.clone(),
        filer_name: doc.filer_name.clone(),
        filing_date: doc.filing_date.clone(),
    })
}
