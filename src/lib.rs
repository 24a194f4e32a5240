//! edinet-rs: EDINET client for Japanese regulatory filings.
//!
//! The crate discovers annual securities reports on EDINET (Japan's
//! electronic disclosure system), downloads their XBRL packages, and
//! extracts shareholder tables and financial-statement line items despite
//! taxonomy (JGAAP/IFRS) and layout drift across filers. On top of the
//! extractors sits a floating-share-ratio estimator with two
//! cross-checked computation strategies.
//!
//! Most use goes through [`Ticker`]:
//!
//! ```no_run
//! use edinet_rs::{EdinetClient, Ticker};
//!
//! # async fn run() -> Result<(), edinet_rs::EdinetError> {
//! let client = EdinetClient::builder().api_key("...").build()?;
//! let ticker = Ticker::new(&client, "7203.T");
//! if let Some(float) = ticker.floating_ratio().await? {
//!     println!("floating ratio: {:.1}%", float.floating_ratio * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod core;
pub mod download;
pub mod financials;
pub mod float;
pub mod search;
pub mod ticker;
pub mod xbrl;

pub use crate::core::client::{EdinetClient, EdinetClientBuilder};
pub use crate::core::error::EdinetError;
pub use crate::core::models::{ArchiveMember, FilingDocument};
pub use financials::{FinancialStatements, FinancialsBuilder, format_financial_summary};
pub use float::{FloatBatchBuilder, FloatBuilder, FloatCache, FloatingRatio};
pub use search::{BatchSearchBuilder, SearchBuilder};
pub use ticker::Ticker;
pub use xbrl::shareholders::MajorShareholder;
