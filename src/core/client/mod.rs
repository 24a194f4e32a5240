//! Public client surface + builder.
//!
//! EDINET authenticates with a subscription key passed as a query
//! parameter on every request; the key is required at `build()` time so a
//! misconfigured caller fails before any network call is made.

mod constants;

use crate::core::EdinetError;
use constants::{DEFAULT_BASE_ARCHIVE, DEFAULT_BASE_DOCUMENTS, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A configured EDINET API client, shared by all builders in the crate.
///
/// Cloning is cheap; the underlying HTTP client is reference-counted.
#[derive(Debug, Clone)]
pub struct EdinetClient {
    http: Client,
    base_documents: Url,
    base_archive: Url,
    api_key: String,
}

impl EdinetClient {
    /// Create a new builder.
    pub fn builder() -> EdinetClientBuilder {
        EdinetClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_documents(&self) -> &Url {
        &self.base_documents
    }
    pub(crate) fn base_archive(&self) -> &Url {
        &self.base_archive
    }
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
}

/* ----------------------- Builder ----------------------- */

/// Builds an [`EdinetClient`].
#[derive(Default)]
pub struct EdinetClientBuilder {
    api_key: Option<String>,
    user_agent: Option<String>,
    base_documents: Option<Url>,
    base_archive: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl EdinetClientBuilder {
    /// Set the EDINET API subscription key (required).
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the document index base (e.g., `https://api.edinet-fsa.go.jp/api/v2/documents.json`).
    pub fn base_documents(mut self, url: Url) -> Self {
        self.base_documents = Some(url);
        self
    }

    /// Override the document fetch base (e.g., `https://api.edinet-fsa.go.jp/api/v2/documents/`).
    pub fn base_archive(mut self, url: Url) -> Self {
        self.base_archive = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`EdinetError::MissingApiKey`] if no subscription key was
    /// provided, and [`EdinetError::Http`] if the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<EdinetClient, EdinetError> {
        let api_key = match self.api_key {
            Some(k) if !k.is_empty() => k,
            _ => return Err(EdinetError::MissingApiKey),
        };

        let base_documents = self
            .base_documents
            .unwrap_or(Url::parse(DEFAULT_BASE_DOCUMENTS)?);
        let base_archive = self.base_archive.unwrap_or(Url::parse(DEFAULT_BASE_ARCHIVE)?);

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(EdinetClient {
            http,
            base_documents,
            base_archive,
            api_key,
        })
    }
}
