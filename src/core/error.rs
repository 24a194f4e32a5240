use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// "Not found" outcomes (no qualifying filing, no XBRL in an archive, no
/// shareholder table) are deliberately *not* errors; they surface as
/// `Ok(None)` or empty collections at the call sites that produce them.
#[derive(Debug, Error)]
pub enum EdinetError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A JSON payload could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// No EDINET API subscription key was configured on the client.
    #[error("missing EDINET API subscription key")]
    MissingApiKey,

    /// A ticker symbol was not in the expected `NNNN.T` format.
    #[error("invalid ticker symbol: {0} (expected \"NNNN.T\")")]
    InvalidSymbol(String),
}
