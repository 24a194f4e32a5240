//! Filing archive download.

use reqwest::header::CONTENT_TYPE;

use crate::core::{EdinetClient, EdinetError};

/// Fetch the XBRL ZIP package for a discovered document.
///
/// Returns `Ok(None)` on a non-200 status or when EDINET answers with an
/// `application/json` body, its way of signaling "no file" instead of a
/// 404. No retry is performed at this layer; retry policy, if any,
/// belongs to the caller.
///
/// # Errors
///
/// Returns an error only for transport-level failures (connection,
/// timeout) or an invalid `doc_id` URL.
pub async fn fetch_archive(
    client: &EdinetClient,
    doc_id: &str,
) -> Result<Option<Vec<u8>>, EdinetError> {
    let mut url = client.base_archive().join(doc_id)?;
    {
        let mut qp = url.query_pairs_mut();
        // type=1 selects the XBRL package.
        qp.append_pair("type", "1");
        qp.append_pair("Subscription-Key", client.api_key());
    }

    let resp = client.http().get(url).send().await?;
    if !resp.status().is_success() {
        return Ok(None);
    }
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if is_json {
        return Ok(None);
    }

    Ok(Some(resp.bytes().await?.to_vec()))
}
