use chrono::NaiveDate;

use super::wire::{DocumentsEnvelope, RawDocument};
use crate::core::{EdinetClient, EdinetError, net};

/// Fetch one date's disclosure index.
///
/// Failures (non-200, timeout, malformed JSON) are swallowed as "zero
/// documents that day": a transient failure on one date must not abort a
/// whole discovery window.
pub(crate) async fn documents_for_date(client: &EdinetClient, date: NaiveDate) -> Vec<RawDocument> {
    match try_documents_for_date(client, date).await {
        Ok(docs) => docs,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(%date, error = %_e, "EDINET index fetch failed; treating as empty");
            Vec::new()
        }
    }
}

async fn try_documents_for_date(
    client: &EdinetClient,
    date: NaiveDate,
) -> Result<Vec<RawDocument>, EdinetError> {
    let mut url = client.base_documents().clone();
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("date", &date.format("%Y-%m-%d").to_string());
        // type=2 restricts the index to documents with attachments.
        qp.append_pair("type", "2");
        qp.append_pair("Subscription-Key", client.api_key());
    }

    let resp = client.http().get(url).send().await?;
    let resp = net::expect_success(resp)?;
    let env: DocumentsEnvelope = serde_json::from_str(&resp.text().await?)?;
    Ok(env.results.unwrap_or_default())
}
